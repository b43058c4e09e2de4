use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use autofix_domain::pagination::PageRequest;
use autofix_testing::seed;
use autofix_workshop::domain::repository::{
    EmployeeRepository, RepairOrderRepository, ServiceRepository,
};
use autofix_workshop::domain::types::EmployeeFilter;
use autofix_workshop::error::WorkshopError;
use autofix_workshop_schema::{service_histories, services, warehouse_uses};

use crate::helpers::test_state;

#[tokio::test]
async fn first_delete_hides_second_delete_purges() {
    let state = test_state().await;
    let service = seed::service(&state.db, "Замена масла", Decimal::new(150_000, 2)).await;
    let repo = state.service_repo();

    repo.delete(service).await.unwrap();
    // Soft-deleted rows are invisible through the repository.
    assert!(repo.find(service).await.unwrap().is_none());
    assert!(
        repo.list(None, PageRequest::default())
            .await
            .unwrap()
            .is_empty()
    );

    repo.delete(service).await.unwrap();
    let remaining = services::Entity::find_by_id(service)
        .count(&state.db)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // A third delete has nothing to act on.
    assert!(matches!(
        repo.delete(service).await,
        Err(WorkshopError::NotFound)
    ));
}

#[tokio::test]
async fn purge_is_blocked_while_references_exist() {
    let state = test_state().await;
    let db = &state.db;
    let service = seed::service(db, "Диагностика", Decimal::new(50_000, 2)).await;
    let master = seed::employee(db, "Петров", "ME", None).await;
    let client = seed::client(db, "Сидоров Павел").await;
    let vehicle = seed::vehicle(db, "Lada", "Vesta").await;
    let order = seed::repair_order(db, master, client, vehicle).await;
    let history = seed::service_history(db, order, service).await;

    let repo = state.service_repo();
    repo.delete(service).await.unwrap();
    assert!(matches!(
        repo.delete(service).await,
        Err(WorkshopError::ReferentialBlock)
    ));

    // Once the referencing line is gone the purge goes through.
    service_histories::Entity::delete_by_id(history)
        .exec(db)
        .await
        .unwrap();
    repo.delete(service).await.unwrap();
    assert_eq!(
        services::Entity::find_by_id(service).count(db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn deleting_an_order_takes_its_lines_along() {
    let state = test_state().await;
    let db = &state.db;
    let service = seed::service(db, "Замена масла", Decimal::new(150_000, 2)).await;
    let provider = seed::provider(db, "АвтоТрейд").await;
    let item = seed::item(db, "Масло 5W-40", Decimal::new(120_000, 2)).await;
    let master = seed::employee(db, "Петров", "ME", None).await;
    let client = seed::client(db, "Сидоров Павел").await;
    let vehicle = seed::vehicle(db, "Lada", "Vesta").await;
    let order = seed::repair_order(db, master, client, vehicle).await;
    seed::service_history(db, order, service).await;
    seed::restock(db, item, provider, 5).await;
    seed::warehouse_use(db, order, item, 2).await;

    let repo = state.repair_order_repo();
    repo.delete(order).await.unwrap();

    assert!(repo.find(order).await.unwrap().is_none());
    assert_eq!(
        service_histories::Entity::find()
            .filter(service_histories::Column::RepairOrderId.eq(order))
            .count(db)
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        warehouse_uses::Entity::find()
            .filter(warehouse_uses::Column::RepairOrderId.eq(order))
            .count(db)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn ended_employees_hide_from_the_default_listing() {
    let state = test_state().await;
    let db = &state.db;
    seed::employee(db, "Петров", "ME", None).await;
    let ended = seed::employee(
        db,
        "Волков",
        "ME",
        NaiveDate::from_ymd_opt(2024, 2, 1),
    )
    .await;

    let repo = state.employee_repo();
    let active = repo
        .list(EmployeeFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].last_name, "Петров");

    let everyone = repo
        .list(
            EmployeeFilter {
                show_removed: true,
                matching_ids: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(everyone.len(), 2);

    // The ended employee is still reachable directly.
    let employee = repo.find(ended).await.unwrap().unwrap();
    assert!(!employee.is_active());
}

#[tokio::test]
async fn total_cost_sums_the_order_service_prices() {
    let state = test_state().await;
    let db = &state.db;
    let oil = seed::service(db, "Замена масла", Decimal::new(150_000, 2)).await;
    let diag = seed::service(db, "Диагностика", Decimal::new(50_000, 2)).await;
    let master = seed::employee(db, "Петров", "ME", None).await;
    let client = seed::client(db, "Сидоров Павел").await;
    let vehicle = seed::vehicle(db, "Lada", "Vesta").await;
    let order = seed::repair_order(db, master, client, vehicle).await;
    seed::service_history(db, order, oil).await;
    seed::service_history(db, order, diag).await;

    let total = state.repair_order_repo().total_cost(order).await.unwrap();
    assert_eq!(total, Decimal::new(200_000, 2));
}
