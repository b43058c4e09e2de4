use chrono::NaiveDate;

use autofix_domain::access::EntityKind;
use autofix_testing::seed;
use autofix_workshop::domain::repository::{
    ClientRepository, RepairOrderRepository, SearchPort, VehicleRepository,
};
use autofix_workshop::domain::types::{Client, RepairOrder, Vehicle};

use crate::helpers::test_state;

async fn seed_order(
    state: &autofix_workshop::state::AppState,
    client_name: &str,
    vin: &str,
) -> (Client, RepairOrder) {
    let master = seed::employee(&state.db, "Петров", "ME", None).await;
    let client = state
        .client_repo()
        .create(&Client {
            id: 0,
            full_name: client_name.into(),
            phone_number: "+7 900 000-00-00".into(),
        })
        .await
        .unwrap();
    let vehicle = state
        .vehicle_repo()
        .create(&Vehicle {
            id: 0,
            manufacturer: "Lada".into(),
            model: "Vesta".into(),
            year: 2019,
            license_number: "А123ВС77".into(),
            vin: vin.into(),
        })
        .await
        .unwrap();
    let order = state
        .repair_order_repo()
        .create(&RepairOrder {
            id: 0,
            master_id: master,
            client_id: client.id,
            vehicle_id: vehicle.id,
            vehicle_mileage: 50_000,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            finish_until: None,
            finish_date: None,
            is_cancelled: false,
            complaints: "стук в подвеске".into(),
            diagnostic_results: String::new(),
            comments: String::new(),
            is_paid: false,
            is_warranty: false,
        })
        .await
        .unwrap();
    (client, order)
}

#[tokio::test]
async fn orders_are_searchable_by_client_name() {
    let state = test_state().await;
    let (_, order) = seed_order(&state, "Кузнецов Андрей", "XTA21099912345678").await;

    let hits = state
        .search_index()
        .search(EntityKind::RepairOrder, "Кузнецов")
        .await
        .unwrap();
    assert_eq!(hits, vec![order.id]);
}

#[tokio::test]
async fn renaming_a_client_reindexes_its_orders() {
    let state = test_state().await;
    let (mut client, order) = seed_order(&state, "Кузнецов Андрей", "XTA21099912345678").await;
    let (_, other_order) = seed_order(&state, "Лебедев Олег", "WVWZZZ1JZ3W0000001").await;

    client.full_name = "Смирнов Андрей".into();
    state.client_repo().update(&client).await.unwrap();

    let index = state.search_index();
    assert_eq!(
        index
            .search(EntityKind::RepairOrder, "Смирнов")
            .await
            .unwrap(),
        vec![order.id]
    );
    assert!(
        index
            .search(EntityKind::RepairOrder, "Кузнецов")
            .await
            .unwrap()
            .is_empty()
    );
    // The unrelated order keeps its own projection.
    assert_eq!(
        index
            .search(EntityKind::RepairOrder, "Лебедев")
            .await
            .unwrap(),
        vec![other_order.id]
    );
}

#[tokio::test]
async fn soft_deleting_removes_from_the_index() {
    let state = test_state().await;
    let (client, _) = seed_order(&state, "Кузнецов Андрей", "XTA21099912345678").await;

    let index = state.search_index();
    assert_eq!(
        index.search(EntityKind::Client, "Кузнецов").await.unwrap(),
        vec![client.id]
    );

    state.client_repo().delete(client.id).await.unwrap();
    assert!(
        index
            .search(EntityKind::Client, "Кузнецов")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn blank_queries_match_nothing() {
    let state = test_state().await;
    seed_order(&state, "Кузнецов Андрей", "XTA21099912345678").await;

    let hits = state
        .search_index()
        .search(EntityKind::RepairOrder, "   ")
        .await
        .unwrap();
    assert!(hits.is_empty());
}
