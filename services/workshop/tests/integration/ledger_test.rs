use rust_decimal::Decimal;

use autofix_testing::seed;
use autofix_workshop::domain::repository::{RestockRepository, StockLedger, UseRepository};
use autofix_workshop::domain::types::{WarehouseRestock, WarehouseUse};
use autofix_workshop::error::WorkshopError;

use crate::helpers::test_state;

#[tokio::test]
async fn quantity_is_restocks_minus_uses() {
    let state = test_state().await;
    let db = &state.db;
    let provider = seed::provider(db, "АвтоТрейд").await;
    let item = seed::item(db, "Масло 5W-40", Decimal::new(120_000, 2)).await;
    let master = seed::employee(db, "Петров", "ME", None).await;
    let client = seed::client(db, "Сидоров Павел").await;
    let vehicle = seed::vehicle(db, "Lada", "Vesta").await;
    let order = seed::repair_order(db, master, client, vehicle).await;

    seed::restock(db, item, provider, 5).await;
    seed::restock(db, item, provider, 7).await;
    seed::warehouse_use(db, order, item, 4).await;

    let repo = state.warehouse_repo();
    assert_eq!(repo.current_quantity(item, None, None).await.unwrap(), 8);
}

#[tokio::test]
async fn overdraw_reports_needed_and_available() {
    let state = test_state().await;
    let db = &state.db;
    let provider = seed::provider(db, "АвтоТрейд").await;
    let item = seed::item(db, "Фильтр масляный", Decimal::new(35_000, 2)).await;
    let master = seed::employee(db, "Петров", "ME", None).await;
    let client = seed::client(db, "Сидоров Павел").await;
    let vehicle = seed::vehicle(db, "Lada", "Vesta").await;
    let order = seed::repair_order(db, master, client, vehicle).await;

    seed::restock(db, item, provider, 4).await;

    let repo = state.warehouse_repo();
    let result = UseRepository::create(
        &repo,
        &WarehouseUse {
            id: 0,
            repair_order_id: order,
            item_id: item,
            amount: 10,
        },
    )
    .await;
    match result {
        Err(WorkshopError::Validation(errors)) => {
            assert_eq!(
                errors.0["amount"][0],
                "Недостаточно единиц расходника. Требуется еще 6 шт., имеется: 4 шт."
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    // Nothing was written.
    assert_eq!(repo.current_quantity(item, None, None).await.unwrap(), 4);
}

#[tokio::test]
async fn resaving_a_row_excludes_its_own_amount() {
    let state = test_state().await;
    let db = &state.db;
    let provider = seed::provider(db, "АвтоТрейд").await;
    let item = seed::item(db, "Антифриз", Decimal::new(60_000, 2)).await;
    let master = seed::employee(db, "Петров", "ME", None).await;
    let client = seed::client(db, "Сидоров Павел").await;
    let vehicle = seed::vehicle(db, "Lada", "Vesta").await;
    let order = seed::repair_order(db, master, client, vehicle).await;

    let restock_id = seed::restock(db, item, provider, 4).await;
    let use_id = seed::warehouse_use(db, order, item, 2).await;
    let repo = state.warehouse_repo();

    // Re-saving the restock with its current amount is always legal.
    RestockRepository::update(
        &repo,
        &WarehouseRestock {
            id: restock_id,
            item_id: item,
            provider_id: provider,
            amount: 4,
        },
    )
    .await
    .unwrap();

    // Shrinking it below what is already consumed is not.
    let result = RestockRepository::update(
        &repo,
        &WarehouseRestock {
            id: restock_id,
            item_id: item,
            provider_id: provider,
            amount: 1,
        },
    )
    .await;
    assert!(matches!(result, Err(WorkshopError::Validation(_))));

    // A use may grow up to the stock that excludes its own prior amount.
    UseRepository::update(
        &repo,
        &WarehouseUse {
            id: use_id,
            repair_order_id: order,
            item_id: item,
            amount: 4,
        },
    )
    .await
    .unwrap();
    assert_eq!(repo.current_quantity(item, None, None).await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_a_restock_must_not_overdraw() {
    let state = test_state().await;
    let db = &state.db;
    let provider = seed::provider(db, "АвтоТрейд").await;
    let item = seed::item(db, "Колодки", Decimal::new(250_000, 2)).await;
    let master = seed::employee(db, "Петров", "ME", None).await;
    let client = seed::client(db, "Сидоров Павел").await;
    let vehicle = seed::vehicle(db, "Lada", "Vesta").await;
    let order = seed::repair_order(db, master, client, vehicle).await;

    let used_up = seed::restock(db, item, provider, 5).await;
    seed::warehouse_use(db, order, item, 3).await;
    let spare = seed::restock(db, item, provider, 1).await;

    let repo = state.warehouse_repo();
    let result = RestockRepository::delete(&repo, used_up).await;
    assert!(matches!(result, Err(WorkshopError::Validation(_))));

    // The spare delivery is not yet consumed and may go.
    RestockRepository::delete(&repo, spare).await.unwrap();
    assert_eq!(repo.current_quantity(item, None, None).await.unwrap(), 2);
}
