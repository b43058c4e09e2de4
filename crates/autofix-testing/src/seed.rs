//! Row seed helpers. Each inserts one row directly through the entity
//! layer and returns its id. Rows land in the database only — callers that
//! exercise the search index must create records through the repositories.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};

use autofix_workshop_schema as schema;

pub async fn employee(
    db: &DatabaseConnection,
    last_name: &str,
    position: &str,
    end_date: Option<NaiveDate>,
) -> i32 {
    let row = schema::employees::ActiveModel {
        first_name: Set("Иван".into()),
        last_name: Set(last_name.into()),
        patronymic: Set("Иванович".into()),
        passport_info: Set("4500 123456".into()),
        position: Set(position.into()),
        join_date: Set(NaiveDate::from_ymd_opt(2023, 1, 9).unwrap()),
        end_date: Set(end_date),
        end_reason: Set(end_date.map(|_| "по собственному желанию").unwrap_or("").into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed employee");
    row.id
}

pub async fn client(db: &DatabaseConnection, full_name: &str) -> i32 {
    let row = schema::clients::ActiveModel {
        full_name: Set(full_name.into()),
        phone_number: Set("+7 900 000-00-00".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed client");
    row.id
}

pub async fn vehicle(db: &DatabaseConnection, manufacturer: &str, model: &str) -> i32 {
    let row = schema::vehicles::ActiveModel {
        manufacturer: Set(manufacturer.into()),
        model: Set(model.into()),
        year: Set(2019),
        license_number: Set("А123ВС77".into()),
        vin: Set("XTA21099912345678".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed vehicle");
    row.id
}

pub async fn service(db: &DatabaseConnection, name: &str, price: Decimal) -> i32 {
    let row = schema::services::ActiveModel {
        name: Set(name.into()),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed service");
    row.id
}

pub async fn repair_order(
    db: &DatabaseConnection,
    master_id: i32,
    client_id: i32,
    vehicle_id: i32,
) -> i32 {
    let row = schema::repair_orders::ActiveModel {
        master_id: Set(master_id),
        client_id: Set(client_id),
        vehicle_id: Set(vehicle_id),
        vehicle_mileage: Set(50_000),
        start_date: Set(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        is_cancelled: Set(false),
        complaints: Set("стук в подвеске".into()),
        diagnostic_results: Set(String::new()),
        comments: Set(String::new()),
        is_paid: Set(false),
        is_warranty: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed repair order");
    row.id
}

pub async fn provider(db: &DatabaseConnection, name: &str) -> i32 {
    let row = schema::warehouse_providers::ActiveModel {
        name: Set(name.into()),
        contact_info: Set("sales@example.com".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed provider");
    row.id
}

pub async fn item(db: &DatabaseConnection, name: &str, price: Decimal) -> i32 {
    let row = schema::warehouse_items::ActiveModel {
        name: Set(name.into()),
        item_type: Set("расходник".into()),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed item");
    row.id
}

pub async fn restock(db: &DatabaseConnection, item_id: i32, provider_id: i32, amount: i32) -> i32 {
    let row = schema::warehouse_restocks::ActiveModel {
        item_id: Set(item_id),
        provider_id: Set(provider_id),
        amount: Set(amount),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed restock");
    row.id
}

pub async fn warehouse_use(
    db: &DatabaseConnection,
    repair_order_id: i32,
    item_id: i32,
    amount: i32,
) -> i32 {
    let row = schema::warehouse_uses::ActiveModel {
        repair_order_id: Set(repair_order_id),
        item_id: Set(item_id),
        amount: Set(amount),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed warehouse use");
    row.id
}

pub async fn service_history(db: &DatabaseConnection, repair_order_id: i32, service_id: i32) -> i32 {
    let row = schema::service_histories::ActiveModel {
        repair_order_id: Set(repair_order_id),
        service_id: Set(service_id),
        finish_date: Set(None),
        comments: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to seed service history");
    row.id
}
