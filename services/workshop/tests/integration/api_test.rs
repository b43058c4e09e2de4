use axum::http::StatusCode;
use chrono::NaiveDate;
use serde_json::{Value, json};

use autofix_testing::seed;
use autofix_workshop::domain::repository::{
    ClientRepository, RepairOrderRepository, VehicleRepository,
};
use autofix_workshop::domain::types::{Client, RepairOrder, Vehicle};
use autofix_workshop::state::AppState;

use crate::helpers::test_server;

async fn seed_order(state: &AppState, master_id: i32) -> RepairOrder {
    let client = state
        .client_repo()
        .create(&Client {
            id: 0,
            full_name: "Кузнецов Андрей".into(),
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
            vin: "XTA21099912345678".into(),
        })
        .await
        .unwrap();
    state
        .repair_order_repo()
        .create(&RepairOrder {
            id: 0,
            master_id,
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
        .unwrap()
}

#[tokio::test]
async fn requests_without_identity_headers_are_unauthorized() {
    let (server, _state) = test_server().await;
    let response = server.get("/clients").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn warehouse_manager_cannot_reach_repair_orders() {
    let (server, _state) = test_server().await;
    let response = server
        .get("/repair-orders")
        .add_header("x-employee-id", "1")
        .add_header("x-employee-position", "WM")
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "ACCESS_DENIED");
}

#[tokio::test]
async fn validation_failures_carry_field_errors() {
    let (server, _state) = test_server().await;
    let response = server
        .post("/clients")
        .add_header("x-employee-id", "1")
        .add_header("x-employee-position", "SM")
        .json(&json!({ "full_name": "  ", "phone_number": "" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION_FAILED");
    assert_eq!(body["errors"]["full_name"][0], "Обязательное поле.");
    assert_eq!(body["errors"]["phone_number"][0], "Обязательное поле.");
}

#[tokio::test]
async fn service_manager_creates_and_lists_clients() {
    let (server, _state) = test_server().await;
    let created = server
        .post("/clients")
        .add_header("x-employee-id", "1")
        .add_header("x-employee-position", "SM")
        .json(&json!({
            "full_name": "Кузнецов Андрей",
            "phone_number": "+7 900 000-00-00"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["full_name"], "Кузнецов Андрей");

    let listed = server
        .get("/clients")
        .add_header("x-employee-id", "1")
        .add_header("x-employee-position", "SM")
        .await;
    listed.assert_status(StatusCode::OK);
    let clients: Value = listed.json();
    assert_eq!(clients.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn mechanics_only_see_their_own_orders() {
    let (server, state) = test_server().await;
    let mine = seed::employee(&state.db, "Петров", "ME", None).await;
    let other = seed::employee(&state.db, "Волков", "ME", None).await;
    let my_order = seed_order(&state, mine).await;
    let other_order = seed_order(&state, other).await;

    let own = server
        .get(&format!("/repair-orders/{}", my_order.id))
        .add_header("x-employee-id", mine.to_string())
        .add_header("x-employee-position", "ME")
        .await;
    own.assert_status(StatusCode::OK);
    let body: Value = own.json();
    // The field map shows the mechanic what the form will let them touch.
    assert_eq!(body["editable_fields"]["finish_date"], true);
    assert_eq!(body["editable_fields"]["is_paid"], false);
    assert_eq!(body["total_cost"], "0");

    let foreign = server
        .get(&format!("/repair-orders/{}", other_order.id))
        .add_header("x-employee-id", mine.to_string())
        .add_header("x-employee-position", "ME")
        .await;
    foreign.assert_status(StatusCode::FORBIDDEN);

    let listed = server
        .get("/repair-orders")
        .add_header("x-employee-id", mine.to_string())
        .add_header("x-employee-position", "ME")
        .await;
    listed.assert_status(StatusCode::OK);
    let orders: Value = listed.json();
    let ids: Vec<i64> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|order| order["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![my_order.id as i64]);
}

#[tokio::test]
async fn only_the_administrator_manages_employees() {
    let (server, state) = test_server().await;
    seed::employee(&state.db, "Петров", "ME", None).await;

    let denied = server
        .get("/employees")
        .add_header("x-employee-id", "1")
        .add_header("x-employee-position", "ME")
        .await;
    denied.assert_status(StatusCode::FORBIDDEN);

    let allowed = server
        .get("/employees")
        .add_header("x-employee-id", "1")
        .add_header("x-employee-position", "AD")
        .await;
    allowed.assert_status(StatusCode::OK);
    let employees: Value = allowed.json();
    assert_eq!(employees.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cashier_edits_reach_only_the_payment_flag() {
    let (server, state) = test_server().await;
    let master = seed::employee(&state.db, "Петров", "ME", None).await;
    let order = seed_order(&state, master).await;

    let response = server
        .put(&format!("/repair-orders/{}", order.id))
        .add_header("x-employee-id", "9")
        .add_header("x-employee-position", "CA")
        .json(&json!({
            "master_id": order.master_id,
            "client_id": order.client_id,
            "vehicle_id": order.vehicle_id,
            "vehicle_mileage": 1,
            "finish_date": "2024-03-20",
            "is_paid": true,
            "complaints": "переписано"
        }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    // Unrestricted text fields follow the caller, restricted ones do not.
    assert_eq!(body["is_paid"], true);
    assert_eq!(body["complaints"], "переписано");
    assert_eq!(body["vehicle_mileage"], 50_000);
    assert_eq!(body["finish_date"], Value::Null);
}
