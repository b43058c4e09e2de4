//! Entity validation. Every rule appends to the same `ValidationErrors`
//! map so the caller sees all violations at once.

use chrono::NaiveDate;

use autofix_domain::validation::{DATE_FORMAT, ValidationErrors};

use crate::domain::types::{
    Client, Employee, RepairOrder, Service, ServiceHistory, Vehicle, WarehouseItem,
    WarehouseProvider,
};

const REQUIRED: &str = "Обязательное поле.";

fn require(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
    }
}

pub fn validate_employee(employee: &Employee) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "first_name", &employee.first_name);
    require(&mut errors, "last_name", &employee.last_name);
    require(&mut errors, "passport_info", &employee.passport_info);
    if !employee.end_reason.is_empty() && employee.end_date.is_none() {
        errors.add(
            "end_reason",
            "Причина увольнения не может быть указана без даты.",
        );
    }
    if let Some(end_date) = employee.end_date
        && end_date < employee.join_date
    {
        errors.add("end_date", "Дата увольнения не может раньше даты наема.");
    }
    errors.into_result()
}

pub fn validate_service(service: &Service) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "name", &service.name);
    if service.price.is_sign_negative() {
        errors.add("price", "Цена не может быть отрицательной.");
    }
    errors.into_result()
}

pub fn validate_client(client: &Client) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "full_name", &client.full_name);
    require(&mut errors, "phone_number", &client.phone_number);
    errors.into_result()
}

pub fn validate_vehicle(vehicle: &Vehicle) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "manufacturer", &vehicle.manufacturer);
    require(&mut errors, "model", &vehicle.model);
    require(&mut errors, "license_number", &vehicle.license_number);
    if !(1900..=2100).contains(&vehicle.year) {
        errors.add(
            "year",
            "Год выпуска должен быть в диапазоне от 1900 до 2100.",
        );
    }
    if vehicle.vin.chars().count() != 17 {
        errors.add("vin", "VIN должен состоять из 17 символов.");
    }
    errors.into_result()
}

/// Validates a repair order and applies the warranty payment derivation:
/// a warranty order counts as paid exactly when it is finished and not
/// cancelled, regardless of the stored flag.
pub fn validate_repair_order(order: &mut RepairOrder) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if order.vehicle_mileage < 0 {
        errors.add("vehicle_mileage", "Пробег не может быть отрицательным.");
    }
    if let Some(finish_until) = order.finish_until
        && finish_until < order.start_date
    {
        errors.add(
            "finish_until",
            "Дата запланированного завершения заявки не может раньше даты начала.",
        );
    }
    if order.is_cancelled && order.finish_date.is_none() {
        errors.add(
            "is_cancelled",
            "Для отмены заявки на ремонт требуется дата завершения.",
        );
    }
    if let Some(finish_date) = order.finish_date
        && finish_date < order.start_date
    {
        errors.add(
            "finish_date",
            "Дата завершения заявки на ремонт не может раньше даты начала.",
        );
    }
    if order.is_warranty {
        order.is_paid = order.finish_date.is_some() && !order.is_cancelled;
    }
    errors.into_result()
}

pub fn validate_provider(provider: &WarehouseProvider) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "name", &provider.name);
    require(&mut errors, "contact_info", &provider.contact_info);
    errors.into_result()
}

pub fn validate_item(item: &WarehouseItem) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    require(&mut errors, "name", &item.name);
    require(&mut errors, "item_type", &item.item_type);
    if item.price.is_sign_negative() {
        errors.add("price", "Цена не может быть отрицательной.");
    }
    errors.into_result()
}

/// Restock and use rows must move at least one unit.
pub fn validate_amount(amount: i32) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if amount < 1 {
        errors.add("amount", "Количество должно быть не менее 1.");
    }
    errors.into_result()
}

pub fn validate_service_history(
    history: &ServiceHistory,
    order_start: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(finish_date) = history.finish_date
        && finish_date < order_start
    {
        errors.add(
            "finish_date",
            format!(
                "Дата выполнения услуги не может раньше даты заявки: {}.",
                order_start.format(DATE_FORMAT)
            ),
        );
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofix_domain::position::Position;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee() -> Employee {
        Employee {
            id: 1,
            first_name: "Иван".into(),
            last_name: "Петров".into(),
            patronymic: "Сергеевич".into(),
            passport_info: "1234 567890".into(),
            position: Position::Mechanic,
            join_date: date(2023, 1, 10),
            end_date: None,
            end_reason: String::new(),
        }
    }

    fn order() -> RepairOrder {
        RepairOrder {
            id: 1,
            master_id: 1,
            client_id: 1,
            vehicle_id: 1,
            vehicle_mileage: 100_000,
            start_date: date(2024, 3, 1),
            finish_until: Some(date(2024, 3, 15)),
            finish_date: None,
            is_cancelled: false,
            complaints: "стук".into(),
            diagnostic_results: String::new(),
            comments: String::new(),
            is_paid: false,
            is_warranty: false,
        }
    }

    #[test]
    fn end_reason_without_end_date_is_rejected() {
        let mut e = employee();
        e.end_reason = "по собственному желанию".into();
        let errors = validate_employee(&e).unwrap_err();
        assert_eq!(
            errors.0["end_reason"],
            vec!["Причина увольнения не может быть указана без даты."]
        );
    }

    #[test]
    fn end_date_before_join_date_is_rejected() {
        let mut e = employee();
        e.end_date = Some(date(2022, 12, 31));
        let errors = validate_employee(&e).unwrap_err();
        assert!(errors.0.contains_key("end_date"));
    }

    #[test]
    fn ended_employee_with_reason_passes() {
        let mut e = employee();
        e.end_date = Some(date(2024, 6, 1));
        e.end_reason = "переезд".into();
        assert!(validate_employee(&e).is_ok());
    }

    #[test]
    fn finish_until_before_start_is_rejected() {
        let mut o = order();
        o.finish_until = Some(date(2024, 2, 28));
        let errors = validate_repair_order(&mut o).unwrap_err();
        assert!(errors.0.contains_key("finish_until"));
    }

    #[test]
    fn cancelled_without_finish_date_is_rejected() {
        let mut o = order();
        o.is_cancelled = true;
        let errors = validate_repair_order(&mut o).unwrap_err();
        assert_eq!(
            errors.0["is_cancelled"],
            vec!["Для отмены заявки на ремонт требуется дата завершения."]
        );
    }

    #[test]
    fn finish_date_before_start_is_rejected() {
        let mut o = order();
        o.finish_date = Some(date(2024, 2, 1));
        let errors = validate_repair_order(&mut o).unwrap_err();
        assert!(errors.0.contains_key("finish_date"));
    }

    #[test]
    fn all_order_errors_are_collected_together() {
        let mut o = order();
        o.finish_until = Some(date(2024, 1, 1));
        o.is_cancelled = true;
        let errors = validate_repair_order(&mut o).unwrap_err();
        assert!(errors.0.contains_key("finish_until"));
        assert!(errors.0.contains_key("is_cancelled"));
    }

    #[test]
    fn warranty_derives_is_paid_from_completion() {
        let mut o = order();
        o.is_warranty = true;
        o.finish_date = Some(date(2024, 3, 10));
        o.is_paid = false;
        validate_repair_order(&mut o).unwrap();
        assert!(o.is_paid);

        let mut unfinished = order();
        unfinished.is_warranty = true;
        unfinished.is_paid = true;
        validate_repair_order(&mut unfinished).unwrap();
        assert!(!unfinished.is_paid);
    }

    #[test]
    fn cancelled_warranty_is_not_paid() {
        let mut o = order();
        o.is_warranty = true;
        o.is_cancelled = true;
        o.finish_date = Some(date(2024, 3, 10));
        o.is_paid = true;
        validate_repair_order(&mut o).unwrap();
        assert!(!o.is_paid);
    }

    #[test]
    fn vin_must_have_17_chars() {
        let v = Vehicle {
            id: 1,
            manufacturer: "Lada".into(),
            model: "Vesta".into(),
            year: 2020,
            license_number: "А123ВС77".into(),
            vin: "XTA21099".into(),
        };
        let errors = validate_vehicle(&v).unwrap_err();
        assert_eq!(errors.0["vin"], vec!["VIN должен состоять из 17 символов."]);
    }

    #[test]
    fn vehicle_year_range_is_enforced() {
        let mut v = Vehicle {
            id: 1,
            manufacturer: "ГАЗ".into(),
            model: "21".into(),
            year: 1899,
            license_number: "А123ВС77".into(),
            vin: "X9999999999999999".into(),
        };
        assert!(validate_vehicle(&v).is_err());
        v.year = 1900;
        assert!(validate_vehicle(&v).is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        let s = Service {
            id: 1,
            name: "Замена масла".into(),
            price: Decimal::new(-100, 2),
        };
        assert!(validate_service(&s).is_err());
    }

    #[test]
    fn amount_must_be_at_least_one() {
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-3).is_err());
        assert!(validate_amount(1).is_ok());
    }

    #[test]
    fn history_finish_before_order_start_carries_formatted_date() {
        let h = ServiceHistory {
            id: 1,
            repair_order_id: 1,
            service_id: 1,
            finish_date: Some(date(2024, 2, 1)),
            comments: String::new(),
        };
        let errors = validate_service_history(&h, date(2024, 3, 1)).unwrap_err();
        assert_eq!(
            errors.0["finish_date"],
            vec!["Дата выполнения услуги не может раньше даты заявки: 01.03.2024."]
        );
    }
}
