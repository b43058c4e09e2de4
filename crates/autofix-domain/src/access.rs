//! Role-based authorization: type-level capability tables and the
//! field-level permission algorithm.
//!
//! Every entity declares two position sets: who may create rows and who may
//! view/update/delete them. The Administrator is implicitly a member of
//! every set. Instance-level narrowing (a Mechanic only reaching their own
//! repair orders) is layered on top by the usecases after fetching the row.

use std::collections::BTreeMap;

use crate::position::Position;

/// Operation requested on an entity. `View` covers detail, update and
/// delete; list permissions follow the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    View,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Employee,
    Service,
    Client,
    Vehicle,
    RepairOrder,
    WarehouseProvider,
    WarehouseItem,
    WarehouseRestock,
    WarehouseUse,
    ServiceHistory,
}

use Position::{Cashier as CA, Mechanic as ME, ServiceManager as SM, WarehouseManager as WM};

impl EntityKind {
    /// Positions allowed to create, besides the Administrator.
    pub fn create_allowed_to(self) -> &'static [Position] {
        match self {
            Self::Employee => &[],
            Self::Service | Self::Client | Self::Vehicle => &[SM],
            Self::RepairOrder => &[SM],
            Self::WarehouseProvider | Self::WarehouseItem | Self::WarehouseRestock => &[WM],
            Self::WarehouseUse => &[ME],
            Self::ServiceHistory => &[SM],
        }
    }

    /// Positions allowed to view/update/delete, besides the Administrator.
    pub fn edit_allowed_to(self) -> &'static [Position] {
        match self {
            Self::Employee => &[],
            Self::Service | Self::Client | Self::Vehicle => &[SM],
            Self::RepairOrder => &[SM, ME, CA],
            Self::WarehouseProvider | Self::WarehouseItem | Self::WarehouseRestock => &[WM],
            Self::WarehouseUse => &[ME],
            Self::ServiceHistory => &[SM, ME],
        }
    }
}

/// Type-level permission check. The Administrator passes unconditionally.
pub fn can(position: Position, kind: EntityKind, action: Action) -> bool {
    if position == Position::Administrator {
        return true;
    }
    let allowed = match action {
        Action::Create => kind.create_allowed_to(),
        Action::List | Action::View => kind.edit_allowed_to(),
    };
    allowed.contains(&position)
}

/// One entry of a field permission table: the listed fields are editable
/// only by the listed positions (and the Administrator).
pub struct FieldRule {
    pub positions: &'static [Position],
    pub fields: &'static [&'static str],
}

pub const REPAIR_ORDER_FIELDS: &[&str] = &[
    "master_id",
    "client_id",
    "vehicle_id",
    "vehicle_mileage",
    "start_date",
    "finish_until",
    "finish_date",
    "is_cancelled",
    "complaints",
    "diagnostic_results",
    "comments",
    "is_paid",
    "is_warranty",
];

pub const REPAIR_ORDER_FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        positions: &[SM],
        fields: &[
            "master_id",
            "client_id",
            "vehicle_id",
            "vehicle_mileage",
            "start_date",
            "finish_until",
            "is_cancelled",
            "is_warranty",
        ],
    },
    FieldRule {
        positions: &[SM, ME],
        fields: &["finish_date"],
    },
    FieldRule {
        positions: &[CA],
        fields: &["is_paid"],
    },
];

pub const SERVICE_HISTORY_FIELDS: &[&str] = &["service_id", "finish_date", "comments"];

pub const SERVICE_HISTORY_FIELD_RULES: &[FieldRule] = &[FieldRule {
    positions: &[SM],
    fields: &["service_id"],
}];

impl EntityKind {
    /// All mutable field names of the entity, for `restrict_fields`.
    /// Entities without a field table return an empty slice and fall back
    /// to all-or-nothing editing.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::RepairOrder => REPAIR_ORDER_FIELDS,
            Self::ServiceHistory => SERVICE_HISTORY_FIELDS,
            _ => &[],
        }
    }

    pub fn field_rules(self) -> &'static [FieldRule] {
        match self {
            Self::RepairOrder => REPAIR_ORDER_FIELD_RULES,
            Self::ServiceHistory => SERVICE_HISTORY_FIELD_RULES,
            _ => &[],
        }
    }
}

/// Field-level permission map for one entity instance.
///
/// Without base edit permission every field is disabled. Otherwise all
/// declared-restricted fields are disabled first, then each rule re-enables
/// its fields for members of its position set. The two passes are the
/// precedence contract: a field listed by several rules is editable if any
/// of them admits the caller; a field never listed is always editable.
pub fn restrict_fields(
    position: Position,
    kind: EntityKind,
) -> BTreeMap<&'static str, bool> {
    let mut editable: BTreeMap<&'static str, bool> = BTreeMap::new();

    if !can(position, kind, Action::View) {
        for field in kind.fields() {
            editable.insert(field, false);
        }
        return editable;
    }

    for field in kind.fields() {
        editable.insert(field, true);
    }
    for rule in kind.field_rules() {
        for field in rule.fields {
            editable.insert(field, false);
        }
    }
    for rule in kind.field_rules() {
        if position == Position::Administrator || rule.positions.contains(&position) {
            for field in rule.fields {
                editable.insert(field, true);
            }
        }
    }
    editable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrator_passes_every_check() {
        for kind in [
            EntityKind::Employee,
            EntityKind::Service,
            EntityKind::RepairOrder,
            EntityKind::WarehouseUse,
        ] {
            for action in [Action::List, Action::View, Action::Create] {
                assert!(can(Position::Administrator, kind, action));
            }
        }
    }

    #[test]
    fn create_and_edit_sets_differ_for_repair_orders() {
        assert!(can(SM, EntityKind::RepairOrder, Action::Create));
        assert!(!can(ME, EntityKind::RepairOrder, Action::Create));
        assert!(can(ME, EntityKind::RepairOrder, Action::View));
        assert!(can(CA, EntityKind::RepairOrder, Action::List));
        assert!(!can(WM, EntityKind::RepairOrder, Action::List));
    }

    #[test]
    fn only_administrator_touches_employees() {
        for position in [WM, SM, ME, CA] {
            assert!(!can(position, EntityKind::Employee, Action::View));
            assert!(!can(position, EntityKind::Employee, Action::Create));
        }
    }

    #[test]
    fn without_base_permission_all_fields_disabled() {
        let map = restrict_fields(WM, EntityKind::RepairOrder);
        assert_eq!(map.len(), REPAIR_ORDER_FIELDS.len());
        assert!(map.values().all(|editable| !editable));
    }

    #[test]
    fn unlisted_fields_follow_base_permission() {
        let map = restrict_fields(CA, EntityKind::RepairOrder);
        assert_eq!(map["complaints"], true);
        assert_eq!(map["diagnostic_results"], true);
        assert_eq!(map["comments"], true);
    }

    #[test]
    fn listed_fields_require_rule_membership() {
        let cashier = restrict_fields(CA, EntityKind::RepairOrder);
        assert_eq!(cashier["is_paid"], true);
        assert_eq!(cashier["finish_date"], false);
        assert_eq!(cashier["master_id"], false);

        let mechanic = restrict_fields(ME, EntityKind::RepairOrder);
        assert_eq!(mechanic["finish_date"], true);
        assert_eq!(mechanic["is_paid"], false);
        assert_eq!(mechanic["start_date"], false);

        let manager = restrict_fields(SM, EntityKind::RepairOrder);
        assert_eq!(manager["master_id"], true);
        assert_eq!(manager["finish_date"], true);
        assert_eq!(manager["is_paid"], false);
    }

    #[test]
    fn administrator_edits_every_field() {
        let map = restrict_fields(Position::Administrator, EntityKind::RepairOrder);
        assert!(map.values().all(|editable| *editable));
    }

    #[test]
    fn service_history_restricts_service_to_manager() {
        let mechanic = restrict_fields(ME, EntityKind::ServiceHistory);
        assert_eq!(mechanic["service_id"], false);
        assert_eq!(mechanic["finish_date"], true);
        assert_eq!(mechanic["comments"], true);

        let manager = restrict_fields(SM, EntityKind::ServiceHistory);
        assert_eq!(manager["service_id"], true);
    }
}
