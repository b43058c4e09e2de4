use sea_orm::entity::prelude::*;

/// Workshop employee. Soft delete is the `end_date` column: an employee
/// with an end date is no longer active but stays in every historical
/// aggregate.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub passport_info: String,
    /// Two-letter position code (AD/WM/SM/ME/CA).
    pub position: String,
    pub join_date: Date,
    pub end_date: Option<Date>,
    pub end_reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::repair_orders::Entity")]
    RepairOrders,
}

impl Related<super::repair_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
