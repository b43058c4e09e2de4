use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    pub license_number: String,
    /// 17-character VIN.
    pub vin: String,
    pub deleted_at: Option<DateTimeUtc>,
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
