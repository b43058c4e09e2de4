use sea_orm::entity::prelude::*;

/// A repair order. `total_cost` is not stored; it is derived from the
/// linked service history rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "repair_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub master_id: i32,
    pub client_id: i32,
    pub vehicle_id: i32,
    pub vehicle_mileage: i32,
    pub start_date: Date,
    pub finish_until: Option<Date>,
    pub finish_date: Option<Date>,
    pub is_cancelled: bool,
    pub complaints: String,
    pub diagnostic_results: String,
    pub comments: String,
    pub is_paid: bool,
    pub is_warranty: bool,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::MasterId",
        to = "super::employees::Column::Id"
    )]
    Master,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicle,
    #[sea_orm(has_many = "super::service_histories::Entity")]
    ServiceHistories,
    #[sea_orm(has_many = "super::warehouse_uses::Entity")]
    WarehouseUses,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Master.def()
    }
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::service_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceHistories.def()
    }
}

impl Related<super::warehouse_uses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarehouseUses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
