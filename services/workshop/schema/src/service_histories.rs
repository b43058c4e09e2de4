use sea_orm::entity::prelude::*;

/// A service performed (or scheduled) under a repair order. Hard rows:
/// lifecycle is tied to the owning order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub repair_order_id: i32,
    pub service_id: i32,
    pub finish_date: Option<Date>,
    pub comments: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::repair_orders::Entity",
        from = "Column::RepairOrderId",
        to = "super::repair_orders::Column::Id"
    )]
    RepairOrder,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
}

impl Related<super::repair_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairOrder.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
