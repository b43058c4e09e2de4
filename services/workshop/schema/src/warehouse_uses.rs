use sea_orm::entity::prelude::*;

/// Consumption of `amount` units of an item by a repair order. Hard rows:
/// lifecycle is tied to the owning order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warehouse_uses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub repair_order_id: i32,
    pub item_id: i32,
    pub amount: i32,
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
        belongs_to = "super::warehouse_items::Entity",
        from = "Column::ItemId",
        to = "super::warehouse_items::Column::Id"
    )]
    Item,
}

impl Related<super::repair_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairOrder.def()
    }
}

impl Related<super::warehouse_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
