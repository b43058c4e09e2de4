use sea_orm::entity::prelude::*;

/// A consumable stocked in the warehouse. The on-hand `count` is never
/// stored; it is always derived from restock and use rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warehouse_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub item_type: String,
    #[sea_orm(column_type = "Decimal(Some((7, 2)))")]
    pub price: Decimal,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::warehouse_restocks::Entity")]
    WarehouseRestocks,
    #[sea_orm(has_many = "super::warehouse_uses::Entity")]
    WarehouseUses,
}

impl Related<super::warehouse_restocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarehouseRestocks.def()
    }
}

impl Related<super::warehouse_uses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarehouseUses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
