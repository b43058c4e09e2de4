use sea_orm::entity::prelude::*;

/// A delivery of `amount` units of an item. Hard rows: lifecycle is tied to
/// the owning item.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warehouse_restocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_id: i32,
    pub provider_id: i32,
    pub amount: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::warehouse_items::Entity",
        from = "Column::ItemId",
        to = "super::warehouse_items::Column::Id"
    )]
    Item,
    #[sea_orm(
        belongs_to = "super::warehouse_providers::Entity",
        from = "Column::ProviderId",
        to = "super::warehouse_providers::Column::Id"
    )]
    Provider,
}

impl Related<super::warehouse_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::warehouse_providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
