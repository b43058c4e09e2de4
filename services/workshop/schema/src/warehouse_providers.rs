use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warehouse_providers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub contact_info: String,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::warehouse_restocks::Entity")]
    WarehouseRestocks,
}

impl Related<super::warehouse_restocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WarehouseRestocks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
