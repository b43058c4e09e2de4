use sea_orm::entity::prelude::*;

/// A service offered by the workshop (labor, not parts).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((7, 2)))")]
    pub price: Decimal,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_histories::Entity")]
    ServiceHistories,
}

impl Related<super::service_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
