use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub vineyard_code: String,
    pub grape_variety: String,
    pub harvest_campaign: String,
    pub reception_date: String,
    pub initial_grape_quantity_kg: f64,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::batch_stages::Entity")]
    BatchStages,
}

impl Related<super::batch_stages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchStages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
