use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub quantity: i32,
    pub price: i32,
    pub status: String,
    pub order_number: String,
    pub order_date: String,
    pub transport_condition: String,
    pub payment_method: String,
    pub consumer_phone: String,
    pub producer_phone: String,
    pub payment_terms: String,
    pub date: String,
    pub delivery_date: String,
    pub request_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
