use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub county: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub cnp: Option<String>,
    pub confirmation_code: Option<String>,
    pub email_confirmed: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_views::Entity")]
    ProductViews,
}

impl Related<super::product_views::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductViews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
