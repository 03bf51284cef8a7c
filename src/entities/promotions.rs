use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message templates available for promotion e-mails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(100))")]
pub enum PromotionTemplate {
    #[sea_orm(string_value = "promotie_generala.txt")]
    #[serde(rename = "promotie_generala.txt")]
    General,
    #[sea_orm(string_value = "reduceri_sezon.txt")]
    #[serde(rename = "reduceri_sezon.txt")]
    Seasonal,
    #[sea_orm(string_value = "black_friday.txt")]
    #[serde(rename = "black_friday.txt")]
    BlackFriday,
}

impl PromotionTemplate {
    pub fn file_name(&self) -> &'static str {
        match self {
            PromotionTemplate::General => "promotie_generala.txt",
            PromotionTemplate::Seasonal => "reduceri_sezon.txt",
            PromotionTemplate::BlackFriday => "black_friday.txt",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        <Self as sea_orm::Iterable>::iter().find(|t| t.file_name() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "promotions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub discount_percent: i32,
    pub email_subject: String,
    pub template: PromotionTemplate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::promotion_categories::Entity")]
    PromotionCategories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::promotion_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::promotion_categories::Relation::Promotion.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
