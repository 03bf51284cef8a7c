use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(2))")]
pub enum GenderTarget {
    #[sea_orm(string_value = "M")]
    #[serde(rename = "M")]
    Men,
    #[sea_orm(string_value = "F")]
    #[serde(rename = "F")]
    Women,
    #[sea_orm(string_value = "U")]
    #[serde(rename = "U")]
    Unisex,
    #[sea_orm(string_value = "C")]
    #[serde(rename = "C")]
    Children,
}

impl GenderTarget {
    pub fn label(&self) -> &'static str {
        match self {
            GenderTarget::Men => "Masculin",
            GenderTarget::Women => "Feminin",
            GenderTarget::Unisex => "Unisex",
            GenderTarget::Children => "Copii",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub gender_target: GenderTarget,
    pub visible: bool,
    pub color_code: String,
    pub icon_class: String,
}

impl Model {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.gender_target.label())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
    #[sea_orm(has_many = "super::promotion_categories::Entity")]
    PromotionCategories,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::promotions::Entity> for Entity {
    fn to() -> RelationDef {
        super::promotion_categories::Relation::Promotion.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::promotion_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
