use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(Some(2))")]
pub enum SizeSystem {
    #[sea_orm(string_value = "EU")]
    #[serde(rename = "EU")]
    Eu,
    #[sea_orm(string_value = "US")]
    #[serde(rename = "US")]
    Us,
    #[sea_orm(string_value = "UK")]
    #[serde(rename = "UK")]
    Uk,
}

impl SizeSystem {
    pub fn code(&self) -> &'static str {
        match self {
            SizeSystem::Eu => "EU",
            SizeSystem::Us => "US",
            SizeSystem::Uk => "UK",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeSystem::Eu => "European",
            SizeSystem::Us => "American",
            SizeSystem::Uk => "Britanic",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub value: String,
    pub size_system: SizeSystem,
    pub for_children: bool,
}

impl Model {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.value, self.size_system.code())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::size_stocks::Entity")]
    SizeStocks,
}

impl Related<super::size_stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SizeStocks.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::size_stocks::Relation::Products.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::size_stocks::Relation::Sizes.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
