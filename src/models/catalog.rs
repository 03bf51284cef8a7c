use crate::entities::{
    GenderTarget, PromotionTemplate, SizeSystem, brand_entity as brands,
    category_entity as categories, material_entity as materials, product_entity as products,
    promotion_entity as promotions, size_entity as sizes,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub gender_target: GenderTarget,
    /// `"{name} ({gender label})"`
    pub display_name: String,
    pub visible: bool,
    pub color_code: String,
    pub icon_class: String,
}

impl From<categories::Model> for CategoryResponse {
    fn from(c: categories::Model) -> Self {
        Self {
            display_name: c.display_name(),
            id: c.id,
            name: c.name,
            gender_target: c.gender_target,
            visible: c.visible,
            color_code: c.color_code,
            icon_class: c.icon_class,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[schema(example = "Ghete")]
    pub name: String,
    pub gender_target: GenderTarget,
    pub visible: Option<bool>,
    #[schema(example = "#004d99")]
    pub color_code: Option<String>,
    #[schema(example = "fa-solid fa-shoe-prints")]
    pub icon_class: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandResponse {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub founded_year: Option<i32>,
}

impl From<brands::Model> for BrandResponse {
    fn from(b: brands::Model) -> Self {
        Self {
            id: b.id,
            name: b.name,
            country: b.country,
            founded_year: b.founded_year,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandRequest {
    #[schema(example = "Nike")]
    pub name: String,
    #[schema(example = "SUA")]
    pub country: String,
    pub founded_year: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaterialResponse {
    pub id: i32,
    pub name: String,
    pub waterproof: bool,
    pub care_instructions: Option<String>,
}

impl From<materials::Model> for MaterialResponse {
    fn from(m: materials::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            waterproof: m.waterproof,
            care_instructions: m.care_instructions,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaterialRequest {
    #[schema(example = "Piele")]
    pub name: String,
    pub waterproof: Option<bool>,
    pub care_instructions: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SizeResponse {
    pub id: i32,
    pub value: String,
    pub size_system: SizeSystem,
    /// `"{value} ({system})"`
    pub display_name: String,
    pub for_children: bool,
}

impl From<sizes::Model> for SizeResponse {
    fn from(s: sizes::Model) -> Self {
        Self {
            display_name: s.display_name(),
            id: s.id,
            value: s.value,
            size_system: s.size_system,
            for_children: s.for_children,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SizeRequest {
    #[schema(example = "38.5")]
    pub value: String,
    pub size_system: SizeSystem,
    pub for_children: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "210.00")]
    pub price: Decimal,
    pub description: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub weight: Option<f64>,
    pub primary_color: String,
    pub category_id: i32,
    pub brand_id: i32,
    pub material_id: Option<i32>,
}

impl From<products::Model> for ProductResponse {
    fn from(p: products::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            description: p.description,
            in_stock: p.in_stock,
            created_at: p.created_at,
            weight: p.weight,
            primary_color: p.primary_color,
            category_id: p.category_id,
            brand_id: p.brand_id,
            material_id: p.material_id,
        }
    }
}

/// Row of the admin product list: name, brand, category, price, in stock.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListRow {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub in_stock: bool,
}

/// Partial product update. `created_at` is not editable.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdateRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub in_stock: Option<bool>,
    pub weight: Option<f64>,
    pub primary_color: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub material_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SizeStockResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub size_id: i32,
    pub size: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SizeStockRequest {
    pub product_id: i32,
    pub size_id: i32,
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionResponse {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub discount_percent: i32,
    pub email_subject: String,
    pub template: PromotionTemplate,
    pub category_ids: Vec<i32>,
}

impl PromotionResponse {
    pub fn new(p: promotions::Model, category_ids: Vec<i32>) -> Self {
        Self {
            id: p.id,
            name: p.name,
            created_at: p.created_at,
            expires_at: p.expires_at,
            discount_percent: p.discount_percent,
            email_subject: p.email_subject,
            template: p.template,
            category_ids,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SiteInfoResponse {
    pub site_header: String,
    pub site_title: String,
    pub index_title: String,
}
