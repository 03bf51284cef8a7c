use crate::entities::{
    brand_entity as brands, category_entity as categories, material_entity as materials,
    product_entity as products, size_entity as sizes, size_stock_entity as size_stocks,
};
use crate::error::{AppError, AppResult};
use crate::forms::{FormErrors, ProductFilter};
use crate::utils::{PageInfo, icontains};
use chrono::{NaiveTime, TimeZone, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use std::collections::HashMap;

const INVALID_CHOICE: &str = "Selectați o opțiune validă. Această opțiune nu se află printre opțiunile disponibile.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortOrder {
    /// `a` ascending price, `d` descending price, anything else newest first.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("a") => SortOrder::PriceAsc,
            Some("d") => SortOrder::PriceDesc,
            _ => SortOrder::Newest,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "a",
            SortOrder::PriceDesc => "d",
            SortOrder::Newest => "",
        }
    }

    fn apply(&self, select: Select<products::Entity>) -> Select<products::Entity> {
        match self {
            SortOrder::PriceAsc => select
                .order_by_asc(products::Column::Price)
                .order_by_asc(products::Column::Id),
            SortOrder::PriceDesc => select
                .order_by_desc(products::Column::Price)
                .order_by_asc(products::Column::Id),
            SortOrder::Newest => select
                .order_by_desc(products::Column::CreatedAt)
                .order_by_desc(products::Column::Id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub product: products::Model,
    pub brand: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub items: Vec<ProductCard>,
    pub page: PageInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockLine {
    pub size: sizes::Model,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: products::Model,
    pub category: categories::Model,
    pub brand: brands::Model,
    pub material: Option<materials::Model>,
    pub stocks: Vec<StockLine>,
}

/// Options for the filter form's select boxes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChoices {
    pub categories: Vec<categories::Model>,
    pub brands: Vec<brands::Model>,
    pub materials: Vec<materials::Model>,
}

/// Turns a cleaned filter into a WHERE condition.
pub fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(name) = &filter.name {
        cond = cond.add(icontains(products::Column::Name, name));
    }
    if let Some(description) = &filter.description {
        cond = cond.add(icontains(products::Column::Description, description));
    }
    if let Some(color) = &filter.color {
        cond = cond.add(icontains(products::Column::PrimaryColor, color));
    }
    if let Some(min) = filter.price_min {
        cond = cond.add(products::Column::Price.gte(min));
    }
    if let Some(max) = filter.price_max {
        cond = cond.add(products::Column::Price.lte(max));
    }
    if let Some(min) = filter.weight_min {
        cond = cond.add(products::Column::Weight.gte(min));
    }
    if let Some(max) = filter.weight_max {
        cond = cond.add(products::Column::Weight.lte(max));
    }
    if let Some(date) = filter.added_after {
        let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        cond = cond.add(products::Column::CreatedAt.gte(start));
    }
    if let Some(in_stock) = filter.in_stock {
        cond = cond.add(products::Column::InStock.eq(in_stock));
    }
    if let Some(id) = filter.category_id {
        cond = cond.add(products::Column::CategoryId.eq(id));
    }
    if let Some(id) = filter.brand_id {
        cond = cond.add(products::Column::BrandId.eq(id));
    }
    if let Some(id) = filter.material_id {
        cond = cond.add(products::Column::MaterialId.eq(id));
    }
    cond
}

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Categories shown in the site navigation.
    pub async fn nav_categories(&self) -> AppResult<Vec<categories::Model>> {
        let models = categories::Entity::find()
            .filter(categories::Column::Visible.eq(true))
            .order_by_asc(categories::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(models)
    }

    pub async fn filter_choices(&self) -> AppResult<FilterChoices> {
        Ok(FilterChoices {
            categories: categories::Entity::find()
                .order_by_asc(categories::Column::Name)
                .all(&self.pool)
                .await?,
            brands: brands::Entity::find()
                .order_by_asc(brands::Column::Name)
                .all(&self.pool)
                .await?,
            materials: materials::Entity::find()
                .order_by_asc(materials::Column::Name)
                .all(&self.pool)
                .await?,
        })
    }

    /// Referenced category, brand and material must exist.
    pub async fn check_references(&self, filter: &ProductFilter) -> AppResult<FormErrors> {
        let mut errors = FormErrors::new();
        if let Some(id) = filter.category_id
            && categories::Entity::find_by_id(id).one(&self.pool).await?.is_none()
        {
            errors.add("categorie", INVALID_CHOICE);
        }
        if let Some(id) = filter.brand_id
            && brands::Entity::find_by_id(id).one(&self.pool).await?.is_none()
        {
            errors.add("brand", INVALID_CHOICE);
        }
        if let Some(id) = filter.material_id
            && materials::Entity::find_by_id(id).one(&self.pool).await?.is_none()
        {
            errors.add("material", INVALID_CHOICE);
        }
        Ok(errors)
    }

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        sort: SortOrder,
        raw_page: Option<&str>,
    ) -> AppResult<ProductListing> {
        let select = products::Entity::find().filter(filter_condition(filter));
        self.paginate(select, sort, raw_page, filter.per_page).await
    }

    pub async fn list_category_products(
        &self,
        category_id: i32,
        sort: SortOrder,
        raw_page: Option<&str>,
        per_page: u64,
    ) -> AppResult<ProductListing> {
        let select =
            products::Entity::find().filter(products::Column::CategoryId.eq(category_id));
        self.paginate(select, sort, raw_page, per_page).await
    }

    async fn paginate(
        &self,
        select: Select<products::Entity>,
        sort: SortOrder,
        raw_page: Option<&str>,
        per_page: u64,
    ) -> AppResult<ProductListing> {
        let total = select.clone().count(&self.pool).await?;
        let page = PageInfo::resolve(raw_page, per_page, total);

        let models = sort
            .apply(select)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.pool)
            .await?;

        let items = self.cards(models).await?;
        Ok(ProductListing { items, page })
    }

    async fn cards(&self, models: Vec<products::Model>) -> AppResult<Vec<ProductCard>> {
        let brand_ids: Vec<i32> = models.iter().map(|p| p.brand_id).collect();
        let category_ids: Vec<i32> = models.iter().map(|p| p.category_id).collect();

        let brand_names: HashMap<i32, String> = brands::Entity::find()
            .filter(brands::Column::Id.is_in(brand_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();
        let category_names: HashMap<i32, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c.display_name()))
            .collect();

        Ok(models
            .into_iter()
            .map(|product| ProductCard {
                brand: brand_names.get(&product.brand_id).cloned().unwrap_or_default(),
                category: category_names
                    .get(&product.category_id)
                    .cloned()
                    .unwrap_or_default(),
                product,
            })
            .collect())
    }

    pub async fn product_detail(&self, id: i32) -> AppResult<ProductDetail> {
        let product = products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Produsul cu ID-ul {id} nu există.")))?;

        let category = categories::Entity::find_by_id(product.category_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("Product {id} has no category")))?;
        let brand = brands::Entity::find_by_id(product.brand_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("Product {id} has no brand")))?;
        let material = match product.material_id {
            Some(material_id) => materials::Entity::find_by_id(material_id).one(&self.pool).await?,
            None => None,
        };

        let stocks = size_stocks::Entity::find()
            .filter(size_stocks::Column::ProductId.eq(id))
            .find_also_related(sizes::Entity)
            .order_by_asc(size_stocks::Column::SizeId)
            .all(&self.pool)
            .await?
            .into_iter()
            .filter_map(|(stock, size)| {
                size.map(|size| StockLine {
                    size,
                    quantity: stock.quantity,
                })
            })
            .collect();

        Ok(ProductDetail {
            product,
            category,
            brand,
            material,
            stocks,
        })
    }

    pub async fn category_by_name(&self, name: &str) -> AppResult<categories::Model> {
        categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Categoria '{name}' nu există.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_param_mapping() {
        assert_eq!(SortOrder::from_param(Some("a")), SortOrder::PriceAsc);
        assert_eq!(SortOrder::from_param(Some("d")), SortOrder::PriceDesc);
        assert_eq!(SortOrder::from_param(Some("x")), SortOrder::Newest);
        assert_eq!(SortOrder::from_param(None).as_param(), "");
    }
}
