use crate::entities::{
    brand_entity as brands, category_entity as categories, material_entity as materials,
    product_entity as products, promotion_category_entity as promotion_categories,
    promotion_entity as promotions, size_entity as sizes, size_stock_entity as size_stocks,
};
use crate::error::{AppError, AppResult};
use crate::forms::{FormErrors, NewProduct, NewPromotion};
use crate::models::*;
use crate::utils::{PageInfo, icontains};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set, TransactionTrait,
};
use std::collections::HashMap;

pub const SITE_HEADER: &str = "Administrare Magazin Încălțăminte";
pub const SITE_TITLE: &str = "Panou Admin Magazin";
pub const INDEX_TITLE: &str = "Bine ai venit în panoul de control";

const DEFAULT_COLOR_CODE: &str = "#004d99";
const DEFAULT_ICON_CLASS: &str = "fa-solid fa-shoe-prints";

/// Matches `q` as a substring of any of the given columns.
fn search<C: ColumnTrait>(q: &Option<String>, columns: &[C]) -> Condition {
    match q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Condition::all(),
        Some(text) => columns
            .iter()
            .fold(Condition::any(), |cond, col| cond.add(icontains(*col, text))),
    }
}

fn text_field(errors: &mut FormErrors, field: &str, value: &str, max: usize) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, crate::forms::REQUIRED);
        return None;
    }
    crate::forms::max_length(errors, field, value, max).then(|| value.to_string())
}

fn optional_field(
    errors: &mut FormErrors,
    field: &str,
    value: &Option<String>,
    max: usize,
) -> Option<String> {
    let value = crate::forms::non_blank(value)?;
    crate::forms::max_length(errors, field, value, max).then(|| value.to_string())
}

fn not_found(what: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{what} cu ID-ul {id} nu există."))
}

#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
    page_size: u64,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection, page_size: u64) -> Self {
        Self { pool, page_size }
    }

    pub fn site_info(&self) -> SiteInfoResponse {
        SiteInfoResponse {
            site_header: SITE_HEADER.to_string(),
            site_title: SITE_TITLE.to_string(),
            index_title: INDEX_TITLE.to_string(),
        }
    }

    async fn fetch_page<E>(
        &self,
        select: Select<E>,
        raw_page: Option<&str>,
    ) -> AppResult<(Vec<E::Model>, PageInfo)>
    where
        E: EntityTrait,
        E::Model: Send + Sync,
    {
        let total = select.clone().count(&self.pool).await?;
        let page = PageInfo::resolve(raw_page, self.page_size, total);
        let models = select
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.pool)
            .await?;
        Ok((models, page))
    }

    // Categories

    pub async fn list_categories(
        &self,
        query: &AdminListQuery,
    ) -> AppResult<PaginatedResponse<CategoryResponse>> {
        let select = categories::Entity::find()
            .filter(search(
                &query.q,
                &[categories::Column::Name, categories::Column::GenderTarget],
            ))
            .order_by_asc(categories::Column::Id);
        let (models, page) = self.fetch_page(select, query.page.as_deref()).await?;
        let items = models.into_iter().map(CategoryResponse::from).collect();
        Ok(PaginatedResponse::new(items, &page))
    }

    fn category_model(
        req: CategoryRequest,
        mut model: categories::ActiveModel,
    ) -> AppResult<categories::ActiveModel> {
        let mut errors = FormErrors::new();
        let name = text_field(&mut errors, "name", &req.name, 100);
        let color = optional_field(&mut errors, "color_code", &req.color_code, 7);
        let icon = optional_field(&mut errors, "icon_class", &req.icon_class, 50);
        if !errors.is_empty() {
            return Err(errors.into());
        }

        if let Some(name) = name {
            model.name = Set(name);
        }
        model.gender_target = Set(req.gender_target);
        model.visible = Set(req.visible.unwrap_or(true));
        model.color_code = Set(color.unwrap_or_else(|| DEFAULT_COLOR_CODE.to_string()));
        model.icon_class = Set(icon.unwrap_or_else(|| DEFAULT_ICON_CLASS.to_string()));
        Ok(model)
    }

    pub async fn create_category(&self, req: CategoryRequest) -> AppResult<CategoryResponse> {
        let model = Self::category_model(req, Default::default())?
            .insert(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn update_category(
        &self,
        id: i32,
        req: CategoryRequest,
    ) -> AppResult<CategoryResponse> {
        let existing = categories::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found("Categoria", id))?;
        let model = Self::category_model(req, existing.into_active_model())?
            .update(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        let res = categories::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(not_found("Categoria", id));
        }
        Ok(())
    }

    // Brands

    pub async fn list_brands(
        &self,
        query: &AdminListQuery,
    ) -> AppResult<PaginatedResponse<BrandResponse>> {
        let select = brands::Entity::find()
            .filter(search(&query.q, &[brands::Column::Name, brands::Column::Country]))
            .order_by_asc(brands::Column::Id);
        let (models, page) = self.fetch_page(select, query.page.as_deref()).await?;
        let items = models.into_iter().map(BrandResponse::from).collect();
        Ok(PaginatedResponse::new(items, &page))
    }

    /// Brand names are unique; `exclude` is the brand being edited.
    async fn check_brand_name(&self, name: &str, exclude: Option<i32>) -> AppResult<()> {
        let mut select = brands::Entity::find().filter(brands::Column::Name.eq(name));
        if let Some(id) = exclude {
            select = select.filter(brands::Column::Id.ne(id));
        }
        if select.one(&self.pool).await?.is_some() {
            return Err(AppError::field(
                "name",
                "Există deja un brand cu acest nume.",
            ));
        }
        Ok(())
    }

    async fn brand_model(
        &self,
        req: BrandRequest,
        mut model: brands::ActiveModel,
        exclude: Option<i32>,
    ) -> AppResult<brands::ActiveModel> {
        let mut errors = FormErrors::new();
        let name = text_field(&mut errors, "name", &req.name, 100);
        let country = text_field(&mut errors, "country", &req.country, 100);
        if let Some(year) = req.founded_year
            && !(1800..=Utc::now().year()).contains(&year)
        {
            errors.add("founded_year", "Anul înființării nu este valid.");
        }
        let (Some(name), Some(country)) = (name, country) else {
            return Err(errors.into());
        };
        if !errors.is_empty() {
            return Err(errors.into());
        }
        self.check_brand_name(&name, exclude).await?;

        model.name = Set(name);
        model.country = Set(country);
        model.founded_year = Set(req.founded_year);
        Ok(model)
    }

    pub async fn create_brand(&self, req: BrandRequest) -> AppResult<BrandResponse> {
        let model = self
            .brand_model(req, Default::default(), None)
            .await?
            .insert(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn update_brand(&self, id: i32, req: BrandRequest) -> AppResult<BrandResponse> {
        let existing = brands::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found("Brandul", id))?;
        let model = self
            .brand_model(req, existing.into_active_model(), Some(id))
            .await?
            .update(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn delete_brand(&self, id: i32) -> AppResult<()> {
        let res = brands::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(not_found("Brandul", id));
        }
        Ok(())
    }

    // Materials

    pub async fn list_materials(
        &self,
        query: &AdminListQuery,
    ) -> AppResult<PaginatedResponse<MaterialResponse>> {
        let select = materials::Entity::find()
            .filter(search(
                &query.q,
                &[materials::Column::Name, materials::Column::CareInstructions],
            ))
            .order_by_asc(materials::Column::Id);
        let (models, page) = self.fetch_page(select, query.page.as_deref()).await?;
        let items = models.into_iter().map(MaterialResponse::from).collect();
        Ok(PaginatedResponse::new(items, &page))
    }

    fn material_model(
        req: MaterialRequest,
        mut model: materials::ActiveModel,
    ) -> AppResult<materials::ActiveModel> {
        let mut errors = FormErrors::new();
        let Some(name) = text_field(&mut errors, "name", &req.name, 100) else {
            return Err(errors.into());
        };
        model.name = Set(name);
        model.waterproof = Set(req.waterproof.unwrap_or(false));
        model.care_instructions = Set(req
            .care_instructions
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()));
        Ok(model)
    }

    pub async fn create_material(&self, req: MaterialRequest) -> AppResult<MaterialResponse> {
        let model = Self::material_model(req, Default::default())?
            .insert(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn update_material(
        &self,
        id: i32,
        req: MaterialRequest,
    ) -> AppResult<MaterialResponse> {
        let existing = materials::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found("Materialul", id))?;
        let model = Self::material_model(req, existing.into_active_model())?
            .update(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn delete_material(&self, id: i32) -> AppResult<()> {
        let res = materials::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(not_found("Materialul", id));
        }
        Ok(())
    }

    // Sizes

    pub async fn list_sizes(
        &self,
        query: &AdminListQuery,
    ) -> AppResult<PaginatedResponse<SizeResponse>> {
        let select = sizes::Entity::find()
            .filter(search(&query.q, &[sizes::Column::Value, sizes::Column::SizeSystem]))
            .order_by_asc(sizes::Column::Id);
        let (models, page) = self.fetch_page(select, query.page.as_deref()).await?;
        let items = models.into_iter().map(SizeResponse::from).collect();
        Ok(PaginatedResponse::new(items, &page))
    }

    fn size_model(req: SizeRequest, mut model: sizes::ActiveModel) -> AppResult<sizes::ActiveModel> {
        let mut errors = FormErrors::new();
        let Some(value) = text_field(&mut errors, "value", &req.value, 10) else {
            return Err(errors.into());
        };
        model.value = Set(value);
        model.size_system = Set(req.size_system);
        model.for_children = Set(req.for_children.unwrap_or(false));
        Ok(model)
    }

    pub async fn create_size(&self, req: SizeRequest) -> AppResult<SizeResponse> {
        let model = Self::size_model(req, Default::default())?
            .insert(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn update_size(&self, id: i32, req: SizeRequest) -> AppResult<SizeResponse> {
        let existing = sizes::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found("Mărimea", id))?;
        let model = Self::size_model(req, existing.into_active_model())?
            .update(&self.pool)
            .await?;
        Ok(model.into())
    }

    pub async fn delete_size(&self, id: i32) -> AppResult<()> {
        let res = sizes::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(not_found("Mărimea", id));
        }
        Ok(())
    }

    // Products

    /// Most expensive first, filtered by `categorie`, `brand` and `in_stoc`.
    pub async fn list_products(
        &self,
        query: &AdminListQuery,
    ) -> AppResult<PaginatedResponse<ProductListRow>> {
        let mut select = products::Entity::find().filter(search(
            &query.q,
            &[products::Column::Name, products::Column::Description],
        ));
        if let Some(id) = query.categorie {
            select = select.filter(products::Column::CategoryId.eq(id));
        }
        if let Some(id) = query.brand {
            select = select.filter(products::Column::BrandId.eq(id));
        }
        match query.in_stoc.as_deref() {
            Some("1") => select = select.filter(products::Column::InStock.eq(true)),
            Some("0") => select = select.filter(products::Column::InStock.eq(false)),
            _ => {}
        }
        let select = select
            .order_by_desc(products::Column::Price)
            .order_by_asc(products::Column::Id);

        let (models, page) = self.fetch_page(select, query.page.as_deref()).await?;

        let brand_names: HashMap<i32, String> = brands::Entity::find()
            .filter(brands::Column::Id.is_in(models.iter().map(|p| p.brand_id)))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();
        let category_names: HashMap<i32, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(models.iter().map(|p| p.category_id)))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c.display_name()))
            .collect();

        let items = models
            .into_iter()
            .map(|p| ProductListRow {
                brand: brand_names.get(&p.brand_id).cloned().unwrap_or_default(),
                category: category_names.get(&p.category_id).cloned().unwrap_or_default(),
                id: p.id,
                name: p.name,
                price: p.price,
                in_stock: p.in_stock,
            })
            .collect();
        Ok(PaginatedResponse::new(items, &page))
    }

    pub async fn get_product(&self, id: i32) -> AppResult<ProductResponse> {
        products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| not_found("Produsul", id))
    }

    async fn check_product_relations(
        &self,
        category_id: Option<i32>,
        brand_id: Option<i32>,
        material_id: Option<i32>,
    ) -> AppResult<()> {
        let invalid = "Selectați o opțiune validă. Această opțiune nu se află printre opțiunile disponibile.";
        let mut errors = FormErrors::new();
        if let Some(id) = category_id
            && categories::Entity::find_by_id(id).one(&self.pool).await?.is_none()
        {
            errors.add("categorie", invalid);
        }
        if let Some(id) = brand_id
            && brands::Entity::find_by_id(id).one(&self.pool).await?.is_none()
        {
            errors.add("brand", invalid);
        }
        if let Some(id) = material_id
            && materials::Entity::find_by_id(id).one(&self.pool).await?.is_none()
        {
            errors.add("material", invalid);
        }
        errors.into_result(()).map_err(AppError::from)
    }

    pub async fn create_product(&self, product: NewProduct) -> AppResult<ProductResponse> {
        self.check_product_relations(
            Some(product.category_id),
            Some(product.brand_id),
            product.material_id,
        )
        .await?;

        let model = products::ActiveModel {
            name: Set(product.name),
            price: Set(product.price),
            description: Set(product.description),
            in_stock: Set(product.in_stock),
            weight: Set(Some(product.weight)),
            primary_color: Set(product.primary_color),
            category_id: Set(product.category_id),
            brand_id: Set(product.brand_id),
            material_id: Set(product.material_id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created product {} ({})", model.id, model.name);
        Ok(model.into())
    }

    /// Partial update. The creation timestamp is left as it was.
    pub async fn update_product(
        &self,
        id: i32,
        req: ProductUpdateRequest,
    ) -> AppResult<ProductResponse> {
        let existing = products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found("Produsul", id))?;

        let mut errors = FormErrors::new();
        let name = req
            .name
            .as_deref()
            .and_then(|n| text_field(&mut errors, "nume", n, 150));
        let color = req
            .primary_color
            .as_deref()
            .and_then(|c| text_field(&mut errors, "culoare_principala", c, 50));
        if req.price.is_some_and(|p| p < Decimal::ZERO) {
            errors.add("pret", "Asigurați-vă că această valoare este mai mare sau egală cu 0.");
        }
        if req.weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
            errors.add("greutate", "Asigurați-vă că această valoare este mai mare sau egală cu 0.");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        self.check_product_relations(req.category_id, req.brand_id, req.material_id)
            .await?;

        let mut model = existing.into_active_model();
        if let Some(name) = name {
            model.name = Set(name);
        }
        if let Some(price) = req.price {
            model.price = Set(price);
        }
        if let Some(description) = req.description {
            model.description = Set(description);
        }
        if let Some(in_stock) = req.in_stock {
            model.in_stock = Set(in_stock);
        }
        if let Some(weight) = req.weight {
            model.weight = Set(Some(weight));
        }
        if let Some(color) = color {
            model.primary_color = Set(color);
        }
        if let Some(id) = req.category_id {
            model.category_id = Set(id);
        }
        if let Some(id) = req.brand_id {
            model.brand_id = Set(id);
        }
        if let Some(id) = req.material_id {
            model.material_id = Set(Some(id));
        }
        let model = model.update(&self.pool).await?;
        Ok(model.into())
    }

    pub async fn delete_product(&self, id: i32) -> AppResult<()> {
        let res = products::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(not_found("Produsul", id));
        }
        Ok(())
    }

    // Size stocks

    pub async fn list_size_stocks(
        &self,
        query: &AdminListQuery,
    ) -> AppResult<PaginatedResponse<SizeStockResponse>> {
        let mut select = size_stocks::Entity::find()
            .join(JoinType::InnerJoin, size_stocks::Relation::Products.def())
            .join(JoinType::InnerJoin, size_stocks::Relation::Sizes.def())
            .order_by_asc(size_stocks::Column::Id);
        if let Some(text) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(icontains(products::Column::Name, text))
                    .add(icontains(sizes::Column::Value, text)),
            );
        }
        let (models, page) = self.fetch_page(select, query.page.as_deref()).await?;
        let items = self.size_stock_rows(models).await?;
        Ok(PaginatedResponse::new(items, &page))
    }

    async fn size_stock_rows(
        &self,
        models: Vec<size_stocks::Model>,
    ) -> AppResult<Vec<SizeStockResponse>> {
        let product_names: HashMap<i32, String> = products::Entity::find()
            .filter(products::Column::Id.is_in(models.iter().map(|s| s.product_id)))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let size_names: HashMap<i32, String> = sizes::Entity::find()
            .filter(sizes::Column::Id.is_in(models.iter().map(|s| s.size_id)))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|s| (s.id, s.display_name()))
            .collect();

        Ok(models
            .into_iter()
            .map(|s| SizeStockResponse {
                product_name: product_names.get(&s.product_id).cloned().unwrap_or_default(),
                size: size_names.get(&s.size_id).cloned().unwrap_or_default(),
                id: s.id,
                product_id: s.product_id,
                size_id: s.size_id,
                quantity: s.quantity,
            })
            .collect())
    }

    /// One stock row per (product, size).
    async fn check_size_stock(
        &self,
        req: &SizeStockRequest,
        exclude: Option<i32>,
    ) -> AppResult<()> {
        let mut errors = FormErrors::new();
        if products::Entity::find_by_id(req.product_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            errors.add("product_id", "Produsul selectat nu există.");
        }
        if sizes::Entity::find_by_id(req.size_id).one(&self.pool).await?.is_none() {
            errors.add("size_id", "Mărimea selectată nu există.");
        }
        if req.quantity.is_some_and(|q| q < 0) {
            errors.add("quantity", "Asigurați-vă că această valoare este mai mare sau egală cu 0.");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let mut duplicate = size_stocks::Entity::find()
            .filter(size_stocks::Column::ProductId.eq(req.product_id))
            .filter(size_stocks::Column::SizeId.eq(req.size_id));
        if let Some(id) = exclude {
            duplicate = duplicate.filter(size_stocks::Column::Id.ne(id));
        }
        if duplicate.one(&self.pool).await?.is_some() {
            return Err(AppError::field(
                "__all__",
                "Există deja un stoc pentru acest produs și această mărime.",
            ));
        }
        Ok(())
    }

    pub async fn create_size_stock(&self, req: SizeStockRequest) -> AppResult<SizeStockResponse> {
        self.check_size_stock(&req, None).await?;
        let model = size_stocks::ActiveModel {
            product_id: Set(req.product_id),
            size_id: Set(req.size_id),
            quantity: Set(req.quantity.unwrap_or(0)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        let mut rows = self.size_stock_rows(vec![model]).await?;
        rows.pop()
            .ok_or_else(|| AppError::InternalError("Size stock row vanished".to_string()))
    }

    pub async fn update_size_stock(
        &self,
        id: i32,
        req: SizeStockRequest,
    ) -> AppResult<SizeStockResponse> {
        let existing = size_stocks::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found("Stocul", id))?;
        self.check_size_stock(&req, Some(id)).await?;

        let mut model = existing.into_active_model();
        model.product_id = Set(req.product_id);
        model.size_id = Set(req.size_id);
        if let Some(quantity) = req.quantity {
            model.quantity = Set(quantity);
        }
        let model = model.update(&self.pool).await?;
        let mut rows = self.size_stock_rows(vec![model]).await?;
        rows.pop()
            .ok_or_else(|| AppError::InternalError("Size stock row vanished".to_string()))
    }

    pub async fn delete_size_stock(&self, id: i32) -> AppResult<()> {
        let res = size_stocks::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(not_found("Stocul", id));
        }
        Ok(())
    }

    // Promotions

    async fn promotion_category_ids<C: ConnectionTrait>(
        db: &C,
        promotion_id: i32,
    ) -> AppResult<Vec<i32>> {
        Ok(promotion_categories::Entity::find()
            .filter(promotion_categories::Column::PromotionId.eq(promotion_id))
            .order_by_asc(promotion_categories::Column::CategoryId)
            .all(db)
            .await?
            .into_iter()
            .map(|pc| pc.category_id)
            .collect())
    }

    pub async fn list_promotions(
        &self,
        query: &AdminListQuery,
    ) -> AppResult<PaginatedResponse<PromotionResponse>> {
        let select = promotions::Entity::find()
            .filter(search(
                &query.q,
                &[promotions::Column::Name, promotions::Column::EmailSubject],
            ))
            .order_by_desc(promotions::Column::CreatedAt)
            .order_by_desc(promotions::Column::Id);
        let (models, page) = self.fetch_page(select, query.page.as_deref()).await?;

        let mut items = Vec::with_capacity(models.len());
        for promotion in models {
            let ids = Self::promotion_category_ids(&self.pool, promotion.id).await?;
            items.push(PromotionResponse::new(promotion, ids));
        }
        Ok(PaginatedResponse::new(items, &page))
    }

    async fn check_categories(&self, ids: &[i32]) -> AppResult<()> {
        let found = categories::Entity::find()
            .filter(categories::Column::Id.is_in(ids.iter().copied()))
            .count(&self.pool)
            .await?;
        if found as usize != ids.len() {
            return Err(AppError::field(
                "categorii",
                "Una sau mai multe categorii selectate nu există.",
            ));
        }
        Ok(())
    }

    pub async fn create_promotion(&self, promotion: NewPromotion) -> AppResult<PromotionResponse> {
        self.check_categories(&promotion.category_ids).await?;

        let txn = self.pool.begin().await?;
        let model = promotions::ActiveModel {
            name: Set(promotion.name),
            created_at: Set(Utc::now()),
            expires_at: Set(promotion.expires_at),
            discount_percent: Set(promotion.discount_percent),
            email_subject: Set(promotion.email_subject),
            template: Set(promotion.template),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        Self::replace_promotion_categories(&txn, model.id, &promotion.category_ids).await?;
        txn.commit().await?;

        log::info!("Created promotion {} ({})", model.id, model.name);
        Ok(PromotionResponse::new(model, promotion.category_ids))
    }

    async fn replace_promotion_categories<C: ConnectionTrait>(
        db: &C,
        promotion_id: i32,
        category_ids: &[i32],
    ) -> AppResult<()> {
        promotion_categories::Entity::delete_many()
            .filter(promotion_categories::Column::PromotionId.eq(promotion_id))
            .exec(db)
            .await?;
        for &category_id in category_ids {
            promotion_categories::ActiveModel {
                promotion_id: Set(promotion_id),
                category_id: Set(category_id),
            }
            .insert(db)
            .await?;
        }
        Ok(())
    }

    pub async fn update_promotion(
        &self,
        id: i32,
        promotion: NewPromotion,
    ) -> AppResult<PromotionResponse> {
        let existing = promotions::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found("Promoția", id))?;
        self.check_categories(&promotion.category_ids).await?;

        let txn = self.pool.begin().await?;
        let mut model = existing.into_active_model();
        model.name = Set(promotion.name);
        model.expires_at = Set(promotion.expires_at);
        model.discount_percent = Set(promotion.discount_percent);
        model.email_subject = Set(promotion.email_subject);
        model.template = Set(promotion.template);
        let model = model.update(&txn).await?;
        Self::replace_promotion_categories(&txn, id, &promotion.category_ids).await?;
        txn.commit().await?;

        Ok(PromotionResponse::new(model, promotion.category_ids))
    }

    pub async fn delete_promotion(&self, id: i32) -> AppResult<()> {
        let txn = self.pool.begin().await?;
        Self::replace_promotion_categories(&txn, id, &[]).await?;
        let res = promotions::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(not_found("Promoția", id));
        }
        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_trims_and_limits() {
        let mut errors = FormErrors::new();
        assert_eq!(text_field(&mut errors, "name", "  Nike ", 10).as_deref(), Some("Nike"));
        assert!(text_field(&mut errors, "name", "   ", 10).is_none());
        assert!(text_field(&mut errors, "country", "Republica Moldova", 5).is_none());
        assert!(errors.has("name"));
        assert!(errors.has("country"));
    }
}
