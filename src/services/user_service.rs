use crate::entities::{product_entity as products, product_view_entity as product_views};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Records that the user viewed a product. Viewing again refreshes the timestamp.
    pub async fn record_view(&self, user_id: i32, product_id: i32) -> AppResult<()> {
        if products::Entity::find_by_id(product_id)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Produsul cu ID-ul {product_id} nu există."
            )));
        }

        let view = product_views::ActiveModel {
            user_id: Set(user_id),
            product_id: Set(product_id),
            viewed_at: Set(Utc::now()),
            ..Default::default()
        };
        product_views::Entity::insert(view)
            .on_conflict(
                OnConflict::columns([
                    product_views::Column::UserId,
                    product_views::Column::ProductId,
                ])
                .update_column(product_views::Column::ViewedAt)
                .to_owned(),
            )
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    /// Viewed products, most recent first.
    pub async fn list_views(&self, user_id: i32) -> AppResult<Vec<ProductViewResponse>> {
        let rows = product_views::Entity::find()
            .filter(product_views::Column::UserId.eq(user_id))
            .find_also_related(products::Entity)
            .order_by_desc(product_views::Column::ViewedAt)
            .order_by_desc(product_views::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(view, product)| {
                product.map(|p| ProductViewResponse {
                    product_id: view.product_id,
                    product_name: p.name,
                    viewed_at: view.viewed_at,
                })
            })
            .collect())
    }
}
