use crate::entities::user_entity as users;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub county: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email_confirmed: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(u: users::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            phone: u.phone,
            address: u.address,
            county: u.county,
            birth_date: u.birth_date,
            email_confirmed: u.email_confirmed,
            is_staff: u.is_staff,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub user: UserResponse,
    /// Path of the confirmation link that would be e-mailed.
    pub confirmation_link: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductViewResponse {
    pub product_id: i32,
    pub product_name: String,
    pub viewed_at: DateTime<Utc>,
}
