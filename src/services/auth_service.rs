use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::forms::{Credentials, NewUser};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// Creates an unconfirmed account with a fresh confirmation code.
    pub async fn register(&self, new_user: NewUser) -> AppResult<RegisterResponse> {
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(new_user.username.as_str()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::field(
                "username",
                "Există deja un utilizator cu acest nume.",
            ));
        }

        let password_hash = hash_password(&new_user.password)?;
        let confirmation_code = generate_confirmation_code();

        let user = users::ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            password_hash: Set(password_hash),
            phone: Set(new_user.phone),
            address: Set(new_user.address),
            county: Set(new_user.county),
            birth_date: Set(Some(new_user.birth_date)),
            cnp: Set(new_user.cnp),
            confirmation_code: Set(Some(confirmation_code.clone())),
            email_confirmed: Set(false),
            is_staff: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Registered user {} (id {})", user.username, user.id);

        Ok(RegisterResponse {
            user: UserResponse::from(user),
            confirmation_link: format!("/confirma_mail/{confirmation_code}"),
        })
    }

    pub async fn login(&self, credentials: Credentials) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(credentials.username.as_str()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Nume de utilizator sau parolă greșită.".to_string()))?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Nume de utilizator sau parolă greșită.".to_string(),
            ));
        }

        let (access_token, expires_in) = self.jwt_service.generate_access_token(
            user.id,
            &user.username,
            user.is_staff,
            credentials.remember_me,
        )?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            expires_in,
        })
    }

    /// Marks the account owning `code` as confirmed. The code is single use.
    pub async fn confirm_email(&self, code: &str) -> AppResult<users::Model> {
        let user = users::Entity::find()
            .filter(users::Column::ConfirmationCode.eq(code))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Codul de confirmare nu este valid.".to_string()))?;

        let mut model = user.into_active_model();
        model.email_confirmed = Set(true);
        model.confirmation_code = Set(None);
        let user = model.update(&self.pool).await?;

        log::info!("User {} confirmed their e-mail", user.id);
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: i32) -> AppResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
