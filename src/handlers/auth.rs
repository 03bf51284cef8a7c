use crate::error::AppError;
use crate::forms::{LoginForm, RegistrationForm};
use crate::models::*;
use crate::services::AuthService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Local;

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegistrationForm,
    responses(
        (status = 200, description = "Cont creat, e-mail neconfirmat", body = RegisterResponse),
        (status = 400, description = "Formular invalid")
    )
)]
pub async fn register(
    auth_service: web::Data<AuthService>,
    request: web::Json<RegistrationForm>,
) -> Result<HttpResponse> {
    let new_user = match request.clean(Local::now().date_naive()) {
        Ok(new_user) => new_user,
        Err(errors) => return Ok(AppError::from(errors).error_response()),
    };

    match auth_service.register(new_user).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            response,
            "Contul a fost creat. Confirmați adresa de e-mail.".to_string(),
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Autentificare reușită", body = AuthResponse),
        (status = 400, description = "Formular invalid"),
        (status = 401, description = "Date de autentificare greșite")
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginForm>,
) -> Result<HttpResponse> {
    let credentials = match request.clean() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(AppError::from(errors).error_response()),
    };

    match auth_service.login(credentials).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login)),
    );
}
