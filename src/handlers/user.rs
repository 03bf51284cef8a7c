use crate::middlewares::current_claims;
use crate::models::*;
use crate::services::UserService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/api/v1/user/views/{product_id}",
    tag = "user",
    params(("product_id" = i32, Path, description = "ID-ul produsului")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vizualizare înregistrată"),
        (status = 401, description = "Neautentificat"),
        (status = 404, description = "Produsul nu există")
    )
)]
pub async fn record_view(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = match current_claims(&req).and_then(|claims| claims.user_id()) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service.record_view(user_id, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Vizualizare înregistrată."))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/user/views",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Produse vizualizate, cele mai recente primele", body = [ProductViewResponse]),
        (status = 401, description = "Neautentificat")
    )
)]
pub async fn list_views(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = match current_claims(&req).and_then(|claims| claims.user_id()) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };

    match user_service.list_views(user_id).await {
        Ok(views) => Ok(HttpResponse::Ok().json(ApiResponse::success(views))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .route("/views", web::get().to(list_views))
            .route("/views/{product_id}", web::post().to(record_view)),
    );
}
