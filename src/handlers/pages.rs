use super::{PageContext, PageResult, html};
use crate::access_log::{AccessLog, LogQuery, LogReport, current_access, record::query_pairs};
use crate::error::AppError;
use crate::services::{AuthService, CatalogService};
use crate::views::{info, log as log_view, pages};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use chrono::Local;

pub async fn index(
    req: HttpRequest,
    log: web::Data<AccessLog>,
    catalog: web::Data<CatalogService>,
) -> PageResult {
    let ctx = PageContext::load(&req, &log, &catalog).await?;
    Ok(html(StatusCode::OK, pages::index(&ctx.layout())))
}

pub async fn about(
    req: HttpRequest,
    log: web::Data<AccessLog>,
    catalog: web::Data<CatalogService>,
) -> PageResult {
    let ctx = PageContext::load(&req, &log, &catalog).await?;
    Ok(html(StatusCode::OK, pages::about(&ctx.layout())))
}

/// Placeholder for the cart, contact, FAQ and terms pages.
pub async fn in_progress(
    req: HttpRequest,
    log: web::Data<AccessLog>,
    catalog: web::Data<CatalogService>,
) -> PageResult {
    let ctx = PageContext::load(&req, &log, &catalog).await?;
    Ok(html(StatusCode::OK, pages::in_progress(&ctx.layout())))
}

pub async fn server_info(req: HttpRequest, log: web::Data<AccessLog>) -> HttpResponse {
    let access = current_access(&req, &log);
    let date = access.has_param("data").then(|| {
        info::date_fragment(&Local::now().naive_local(), info::DateMode::from_params(&access))
    });
    html(StatusCode::OK, info::info_page(&access, date.as_deref()))
}

pub async fn server_date(req: HttpRequest, log: web::Data<AccessLog>) -> HttpResponse {
    let access = current_access(&req, &log);
    let mode = info::DateMode::from_params(&access);
    html(
        StatusCode::OK,
        info::date_fragment(&Local::now().naive_local(), mode),
    )
}

pub async fn access_log(req: HttpRequest, log: web::Data<AccessLog>) -> HttpResponse {
    let access = current_access(&req, &log);
    let query = LogQuery::from_pairs(&query_pairs(req.query_string()));
    let report = LogReport::build(&log.snapshot(), &query, access.id);
    html(StatusCode::OK, log_view::log_page(&report))
}

pub async fn confirm_email(
    req: HttpRequest,
    path: web::Path<String>,
    log: web::Data<AccessLog>,
    catalog: web::Data<CatalogService>,
    auth_service: web::Data<AuthService>,
) -> PageResult {
    let ctx = PageContext::load(&req, &log, &catalog).await?;
    match auth_service.confirm_email(&path.into_inner()).await {
        Ok(user) => {
            log::info!("E-mail confirmed for user {}", user.username);
            Ok(html(
                StatusCode::OK,
                pages::email_confirmed(&ctx.layout(), &user.username),
            ))
        }
        Err(AppError::NotFound(msg)) => Ok(html(
            StatusCode::NOT_FOUND,
            pages::not_found(&ctx.layout(), &msg),
        )),
        Err(e) => Err(e.into()),
    }
}

pub fn pages_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/despre", web::get().to(about))
        .route("/cos_virtual", web::get().to(in_progress))
        .route("/contact", web::get().to(in_progress))
        .route("/faq", web::get().to(in_progress))
        .route("/termeni", web::get().to(in_progress))
        .route("/info", web::get().to(server_info))
        .route("/data", web::get().to(server_date))
        .route("/log", web::get().to(access_log))
        .route("/confirma_mail/{cod}", web::get().to(confirm_email));
}
