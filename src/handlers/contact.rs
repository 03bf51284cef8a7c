use crate::error::AppError;
use crate::forms::{ContactForm, ContactMessage};
use crate::models::ApiResponse;
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::Local;

#[utoipa::path(
    post,
    path = "/api/v1/contact",
    tag = "contact",
    request_body = ContactForm,
    responses(
        (status = 200, description = "Mesaj acceptat", body = ContactMessage),
        (status = 400, description = "Formular invalid")
    )
)]
pub async fn send_message(request: web::Json<ContactForm>) -> Result<HttpResponse> {
    match request.clean(Local::now().date_naive()) {
        Ok(message) => {
            log::info!(
                "Contact message ({}) from {}: {}",
                message.message_type.as_str(),
                message.email,
                message.subject
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
                message,
                "Mesajul a fost trimis.".to_string(),
            )))
        }
        Err(errors) => Ok(AppError::from(errors).error_response()),
    }
}

pub fn contact_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact", web::post().to(send_message));
}
