use crate::error::{AppError, AppResult};
use crate::utils::{Claims, JwtService};
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// Path prefixes that need a valid access token. Everything else is public.
const PROTECTED_PREFIXES: [&str; 2] = ["/api/v1/user/", "/api/v1/admin/"];

fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.starts_with(prefix) || path == prefix.trim_end_matches('/')
    })
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight
        if req.method() == Method::OPTIONS || !is_protected(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let Some(token) = bearer_token(&req) else {
            log::warn!("Missing access token for {}", req.path());
            let error = AppError::AuthError("Lipsește tokenul de acces.".to_string());
            return Box::pin(async move { Err(error.into()) });
        };

        match self.jwt_service.verify_access_token(token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            Err(e) => {
                log::warn!("Rejected access token for {}: {}", req.path(), e);
                let error = AppError::AuthError("Token de acces invalid.".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

/// Claims of the authenticated user, set by [`AuthMiddleware`].
pub fn current_claims(req: &HttpRequest) -> AppResult<Claims> {
    req.extensions()
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("Autentificare necesară.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_user_and_admin_routes_are_protected() {
        assert!(is_protected("/api/v1/user/views"));
        assert!(is_protected("/api/v1/admin/products/3"));
        assert!(is_protected("/api/v1/admin"));
        assert!(!is_protected("/api/v1/auth/login"));
        assert!(!is_protected("/api/v1/contact"));
        assert!(!is_protected("/produse"));
    }
}
