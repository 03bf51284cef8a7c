use crate::access_log::{AccessLog, RequestInfo};
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// Paths that are not pages and stay out of the access log.
const SKIPPED_PREFIXES: [&str; 3] = ["/api/", "/swagger-ui", "/api-docs"];

fn is_page(path: &str) -> bool {
    !SKIPPED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Appends every page request to the shared [`AccessLog`] and stores the
/// record in the request extensions for the handler.
pub struct AccessLogMiddleware {
    log: web::Data<AccessLog>,
}

impl AccessLogMiddleware {
    pub fn new(log: web::Data<AccessLog>) -> Self {
        Self { log }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessLogMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddlewareService {
            service,
            log: self.log.clone(),
        }))
    }
}

pub struct AccessLogMiddlewareService<S> {
    service: S,
    log: web::Data<AccessLog>,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddlewareService<S>
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
        if is_page(req.path()) {
            let access = self.log.record(RequestInfo::from_request(req.request()));
            log::debug!("Access #{} {} from {}", access.id, access.full_path, access.ip);
            req.extensions_mut().insert(access);
        }
        Box::pin(self.service.call(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_and_docs_are_not_pages() {
        assert!(is_page("/"));
        assert!(is_page("/produse/3"));
        assert!(is_page("/log"));
        assert!(!is_page("/api/v1/auth/login"));
        assert!(!is_page("/swagger-ui/index.html"));
        assert!(!is_page("/api-docs/openapi.json"));
    }
}
