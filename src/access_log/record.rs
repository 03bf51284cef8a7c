use actix_web::{HttpMessage, HttpRequest, web};
use chrono::{DateTime, Local};
use std::sync::Mutex;

/// One handled page request.
#[derive(Debug, Clone, PartialEq)]
pub struct Access {
    pub id: u64,
    pub ip: String,
    pub accessed_at: DateTime<Local>,
    /// Path without the query string.
    pub path: String,
    /// Path plus query string, as requested.
    pub full_path: String,
    /// Decoded query parameters; an empty value is `None`.
    pub params: Vec<(String, Option<String>)>,
}

impl Access {
    pub fn formatted_date(&self, format: &str) -> String {
        self.accessed_at.format(format).to_string()
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|(k, _)| k == name)
    }
}

/// Request data needed to build an [`Access`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInfo {
    pub ip: String,
    pub path: String,
    pub full_path: String,
    pub params: Vec<(String, Option<String>)>,
}

impl RequestInfo {
    pub fn from_request(req: &HttpRequest) -> Self {
        let forwarded = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok());
        let peer = req.peer_addr().map(|addr| addr.ip().to_string());
        let path = req.path().to_string();
        let full_path = match req.query_string() {
            "" => path.clone(),
            qs => format!("{path}?{qs}"),
        };

        Self {
            ip: client_ip(forwarded, peer.as_deref()),
            path,
            full_path,
            params: query_pairs(req.query_string())
                .into_iter()
                .map(|(k, v)| (k, Some(v).filter(|v| !v.is_empty())))
                .collect(),
        }
    }
}

/// Last entry of `X-Forwarded-For` when present, otherwise the peer address.
pub fn client_ip(forwarded_for: Option<&str>, peer: Option<&str>) -> String {
    forwarded_for
        .and_then(|list| list.rsplit(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or(peer)
        .unwrap_or("necunoscut")
        .to_string()
}

/// Decoded `key=value` pairs in request order. Undecodable strings give no pairs.
pub fn query_pairs(query_string: &str) -> Vec<(String, String)> {
    web::Query::<Vec<(String, String)>>::from_query(query_string)
        .map(web::Query::into_inner)
        .unwrap_or_default()
}

/// Application-wide access log. Ids start at 1 and follow insertion order.
#[derive(Debug, Default)]
pub struct AccessLog {
    records: Mutex<Vec<Access>>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, info: RequestInfo) -> Access {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let access = Access {
            id: records.len() as u64 + 1,
            ip: info.ip,
            accessed_at: Local::now(),
            path: info.path,
            full_path: info.full_path,
            params: info.params,
        };
        records.push(access.clone());
        access
    }

    pub fn snapshot(&self) -> Vec<Access> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The access recorded for this request by the middleware, or a fresh one
/// when the request bypassed it.
pub fn current_access(req: &HttpRequest, log: &AccessLog) -> Access {
    if let Some(access) = req.extensions().get::<Access>() {
        return access.clone();
    }
    let access = log.record(RequestInfo::from_request(req));
    req.extensions_mut().insert(access.clone());
    access
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn info(path: &str) -> RequestInfo {
        RequestInfo {
            ip: "127.0.0.1".into(),
            path: path.into(),
            full_path: path.into(),
            params: vec![],
        }
    }

    #[test]
    fn ids_are_sequential() {
        let log = AccessLog::new();
        assert_eq!(log.record(info("/")).id, 1);
        assert_eq!(log.record(info("/info")).id, 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.snapshot()[1].path, "/info");
    }

    #[test]
    fn forwarded_for_uses_last_entry() {
        assert_eq!(client_ip(Some("10.0.0.1, 10.0.0.2"), Some("1.1.1.1")), "10.0.0.2");
        assert_eq!(client_ip(None, Some("1.1.1.1")), "1.1.1.1");
        assert_eq!(client_ip(Some(" "), Some("1.1.1.1")), "1.1.1.1");
    }

    #[test]
    fn request_info_keeps_query() {
        let req = TestRequest::with_uri("/data?zi&x=1")
            .insert_header(("X-Forwarded-For", "8.8.8.8"))
            .to_http_request();
        let info = RequestInfo::from_request(&req);
        assert_eq!(info.ip, "8.8.8.8");
        assert_eq!(info.path, "/data");
        assert_eq!(info.full_path, "/data?zi&x=1");
        assert_eq!(
            info.params,
            vec![("zi".to_string(), None), ("x".to_string(), Some("1".to_string()))]
        );
    }

    #[test]
    fn current_access_is_recorded_once() {
        let log = AccessLog::new();
        let req = TestRequest::with_uri("/info").to_http_request();
        let first = current_access(&req, &log);
        let second = current_access(&req, &log);
        assert_eq!(first.id, second.id);
        assert_eq!(log.len(), 1);
    }
}
