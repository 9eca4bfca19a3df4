//! Origin guard: CORS response headers from a fixed allow-list.
//!
//! # Design Decisions
//! - One pure decision function shared by both hosting models
//! - An origin that is not on the list falls back to the first entry
//! - The traditional model allows `DELETE`; the edge model does not
//! - `Vary: Origin` is always set, whatever the match outcome

use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ORIGIN, VARY,
    },
    HeaderMap, HeaderValue, Request, Response,
};

/// Origins permitted to receive CORS headers. The first entry is the default.
pub const ALLOWED_ORIGINS: [&str; 5] = [
    "https://orbitsaas.cloud",
    "https://www.orbitsaas.cloud",
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:3000",
];

pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Which hosting model the headers are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSet {
    /// Long-lived server handlers.
    Traditional,
    /// Short-lived edge functions. No `DELETE`.
    Edge,
}

impl MethodSet {
    pub fn allow_methods(self) -> &'static str {
        match self {
            MethodSet::Traditional => "GET, POST, DELETE, OPTIONS",
            MethodSet::Edge => "GET, POST, OPTIONS",
        }
    }
}

/// The outcome of a CORS decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    pub allow_origin: &'static str,
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
    pub vary: &'static str,
}

impl CorsHeaders {
    /// Write the decision into a header map, replacing existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(self.allow_origin));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(self.allow_methods));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(self.allow_headers));
        headers.insert(VARY, HeaderValue::from_static(self.vary));
    }

    pub fn into_header_map(self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);
        self.apply(&mut headers);
        headers
    }
}

/// Allow-list entry matching `origin` exactly, or the default entry.
pub fn resolve_origin(origin: Option<&HeaderValue>) -> &'static str {
    origin
        .and_then(|v| v.to_str().ok())
        .and_then(|o| ALLOWED_ORIGINS.iter().copied().find(|allowed| *allowed == o))
        .unwrap_or(ALLOWED_ORIGINS[0])
}

pub fn decide_cors_headers(origin: Option<&HeaderValue>, methods: MethodSet) -> CorsHeaders {
    CorsHeaders {
        allow_origin: resolve_origin(origin),
        allow_methods: methods.allow_methods(),
        allow_headers: ALLOWED_HEADERS,
        vary: "Origin",
    }
}

/// Set CORS headers on `response` for the traditional handler model.
pub fn set_cors_headers<B, C>(request: &Request<B>, response: &mut Response<C>) {
    decide_cors_headers(request.headers().get(ORIGIN), MethodSet::Traditional)
        .apply(response.headers_mut());
}

/// CORS headers for the edge handler model, for the caller to attach.
pub fn set_cors_headers_edge<B>(request: &Request<B>) -> HeaderMap {
    decide_cors_headers(request.headers().get(ORIGIN), MethodSet::Edge).into_header_map()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_from(origin: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/health");
        if let Some(o) = origin {
            builder = builder.header("Origin", o);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn traditional(origin: Option<&str>) -> HeaderMap {
        let mut response = Response::new(Body::empty());
        set_cors_headers(&request_from(origin), &mut response);
        response.headers().clone()
    }

    #[test]
    fn test_allowed_origin_is_echoed() {
        for origin in ALLOWED_ORIGINS {
            let headers = traditional(Some(origin));
            assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], origin);
        }
    }

    #[test]
    fn test_unknown_origin_falls_back_to_default() {
        let headers = traditional(Some("https://evil.example"));
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://orbitsaas.cloud");
    }

    #[test]
    fn test_missing_origin_falls_back_to_default() {
        let headers = traditional(None);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://orbitsaas.cloud");
    }

    #[test]
    fn test_match_is_exact() {
        for origin in ["https://orbitsaas.cloud/", "HTTPS://ORBITSAAS.CLOUD", "http://orbitsaas.cloud"] {
            let headers = traditional(Some(origin));
            assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://orbitsaas.cloud");
        }
        let headers = traditional(Some("http://localhost:5174"));
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5174");
    }

    #[test]
    fn test_traditional_and_edge_method_sets() {
        let trad = traditional(Some("http://localhost:3000"));
        let edge = set_cors_headers_edge(&request_from(Some("http://localhost:3000")));

        assert_eq!(trad[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, DELETE, OPTIONS");
        assert_eq!(edge[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert!(!edge[ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap().contains("DELETE"));
        assert_eq!(edge[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    }

    #[test]
    fn test_vary_and_allow_headers_always_present() {
        for origin in [None, Some("https://www.orbitsaas.cloud"), Some("https://evil.example")] {
            let trad = traditional(origin);
            let edge = set_cors_headers_edge(&request_from(origin));
            for headers in [trad, edge] {
                assert_eq!(headers[VARY], "Origin");
                assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, Authorization");
            }
        }
    }

    #[test]
    fn test_existing_headers_are_replaced() {
        let mut response = Response::new(Body::empty());
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        set_cors_headers(&request_from(Some("http://localhost:5173")), &mut response);

        let values: Vec<_> = response.headers().get_all(ACCESS_CONTROL_ALLOW_ORIGIN).iter().collect();
        assert_eq!(values, vec!["http://localhost:5173"]);
    }

    #[test]
    fn test_allow_list_entries_are_bare_origins() {
        for origin in ALLOWED_ORIGINS {
            let parsed = url::Url::parse(origin).unwrap();
            assert!(matches!(parsed.scheme(), "http" | "https"));
            assert_eq!(parsed.origin().ascii_serialization(), origin);
        }
    }
}
