//! Shared key authentication
//!
//! Every request must carry `X-API-Key` equal to the configured key, except
//! the banner, documentation, liveness, readiness and metrics paths.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use super::client_ip;
use crate::errors::ApiError;

pub const API_KEY_HEADER: &str = "X-API-Key";

const EXEMPT_PATHS: [&str; 6] = ["/", "/api.json", "/health", "/live", "/ready", "/metrics"];

/// Paths reachable without a key
pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path) || path == "/docs" || path.starts_with("/docs/")
}

/// Constant-time byte comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

pub struct ApiKeyMiddleware {
    key: Rc<String>,
}

impl ApiKeyMiddleware {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Rc::new(key.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddlewareService {
            service,
            key: self.key.clone(),
        }))
    }
}

pub struct ApiKeyMiddlewareService<S> {
    service: S,
    key: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorized = is_exempt(req.path())
            || req
                .headers()
                .get(API_KEY_HEADER)
                .map(|value| constant_time_eq(value.as_bytes(), self.key.as_bytes()))
                .unwrap_or(false);

        if authorized {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        tracing::warn!(
            ip = %client_ip(&req),
            path = req.path(),
            key_present = req.headers().contains_key(API_KEY_HEADER),
            "Invalid API key"
        );

        let response = ApiError::Unauthorized("Invalid API key".to_string()).error_response();
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}
