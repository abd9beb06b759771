//! Access log and `X-Process-Time`
//!
//! One line per request with method, path, client address, status and
//! elapsed time. The API key header is only ever logged as present or missing.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

use crate::security::api_key::API_KEY_HEADER;
use crate::security::client_ip;

pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Masked rendering of the API key header for logs
fn masked_key(req: &ServiceRequest) -> &'static str {
    if req.headers().contains_key(API_KEY_HEADER) {
        "***"
    } else {
        "missing"
    }
}

pub struct RequestLogging;

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingService { service }))
    }
}

pub struct RequestLoggingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingService<S>
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
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let ip = client_ip(&req);
        let api_key = masked_key(&req);

        tracing::debug!(%method, %path, %ip, api_key, "Request received");

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let elapsed = started.elapsed();

            match result {
                Ok(mut res) => {
                    let status = res.status().as_u16();
                    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;

                    if res.status().is_server_error() {
                        tracing::warn!(%method, %path, %ip, status, elapsed_ms, "Request completed");
                    } else {
                        tracing::info!(%method, %path, %ip, status, elapsed_ms, "Request completed");
                    }

                    if let Ok(value) = HeaderValue::from_str(&format!("{:.6}", elapsed.as_secs_f64())) {
                        res.headers_mut()
                            .insert(HeaderName::from_static(PROCESS_TIME_HEADER), value);
                    }

                    Ok(res)
                }
                Err(err) => {
                    tracing::error!(%method, %path, %ip, error = %err, "Request failed");
                    Err(err)
                }
            }
        })
    }
}
