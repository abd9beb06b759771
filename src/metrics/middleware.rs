//! Per-request HTTP metrics
//!
//! Requests are labelled with the matched route pattern, never the raw path,
//! so customer codes and document numbers do not become label values.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

use crate::metrics::AppMetrics;

/// Label for requests no route matched
pub const UNMATCHED_ROUTE: &str = "unmatched";

pub struct MetricsMiddleware {
    metrics: AppMetrics,
}

impl MetricsMiddleware {
    pub fn new(metrics: AppMetrics) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service,
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: S,
    metrics: AppMetrics,
}

/// Holds one slot of the in-flight gauge, released on drop
///
/// Dropping also covers a client that disconnects while the handler waits on
/// the pool.
struct InFlight(AppMetrics);

impl InFlight {
    fn enter(metrics: &AppMetrics) -> Self {
        metrics.http_request_start();
        Self(metrics.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.http_request_end();
    }
}

fn route_label<B>(response: &ServiceResponse<B>) -> String {
    response
        .request()
        .match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
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
        let in_flight = InFlight::enter(&self.metrics);
        let metrics = self.metrics.clone();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            drop(in_flight);

            let elapsed = started.elapsed().as_secs_f64();

            match &result {
                Ok(response) => {
                    metrics.record_http_request(&method, &route_label(response), response.status().as_u16(), elapsed)
                }
                Err(err) => {
                    let status = err.as_response_error().status_code().as_u16();
                    metrics.record_http_request(&method, UNMATCHED_ROUTE, status, elapsed);
                }
            }

            result
        })
    }
}
