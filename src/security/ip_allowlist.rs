use std::future::{ready, Ready};
use std::net::IpAddr;
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use super::client_ip;
use crate::errors::ApiError;

/// Rejects clients whose address is not listed; an empty list admits everyone
pub struct IpAllowlistMiddleware {
    allowed: Rc<Vec<IpAddr>>,
}

impl IpAllowlistMiddleware {
    pub fn new(allowed: Vec<IpAddr>) -> Self {
        Self {
            allowed: Rc::new(allowed),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for IpAllowlistMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = IpAllowlistMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IpAllowlistMiddlewareService {
            service,
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct IpAllowlistMiddlewareService<S> {
    service: S,
    allowed: Rc<Vec<IpAddr>>,
}

impl<S, B> Service<ServiceRequest> for IpAllowlistMiddlewareService<S>
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
        let ip = client_ip(&req);

        if self.allowed.is_empty() || self.allowed.contains(&ip) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        tracing::warn!(ip = %ip, path = req.path(), "Blocked IP, not in allowlist");

        let response = ApiError::Forbidden("Access forbidden".to_string()).error_response();
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}
