//! Per client rate limiting
//!
//! Each client address gets its own `governor` bucket refilled at
//! `requests_per_minute` with room for `burst` back to back requests. Requests
//! over the quota get 429 with `Retry-After`. When `min_request_interval_ms` is
//! set, requests of one client arriving closer together than the interval are
//! held back until their slot instead of being rejected.
//!
//! A client whose bucket has refilled and whose pacing slot has passed carries
//! no state worth keeping, so [`IpRateLimiter::evict_idle`] drops it. The
//! server sweeps periodically and the limiter sweeps on its own once it tracks
//! [`MAX_TRACKED_CLIENTS`] addresses.

use std::future::{ready, Ready};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, ResponseError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::LocalBoxFuture;
use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use super::client_ip;
use crate::config::RateLimitConfig;
use crate::errors::ApiError;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Tracked addresses that trigger an inline sweep
pub const MAX_TRACKED_CLIENTS: usize = 10_000;

struct ClientBucket {
    limiter: DirectLimiter,
    last_seen: Instant,
}

/// Per-IP rate limiter with thread-safe tracking
#[derive(Clone)]
pub struct IpRateLimiter {
    limiters: Arc<DashMap<IpAddr, ClientBucket>>,
    next_slot: Arc<DashMap<IpAddr, Instant>>,
    config: RateLimitConfig,
}

impl IpRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiters: Arc::new(DashMap::new()),
            next_slot: Arc::new(DashMap::new()),
            config,
        }
    }

    fn quota(&self) -> Quota {
        let per_minute = NonZeroU32::new(self.config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.config.burst()).unwrap_or(per_minute);

        Quota::per_minute(per_minute).allow_burst(burst)
    }

    /// Time for an empty bucket to fill up again
    fn refill_period(&self) -> Duration {
        let per_minute = self.config.requests_per_minute.max(1);
        let burst = self.config.burst().max(1);

        Duration::from_secs(60) * burst / per_minute
    }

    /// Take one request from the bucket of `ip`, or report how long to wait
    #[tracing::instrument(skip(self), fields(ip = %ip))]
    pub fn check_rate_limit(&self, ip: IpAddr) -> Result<(), Duration> {
        if !self.config.enabled {
            return Ok(());
        }

        if self.limiters.len() >= MAX_TRACKED_CLIENTS && !self.limiters.contains_key(&ip) {
            self.evict_idle();
        }

        let now = Instant::now();
        let mut client = self.limiters.entry(ip).or_insert_with(|| ClientBucket {
            limiter: RateLimiter::direct(self.quota()),
            last_seen: now,
        });
        client.last_seen = now;
        let checked = client.limiter.check();
        drop(client);

        match checked {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(DefaultClock::default().now());
                tracing::warn!(ip = %ip, retry_after = ?wait_time, "Rate limit exceeded");
                Err(wait_time)
            }
        }
    }

    /// Delay before a request of `ip` may proceed, reserving its slot
    pub fn pacing_delay(&self, ip: IpAddr) -> Duration {
        if !self.config.enabled || self.config.min_request_interval_ms == 0 {
            return Duration::ZERO;
        }

        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let now = Instant::now();

        let slot = match self.next_slot.entry(ip) {
            Entry::Occupied(mut entry) => {
                let slot = (*entry.get() + interval).max(now);
                entry.insert(slot);
                slot
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                now
            }
        };

        slot.saturating_duration_since(now)
    }

    /// Drop clients that would start afresh anyway, returning how many went
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let refill = self.refill_period();
        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let before = self.limiters.len() + self.next_slot.len();

        self.limiters
            .retain(|_, client| now.saturating_duration_since(client.last_seen) < refill);
        self.next_slot.retain(|_, slot| *slot + interval > now);

        let evicted = before.saturating_sub(self.limiters.len() + self.next_slot.len());
        if evicted > 0 {
            tracing::debug!(evicted, tracked = self.limiters.len(), "Evicted idle rate limit clients");
        }
        evicted
    }

    /// Addresses currently holding a bucket
    pub fn tracked_clients(&self) -> usize {
        self.limiters.len()
    }

    /// Forget everything known about `ip`
    pub fn clear_ip(&self, ip: IpAddr) {
        self.limiters.remove(&ip);
        self.next_slot.remove(&ip);
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

/// Rate limiting middleware for actix-web
pub struct RateLimitMiddleware {
    limiter: IpRateLimiter,
}

impl RateLimitMiddleware {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: IpRateLimiter::new(config),
        }
    }

    /// Share one limiter between several app instances
    pub fn with_limiter(limiter: IpRateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: IpRateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let ip = client_ip(&req);

        if let Err(retry_after) = self.limiter.check_rate_limit(ip) {
            let response = ApiError::TooManyRequests { retry_after }.error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let delay = self.limiter.pacing_delay(ip);
        let service = self.service.clone();

        Box::pin(async move {
            if !delay.is_zero() {
                tracing::debug!(ip = %ip, delay_ms = delay.as_millis() as u64, "Request paced");
                tokio::time::sleep(delay).await;
            }

            Ok(service.call(req).await?.map_into_left_body())
        })
    }
}
