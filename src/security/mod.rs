//! Access control middleware
//!
//! Applied outermost first: rate limit, IP allowlist, API key. None of them
//! touch the database.

pub mod api_key;
pub mod ip_allowlist;
pub mod rate_limit;

use std::net::{IpAddr, Ipv4Addr};

use actix_web::dev::ServiceRequest;

pub use api_key::ApiKeyMiddleware;
pub use ip_allowlist::IpAllowlistMiddleware;
pub use rate_limit::{IpRateLimiter, RateLimitMiddleware};

/// Address of the calling client
///
/// The socket peer when known, else the first `X-Forwarded-For` entry, else
/// loopback.
pub fn client_ip(req: &ServiceRequest) -> IpAddr {
    req.peer_addr().map(|addr| addr.ip()).unwrap_or_else(|| {
        req.headers()
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    })
}
