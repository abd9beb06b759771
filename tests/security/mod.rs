pub mod api_key_test;
pub mod ip_allowlist_test;
pub mod rate_limit_test;
pub mod sql_injection_test;
