//! Keyset pagination primitives
//!
//! [`cursor`] turns the ordering key of a record into an opaque token and
//! back; [`Page`] is the envelope every list endpoint returns.

pub mod cursor;
mod page;

pub use cursor::CursorError;
pub use page::{Page, PaginationMetadata};
