//! List and lookup shared by every resource endpoint

pub mod paginate;
pub mod show;
