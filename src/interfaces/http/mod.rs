//! HTTP REST API interfaces
//!
//! - `common`: extractors, response envelope, error mapping
//! - `modules`: handlers per resource (accounts, health, metrics)
//! - `router`: route table and layers

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AccountServices};
