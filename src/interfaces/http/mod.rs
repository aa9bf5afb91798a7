//! HTTP REST API interfaces
//!
//! - `common`: Response envelope and validated JSON extractor
//! - `dto`: Request/response types
//! - `handlers`: Request handlers
//! - `router`: API router

pub mod common;
pub mod dto;
pub mod handlers;
pub mod router;

pub use router::create_api_router;
