//! Data layer for the Siwasis backend API.
//!
//! HTTP client with bearer header injection, one repository per endpoint
//! group, and the wire types and error taxonomy they share.

pub mod auth;
pub mod client;
pub mod documents;
pub mod error;
pub mod profile;
pub mod types;
