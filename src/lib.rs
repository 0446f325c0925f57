//! shorturl - hash-derived short links
//!
//! A URL is hashed to a 40-bit key and presented as a base-62 code. Owners
//! create and delete links; anyone holding a code is redirected, and every
//! redirect is counted and logged for per-link analytics.
//!
//! # Architecture
//! - `codec`: URL → hash → short code
//! - `storage`: repository traits and the SeaORM backend
//! - `services`: link management, redirect resolution, analytics
//! - `api`: actix-web handlers, bearer identity, response envelope
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: startup wiring and the HTTP server
//! - `system`: logging

pub mod api;
pub mod codec;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
