//! Brandboard admin library.
//!
//! Multi-tenant inventory and order dashboard backend: product/order CRUD,
//! brand trend analytics, and AI-assisted product enrichment. This crate
//! provides the functionality as a library so the binary stays thin and the
//! pieces can be exercised from integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod claude;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
