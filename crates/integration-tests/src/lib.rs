//! Integration tests for Brandboard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p brandboard-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `brand_trends` - Trend engine end-to-end (buckets, merge, colors,
//!   snapshot) against realistic fact sets
//! - `enrichment` - Enrichment strategy selection and LLM fallback without
//!   network access
//!
//! Everything here runs without a database: the trend engine is pure, and
//! the LLM fallback is exercised by pointing the client at an unreachable
//! endpoint.
