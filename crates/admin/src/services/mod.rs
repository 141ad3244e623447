//! Business logic services for the admin API.
//!
//! # Services
//!
//! - `companies` - Tenant resolution by URL slug with in-memory caching

pub mod companies;

pub use companies::CompanyService;
