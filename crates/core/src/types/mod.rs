//! Core types for Brandboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod company;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use company::Company;
pub use id::*;
pub use order::{Order, OrderItem};
pub use price::{CurrencyCode, Price};
pub use product::{Product, ProductImage};
pub use status::*;
