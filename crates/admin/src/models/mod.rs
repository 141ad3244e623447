//! Input and view models for the admin API.
//!
//! Domain entities live in `brandboard_core`; these types are the shapes
//! requests and repository calls exchange.

pub mod order;
pub mod product;

pub use order::{OrderFilter, OrderWithItems};
pub use product::{AddImageInput, CreateProductInput, ProductFilter, UpdateProductInput};
