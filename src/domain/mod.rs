//! Diagram domain types

mod database_type;
mod diagram;
mod route;

pub use database_type::*;
pub use diagram::*;
pub use route::*;
