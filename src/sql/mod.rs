//! SQL script export and database metadata import

mod export;
mod import;

pub use export::*;
pub use import::*;
