//! Editor session services
//!
//! Each provider owns one slice of session state behind a cloneable handle
//! and publishes an `AppEvent` when that state changes. They are built in
//! dependency order by `app::EditorServices::compose`.

pub mod canvas;
mod config;
mod dialog;
mod export_image;
mod history;
mod layout;
mod loader;
mod local_config;
mod redo_undo;
mod schema;
mod shortcuts;
mod theme;
mod toast;

pub use canvas::{CanvasState, TableBox, Viewport};
pub use config::*;
pub use dialog::*;
pub use export_image::*;
pub use history::*;
pub use layout::*;
pub use loader::*;
pub use local_config::*;
pub use redo_undo::*;
pub use schema::*;
pub use shortcuts::*;
pub use theme::*;
pub use toast::*;
