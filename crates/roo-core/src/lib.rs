pub mod definitions;
pub mod error;
pub mod io;
pub mod loader;
pub mod materialize;
pub mod paths;
pub mod schema;
pub mod selector;
pub mod types;
pub mod ui;

pub use error::{Result, RooError};
