pub mod config;
pub mod error;
pub mod history;
pub mod io;
pub mod migrations;
pub mod ng_shift;
pub mod paths;
pub mod pattern;
pub mod staff;
pub mod state;
pub mod storage;
pub mod store;
pub mod summary;
pub mod template;
pub mod types;
pub mod weekly;

pub use error::{Result, ShiftError};
pub use store::ShiftStore;
