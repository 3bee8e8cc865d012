//! Imports a nested news document (categories, their news and subcategories)
//! into the flat `category` and `material` tables of a SQLite store.

pub mod app;
pub mod config;
pub mod db;
pub mod feed;
pub mod import;

pub use app::{FatalError, run};
pub use config::{Config, DEFAULT_DB_FILE, Filters};
pub use import::{Importer, Tally};
