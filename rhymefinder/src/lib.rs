//! # rhymefinder
//!
//! Rhyme search front end built on rhymefinder-core: category dictionary
//! loading, TOML configuration, concurrent query execution and rendering.

pub mod config;
pub mod finder;
pub mod loader;
pub mod render;

pub use config::FinderConfig;
pub use finder::{Findings, RhymeFinder};
pub use loader::{load_dictionary, parse_category_source};
pub use render::{render_json, render_text};
