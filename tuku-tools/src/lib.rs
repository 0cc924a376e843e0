//! Content checks of the Tuku GO site: locale files and the attraction data file.

pub mod check;
pub mod config;

pub use check::{check_attractions, check_dictionaries, check_site, Problem};
pub use config::ToolConfig;
