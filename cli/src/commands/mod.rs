//! CLI command implementations

pub mod classify;
pub mod config;
pub mod count;
pub mod filter;
pub mod route;
pub mod suggest;

pub use classify::classify_command;
pub use config::{config_command, ConfigAction};
pub use count::count_command;
pub use filter::filter_command;
pub use route::route_command;
pub use suggest::suggest_command;
