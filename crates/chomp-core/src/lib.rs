pub mod actions;
pub mod analytics;
pub mod calendar;
pub mod config;
pub mod error;
pub mod form;
pub mod import;
pub mod reducer;
pub mod screen;
pub mod state;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;

pub use actions::*;
pub use config::*;
pub use error::*;
pub use reducer::*;
pub use state::*;
