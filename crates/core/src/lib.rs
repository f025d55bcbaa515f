pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod human;
pub mod interpreter;
pub mod model;
pub mod progress;
pub mod query;

pub use config::*;
pub use error::*;
pub use interpreter::*;
pub use model::*;
pub use progress::*;
pub use query::*;
