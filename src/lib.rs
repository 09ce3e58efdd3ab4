pub mod cmd;
pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod parser;
pub mod token;
pub mod types;
pub mod util;
