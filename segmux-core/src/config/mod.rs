//! Configuration types
//!
//! Board-agnostic display configuration and its TOML-subset parser.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
