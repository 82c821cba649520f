//! # Badges Config
//!
//! Configuration for the profile badge generator: the schema, its defaults,
//! YAML loading with environment overrides and validation.
//!
//! Precedence is CLI flags over environment variables over the config file;
//! this crate handles the last two and the binary applies the flags.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validation::*;
