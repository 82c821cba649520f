//! # Badges CLI
//!
//! The `badges` command line tool. Each subcommand runs one pipeline end to
//! end: fetch data, compute, render and write the artifact.
//!
//! Configuration comes from [`badges_config::ConfigLoader`]; flags given on
//! the command line take precedence over environment variables and the file.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod context;

pub use cli::{Badges, Command};
pub use context::AppContext;
