//! # Workflows Module
//!
//! Top-level entry points for loading ReaxFF libraries.
//!
//! - **Options** ([`config`]) - Error and duplicate policies, built in code or read from TOML
//! - **Loading** ([`load`]) - Load, publish and lint parameter libraries

pub mod config;
pub mod load;

pub use config::{DuplicatePolicy, ErrorPolicy, LoadOptions, LoadOptionsBuilder};
pub use load::{lint_force_field, load_force_field, load_force_field_from_str};
