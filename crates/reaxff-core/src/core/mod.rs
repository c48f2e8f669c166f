//! # Core Module
//!
//! The parameter model and its file format.
//!
//! - **Parameters** ([`forcefield`]) - Section schemas, tuple keys, tables and validation
//! - **File I/O** ([`io`]) - Section splitting, library reading and writing
//! - **Reference data** ([`utils`]) - The periodic table and site type tags

pub mod forcefield;
pub mod io;
pub mod utils;
