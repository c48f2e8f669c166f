//! # Force Field Parameters
//!
//! The typed ReaxFF parameter model and the machinery that builds it.
//!
//! - [`schema`] - The fixed section vocabulary: arity, field layout, symmetry
//!   and wildcard rules for every section
//! - [`species`] - Element symbols, the wildcard, and tuple keys
//! - [`table`] - Frozen per-section lookup tables
//! - [`builder`] - Validation of lexed sections into a [`params::ParameterSet`]
//! - [`params`] - The complete set handed to evaluators
//! - [`error`] - Located diagnostics and load failures
//! - [`options`] - Error and duplicate policies for loading
//!
//! Tables never change once built. Symmetric two- and three-body sections
//! are stored under both orders, and torsion wildcards are resolved at
//! lookup time in a fixed precedence order.

pub mod builder;
pub mod error;
pub mod options;
pub mod params;
pub mod schema;
pub mod species;
pub mod table;
