//! # ReaxFF Parameter Library
//!
//! Reads ReaxFF force-field parameter libraries into validated, immutable
//! lookup tables for use by an energy evaluator.
//!
//! ## Layers
//!
//! - **[`core`]: The Foundation.** The section vocabulary, species and tuple
//!   keys, per-section tables, the lexer and the table builder, plus the
//!   library reader and writer.
//!
//! - **[`workflows`]: The Public API.** Loading options and the entry points
//!   that load or lint a library and publish the result as a shared
//!   `Arc<ParameterSet>`.
//!
//! ```no_run
//! use reaxff_params::workflows::{LoadOptions, load_force_field};
//! use std::path::Path;
//!
//! let params = load_force_field(Path::new("ffield.reax"), &LoadOptions::default())?;
//! let bond = params.lookup("reaxff2_bond", &["C", "H"]);
//! # Ok::<(), reaxff_params::core::forcefield::error::LoadError>(())
//! ```

pub mod core;
pub mod workflows;
