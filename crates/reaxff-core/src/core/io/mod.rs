//! Reading and writing ReaxFF parameter libraries.
//!
//! [`lexer`] turns raw text into section records, [`library`] drives the
//! lexer and the table builder and writes sets back out, and [`traits`]
//! holds the format interface both directions go through.

pub mod lexer;
pub mod library;
pub mod traits;
