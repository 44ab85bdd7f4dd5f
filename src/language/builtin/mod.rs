//! Built-in grammars
//!
//! This module provides syntax highlighting grammars for the
//! languages the editor supports.

mod javascript;
mod markdown;
mod python;

pub use javascript::javascript_grammar;
pub use markdown::markdown_grammar;
pub use python::python_grammar;
