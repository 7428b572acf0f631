// src/resolve/mod.rs

//! Directive resolution.
//!
//! This module turns a source file into a single directive-free string:
//! - [`directive`] knows the textual shape of `@include{...}` and `@version`.
//! - [`resolver`] owns the recursive expansion: includes are resolved
//!   depth-first relative to the file that references them, then the version
//!   token is substituted across the fully spliced result.
//!
//! It does **not** know about watching or output paths; it only maps an
//! entry path to resolved text.

pub mod directive;
pub mod resolver;

pub use directive::{DirectiveScanner, IncludeMatch, VERSION_TOKEN};
pub use resolver::Resolver;
