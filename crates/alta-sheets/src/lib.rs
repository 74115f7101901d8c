//! # alta-sheets
//!
//! A Rust library for spreadsheet formula evaluation and dependency tracking.
//!
//! Alta-sheets provides the calculation core of a spreadsheet: infix formulas
//! over numbers and named variables, and a dependency graph recording which
//! cells feed into which formulas.
//!
//! ## Features
//!
//! - Formula parsing with construction-time grammar validation
//! - Evaluation with standard precedence and caller-supplied variable lookup
//! - Pluggable variable normalization and validation rules
//! - Bidirectional dependency tracking between variables
//!
//! ## Example
//!
//! ```rust
//! use alta_sheets::prelude::*;
//!
//! // Parse a formula; bad syntax is rejected here, not at evaluation time
//! let formula = Formula::new("a1 * 2 + b1")?;
//!
//! // Record that the formula's cell depends on the variables it reads
//! let mut graph = DependencyGraph::new();
//! for var in formula.variables() {
//!     graph.add_dependency(&var, "c1");
//! }
//!
//! // Evaluate against a variable lookup
//! let value = formula.evaluate(|name| match name {
//!     "a1" => Some(10.0),
//!     "b1" => Some(5.0),
//!     _ => None,
//! })?;
//! assert_eq!(value, 25.0);
//! # Ok::<(), alta_sheets::FormulaError>(())
//! ```

pub mod prelude;

// Re-export formula types
pub use alta_sheets_formula::{
    tokenize, DependencyGraph, Formula, FormulaError, FormulaResult, Token, TokenKind, Tokens,
};
