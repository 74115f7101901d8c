//! Prelude module - common imports for alta-sheets users
//!
//! ```rust
//! use alta_sheets::prelude::*;
//! ```

pub use crate::{
    // Dependency types
    DependencyGraph,
    // Formula types
    Formula,
    // Error types
    FormulaError,
    FormulaResult,
};
