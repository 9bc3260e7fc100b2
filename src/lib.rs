//! # ctree-split
//!
//! Split search for classification decision trees: given a table, a
//! nominal target and row weights, find for every input variable the
//! partition of the rows that maximizes a purity criterion, and emit the
//! row predicates a tree builder uses to route rows into children.
//!
//! ## Features
//!
//! - **Weighted contingency tables**: [`DensityTable`] with information
//!   gain, gain ratio and Gini gain scoring.
//! - **Search strategies**: exhaustive numeric thresholds, random
//!   thresholds, boolean splits, full and binary nominal splits, including
//!   the ordered-prefix search for two-class targets.
//! - **Missing values**: skipped while searching, optionally penalized,
//!   and routed by a configurable [`Splitter`] when partitioning.
//! - **Parallel node search**: inputs evaluated with Rayon, with results
//!   identical to sequential evaluation.
//!
//! ## Quick Start
//!
//! ```rust
//! use ctree_split::{Frame, NodeSearch, SearchConfig};
//!
//! # fn main() -> ctree_split::Result<()> {
//! let frame = Frame::builder()
//!     .double("age", vec![22.0, 35.0, 47.0, 51.0, 62.0, 29.0])
//!     .nominal("plan", ["basic", "gold", "gold", "basic", "gold", "basic"])
//!     .nominal("churn", ["yes", "no", "no", "yes", "no", "yes"])
//!     .build()?;
//! let weights = frame.unit_weights();
//!
//! let config = SearchConfig::cart();
//! let result = NodeSearch::new(&config).best_candidate(&frame, &weights, &["age", "plan"], "churn")?;
//!
//! if let Some(best) = result.best {
//!     for predicate in best.group_predicates() {
//!         println!("{}", predicate);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/ctree-split/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Frame consumed by the search
pub mod dataset;

// Density tables, strategies and node search
pub mod tree;

// Re-export core functionality for convenience
pub use self::core::{
    constants::*,
    error::{Result, SplitError},
    types::*,
};

// Re-export configuration functionality
pub use config::{ConfigFormat, SearchConfig, SearchConfigBuilder};

// Re-export dataset functionality
pub use dataset::{validate_weights, Column, Frame, FrameBuilder};

// Re-export split search functionality
pub use tree::{
    Candidate, DensityTable, NodeSearch, NodeSearchResult, PurityFunction, PurityKind, RowGroup,
    RowPredicate, Search, SearchMap, Splitter,
};

// Version information
pub use self::core::constants::CTREE_SPLIT_VERSION as VERSION;

/// Initialize the library.
///
/// Installs the `env_logger` backend honoring `RUST_LOG`. Safe to call
/// repeatedly; an already installed logger is left in place.
///
/// # Examples
///
/// ```rust
/// fn main() -> ctree_split::Result<()> {
///     ctree_split::init()?;
///     assert!(ctree_split::is_initialized());
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}
