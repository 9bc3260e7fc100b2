//! Split search for classification trees.
//!
//! The pieces, leaves first: [`DensityTable`] accumulates weights per
//! (group, target level); a [`PurityFunction`] scores a table; a [`Search`]
//! strategy builds tables for one variable and proposes a [`Candidate`]
//! made of [`RowPredicate`]s; [`NodeSearch`] picks the best candidate over
//! all inputs of a node and a [`Splitter`] routes the node rows into the
//! children.

pub mod candidate;
pub mod density;
pub mod node;
pub mod predicate;
pub mod purity;
pub mod search;
pub mod splitter;

pub use candidate::Candidate;
pub use density::DensityTable;
pub use node::{NodeSearch, NodeSearchResult, SearchMap};
pub use predicate::RowPredicate;
pub use purity::{PurityFunction, PurityKind};
pub use search::Search;
pub use splitter::{RowGroup, Splitter};
