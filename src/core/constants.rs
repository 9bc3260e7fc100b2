//! System constants and configuration defaults.

use crate::core::types::LevelIndex;

/// Label reserved for the missing level of every nominal catalog.
pub const MISSING_LABEL: &str = "?";

/// Catalog slot reserved for the missing level.
pub const MISSING_LEVEL: LevelIndex = 0;

/// Group labels of the two-way numeric split tables.
pub const NUMERIC_GROUP_LABELS: [&str; 2] = ["less-equals", "greater"];

/// Group labels of the boolean split tables, in group order.
pub const BINARY_GROUP_LABELS: [&str; 2] = ["true", "false"];

/// Group labels used by the nominal binary search.
pub const NOMINAL_BINARY_GROUP_LABELS: [&str; 2] = ["test", "other"];

/// Default minimum number of rows required in each produced group.
pub const DEFAULT_MIN_COUNT: usize = 1;

/// Default seed for randomized strategies and random missing-value routing.
pub const DEFAULT_SEED: u64 = 42;

/// Environment variable prefix recognized by configuration overrides.
pub const ENV_PREFIX: &str = "CTREE_";

/// Crate version string.
pub const CTREE_SPLIT_VERSION: &str = env!("CARGO_PKG_VERSION");
