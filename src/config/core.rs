//! Search configuration structure, builder and file/environment loading.

use crate::core::constants::*;
use crate::core::error::{Result, SplitError};
use crate::core::types::VarKind;
use crate::tree::{PurityKind, Search, SearchMap, Splitter};

use super::ConfigFormat;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Parameters of the split search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum number of rows each produced group must hold
    pub min_count: usize,
    /// Scale scores by the share of weight whose test value is present
    pub missing_penalty: bool,
    /// Purity function scoring the candidate tables
    pub purity: PurityKind,
    /// Routing of rows whose tested value is missing
    pub splitter: Splitter,
    /// Seed for randomized searches and random routing
    pub seed: u64,
    /// Evaluate node inputs in parallel
    pub parallel: bool,
    /// Strategy per variable kind
    pub search_map: SearchMap,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_count: DEFAULT_MIN_COUNT,
            missing_penalty: false,
            purity: PurityKind::InfoGain,
            splitter: Splitter::Ignore,
            seed: DEFAULT_SEED,
            parallel: false,
            search_map: SearchMap::default(),
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// ID3: full nominal splits, numeric inputs ignored, information gain.
    pub fn id3() -> Self {
        SearchConfig {
            search_map: SearchMap::default()
                .with(VarKind::Nominal, Search::NominalFull)
                .with(VarKind::Double, Search::Ignore)
                .with(VarKind::Int, Search::Ignore),
            ..Self::default()
        }
    }

    /// C4.5: full nominal splits, binary numeric thresholds, gain ratio,
    /// missing values sent to all children by weight.
    pub fn c45() -> Self {
        SearchConfig {
            purity: PurityKind::GainRatio,
            splitter: Splitter::ToAllWeighted,
            search_map: SearchMap::default().with(VarKind::Nominal, Search::NominalFull),
            ..Self::default()
        }
    }

    /// Decision stump: binary splits everywhere, gain ratio.
    pub fn decision_stump() -> Self {
        SearchConfig {
            purity: PurityKind::GainRatio,
            splitter: Splitter::ToAllWeighted,
            ..Self::default()
        }
    }

    /// CART: binary splits everywhere, Gini gain, random missing routing.
    pub fn cart() -> Self {
        SearchConfig {
            purity: PurityKind::GiniGain,
            splitter: Splitter::Random,
            ..Self::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.min_count == 0 {
            return Err(SplitError::invalid_parameter(
                "min_count",
                self.min_count.to_string(),
                "must be at least 1",
            ));
        }

        if let Some(kind) = self.search_map.mismatched_kinds().first() {
            return Err(SplitError::invalid_parameter(
                format!("search_map.{}", kind),
                self.search_map.get(*kind).to_string(),
                format!("strategy cannot search {} variables", kind),
            ));
        }

        if self.missing_penalty && self.splitter == Splitter::Ignore {
            warn!("missing_penalty is enabled while missing rows are ignored by the splitter");
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::config_error!("Failed to read config file: {}", e))?;

        let config: SearchConfig = match format {
            ConfigFormat::Json => serde_json::from_str(&content)
                .map_err(|e| crate::config_error!("Failed to parse JSON config: {}", e))?,
            ConfigFormat::Toml => toml::from_str(&content)
                .map_err(|e| crate::config_error!("Failed to parse TOML config: {}", e))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| crate::config_error!("Failed to serialize to JSON: {}", e))?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| crate::config_error!("Failed to serialize to TOML: {}", e))?,
        };

        std::fs::write(path, content)
            .map_err(|e| crate::config_error!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// Apply `CTREE_*` environment variable overrides
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        self.apply_overrides(&vars)
    }

    /// Apply overrides keyed by `CTREE_*` variable names
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        let get = |name: &str| vars.get(&format!("{}{}", ENV_PREFIX, name));
        let invalid = |name: &str| crate::config_error!("Invalid {}{}", ENV_PREFIX, name);

        if let Some(val) = get("MIN_COUNT") {
            self.min_count = val.parse().map_err(|_| invalid("MIN_COUNT"))?;
        }
        if let Some(val) = get("MISSING_PENALTY") {
            self.missing_penalty = val.parse().map_err(|_| invalid("MISSING_PENALTY"))?;
        }
        if let Some(val) = get("SEED") {
            self.seed = val.parse().map_err(|_| invalid("SEED"))?;
        }
        if let Some(val) = get("PARALLEL") {
            self.parallel = val.parse().map_err(|_| invalid("PARALLEL"))?;
        }
        if let Some(val) = get("PURITY") {
            self.purity = match val.to_ascii_lowercase().as_str() {
                "infogain" | "info_gain" => PurityKind::InfoGain,
                "gainratio" | "gain_ratio" => PurityKind::GainRatio,
                "ginigain" | "gini_gain" | "gini" => PurityKind::GiniGain,
                _ => return Err(invalid("PURITY")),
            };
        }
        if let Some(val) = get("SPLITTER") {
            self.splitter = match val.to_ascii_lowercase().as_str() {
                "ignore" => Splitter::Ignore,
                "majority" => Splitter::Majority,
                "toallweighted" | "to_all_weighted" | "weighted" => Splitter::ToAllWeighted,
                "random" => Splitter::Random,
                _ => return Err(invalid("SPLITTER")),
            };
        }

        self.validate()
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
    validation_errors: Vec<String>,
}

impl SearchConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        SearchConfigBuilder {
            config: SearchConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Start from an existing configuration, such as a preset
    pub fn from_config(config: SearchConfig) -> Self {
        SearchConfigBuilder {
            config,
            validation_errors: Vec::new(),
        }
    }

    /// Set the minimum group size
    pub fn min_count(mut self, min_count: usize) -> Self {
        if min_count == 0 {
            self.validation_errors
                .push("min_count must be at least 1".to_string());
        }
        self.config.min_count = min_count;
        self
    }

    /// Enable or disable the missing-value penalty
    pub fn missing_penalty(mut self, enabled: bool) -> Self {
        self.config.missing_penalty = enabled;
        self
    }

    /// Set the purity function
    pub fn purity(mut self, purity: PurityKind) -> Self {
        self.config.purity = purity;
        self
    }

    /// Set the missing-value routing
    pub fn splitter(mut self, splitter: Splitter) -> Self {
        self.config.splitter = splitter;
        self
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Evaluate node inputs in parallel
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Map a variable kind to a strategy
    pub fn search(mut self, kind: VarKind, search: Search) -> Self {
        if !search.accepts(kind) {
            self.validation_errors
                .push(format!("{} cannot search {} variables", search, kind));
        }
        self.config.search_map = self.config.search_map.with(kind, search);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SearchConfig> {
        if !self.validation_errors.is_empty() {
            return Err(crate::config_error!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            ));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.min_count, DEFAULT_MIN_COUNT);
        assert!(!config.missing_penalty);
        assert_eq!(config.purity, PurityKind::InfoGain);
        assert_eq!(config.splitter, Splitter::Ignore);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SearchConfig::default();
        config.min_count = 0;
        assert!(config.validate().is_err());

        config.min_count = 1;
        config.search_map = config.search_map.with(VarKind::Binary, Search::NominalFull);
        assert!(matches!(
            config.validate(),
            Err(SplitError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfigBuilder::new()
            .min_count(5)
            .missing_penalty(true)
            .purity(PurityKind::GiniGain)
            .splitter(Splitter::Majority)
            .seed(7)
            .parallel(true)
            .search(VarKind::Nominal, Search::NominalFull)
            .build()
            .unwrap();

        assert_eq!(config.min_count, 5);
        assert!(config.missing_penalty);
        assert_eq!(config.purity, PurityKind::GiniGain);
        assert_eq!(config.splitter, Splitter::Majority);
        assert_eq!(config.seed, 7);
        assert!(config.parallel);
        assert_eq!(config.search_map.get(VarKind::Nominal), Search::NominalFull);
    }

    #[test]
    fn test_config_builder_validation() {
        let result = SearchConfigBuilder::new()
            .min_count(0)
            .search(VarKind::Double, Search::Binary)
            .build();
        let message = result.unwrap_err().to_string();
        assert!(message.contains("min_count"));
        assert!(message.contains("Binary cannot search double"));
    }

    #[test]
    fn test_presets() {
        let id3 = SearchConfig::id3();
        assert_eq!(id3.search_map.get(VarKind::Nominal), Search::NominalFull);
        assert_eq!(id3.search_map.get(VarKind::Double), Search::Ignore);

        let c45 = SearchConfig::c45();
        assert_eq!(c45.purity, PurityKind::GainRatio);
        assert_eq!(c45.splitter, Splitter::ToAllWeighted);

        let stump = SearchConfig::decision_stump();
        assert_eq!(stump.search_map.get(VarKind::Nominal), Search::NominalBinary);

        let cart = SearchConfig::cart();
        assert_eq!(cart.purity, PurityKind::GiniGain);
        assert_eq!(cart.splitter, Splitter::Random);

        for config in [id3, c45, stump, cart] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_overrides() {
        let mut config = SearchConfig::default();
        let vars: HashMap<String, String> = [
            ("CTREE_MIN_COUNT", "4"),
            ("CTREE_PURITY", "gini"),
            ("CTREE_SPLITTER", "majority"),
            ("CTREE_MISSING_PENALTY", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        config.apply_overrides(&vars).unwrap();
        assert_eq!(config.min_count, 4);
        assert_eq!(config.purity, PurityKind::GiniGain);
        assert_eq!(config.splitter, Splitter::Majority);
        assert!(config.missing_penalty);

        let bad: HashMap<String, String> =
            [("CTREE_MIN_COUNT".to_string(), "many".to_string())].into_iter().collect();
        assert!(config.apply_overrides(&bad).is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: SearchConfig = toml::from_str("min_count = 3\npurity = \"GainRatio\"").unwrap();
        assert_eq!(config.min_count, 3);
        assert_eq!(config.purity, PurityKind::GainRatio);
        assert_eq!(config.search_map, SearchMap::default());
    }
}
