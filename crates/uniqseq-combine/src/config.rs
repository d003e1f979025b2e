use std::path::Path;

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::strategy::StrategyWeights;
use crate::words::{ANIMALS, LOREM_WORDS, PLANTS, SAFE_MAIL_DOMAINS, WordSets};

/// Options of an [`IdentifierCombiner`](crate::IdentifierCombiner).
///
/// Loaded from TOML:
///
/// ```toml
/// seed = 42
///
/// [strategy]
/// ff = 1
/// pp = 50
///
/// [words]
/// mail_domains = ["@example.org"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CombinerOptions {
    /// Seed for every randomized choice. Absent means a fresh random seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Strategy key to quota. Missing or invalid entries use the defaults.
    #[serde(skip_serializing_if = "StrategyWeights::is_empty")]
    pub strategy: StrategyWeights,
    /// Vocabulary overrides.
    pub words: WordListOptions,
}

/// Optional replacements for the built-in vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct WordListOptions {
    /// First padword list. Defaults to animal names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<Vec<String>>,
    /// Second padword list. Defaults to plant names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Vec<String>>,
    /// Words appended by the open-ended fallback. Defaults to lorem ipsum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filler: Option<Vec<String>>,
    /// Mail suffixes such as `@example.com`. Defaults to RFC 2606 domains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_domains: Option<Vec<String>>,
}

impl CombinerOptions {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> Result<serde_json::Value> {
        Ok(serde_json::to_value(schema_for!(CombinerOptions))?)
    }
}

impl WordListOptions {
    /// Validated word sets, falling back to the built-in list for every
    /// vocabulary that is not overridden.
    pub fn word_sets(&self) -> WordSets {
        fn pick<'a>(custom: &'a Option<Vec<String>>, builtin: &'a [&'a str]) -> Vec<&'a str> {
            match custom {
                Some(values) => values.iter().map(String::as_str).collect(),
                None => builtin.to_vec(),
            }
        }

        WordSets::new(
            pick(&self.primary, ANIMALS),
            pick(&self.secondary, PLANTS),
            pick(&self.filler, LOREM_WORDS),
            pick(&self.mail_domains, SAFE_MAIL_DOMAINS),
        )
    }
}
