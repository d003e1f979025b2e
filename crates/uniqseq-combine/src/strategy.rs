//! Construction strategies of the identifier combiner and their weights.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Rule used to build an identifier candidate.
///
/// `f` stands for the first name, `s` for the surname and `p` for a padword
/// drawn from the auxiliary word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// `name`
    Ff,
    /// `surname`
    Ss,
    /// `name.surname`
    Fs,
    /// `surname.name`
    Sf,
    /// `name.padword`
    Fp,
    /// `padword.name`
    Pf,
    /// `surname.padword`
    Sp,
    /// `padword.surname`
    Ps,
    /// `padword.padword` from the two-list pair space
    Pp,
}

impl Strategy {
    pub const ALL: [Strategy; 9] = [
        Strategy::Ff,
        Strategy::Ss,
        Strategy::Fs,
        Strategy::Sf,
        Strategy::Fp,
        Strategy::Pf,
        Strategy::Sp,
        Strategy::Ps,
        Strategy::Pp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Ff => "ff",
            Strategy::Ss => "ss",
            Strategy::Fs => "fs",
            Strategy::Sf => "sf",
            Strategy::Fp => "fp",
            Strategy::Pf => "pf",
            Strategy::Sp => "sp",
            Strategy::Ps => "ps",
            Strategy::Pp => "pp",
        }
    }

    /// Quota used when no valid weight is configured.
    pub fn default_weight(self) -> u64 {
        match self {
            Strategy::Ff | Strategy::Ss => 5,
            Strategy::Fs | Strategy::Sf => 10,
            Strategy::Fp | Strategy::Pf | Strategy::Sp | Strategy::Ps => 20,
            Strategy::Pp => 30,
        }
    }

    /// Strategies that produce the same candidate on every draw for a fixed
    /// name and surname. Logins try each of them at most once per call.
    pub fn is_fixed(self) -> bool {
        matches!(
            self,
            Strategy::Ff | Strategy::Ss | Strategy::Fs | Strategy::Sf | Strategy::Pp
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy `{0}`")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == value)
            .ok_or_else(|| UnknownStrategy(value.to_string()))
    }
}

/// Raw strategy weight table as written in a configuration file.
///
/// Values are kept untyped so that malformed entries can be replaced by the
/// default weight instead of failing the whole file. A value that is not a
/// table at all is read as an empty table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct StrategyWeights(BTreeMap<String, Value>);

impl<'de> Deserialize<'de> for StrategyWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(table) => Ok(Self(table.into_iter().collect())),
            other => {
                debug!(value = %other, "strategy weights are not a table, using defaults");
                Ok(Self::default())
            }
        }
    }
}

impl StrategyWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of one strategy.
    pub fn set(&mut self, strategy: Strategy, weight: i64) -> &mut Self {
        self.0.insert(strategy.as_str().to_string(), Value::from(weight));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves every strategy to a positive quota, in [`Strategy::ALL`] order.
    pub fn resolve(&self) -> Vec<(Strategy, u64)> {
        for key in self.0.keys() {
            if key.parse::<Strategy>().is_err() {
                debug!(key = %key, "ignoring unknown strategy weight");
            }
        }

        Strategy::ALL
            .into_iter()
            .map(|strategy| {
                let default = strategy.default_weight();
                let weight = match self.0.get(strategy.as_str()) {
                    None => default,
                    Some(value) => positive_integer(value).unwrap_or_else(|| {
                        debug!(
                            strategy = %strategy,
                            value = %value,
                            default,
                            "invalid strategy weight, using default"
                        );
                        default
                    }),
                };
                (strategy, weight)
            })
            .collect()
    }
}

impl FromIterator<(Strategy, i64)> for StrategyWeights {
    fn from_iter<I: IntoIterator<Item = (Strategy, i64)>>(iter: I) -> Self {
        let mut weights = Self::new();
        for (strategy, weight) in iter {
            weights.set(strategy, weight);
        }
        weights
    }
}

fn positive_integer(value: &Value) -> Option<u64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(weight) = number.as_u64() {
        return (weight > 0).then_some(weight);
    }
    let weight = number.as_f64()?;
    if weight >= 1.0 && weight.fract() == 0.0 && weight <= u64::MAX as f64 {
        return Some(weight as u64);
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>(), Ok(strategy));
            assert_eq!(strategy.to_string(), strategy.as_str());
        }
        assert!("xx".parse::<Strategy>().is_err());
    }

    #[test]
    fn empty_table_resolves_to_defaults() {
        let resolved = StrategyWeights::new().resolve();
        let weights: Vec<u64> = resolved.iter().map(|(_, weight)| *weight).collect();
        assert_eq!(weights, vec![5, 5, 10, 10, 20, 20, 20, 20, 30]);
    }

    #[test]
    fn invalid_weights_fall_back_to_defaults() {
        let weights: StrategyWeights = serde_json::from_value(json!({
            "ff": 12,
            "ss": 0,
            "fs": -3,
            "sf": 2.5,
            "fp": "many",
            "pf": 7.0,
            "zz": 4
        }))
        .expect("valid json object");
        let resolved: BTreeMap<Strategy, u64> = weights.resolve().into_iter().collect();
        assert_eq!(resolved[&Strategy::Ff], 12);
        assert_eq!(resolved[&Strategy::Ss], 5);
        assert_eq!(resolved[&Strategy::Fs], 10);
        assert_eq!(resolved[&Strategy::Sf], 10);
        assert_eq!(resolved[&Strategy::Fp], 20);
        assert_eq!(resolved[&Strategy::Pf], 7);
        assert_eq!(resolved.len(), 9);
    }

    #[test]
    fn non_table_weights_resolve_to_defaults() {
        for raw in [json!(5), json!("ff"), json!([1, 2]), Value::Null] {
            let weights: StrategyWeights = serde_json::from_value(raw).expect("lenient");
            assert!(weights.is_empty());
            assert_eq!(weights.resolve(), StrategyWeights::new().resolve());
        }
    }

    #[test]
    fn builder_sets_weights() {
        let weights: StrategyWeights = [(Strategy::Pp, 1), (Strategy::Ff, -1)].into_iter().collect();
        let resolved: BTreeMap<Strategy, u64> = weights.resolve().into_iter().collect();
        assert_eq!(resolved[&Strategy::Pp], 1);
        assert_eq!(resolved[&Strategy::Ff], 5);
    }
}
