//! Unique login and e-mail identifiers built on the `uniqseq-core` generators.
//!
//! [`IdentifierCombiner`] mixes a name, a surname and padwords from two
//! auxiliary word lists into strings that are never issued twice in a
//! session. Its behaviour is configured with [`CombinerOptions`], usually
//! loaded from a TOML file.

pub mod combiner;
pub mod config;
pub mod error;
mod mailbox;
pub mod strategy;
pub mod words;

pub use combiner::IdentifierCombiner;
pub use config::{CombinerOptions, WordListOptions};
pub use error::{ConfigError, Result};
pub use strategy::{Strategy, StrategyWeights, UnknownStrategy};
pub use words::WordSets;
