//! Word lists consumed by the identifier combiner.
//!
//! Lists are validated once and shared read-only between combiners.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

mod animals;
mod lorem;
mod plants;

pub use animals::ANIMALS;
pub use lorem::LOREM_WORDS;
pub use plants::PLANTS;

/// RFC 2606 reserved mail suffixes.
pub const SAFE_MAIL_DOMAINS: &[&str] = &[
    "@example.com",
    "@example.net",
    "@example.org",
    "@mail.test",
    "@mail.example",
];

static WORD_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static DOMAIN_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn is_word(value: &str) -> bool {
    WORD_PATTERN
        .get_or_init(|| Regex::new(r"^[a-z]+$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

fn is_mail_domain(value: &str) -> bool {
    DOMAIN_PATTERN
        .get_or_init(|| Regex::new(r"^@[a-z0-9-]+(\.[a-z0-9-]+)*$").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Validated vocabularies of one combiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSets {
    padwords: [Vec<String>; 2],
    filler: Vec<String>,
    mail_domains: Vec<String>,
}

impl Default for WordSets {
    fn default() -> Self {
        Self::new(ANIMALS, PLANTS, LOREM_WORDS, SAFE_MAIL_DOMAINS)
    }
}

impl WordSets {
    /// Validates the supplied lists.
    ///
    /// Entries are trimmed and kept only when made of lower-case ASCII
    /// letters. Duplicates are dropped inside every list and across the two
    /// padword lists, keeping the first occurrence. Mail domains must look like
    /// `@host.tld` and are lower-cased; when none survives the
    /// [`SAFE_MAIL_DOMAINS`] are used.
    pub fn new<P, Q, F, D>(primary: P, secondary: Q, filler: F, mail_domains: D) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        Q: IntoIterator,
        Q::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        let mut padwords_seen = HashSet::new();
        let primary = retain_valid("primary", primary, &mut padwords_seen, is_word, str::to_string);
        let secondary = retain_valid("secondary", secondary, &mut padwords_seen, is_word, str::to_string);
        let filler = retain_valid("filler", filler, &mut HashSet::new(), is_word, str::to_string);
        let mut mail_domains = retain_valid(
            "mail_domains",
            mail_domains,
            &mut HashSet::new(),
            |value| is_mail_domain(&value.to_lowercase()),
            str::to_lowercase,
        );
        if mail_domains.is_empty() {
            debug!("no valid mail domain left, using the reserved defaults");
            mail_domains = SAFE_MAIL_DOMAINS.iter().map(|domain| domain.to_string()).collect();
        }

        Self {
            padwords: [primary, secondary],
            filler,
            mail_domains,
        }
    }

    /// First padword list (animals by default).
    pub fn primary(&self) -> &[String] {
        &self.padwords[0]
    }

    /// Second padword list (plants by default).
    pub fn secondary(&self) -> &[String] {
        &self.padwords[1]
    }

    /// Padword list by index, `0` or `1`.
    pub fn padwords(&self, index: usize) -> &[String] {
        self.padwords.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn filler(&self) -> &[String] {
        &self.filler
    }

    pub fn mail_domains(&self) -> &[String] {
        &self.mail_domains
    }
}

fn retain_valid<I>(
    list: &'static str,
    values: I,
    seen: &mut HashSet<String>,
    accept: impl Fn(&str) -> bool,
    normalize: impl Fn(&str) -> String,
) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut kept = Vec::new();
    let mut dropped = 0_usize;
    for value in values {
        let value = value.as_ref().trim();
        if !accept(value) {
            dropped += 1;
            continue;
        }
        let value = normalize(value);
        if seen.insert(value.clone()) {
            kept.push(value);
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        debug!(list, kept = kept.len(), dropped, "word list entries dropped during validation");
    }
    kept
}
