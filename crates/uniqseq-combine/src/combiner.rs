use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};
use uniqseq_core::{BijectiveGenerator, MultiGenerator, WeightedSampler};

use crate::config::CombinerOptions;
use crate::mailbox::Mailbox;
use crate::strategy::Strategy;
use crate::words::WordSets;

/// Upper bound on strategy draws per call.
const MAX_STRATEGY_DRAWS: usize = 100;

/// Open-ended fallback iterations after which a warning is logged.
const OPEN_ENDED_WARN_AFTER: usize = 64;

/// Quota of every mail domain in the domain sampler.
const MAIL_DOMAIN_QUOTA: u32 = 100;

/// Builds unique login and e-mail strings from a name and a surname.
///
/// Every call draws construction strategies from a weighted quota sampler and
/// returns the first candidate that was not issued before. When every
/// strategy collides the combiner escalates through three fallback tiers:
/// padword pairs, a single padword around `name.surname`, and finally an
/// open-ended tier that keeps appending filler words until a free string is
/// found.
///
/// Logins and e-mails are deduplicated separately. [`IdentifierCombiner::reset`]
/// forgets everything issued so far.
#[derive(Debug, Clone)]
pub struct IdentifierCombiner {
    words: Arc<WordSets>,
    names: HashMap<String, String>,
    logins: HashSet<String>,
    mailbox: Mailbox,
    pair_queue: VecDeque<String>,
    singles: [BijectiveGenerator; 2],
    pairs: MultiGenerator,
    lists: WeightedSampler<usize>,
    domains: WeightedSampler<usize>,
    strategies: WeightedSampler<Strategy>,
    rng: ChaCha8Rng,
}

impl Default for IdentifierCombiner {
    fn default() -> Self {
        Self::new(&CombinerOptions::default())
    }
}

impl IdentifierCombiner {
    pub fn new(options: &CombinerOptions) -> Self {
        Self::with_words(options, Arc::new(options.words.word_sets()))
    }

    /// Builds a combiner over pre-validated word sets, ignoring
    /// `options.words`.
    pub fn with_words(options: &CombinerOptions, words: Arc<WordSets>) -> Self {
        let mut master = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        let primary = words.primary().len() as u64;
        let secondary = words.secondary().len() as u64;
        let singles = [
            BijectiveGenerator::new(primary),
            BijectiveGenerator::new(secondary),
        ];
        let pairs = MultiGenerator::permutation(&[primary, secondary]).seeded(master.random());
        let lists = WeightedSampler::with_rng(
            [(0, primary), (1, secondary)],
            ChaCha8Rng::from_rng(&mut master),
        );
        let domains = WeightedSampler::with_rng(
            (0..words.mail_domains().len()).map(|index| (index, MAIL_DOMAIN_QUOTA)),
            ChaCha8Rng::from_rng(&mut master),
        );
        let strategies = WeightedSampler::with_rng(
            options.strategy.resolve(),
            ChaCha8Rng::from_rng(&mut master),
        );

        Self {
            words,
            names: HashMap::new(),
            logins: HashSet::new(),
            mailbox: Mailbox::default(),
            pair_queue: VecDeque::new(),
            singles,
            pairs,
            lists,
            domains,
            strategies,
            rng: ChaCha8Rng::from_rng(&mut master),
        }
    }

    pub fn words(&self) -> &WordSets {
        &self.words
    }

    /// Number of distinct logins issued since the last reset.
    pub fn issued_logins(&self) -> usize {
        self.logins.len()
    }

    /// Number of distinct e-mail addresses issued since the last reset.
    pub fn issued_emails(&self) -> usize {
        self.mailbox.len()
    }

    pub fn login(&mut self, name: &str, surname: &str) -> String {
        self.next(name, surname, false)
    }

    pub fn email(&mut self, name: &str, surname: &str) -> String {
        self.next(name, surname, true)
    }

    /// Returns a login (or, with `use_email`, an address) never issued before
    /// in this session.
    pub fn next(&mut self, name: &str, surname: &str, use_email: bool) -> String {
        let name = self.normalize(name);
        let surname = self.normalize(surname);

        let mut pair_started = false;
        let mut tried = BTreeSet::new();
        let attempts = self.strategies.initial_len();
        for _ in 0..MAX_STRATEGY_DRAWS {
            if tried.len() >= attempts {
                break;
            }
            let Some(strategy) = self.strategies.next() else {
                break;
            };
            if !use_email && strategy.is_fixed() && tried.contains(&strategy) {
                continue;
            }
            tried.insert(strategy);

            if strategy == Strategy::Pp {
                pair_started = true;
                if let Some(pair) = self.try_next_pair() {
                    match self.try_use(pair.clone(), use_email) {
                        Some(issued) => return issued,
                        None => self.pair_queue.push_back(pair),
                    }
                }
                continue;
            }

            if let Some(candidate) = self.candidate(strategy, &name, &surname) {
                if let Some(issued) = self.try_use(candidate, use_email) {
                    return issued;
                }
            }
        }

        trace!(name = %name, surname = %surname, "strategies exhausted, using fallbacks");
        if let Some(issued) = self.pair_fallback(pair_started, &name, &surname, use_email) {
            return issued;
        }
        if let Some(issued) = self.single_word_fallback(&name, &surname, use_email) {
            return issued;
        }
        self.open_ended_fallback(&name, &surname, use_email)
    }

    /// Issues an address for a full name such as `"John Smith"`.
    ///
    /// The local part is the name with whitespace runs replaced by `.`. When
    /// the address is taken the first padword list is walked as
    /// `first.word@domain`, then a counter is appended.
    pub fn email_for_full_name(&mut self, full_name: &str) -> String {
        let first = full_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".")
            .to_lowercase();
        let domain = self.next_domain();
        self.mailbox.issue(&first, &domain, self.words.primary())
    }

    /// Clears every issued value and rewinds all owned generators.
    pub fn reset(&mut self) {
        self.names.clear();
        self.logins.clear();
        self.mailbox.clear();
        self.pair_queue.clear();
        self.pairs.reset();
        for single in &mut self.singles {
            single.reset();
        }
        self.lists.reset();
        self.domains.reset();
        self.strategies.reset();
    }

    fn normalize(&mut self, value: &str) -> String {
        self.names
            .entry(value.to_string())
            .or_insert_with(|| value.to_lowercase())
            .clone()
    }

    fn candidate(&mut self, strategy: Strategy, name: &str, surname: &str) -> Option<String> {
        let has_name = !name.is_empty();
        let has_surname = !surname.is_empty();
        match strategy {
            Strategy::Ff => has_name.then(|| name.to_string()),
            Strategy::Ss => has_surname.then(|| surname.to_string()),
            Strategy::Fs => (has_name && has_surname).then(|| format!("{name}.{surname}")),
            Strategy::Sf => (has_name && has_surname).then(|| format!("{surname}.{name}")),
            Strategy::Fp if has_name => self.next_padword().map(|word| format!("{name}.{word}")),
            Strategy::Pf if has_name => self.next_padword().map(|word| format!("{word}.{name}")),
            Strategy::Sp if has_surname => {
                self.next_padword().map(|word| format!("{surname}.{word}"))
            }
            Strategy::Ps if has_surname => {
                self.next_padword().map(|word| format!("{word}.{surname}"))
            }
            _ => None,
        }
    }

    fn try_use(&mut self, candidate: String, use_email: bool) -> Option<String> {
        if !use_email {
            return self.logins.insert(candidate.clone()).then_some(candidate);
        }
        for _ in 0..self.domains.initial_len() {
            let domain = self.next_domain();
            if let Some(address) = self.mailbox.try_reserve(format!("{candidate}{domain}")) {
                return Some(address);
            }
        }
        None
    }

    fn next_domain(&mut self) -> String {
        self.domains
            .next()
            .and_then(|index| self.words.mail_domains().get(index))
            .cloned()
            .unwrap_or_default()
    }

    /// Draws one padword from a list picked in proportion to its length.
    fn next_padword(&mut self) -> Option<String> {
        let list = self.lists.next()?;
        let position = self.singles.get_mut(list)?.next_index();
        self.words.padwords(list).get(position).cloned()
    }

    /// A fresh pair while the pair space lasts, then pairs that failed before.
    fn try_next_pair(&mut self) -> Option<String> {
        if self.pairs.can_next() {
            let (ordering, values) = self.pairs.next();
            if let Some(pair) = join_pair(&self.words, ordering, values) {
                return Some(pair);
            }
        }
        self.pair_queue.pop_front()
    }

    fn pair_fallback(
        &mut self,
        pair_started: bool,
        name: &str,
        surname: &str,
        use_email: bool,
    ) -> Option<String> {
        let (pair, recycle) = match self.try_next_pair() {
            Some(pair) => (pair, true),
            None => {
                let (ordering, values) = self.pairs.next();
                (join_pair(&self.words, ordering, values)?, false)
            }
        };

        let candidates = if pair_started {
            vec![pair.clone()]
        } else {
            [
                (name, true),
                (surname, true),
                (name, false),
                (surname, false),
            ]
            .into_iter()
            .filter(|(part, _)| !part.is_empty())
            .map(|(part, before)| {
                if before {
                    format!("{part}.{pair}")
                } else {
                    format!("{pair}.{part}")
                }
            })
            .collect()
        };
        for candidate in candidates {
            if let Some(issued) = self.try_use(candidate, use_email) {
                return Some(issued);
            }
        }
        if recycle {
            self.pair_queue.push_back(pair);
        }
        None
    }

    fn single_word_fallback(&mut self, name: &str, surname: &str, use_email: bool) -> Option<String> {
        let full = dotted(name, surname);
        let first = self.lists.next().unwrap_or(0).min(1);
        for list in [first, 1 - first] {
            let position = self.singles[list].next_index();
            let Some(word) = self.words.padwords(list).get(position).cloned() else {
                continue;
            };
            for candidate in [dotted(&full, &word), dotted(&word, &full)] {
                if let Some(issued) = self.try_use(candidate, use_email) {
                    return Some(issued);
                }
            }
        }
        None
    }

    /// Appends filler words to `name.surname` until the result is free. With
    /// no filler vocabulary a running number is appended instead.
    fn open_ended_fallback(&mut self, name: &str, surname: &str, use_email: bool) -> String {
        let full = dotted(name, surname);
        let mut candidate = full.clone();
        let mut iterations = 0_usize;
        loop {
            iterations += 1;
            if iterations == OPEN_ENDED_WARN_AFTER + 1 {
                warn!(
                    name = %name,
                    surname = %surname,
                    iterations = OPEN_ENDED_WARN_AFTER,
                    issued_logins = self.logins.len(),
                    issued_emails = self.mailbox.len(),
                    "open-ended fallback is struggling to find a free identifier"
                );
            }

            let filler = self.words.filler();
            candidate = if filler.is_empty() {
                dotted(&full, &iterations.to_string())
            } else {
                let word = &filler[self.rng.random_range(0..filler.len())];
                dotted(&candidate, word)
            };
            if let Some(issued) = self.try_use(candidate.clone(), use_email) {
                return issued;
            }
        }
    }
}

fn join_pair(words: &WordSets, ordering: &[usize], values: &[u64]) -> Option<String> {
    let mut parts = ordering.iter().zip(values).map(|(&list, &value)| {
        let position = usize::try_from(value).ok()?;
        words.padwords(list).get(position).map(String::as_str)
    });
    let first = parts.next()??;
    let second = parts.next()??;
    Some(format!("{first}.{second}"))
}

fn dotted(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (false, true) => left.to_string(),
        (false, false) => format!("{left}.{right}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyWeights;

    fn seeded(seed: u64) -> CombinerOptions {
        CombinerOptions {
            seed: Some(seed),
            ..CombinerOptions::default()
        }
    }

    fn tiny_words() -> Arc<WordSets> {
        Arc::new(WordSets::new(["cat", "dog"], ["fern"], ["lorem"], ["@x.test"]))
    }

    #[test]
    fn strategies_produce_documented_shapes() {
        let mut combiner = IdentifierCombiner::new(&seeded(1));
        assert_eq!(combiner.candidate(Strategy::Ff, "ann", "lee").as_deref(), Some("ann"));
        assert_eq!(combiner.candidate(Strategy::Ss, "ann", "lee").as_deref(), Some("lee"));
        assert_eq!(combiner.candidate(Strategy::Fs, "ann", "lee").as_deref(), Some("ann.lee"));
        assert_eq!(combiner.candidate(Strategy::Sf, "ann", "lee").as_deref(), Some("lee.ann"));
        let padded = combiner.candidate(Strategy::Fp, "ann", "lee").expect("padword");
        assert!(padded.starts_with("ann."));
        assert_eq!(combiner.candidate(Strategy::Fs, "", "lee"), None);
        assert_eq!(combiner.candidate(Strategy::Pf, "", "lee"), None);
        assert_eq!(combiner.candidate(Strategy::Pp, "ann", "lee"), None);
    }

    #[test]
    fn names_are_lower_cased_once() {
        let mut combiner = IdentifierCombiner::new(&seeded(2));
        let login = combiner.login("ANN", "LEE");
        assert_eq!(login, login.to_lowercase());
        assert_eq!(combiner.names.get("ANN").map(String::as_str), Some("ann"));
    }

    #[test]
    fn logins_never_repeat_with_tiny_vocabulary() {
        let mut combiner = IdentifierCombiner::with_words(&seeded(3), tiny_words());
        let mut seen = HashSet::new();
        for _ in 0..60 {
            let login = combiner.login("ann", "lee");
            assert!(seen.insert(login.clone()), "{login} issued twice");
        }
        assert_eq!(combiner.issued_logins(), 60);
    }

    #[test]
    fn pair_queue_stays_bounded() {
        let mut combiner = IdentifierCombiner::with_words(&seeded(4), tiny_words());
        for _ in 0..200 {
            combiner.login("ann", "lee");
            assert!(combiner.pair_queue.len() <= 4);
        }
    }

    #[test]
    fn empty_padwords_still_terminate() {
        let words = Arc::new(WordSets::new(
            Vec::<&str>::new(),
            Vec::<&str>::new(),
            Vec::<&str>::new(),
            ["@x.test"],
        ));
        let mut combiner = IdentifierCombiner::with_words(&seeded(5), words);
        let logins: Vec<String> = (0..10).map(|_| combiner.login("ann", "lee")).collect();
        let unique: HashSet<&String> = logins.iter().collect();
        assert_eq!(unique.len(), 10);
        assert!(logins.contains(&"ann.lee.1".to_string()));
    }

    #[test]
    fn emails_use_configured_domain() {
        let mut combiner = IdentifierCombiner::with_words(&seeded(6), tiny_words());
        for _ in 0..20 {
            let email = combiner.email("ann", "lee");
            assert!(email.ends_with("@x.test"), "{email}");
        }
        assert_eq!(combiner.issued_emails(), 20);
        assert_eq!(combiner.issued_logins(), 0);
    }

    #[test]
    fn unit_weights_still_issue_unique_logins() {
        let weights: StrategyWeights = Strategy::ALL.into_iter().map(|strategy| (strategy, 1)).collect();
        let options = CombinerOptions {
            seed: Some(7),
            strategy: weights,
            ..CombinerOptions::default()
        };
        let mut combiner = IdentifierCombiner::with_words(&options, tiny_words());
        let issued: HashSet<String> = (0..9).map(|_| combiner.login("ann", "lee")).collect();
        assert_eq!(issued.len(), 9);
    }

    #[test]
    fn reset_allows_reissuing() {
        let mut combiner = IdentifierCombiner::new(&seeded(8));
        // 200 calls draw more strategies than one 140-quota cycle holds, so `ff` comes up
        let before: HashSet<String> = (0..200).map(|_| combiner.login("ann", "lee")).collect();
        assert!(before.contains("ann"));

        combiner.reset();
        assert_eq!(combiner.issued_logins(), 0);
        assert!(combiner.pair_queue.is_empty());
        let after: HashSet<String> = (0..200).map(|_| combiner.login("ann", "lee")).collect();
        assert!(after.contains("ann"));
    }

    #[test]
    fn full_name_addresses_walk_padwords() {
        let mut combiner = IdentifierCombiner::with_words(&seeded(9), tiny_words());
        assert_eq!(combiner.email_for_full_name("John  Smith"), "john.smith@x.test");
        assert_eq!(combiner.email_for_full_name("john smith"), "john.smith.cat@x.test");
        assert_eq!(combiner.email_for_full_name("JOHN SMITH"), "john.smith.dog@x.test");
        assert_eq!(combiner.email_for_full_name("John Smith"), "john.smith.0@x.test");
    }

    #[test]
    fn helpers_join_non_empty_parts() {
        assert_eq!(dotted("a", "b"), "a.b");
        assert_eq!(dotted("", "b"), "b");
        assert_eq!(dotted("a", ""), "a");
        let words = WordSets::new(["cat"], ["fern"], ["x"], ["@x.test"]);
        assert_eq!(join_pair(&words, &[1, 0], &[0, 0]).as_deref(), Some("fern.cat"));
        assert_eq!(join_pair(&words, &[0, 1], &[5, 0]), None);
    }
}
