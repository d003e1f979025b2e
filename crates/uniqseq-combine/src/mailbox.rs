use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

/// Registry of issued e-mail addresses.
///
/// Every issued address is a key. Addresses that were requested again by the
/// full-name tier also carry a lazily-built pool of padword indices that have
/// not been tried as `first.word@domain` yet.
#[derive(Debug, Clone, Default)]
pub(crate) struct Mailbox {
    issued: HashMap<String, Option<VecDeque<usize>>>,
}

impl Mailbox {
    pub(crate) fn len(&self) -> usize {
        self.issued.len()
    }

    pub(crate) fn clear(&mut self) {
        self.issued.clear();
    }

    /// Reserves `address`, returning it when it was not issued before.
    pub(crate) fn try_reserve(&mut self, address: String) -> Option<String> {
        match self.issued.entry(address) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let address = slot.key().clone();
                slot.insert(None);
                Some(address)
            }
        }
    }

    /// Issues an address derived from `first` and `domain`.
    ///
    /// Tries `first@domain`, then `first.word@domain` for every padword that
    /// was not tried for this base yet, then `first.N@domain` with the smallest
    /// free `N`. Never fails.
    pub(crate) fn issue(&mut self, first: &str, domain: &str, padwords: &[String]) -> String {
        let base = format!("{first}{domain}");
        if !self.issued.contains_key(&base) {
            self.issued.insert(base.clone(), None);
            return base;
        }
        let mut pool = self
            .issued
            .get_mut(&base)
            .and_then(Option::take)
            .unwrap_or_else(|| (0..padwords.len()).collect());

        let mut issued = None;
        while let Some(index) = pool.pop_front() {
            let Some(word) = padwords.get(index) else {
                continue;
            };
            if let Some(address) = self.try_reserve(format!("{first}.{word}{domain}")) {
                issued = Some(address);
                break;
            }
        }
        if let Some(slot) = self.issued.get_mut(&base) {
            *slot = Some(pool);
        }
        if let Some(address) = issued {
            return address;
        }

        let mut counter = 0_u64;
        loop {
            if let Some(address) = self.try_reserve(format!("{first}.{counter}{domain}")) {
                return address;
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn reserve_rejects_duplicates() {
        let mut mailbox = Mailbox::default();
        assert_eq!(mailbox.try_reserve("a@x.test".into()).as_deref(), Some("a@x.test"));
        assert_eq!(mailbox.try_reserve("a@x.test".into()), None);
        assert_eq!(mailbox.len(), 1);
    }

    #[test]
    fn repeated_base_walks_padwords_then_counts() {
        let padwords = words(&["cat", "dog"]);
        let mut mailbox = Mailbox::default();
        let issued: Vec<String> = (0..5)
            .map(|_| mailbox.issue("john.smith", "@x.test", &padwords))
            .collect();
        assert_eq!(
            issued,
            vec![
                "john.smith@x.test",
                "john.smith.cat@x.test",
                "john.smith.dog@x.test",
                "john.smith.0@x.test",
                "john.smith.1@x.test",
            ]
        );
    }

    #[test]
    fn taken_padword_addresses_are_skipped() {
        let padwords = words(&["cat", "dog"]);
        let mut mailbox = Mailbox::default();
        mailbox.try_reserve("ann@x.test".into());
        mailbox.try_reserve("ann.cat@x.test".into());
        mailbox.try_reserve("ann.0@x.test".into());
        assert_eq!(mailbox.issue("ann", "@x.test", &padwords), "ann.dog@x.test");
        assert_eq!(mailbox.issue("ann", "@x.test", &padwords), "ann.1@x.test");
    }

    #[test]
    fn clear_forgets_everything() {
        let mut mailbox = Mailbox::default();
        mailbox.issue("a", "@x.test", &[]);
        mailbox.clear();
        assert_eq!(mailbox.len(), 0);
        assert_eq!(mailbox.issue("a", "@x.test", &[]), "a@x.test");
    }
}
