//! Per-slot candidate domains with an exact-undo removal trail.
//!
//! Domains only ever shrink. Every removal is recorded on a trail, so a
//! search branch can checkpoint the store, let propagation prune freely, and
//! rewind to restore exactly the words removed since the checkpoint, in
//! reverse order — O(removed) per undo, never a rescan or a deep copy.
//! Candidate sets are `BTreeSet`s so iteration order is lexicographic and
//! never depends on hashing.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::slots::SlotId;

/// A candidate word: uppercase ASCII, cheap to clone, compared by value.
pub type Word = Rc<str>;

#[derive(Debug, Clone)]
pub struct DomainStore {
    domains: Vec<BTreeSet<Word>>,
    trail: Vec<(SlotId, Word)>,
    checkpoints: Vec<usize>,
}

impl DomainStore {
    /// A store with one candidate set per slot, indexed by `SlotId`.
    #[must_use]
    pub fn new(domains: Vec<BTreeSet<Word>>) -> Self {
        Self {
            domains,
            trail: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Number of slots the store covers.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.domains.len()
    }

    /// The current candidates of `slot`, in lexicographic order.
    #[must_use]
    pub fn domain(&self, slot: SlotId) -> &BTreeSet<Word> {
        &self.domains[slot]
    }

    #[must_use]
    pub fn domain_size(&self, slot: SlotId) -> usize {
        self.domains[slot].len()
    }

    #[must_use]
    pub fn is_empty(&self, slot: SlotId) -> bool {
        self.domains[slot].is_empty()
    }

    /// Remove `word` from `slot`'s domain, recording the removal on the
    /// trail. Returns false (and records nothing) if the word was absent.
    pub fn remove(&mut self, slot: SlotId, word: &Word) -> bool {
        let removed = self.domains[slot].remove(word);
        if removed {
            self.trail.push((slot, word.clone()));
        }
        removed
    }

    /// Open a new undo level.
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.trail.len());
    }

    /// Undo every removal made since the most recent [`Self::checkpoint`],
    /// most recent first, and close that level.
    ///
    /// # Panics
    ///
    /// Panics if no level is open — rewinding without a checkpoint is a
    /// programming error, as is a trailed word somehow already being back in
    /// its domain (debug assertion).
    pub fn rewind(&mut self) {
        let mark = self
            .checkpoints
            .pop()
            .expect("rewind without a checkpoint");
        while self.trail.len() > mark {
            if let Some((slot, word)) = self.trail.pop() {
                let restored = self.domains[slot].insert(word);
                debug_assert!(restored, "trailed word restored twice");
            }
        }
    }
}
