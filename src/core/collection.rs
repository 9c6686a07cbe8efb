//! # Chip Collection
//!
//! Owns the sequence being built and the pool of unused identifiers, and is
//! the only place either of them changes.
//!
//! ```text
//!              add_from_pool            remove_via_trash / clear_all
//!   pool ───────────────────▶ sequence ──────────────────────────────▶ pool
//!                                │                        (identifiers only;
//!                                └── apply(DragCommit)     conditions are dropped)
//! ```
//!
//! Every mutation marks validation as pending instead of validating on the
//! spot. The event loop calls [`ChipCollection::revalidate`] once the next
//! frame has been laid out; repeated calls with nothing pending do nothing.

use log::{debug, info};

use crate::core::chip::{Chip, IdentifierPool};
use crate::core::drag::DragCommit;
use crate::core::validator::{Verdict, validate};

/// Pending-validation flag plus a counter of validator runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSchedule {
    pending: bool,
    runs: usize,
}

impl ValidationSchedule {
    pub fn schedule(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// How many times the validator has run.
    pub fn runs(&self) -> usize {
        self.runs
    }

    fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

#[derive(Debug, Clone)]
pub struct ChipCollection {
    sequence: Vec<Chip>,
    pool: IdentifierPool,
    verdict: Verdict,
    schedule: ValidationSchedule,
}

impl ChipCollection {
    /// Build a collection from the known identifiers and an initial expression.
    ///
    /// Identifiers in `initial` are moved out of the pool. An identifier that
    /// appears twice in `initial` is only placed once.
    pub fn new<I, S>(identifiers: IdentifierPool, initial: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool = identifiers;
        let mut sequence: Vec<Chip> = Vec::new();
        for label in initial {
            let chip = Chip::from_label(label.as_ref());
            if chip.is_identifier() {
                if sequence.contains(&chip) {
                    debug!("Skipping duplicate initial identifier {}", chip.label);
                    continue;
                }
                pool.take(&chip.label);
            }
            sequence.push(chip);
        }

        let mut collection = Self {
            sequence,
            pool,
            verdict: Verdict::VALID,
            schedule: ValidationSchedule::default(),
        };
        collection.validate_now();
        collection
    }

    pub fn sequence(&self) -> &[Chip] {
        &self.sequence
    }

    pub fn labels(&self) -> Vec<&str> {
        self.sequence.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn pool(&self) -> &IdentifierPool {
        &self.pool
    }

    /// The most recent verdict. May lag behind the sequence while a
    /// validation is pending.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn schedule(&self) -> &ValidationSchedule {
        &self.schedule
    }

    /// Append a chip picked from a palette.
    ///
    /// Conditions always append. Identifiers append only when they are in the
    /// pool; anything else is ignored. Returns whether the sequence changed.
    pub fn add_from_pool(&mut self, chip: &Chip) -> bool {
        let added = if chip.is_identifier() {
            match self.pool.take(&chip.label) {
                Some(taken) => {
                    self.sequence.push(taken);
                    true
                }
                None => {
                    debug!("Identifier {} is not in the pool, ignoring", chip.label);
                    false
                }
            }
        } else {
            self.sequence.push(chip.clone());
            true
        };
        if added {
            self.schedule_validation();
        }
        added
    }

    /// Empty the sequence, returning identifiers to the pool.
    pub fn clear_all(&mut self) {
        for chip in self.sequence.drain(..) {
            self.pool.insert(chip);
        }
        info!("Cleared all chips ({} in pool)", self.pool.len());
        self.schedule_validation();
    }

    /// Delete the chip at `index`. Identifiers go back to the pool.
    pub fn remove_via_trash(&mut self, index: usize) -> Option<Chip> {
        if index >= self.sequence.len() {
            return None;
        }
        let removed = self.sequence.remove(index);
        if removed.is_identifier() {
            self.pool.insert(removed.clone());
        }
        info!("Trashed chip {} ({})", index, removed.label);
        self.schedule_validation();
        Some(removed)
    }

    /// Carry out what a finished drag asked for.
    pub fn apply(&mut self, commit: DragCommit) {
        match commit {
            DragCommit::Remove { index } => {
                self.remove_via_trash(index);
            }
            DragCommit::Reorder { from, to } if from < self.sequence.len() => {
                let chip = self.sequence.remove(from);
                let to = to.min(self.sequence.len());
                self.sequence.insert(to, chip);
            }
            DragCommit::Reorder { .. } | DragCommit::Unchanged | DragCommit::Cancelled => {}
        }
        self.schedule_validation();
    }

    pub fn schedule_validation(&mut self) {
        self.schedule.schedule();
    }

    /// Run the validator if a validation is pending. Returns whether it ran.
    pub fn revalidate(&mut self) -> bool {
        if !self.schedule.take() {
            return false;
        }
        self.validate_now();
        true
    }

    /// Validate immediately, regardless of the schedule.
    pub fn validate_now(&mut self) -> Verdict {
        self.verdict = validate(&self.labels());
        self.schedule.pending = false;
        self.schedule.runs += 1;
        debug!(
            "Validated {} chips: valid={} {}",
            self.sequence.len(),
            self.verdict.is_valid(),
            self.verdict.message()
        );
        self.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chip::Condition;
    use crate::core::validator::Violation;
    use crate::test_support::test_collection;

    #[test]
    fn test_new_moves_initial_identifiers_out_of_pool() {
        let collection = test_collection();
        assert_eq!(collection.labels(), ["pizza", "AND", "tacos"]);
        assert!(!collection.pool().contains("pizza"));
        assert!(!collection.pool().contains("tacos"));
        assert!(collection.pool().contains("sushi"));
        assert!(collection.verdict().is_valid());
        assert_eq!(collection.schedule().runs(), 1);
    }

    #[test]
    fn test_new_skips_duplicate_identifiers() {
        let pool = IdentifierPool::from_labels(["pizza"]);
        let collection = ChipCollection::new(pool, ["pizza", "OR", "pizza"]);
        assert_eq!(collection.labels(), ["pizza", "OR"]);
    }

    #[test]
    fn test_add_condition_always_appends() {
        let mut collection = test_collection();
        let pool_before = collection.pool().clone();
        assert!(collection.add_from_pool(&Chip::condition(Condition::Or)));
        assert!(collection.add_from_pool(&Chip::condition(Condition::Or)));
        assert_eq!(collection.sequence().len(), 5);
        assert_eq!(collection.pool(), &pool_before);
    }

    #[test]
    fn test_add_identifier_moves_it_from_pool() {
        let mut collection = test_collection();
        collection.add_from_pool(&Chip::condition(Condition::And));
        assert!(collection.add_from_pool(&Chip::identifier("sushi")));
        assert!(!collection.pool().contains("sushi"));
        assert_eq!(collection.labels().last(), Some(&"sushi"));
    }

    #[test]
    fn test_add_absent_identifier_is_silent_noop() {
        let mut collection = test_collection();
        let pool_len = collection.pool().len();
        assert!(!collection.add_from_pool(&Chip::identifier("pizza")));
        assert!(!collection.add_from_pool(&Chip::identifier("unknownDish")));
        assert_eq!(collection.sequence().len(), 3);
        assert_eq!(collection.pool().len(), pool_len);
        assert!(!collection.schedule().is_pending());
    }

    #[test]
    fn test_clear_all_returns_identifiers() {
        let mut collection = test_collection();
        collection.add_from_pool(&Chip::condition(Condition::Open));
        let pool_len = collection.pool().len();
        collection.clear_all();
        assert!(collection.sequence().is_empty());
        assert_eq!(collection.pool().len(), pool_len + 2);
        assert!(collection.pool().contains("pizza"));
        assert!(!collection.pool().contains("AND"));
    }

    #[test]
    fn test_remove_via_trash() {
        let mut collection = test_collection();
        let pool_len = collection.pool().len();

        let removed = collection.remove_via_trash(1).unwrap();
        assert_eq!(removed.label, "AND");
        assert_eq!(collection.pool().len(), pool_len);

        let removed = collection.remove_via_trash(0).unwrap();
        assert_eq!(removed.label, "pizza");
        assert_eq!(collection.pool().len(), pool_len + 1);

        assert_eq!(collection.remove_via_trash(5), None);
    }

    #[test]
    fn test_add_then_trash_restores_pool() {
        let mut collection = test_collection();
        let before = collection.pool().clone();
        collection.add_from_pool(&Chip::identifier("sushi"));
        let index = collection.sequence().len() - 1;
        collection.apply(DragCommit::Remove { index });

        let mut expected: Vec<_> = before.iter().map(|c| c.label.clone()).collect();
        let mut actual: Vec<_> = collection.pool().iter().map(|c| c.label.clone()).collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_apply_reorder() {
        let mut collection = test_collection();
        collection.apply(DragCommit::Reorder { from: 0, to: 2 });
        assert_eq!(collection.labels(), ["AND", "tacos", "pizza"]);
        collection.apply(DragCommit::Reorder { from: 9, to: 0 });
        assert_eq!(collection.labels(), ["AND", "tacos", "pizza"]);
    }

    #[test]
    fn test_revalidation_is_deferred_and_runs_once() {
        let mut collection = test_collection();
        let runs = collection.schedule().runs();

        collection.apply(DragCommit::Reorder { from: 0, to: 2 });
        collection.add_from_pool(&Chip::condition(Condition::Close));
        // Verdict still reflects the last validated state.
        assert!(collection.verdict().is_valid());
        assert!(collection.schedule().is_pending());

        assert!(collection.revalidate());
        assert!(!collection.revalidate());
        assert_eq!(collection.schedule().runs(), runs + 1);
        assert_eq!(
            collection.verdict().violation(),
            Some(Violation::LeadingOperator)
        );
    }

    #[test]
    fn test_unchanged_commit_still_schedules_validation() {
        let mut collection = test_collection();
        collection.apply(DragCommit::Unchanged);
        assert!(collection.schedule().is_pending());
    }
}
