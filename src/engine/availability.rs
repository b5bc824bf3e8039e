//! Keyboard availability tracking
//!
//! Aggregates the verdicts of every submitted guess into the best verdict ever
//! seen per alphabet symbol. Values only move up the order
//! `Unknown < Absent < Present < Correct`.

use crate::core::{ALPHABET_SIZE, Verdict, alphabet_index};
use std::collections::BTreeMap;

/// Letters whose best-known verdict improved in the most recent update
///
/// A front-end reads it to recolour only the keys that changed, then clears it
/// with [`AvailabilityMap::take_delta`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityDelta(BTreeMap<char, Verdict>);

impl AvailabilityDelta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<Verdict> {
        self.0.get(&letter.to_ascii_lowercase()).copied()
    }

    /// Changed letters in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        self.0.iter().map(|(&letter, &verdict)| (letter, verdict))
    }
}

/// Best verdict observed for each letter `a..=z`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityMap {
    best: [Verdict; ALPHABET_SIZE],
    delta: AvailabilityDelta,
}

impl AvailabilityMap {
    /// All letters Unknown, empty delta
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Best known verdict for a letter; Unknown for symbols outside the alphabet
    #[must_use]
    pub fn get(&self, letter: char) -> Verdict {
        alphabet_index(letter).map_or(Verdict::Unknown, |i| self.best[i])
    }

    /// Fold freshly scored `(letter, verdict)` pairs into the map
    ///
    /// A letter is raised only when the new verdict ranks strictly higher than
    /// what is stored. The returned delta holds exactly the raised letters and
    /// replaces any delta left over from the previous update.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Verdict;
    /// use wordle_engine::engine::AvailabilityMap;
    ///
    /// let mut map = AvailabilityMap::new();
    /// map.update([('e', Verdict::Correct)]);
    /// let delta = map.update([('e', Verdict::Present), ('s', Verdict::Absent)]);
    ///
    /// assert_eq!(delta.len(), 1);
    /// assert_eq!(map.get('e'), Verdict::Correct);
    /// ```
    pub fn update<I>(&mut self, cells: I) -> &AvailabilityDelta
    where
        I: IntoIterator<Item = (char, Verdict)>,
    {
        let mut delta = AvailabilityDelta::default();
        for (letter, verdict) in cells {
            let Some(index) = alphabet_index(letter) else {
                continue;
            };
            if verdict > self.best[index] {
                self.best[index] = verdict;
                delta.0.insert(letter.to_ascii_lowercase(), verdict);
            }
        }
        self.delta = delta;
        &self.delta
    }

    /// Re-derive the map from scratch out of committed cells
    ///
    /// Every cell is visited; an empty or non-letter cell is skipped rather than
    /// ending the scan. The delta then lists every known letter so a restored
    /// keyboard can be painted in one pass.
    pub fn rebuild<I>(&mut self, cells: I) -> &AvailabilityDelta
    where
        I: IntoIterator<Item = (char, Verdict)>,
    {
        self.best = [Verdict::Unknown; ALPHABET_SIZE];
        self.update(cells)
    }

    /// The delta produced by the most recent update
    #[must_use]
    pub const fn delta(&self) -> &AvailabilityDelta {
        &self.delta
    }

    /// Hand the pending delta to the caller and clear it
    pub fn take_delta(&mut self) -> AvailabilityDelta {
        std::mem::take(&mut self.delta)
    }

    /// Back to all-Unknown with an empty delta
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// All 26 letters with their best verdict, alphabetically
    pub fn iter(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        (b'a'..=b'z')
            .map(char::from)
            .zip(self.best.iter().copied())
    }

    /// Letters that have been evaluated at least once
    pub fn known(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        self.iter().filter(|(_, verdict)| verdict.is_known())
    }

    /// Same best verdicts, ignoring any pending delta
    #[must_use]
    pub fn same_knowledge(&self, other: &Self) -> bool {
        self.best == other.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const VERDICTS: [Verdict; 4] = [
        Verdict::Unknown,
        Verdict::Absent,
        Verdict::Present,
        Verdict::Correct,
    ];

    #[test]
    fn starts_all_unknown() {
        let map = AvailabilityMap::new();
        assert_eq!(map.iter().count(), 26);
        assert!(map.iter().all(|(_, v)| v == Verdict::Unknown));
        assert!(map.delta().is_empty());
    }

    #[test]
    fn update_raises_and_reports_delta() {
        let mut map = AvailabilityMap::new();
        let delta = map
            .update([
                ('t', Verdict::Absent),
                ('r', Verdict::Present),
                ('e', Verdict::Correct),
            ])
            .clone();

        assert_eq!(delta.len(), 3);
        assert_eq!(delta.get('r'), Some(Verdict::Present));
        assert_eq!(map.get('T'), Verdict::Absent);
        assert_eq!(map.get('e'), Verdict::Correct);
        assert_eq!(map.get('z'), Verdict::Unknown);
    }

    #[test]
    fn correct_is_never_overwritten_by_present() {
        let mut map = AvailabilityMap::new();
        map.update([('e', Verdict::Correct)]);
        let delta = map.update([('e', Verdict::Present), ('e', Verdict::Absent)]);

        assert!(delta.is_empty());
        assert_eq!(map.get('e'), Verdict::Correct);
    }

    #[test]
    fn duplicate_letters_in_one_update_keep_the_best() {
        let mut map = AvailabilityMap::new();
        let delta = map
            .update([('e', Verdict::Absent), ('e', Verdict::Present)])
            .clone();

        assert_eq!(map.get('e'), Verdict::Present);
        assert_eq!(delta.get('e'), Some(Verdict::Present));
        assert_eq!(delta.len(), 1);
    }

    #[test]
    fn take_delta_clears_buffer() {
        let mut map = AvailabilityMap::new();
        map.update([('a', Verdict::Present)]);

        let taken = map.take_delta();
        assert_eq!(taken.get('a'), Some(Verdict::Present));
        assert!(map.delta().is_empty());
        assert_eq!(map.get('a'), Verdict::Present);
    }

    #[test]
    fn non_letters_are_ignored() {
        let mut map = AvailabilityMap::new();
        let delta = map.update([('1', Verdict::Correct), (' ', Verdict::Present)]);
        assert!(delta.is_empty());
    }

    #[test]
    fn reset_clears_map_and_delta() {
        let mut map = AvailabilityMap::new();
        map.update([('q', Verdict::Absent)]);
        map.reset();
        assert_eq!(map, AvailabilityMap::new());
    }

    #[test]
    fn rebuild_scans_past_empty_cells() {
        let mut map = AvailabilityMap::new();
        map.update([('z', Verdict::Correct)]);

        let delta = map
            .rebuild([
                ('a', Verdict::Absent),
                ('\0', Verdict::Unknown),
                ('b', Verdict::Present),
            ])
            .clone();

        assert_eq!(map.get('z'), Verdict::Unknown);
        assert_eq!(map.get('b'), Verdict::Present);
        assert_eq!(delta.len(), 2);
        assert_eq!(map.known().count(), 2);
    }

    #[test]
    fn map_is_monotone_under_random_updates() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut map = AvailabilityMap::new();

        for _ in 0..2000 {
            let before: Vec<Verdict> = map.iter().map(|(_, v)| v).collect();
            let batch: Vec<(char, Verdict)> = (0..5)
                .map(|_| {
                    let letter = char::from(b'a' + rng.random_range(0..26u8));
                    (letter, VERDICTS[rng.random_range(0..VERDICTS.len())])
                })
                .collect();

            let delta = map.update(batch.iter().copied()).clone();

            for ((letter, after), prior) in map.iter().zip(before) {
                assert!(after >= prior, "{letter} regressed from {prior:?} to {after:?}");
                assert_eq!(delta.get(letter).is_some(), after > prior);
            }
        }
    }
}
