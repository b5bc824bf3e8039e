//! Letter scoring
//!
//! Computes the per-letter verdicts of a guess against the secret, following
//! Wordle's rules for duplicate letters.

use super::verdict::Verdict;
use super::word::{WORD_LENGTH, Word, WordError};

/// Verdicts for one complete guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([Verdict; WORD_LENGTH]);

impl Feedback {
    /// All greens (perfect match)
    pub const SOLVED: Self = Self([Verdict::Correct; WORD_LENGTH]);

    /// Calculate the feedback when `guess` is played against `secret`
    ///
    /// # Algorithm
    /// 1. Count the letters of the secret
    /// 2. First pass: mark exact matches Correct and spend one count each
    /// 3. Second pass: mark remaining cells Present while their letter still has
    ///    an unspent count, otherwise Absent
    ///
    /// Each occurrence in the secret is attributed to at most one guess cell.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{Feedback, Verdict, Word};
    ///
    /// let guess = Word::new("trace").unwrap();
    /// let secret = Word::new("crane").unwrap();
    /// let feedback = Feedback::calculate(&guess, &secret);
    ///
    /// assert_eq!(feedback.to_emoji(), "⬜🟩🟩🟨🟩");
    /// assert_eq!(feedback.verdicts()[3], Verdict::Present);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, secret: &Word) -> Self {
        let mut verdicts = [Verdict::Absent; WORD_LENGTH];
        let mut available = secret.letter_counts();

        let pairs = guess.chars().iter().zip(secret.chars());
        for (verdict, (&g, &s)) in verdicts.iter_mut().zip(pairs) {
            if g == s {
                *verdict = Verdict::Correct;
                available[usize::from(g - b'a')] -= 1;
            }
        }

        for (verdict, &g) in verdicts.iter_mut().zip(guess.chars()) {
            if *verdict == Verdict::Correct {
                continue;
            }
            let remaining = &mut available[usize::from(g - b'a')];
            if *remaining > 0 {
                *verdict = Verdict::Present;
                *remaining -= 1;
            }
        }

        Self(verdicts)
    }

    /// Per-letter verdicts in guess order
    #[inline]
    #[must_use]
    pub const fn verdicts(&self) -> &[Verdict; WORD_LENGTH] {
        &self.0
    }

    /// Check if this is a perfect match (all greens)
    #[inline]
    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Count the number of green feedback squares
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&v| v == Verdict::Correct).count()
    }

    /// Convert feedback to emoji string, e.g. "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|v| v.emoji()).collect()
    }
}

/// Score a raw guess against a raw secret
///
/// # Errors
/// Returns `WordError::InvalidLength` if either string is not exactly 5
/// characters long, or another `WordError` if it contains non-letters.
pub fn score(guess: &str, secret: &str) -> Result<Feedback, WordError> {
    let guess = Word::new(guess)?;
    let secret = Word::new(secret)?;
    Ok(Feedback::calculate(&guess, &secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn feedback(guess: &str, secret: &str) -> Feedback {
        score(guess, secret).unwrap()
    }

    fn random_word(rng: &mut StdRng, alphabet: &[u8]) -> Word {
        let text: String = (0..WORD_LENGTH)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
            .collect();
        Word::new(text).unwrap()
    }

    #[test]
    fn all_absent() {
        let fb = feedback("abcde", "fghij");
        assert_eq!(fb.count_correct(), 0);
        assert_eq!(fb.to_emoji(), "⬜⬜⬜⬜⬜");
    }

    #[test]
    fn self_match_is_solved() {
        for word in ["crane", "slate", "speed", "zzzzz", "aaaaa"] {
            let fb = feedback(word, word);
            assert_eq!(fb, Feedback::SOLVED);
            assert!(fb.is_solved());
        }
    }

    #[test]
    fn trace_against_crane() {
        // R and A share their positions with CRANE, C does not
        let fb = feedback("trace", "crane");
        assert_eq!(
            fb.verdicts(),
            &[
                Verdict::Absent,
                Verdict::Correct,
                Verdict::Correct,
                Verdict::Present,
                Verdict::Correct
            ]
        );
    }

    #[test]
    fn erase_against_speed_respects_letter_budget() {
        // SPEED has two E's and one S: ERASE's E, S and final E all find a match
        let fb = feedback("erase", "speed");
        assert_eq!(fb.to_emoji(), "🟨⬜⬜🟨🟨");
    }

    #[test]
    fn single_secret_letter_guessed_twice() {
        // CRANE has one E; only one of the guess's E's may light up
        let fb = feedback("geese", "crane");
        assert_eq!(fb.to_emoji(), "⬜⬜⬜⬜🟩");

        // Present on the earliest unmatched position, Absent afterwards
        let fb = feedback("eerie", "ideal");
        assert_eq!(fb.to_emoji(), "🟨⬜⬜🟨⬜");
    }

    #[test]
    fn correct_takes_priority_over_earlier_present() {
        // ROBOT vs FLOOR: the second O is exact, the first is Present
        let fb = feedback("robot", "floor");
        assert_eq!(fb.to_emoji(), "🟨🟨⬜🟩⬜");
    }

    #[test]
    fn invalid_length_is_reported() {
        assert_eq!(
            score("cranes", "crane"),
            Err(WordError::InvalidLength { length: 6 })
        );
        assert_eq!(
            score("crane", "cran"),
            Err(WordError::InvalidLength { length: 4 })
        );
    }

    #[test]
    fn correct_count_equals_matching_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let guess = random_word(&mut rng, b"abcde");
            let secret = random_word(&mut rng, b"abcde");
            let matching = guess
                .chars()
                .iter()
                .zip(secret.chars())
                .filter(|(g, s)| g == s)
                .count();
            assert_eq!(Feedback::calculate(&guess, &secret).count_correct(), matching);
        }
    }

    #[test]
    fn lit_letters_never_exceed_secret_counts() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let guess = random_word(&mut rng, b"abcd");
            let secret = random_word(&mut rng, b"abcd");
            let fb = Feedback::calculate(&guess, &secret);

            let mut lit = [0u8; 26];
            for (&g, v) in guess.chars().iter().zip(fb.verdicts()) {
                if matches!(v, Verdict::Correct | Verdict::Present) {
                    lit[usize::from(g - b'a')] += 1;
                }
            }
            let budget = secret.letter_counts();
            let guessed = guess.letter_counts();
            for i in 0..26 {
                assert!(lit[i] <= budget[i], "{guess} vs {secret}");
                // Every letter with spare budget is lit as often as possible
                assert_eq!(lit[i], budget[i].min(guessed[i]), "{guess} vs {secret}");
            }
        }
    }
}
