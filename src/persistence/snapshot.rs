//! Session snapshots
//!
//! The serializable picture of one game and its validated reconstruction.

use crate::core::{Verdict, Word, WordError};
use crate::engine::{AvailabilityMap, Ledger, LedgerError, LedgerSnapshot, Phase};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current snapshot layout
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    /// `None` before the first secret is drawn
    pub secret: Option<String>,
    #[serde(default)]
    pub ledger: LedgerSnapshot,
    /// Known letters only; Unknown ones are omitted
    #[serde(default)]
    pub availability: BTreeMap<char, Verdict>,
    pub phase: Phase,
}

/// A snapshot that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredSession {
    pub secret: Option<Word>,
    pub ledger: Ledger,
    pub availability: AvailabilityMap,
    pub phase: Phase,
}

/// Why a snapshot was refused
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum RestoreError {
    #[display("unsupported snapshot version {found}")]
    #[from(ignore)]
    UnsupportedVersion { found: u32 },
    #[display("secret is not a valid word: {_0}")]
    Secret(WordError),
    #[display("{_0}")]
    Ledger(LedgerError),
    #[display("snapshot without a secret must be a fresh game")]
    #[from(ignore)]
    OrphanProgress,
    #[display("saved phase {saved} contradicts the ledger ({derived})")]
    #[from(ignore)]
    PhaseMismatch { saved: Phase, derived: Phase },
}

impl SessionSnapshot {
    /// Snapshot of a game that has not started
    #[must_use]
    pub fn initial() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            secret: None,
            ledger: LedgerSnapshot::default(),
            availability: BTreeMap::new(),
            phase: Phase::Initial,
        }
    }

    /// Capture a session
    #[must_use]
    pub fn capture(
        secret: Option<&Word>,
        ledger: &Ledger,
        availability: &AvailabilityMap,
        phase: Phase,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            secret: secret.map(|word| word.text().to_string()),
            ledger: ledger.snapshot(),
            availability: availability.known().collect(),
            phase,
        }
    }

    /// Rebuild a session, trusting nothing that can be re-derived
    ///
    /// The ledger is re-scored against the secret, the availability map is
    /// recomputed from the ledger (the stored map is only informative) and the
    /// phase must agree with the ledger. A snapshot taken mid-submission is
    /// resumed as `Guessing`.
    ///
    /// # Errors
    /// Returns the first `RestoreError` found.
    pub fn restore(&self) -> Result<RestoredSession, RestoreError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(RestoreError::UnsupportedVersion {
                found: self.version,
            });
        }

        let Some(secret) = &self.secret else {
            if self.phase != Phase::Initial
                || !self.ledger.attempts.is_empty()
                || self.ledger.draft.is_some()
            {
                return Err(RestoreError::OrphanProgress);
            }
            return Ok(RestoredSession {
                secret: None,
                ledger: Ledger::new(),
                availability: AvailabilityMap::new(),
                phase: Phase::Initial,
            });
        };

        let secret = Word::new(secret)?;
        let mut ledger = Ledger::restore(&self.ledger, &secret)?;
        let derived = derive_phase(&ledger)?;

        let saved = match self.phase {
            Phase::Submitting => Phase::Guessing,
            other => other,
        };
        if saved != derived || (derived.is_terminal() && ledger.has_open_attempt()) {
            return Err(RestoreError::PhaseMismatch { saved, derived });
        }
        if derived == Phase::Guessing && !ledger.has_open_attempt() {
            ledger.begin_attempt()?;
        }

        let mut availability = AvailabilityMap::new();
        availability.rebuild(
            ledger
                .committed_cells()
                .map(|cell| (cell.letter, cell.verdict)),
        );

        Ok(RestoredSession {
            secret: Some(secret),
            ledger,
            availability,
            phase: derived,
        })
    }
}

/// Phase implied by a ledger that belongs to a started game
fn derive_phase(ledger: &Ledger) -> Result<Phase, RestoreError> {
    let attempts = ledger.attempts();
    let solved_early = attempts
        .iter()
        .rev()
        .skip(1)
        .any(|attempt| attempt.feedback().is_solved());
    if solved_early {
        return Err(LedgerError::Corrupt {
            reason: "attempts continue after the secret was found",
        }
        .into());
    }

    Ok(match ledger.last() {
        Some(last) if last.feedback().is_solved() => Phase::Won,
        _ if ledger.is_full() => Phase::Lost,
        _ => Phase::Guessing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feedback, MAX_ATTEMPTS};

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn played(secret: &str, guesses: &[&str], draft: bool) -> (Word, Ledger, AvailabilityMap) {
        let secret = word(secret);
        let mut ledger = Ledger::new();
        let mut map = AvailabilityMap::new();
        for guess in guesses {
            let guess = word(guess);
            let feedback = Feedback::calculate(&guess, &secret);
            map.update(guess.text().chars().zip(feedback.verdicts().iter().copied()));
            ledger.commit_attempt(guess, feedback).unwrap();
        }
        if draft {
            ledger.begin_attempt().unwrap();
            ledger.set_letter_at_cursor('s').unwrap();
        }
        (secret, ledger, map)
    }

    #[test]
    fn initial_snapshot_restores_fresh_game() {
        let restored = SessionSnapshot::initial().restore().unwrap();
        assert_eq!(restored.phase, Phase::Initial);
        assert!(restored.secret.is_none());
        assert!(restored.ledger.is_empty());
    }

    #[test]
    fn capture_then_restore_is_equivalent() {
        let (secret, ledger, map) = played("crane", &["trace", "slate"], true);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Guessing);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        let restored = back.restore().unwrap();

        assert_eq!(restored.secret, Some(secret));
        assert_eq!(restored.ledger, ledger);
        assert!(restored.availability.same_knowledge(&map));
        assert_eq!(restored.phase, Phase::Guessing);
        assert_eq!(restored.ledger.cursor().position, 1);
    }

    #[test]
    fn restore_derives_availability_from_ledger() {
        let (secret, ledger, map) = played("crane", &["trace"], false);
        let mut snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Guessing);
        snapshot.availability.insert('z', Verdict::Correct);

        let restored = snapshot.restore().unwrap();
        assert_eq!(restored.availability.get('z'), Verdict::Unknown);
        assert_eq!(restored.availability.get('c'), Verdict::Present);
        assert_eq!(
            restored.availability.delta().len(),
            restored.availability.known().count()
        );
    }

    #[test]
    fn restore_recognises_terminal_phases() {
        let (secret, ledger, map) = played("crane", &["trace", "crane"], false);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Won);
        assert_eq!(snapshot.restore().unwrap().phase, Phase::Won);

        let misses = ["slate"; MAX_ATTEMPTS];
        let (secret, ledger, map) = played("crane", &misses, false);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Lost);
        assert_eq!(snapshot.restore().unwrap().phase, Phase::Lost);
    }

    #[test]
    fn guessing_without_draft_reopens_one() {
        let (secret, ledger, map) = played("crane", &["trace"], false);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Guessing);
        let restored = snapshot.restore().unwrap();
        assert!(restored.ledger.has_open_attempt());
        assert_eq!(restored.ledger.cursor().position, 0);
    }

    #[test]
    fn submitting_resumes_as_guessing() {
        let (secret, ledger, map) = played("crane", &["trace"], true);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Submitting);
        assert_eq!(snapshot.restore().unwrap().phase, Phase::Guessing);
    }

    #[test]
    fn phase_must_match_ledger() {
        let (secret, ledger, map) = played("crane", &["trace"], true);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Won);
        assert_eq!(
            snapshot.restore(),
            Err(RestoreError::PhaseMismatch {
                saved: Phase::Won,
                derived: Phase::Guessing
            })
        );
    }

    #[test]
    fn won_game_with_open_draft_is_refused() {
        let (secret, ledger, map) = played("crane", &["crane"], true);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Won);
        assert!(snapshot.restore().is_err());
    }

    #[test]
    fn attempts_after_a_win_are_refused() {
        let (secret, ledger, map) = played("crane", &["crane", "slate"], false);
        let snapshot = SessionSnapshot::capture(Some(&secret), &ledger, &map, Phase::Guessing);
        assert!(matches!(
            snapshot.restore(),
            Err(RestoreError::Ledger(LedgerError::Corrupt { .. }))
        ));
    }

    #[test]
    fn bad_secret_and_version_are_refused() {
        let mut snapshot = SessionSnapshot::initial();
        snapshot.secret = Some("cr4ne".to_string());
        snapshot.phase = Phase::Guessing;
        assert!(matches!(snapshot.restore(), Err(RestoreError::Secret(_))));

        let mut snapshot = SessionSnapshot::initial();
        snapshot.version = 99;
        assert_eq!(
            snapshot.restore(),
            Err(RestoreError::UnsupportedVersion { found: 99 })
        );
    }

    #[test]
    fn progress_without_secret_is_refused() {
        let mut snapshot = SessionSnapshot::initial();
        snapshot.phase = Phase::Guessing;
        assert_eq!(snapshot.restore(), Err(RestoreError::OrphanProgress));
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"version":1,"secret":null,"phase":"initial"}"#;
        let snapshot: SessionSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot, SessionSnapshot::initial());
    }
}
