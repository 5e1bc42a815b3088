use chrono::NaiveDate;
use std::fmt;

use vocab_core::model::{Glossary, SectionId, SubsectionId, WordEntry};
use vocab_core::ordering::OrderingPolicy;
use vocab_core::time::Clock;

use crate::error::SessionError;

//
// ─── CURSOR STATE ──────────────────────────────────────────────────────────────
//

/// Where the session currently points: the dataset row plus its resolved
/// group names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorState {
    pub row: usize,
    pub section_id: SectionId,
    pub section: String,
    pub subsection_id: SubsectionId,
    pub subsection: String,
}

/// Which side of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Front,
    Back,
}

//
// ─── REVIEW SESSION ────────────────────────────────────────────────────────────
//

/// Stateful cursor over one computed review order.
///
/// The session exclusively owns the glossary and is the only place its
/// counters are mutated. The ordering is computed once at construction; the
/// session date is captured once, so every feedback recorded in one run
/// carries the same date.
///
/// External transitions are `reveal` (front to back, no mutation) and
/// `feedback` (back to front of the next word, mutates exactly one counter).
pub struct ReviewSession {
    glossary: Glossary,
    order: Vec<usize>,
    cursor: Option<usize>,
    face: Face,
    today: NaiveDate,
    foreign_in_front: bool,
    finished: bool,
    answered: usize,
    ok_total: usize,
    miss_total: usize,
}

impl ReviewSession {
    /// Create a session over `glossary` using the given ordering policy.
    ///
    /// Resolves the full permutation once, then performs the initial
    /// non-recording advance so the session lands on the first word showing
    /// its front.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for a glossary with no entries.
    pub fn new(
        glossary: Glossary,
        policy: OrderingPolicy,
        foreign_in_front: bool,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        if glossary.is_empty() {
            return Err(SessionError::Empty);
        }

        let order = policy.permutation(&glossary, &mut rand::rng());
        let mut session = Self {
            glossary,
            order,
            cursor: None,
            face: Face::Front,
            today: clock.today(),
            foreign_in_front,
            finished: false,
            answered: 0,
            ok_total: 0,
            miss_total: 0,
        };
        session.advance(false, false)?;
        Ok(session)
    }

    /// The word side currently facing the user, or `None` once the deck is
    /// exhausted. Side-effect free.
    #[must_use]
    pub fn current_front(&self) -> Option<&str> {
        let entry = self.current_entry()?;
        Some(if self.foreign_in_front {
            entry.term()
        } else {
            entry.translation()
        })
    }

    /// The hidden side of the current word, or `None` once the deck is
    /// exhausted. Side-effect free.
    #[must_use]
    pub fn current_back(&self) -> Option<&str> {
        let entry = self.current_entry()?;
        Some(if self.foreign_in_front {
            entry.translation()
        } else {
            entry.term()
        })
    }

    /// Turn the current card over and return the solution.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRevealed` if the card is already showing its back and
    /// `ExhaustedDeck` once the order has run out.
    pub fn reveal(&mut self) -> Result<&str, SessionError> {
        if self.finished {
            return Err(SessionError::ExhaustedDeck);
        }
        if self.face == Face::Back {
            return Err(SessionError::AlreadyRevealed);
        }
        self.face = Face::Back;
        self.current_back().ok_or(SessionError::ExhaustedDeck)
    }

    /// Record feedback for the current word and move to the next one.
    ///
    /// Increments exactly one counter of the current row, stamps the matching
    /// date with the session's date, then advances the cursor.
    ///
    /// # Errors
    ///
    /// Returns `NotRevealed` while the card still shows its front. Returns
    /// `ExhaustedDeck` when the feedback lands on the last word of the
    /// order; the feedback is recorded before the failure, so a final save
    /// still sees it.
    pub fn feedback(&mut self, is_error: bool) -> Result<CursorState, SessionError> {
        if self.finished {
            return Err(SessionError::ExhaustedDeck);
        }
        if self.face == Face::Front {
            return Err(SessionError::NotRevealed);
        }
        self.advance(is_error, true)
    }

    /// Advance the cursor by one position, optionally recording feedback for
    /// the row being left.
    fn advance(
        &mut self,
        is_error: bool,
        record_feedback: bool,
    ) -> Result<CursorState, SessionError> {
        if record_feedback {
            let row = self.current_row().ok_or(SessionError::ExhaustedDeck)?;
            let entry = self
                .glossary
                .entry_mut(row)
                .expect("ordering only holds in-bounds rows");
            if is_error {
                entry.record_miss(self.today);
                self.miss_total += 1;
            } else {
                entry.record_ok(self.today);
                self.ok_total += 1;
            }
            self.answered += 1;
        }

        let next = self.cursor.map_or(0, |pos| pos + 1);
        if next >= self.order.len() {
            self.finished = true;
            return Err(SessionError::ExhaustedDeck);
        }
        self.cursor = Some(next);
        self.face = Face::Front;
        Ok(self.state_at(next))
    }

    fn state_at(&self, pos: usize) -> CursorState {
        let row = self.order[pos];
        let entry = self
            .glossary
            .entry(row)
            .expect("ordering only holds in-bounds rows");
        let section_id = entry.section_id();
        let subsection_id = entry.subsection_id();
        CursorState {
            row,
            section_id,
            section: self
                .glossary
                .section_name(section_id)
                .expect("group ids are resolved at build time")
                .to_string(),
            subsection_id,
            subsection: self
                .glossary
                .subsection_name(section_id, subsection_id)
                .expect("group ids are resolved at build time")
                .to_string(),
        }
    }

    fn current_row(&self) -> Option<usize> {
        if self.finished {
            return None;
        }
        self.cursor.map(|pos| self.order[pos])
    }

    fn current_entry(&self) -> Option<&WordEntry> {
        self.current_row().and_then(|row| self.glossary.entry(row))
    }

    /// The current cursor position and group names, or `None` once the deck
    /// is exhausted.
    #[must_use]
    pub fn cursor(&self) -> Option<CursorState> {
        if self.finished {
            return None;
        }
        self.cursor.map(|pos| self.state_at(pos))
    }

    /// Zero-based position in the review order.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.unwrap_or(0)
    }

    /// Total number of words in the review order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Words not yet shown, the current one included.
    #[must_use]
    pub fn remaining(&self) -> usize {
        if self.finished {
            return 0;
        }
        self.order.len() - self.position()
    }

    /// Number of feedbacks recorded this run.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.answered
    }

    #[must_use]
    pub fn ok_count(&self) -> usize {
        self.ok_total
    }

    #[must_use]
    pub fn miss_count(&self) -> usize {
        self.miss_total
    }

    /// True once the cursor has moved past the last word.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.finished
    }

    /// The session date stamped on every recorded feedback.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Hand the dataset back, e.g. to persist its history subset.
    #[must_use]
    pub fn into_glossary(self) -> Glossary {
        self.glossary
    }
}

impl fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewSession")
            .field("words", &self.order.len())
            .field("cursor", &self.cursor)
            .field("face", &self.face)
            .field("today", &self.today)
            .field("answered", &self.answered)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
