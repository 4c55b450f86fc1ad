use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{GameError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub pair: u8,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    NoChange,
    FirstUp,
    /// Second card is up; the host resolves the pair after its delay.
    PairUp,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    NoChange,
    Matched,
    Mismatched,
    /// Final pair resolved; reported exactly once per round.
    AllMatched,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Pair-matching round: two shuffled copies of 1..=pairs, at most two
/// cards face-up and unresolved at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairGame {
    pairs: u8,
    cards: Vec<Card>,
    face_up: SmallVec<[usize; 2]>,
    moves: u32,
}

impl PairGame {
    pub fn new<R: Rng>(pairs: u8, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = (1..=pairs)
            .chain(1..=pairs)
            .map(|pair| Card {
                pair,
                face_up: false,
                matched: false,
            })
            .collect();
        cards.shuffle(rng);
        Self {
            pairs,
            cards,
            face_up: SmallVec::new(),
            moves: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, position: usize) -> Option<Card> {
        self.cards.get(position).copied()
    }

    /// Completed flip pairs so far, display only.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.cards.iter().all(|card| card.matched)
    }

    /// Two cards are up and waiting for [`PairGame::resolve`].
    pub fn awaiting_resolve(&self) -> bool {
        self.face_up.len() == 2
    }

    /// Whether the pending pair matches, once two cards are up.
    pub fn pending_match(&self) -> Option<bool> {
        match self.face_up[..] {
            [first, second] => Some(self.cards[first].pair == self.cards[second].pair),
            _ => None,
        }
    }

    pub fn flip(&mut self, position: usize) -> Result<FlipOutcome> {
        let card = self
            .cards
            .get(position)
            .copied()
            .ok_or(GameError::InvalidCell)?;
        if self.is_solved() {
            return Err(GameError::AlreadyEnded);
        }
        if self.face_up.len() == 2 || card.face_up || card.matched {
            return Ok(FlipOutcome::NoChange);
        }

        self.cards[position].face_up = true;
        self.face_up.push(position);
        if self.face_up.len() == 2 {
            self.moves += 1;
            Ok(FlipOutcome::PairUp)
        } else {
            Ok(FlipOutcome::FirstUp)
        }
    }

    /// Applies the pending pair: a match is fixed face-up, a mismatch turns
    /// both cards back over. Called by the host after the reveal delay.
    pub fn resolve(&mut self) -> ResolveOutcome {
        let [first, second] = self.face_up[..] else {
            return ResolveOutcome::NoChange;
        };
        self.face_up.clear();

        if self.cards[first].pair == self.cards[second].pair {
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            if self.is_solved() {
                ResolveOutcome::AllMatched
            } else {
                ResolveOutcome::Matched
            }
        } else {
            self.cards[first].face_up = false;
            self.cards[second].face_up = false;
            ResolveOutcome::Mismatched
        }
    }

    /// Reshuffles everything and clears the move counter.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        *self = Self::new(self.pairs, rng);
    }
}
