use alloc::collections::BTreeSet;

use crate::{GameError, Result};

pub const MAX_WRONG_GUESSES: u8 = 6;

/// Keyboard shown by the view, Polish letters included.
pub const ALPHABET: &str = "AĄBCĆDEĘFGHIJKLŁMNŃOÓPQRSŚTUVWXYZŹŻ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HangmanState {
    InProgress,
    Won,
    Lost,
}

impl HangmanState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    NoChange,
    Hit,
    Miss,
    Won,
    Lost,
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Letter-guessing round over a fixed target phrase. Spaces never need to
/// be guessed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hangman {
    phrase: &'static str,
    guessed: BTreeSet<char>,
    wrong_guesses: u8,
    state: HangmanState,
}

impl Hangman {
    pub fn new(phrase: &'static str) -> Self {
        Self {
            phrase,
            guessed: BTreeSet::new(),
            wrong_guesses: 0,
            state: HangmanState::InProgress,
        }
    }

    pub fn phrase(&self) -> &'static str {
        self.phrase
    }

    pub fn state(&self) -> HangmanState {
        self.state
    }

    pub fn is_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter)
    }

    pub fn wrong_guesses(&self) -> u8 {
        self.wrong_guesses
    }

    pub fn remaining_tries(&self) -> u8 {
        MAX_WRONG_GUESSES - self.wrong_guesses
    }

    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome> {
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if letter.is_whitespace() || !self.guessed.insert(letter) {
            return Ok(GuessOutcome::NoChange);
        }

        if self.phrase.contains(letter) {
            if self.all_letters_revealed() {
                self.state = HangmanState::Won;
                Ok(GuessOutcome::Won)
            } else {
                Ok(GuessOutcome::Hit)
            }
        } else {
            self.wrong_guesses += 1;
            if self.wrong_guesses >= MAX_WRONG_GUESSES {
                self.state = HangmanState::Lost;
                Ok(GuessOutcome::Lost)
            } else {
                Ok(GuessOutcome::Miss)
            }
        }
    }

    /// Fresh round over the same phrase. There is no persisted counter for
    /// this engine, so this clears everything there is.
    pub fn reset(&mut self) {
        *self = Self::new(self.phrase);
    }

    fn all_letters_revealed(&self) -> bool {
        self.phrase
            .chars()
            .filter(|letter| !letter.is_whitespace())
            .all(|letter| self.guessed.contains(&letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "KOCHAM EMILA";

    #[test]
    fn guessing_every_distinct_letter_wins_in_any_order() {
        // reversed order of appearance, space skipped
        let mut round = Hangman::new(PHRASE);
        let mut letters: BTreeSet<char> = PHRASE.chars().filter(|c| *c != ' ').collect();

        let last = *letters.iter().next_back().unwrap();
        letters.remove(&last);
        for letter in letters.iter().rev() {
            assert_eq!(round.guess(*letter).unwrap(), GuessOutcome::Hit);
        }
        assert_eq!(round.guess(last).unwrap(), GuessOutcome::Won);
        assert_eq!(round.state(), HangmanState::Won);
    }

    #[test]
    fn six_misses_lose_the_round() {
        let mut round = Hangman::new(PHRASE);

        for (count, letter) in "BDFGJP".chars().enumerate() {
            let outcome = round.guess(letter).unwrap();
            if count + 1 < usize::from(MAX_WRONG_GUESSES) {
                assert_eq!(outcome, GuessOutcome::Miss);
            } else {
                assert_eq!(outcome, GuessOutcome::Lost);
            }
        }

        assert_eq!(round.state(), HangmanState::Lost);
        assert_eq!(round.remaining_tries(), 0);
        assert_eq!(round.guess('K'), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn repeats_and_whitespace_are_no_ops() {
        let mut round = Hangman::new(PHRASE);

        assert_eq!(round.guess('K').unwrap(), GuessOutcome::Hit);
        assert_eq!(round.guess('K').unwrap(), GuessOutcome::NoChange);
        assert_eq!(round.guess(' ').unwrap(), GuessOutcome::NoChange);

        assert_eq!(round.guess('Z').unwrap(), GuessOutcome::Miss);
        assert_eq!(round.guess('Z').unwrap(), GuessOutcome::NoChange);
        assert_eq!(round.wrong_guesses(), 1);
    }

    #[test]
    fn reset_restores_the_initial_round() {
        let mut round = Hangman::new(PHRASE);
        round.guess('K').unwrap();
        round.guess('Z').unwrap();

        round.reset();

        assert_eq!(round, Hangman::new(PHRASE));
        assert!(!round.is_guessed('K'));
    }

    #[test]
    fn alphabet_covers_the_target_phrase() {
        for letter in PHRASE.chars().filter(|c| *c != ' ') {
            assert!(ALPHABET.contains(letter), "{}", letter);
        }
    }
}
