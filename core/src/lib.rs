#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use error::*;
pub use hangman::*;
pub use memory::*;
pub use progress::*;
pub use question::*;
pub use tictactoe::*;

mod error;
mod hangman;
mod memory;
mod progress;
mod question;
mod tictactoe;

/// Stage identifiers run 1..=STAGE_COUNT.
pub type StageId = u8;

pub const STAGE_COUNT: StageId = 6;

/// Code asked for on the landing page, before stage 1 is reachable at all.
pub const START_PIN: &str = "0102";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    TicTacToe,
    Question,
    Hangman,
    Memory,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuestionSpec {
    pub question: &'static str,
    pub answers: [&'static str; 4],
    pub correct: usize,
    pub clue: &'static str,
}

/// Static description of one stage. The PIN gating stage k is the
/// `unlock_pin` of stage k-1, revealed with that stage's reward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StageConfig {
    pub id: StageId,
    pub kind: GameKind,
    pub title: &'static str,
    pub unlock_pin: Option<&'static str>,
    pub reward_location: Option<&'static str>,
    pub question: Option<QuestionSpec>,
    pub phrase: Option<&'static str>,
    pub pairs: Option<u8>,
}

pub const STAGES: [StageConfig; STAGE_COUNT as usize] = [
    StageConfig {
        id: 1,
        kind: GameKind::TicTacToe,
        title: "Gra w kółko i krzyżyk",
        unlock_pin: Some("1605"),
        reward_location: Some("Zajrzyj pod łóżko"),
        question: None,
        phrase: None,
        pairs: None,
    },
    StageConfig {
        id: 2,
        kind: GameKind::Question,
        title: "Pytanie 2",
        unlock_pin: Some("2412"),
        reward_location: Some("Sprawdź szafkę w kuchni"),
        question: Some(QuestionSpec {
            question: "W jakim miesiącu obchodzimy Boże Narodzenie?",
            answers: ["Listopad", "Grudzień", "Styczeń", "Luty"],
            correct: 1,
            clue: "To ostatni miesiąc roku",
        }),
        phrase: None,
        pairs: None,
    },
    StageConfig {
        id: 3,
        kind: GameKind::Hangman,
        title: "Wisielec",
        unlock_pin: Some("3112"),
        reward_location: Some("Zajrzyj za drzwi wejściowe"),
        question: None,
        phrase: Some("KOCHAM EMILA"),
        pairs: None,
    },
    StageConfig {
        id: 4,
        kind: GameKind::Memory,
        title: "Memory",
        unlock_pin: Some("2512"),
        reward_location: Some("Sprawdź okno w salonie"),
        question: None,
        phrase: None,
        pairs: Some(15),
    },
    StageConfig {
        id: 5,
        kind: GameKind::Question,
        title: "Pytanie 5",
        unlock_pin: Some("1912"),
        reward_location: Some("Zajrzyj pod poduszką"),
        question: Some(QuestionSpec {
            question: "Co się wiesza na choinkę?",
            answers: ["Kwiaty", "Ozdoby", "Liście", "Pióra"],
            correct: 1,
            clue: "Są błyszczące",
        }),
        phrase: None,
        pairs: None,
    },
    StageConfig {
        id: 6,
        kind: GameKind::Question,
        title: "Pytanie 6",
        unlock_pin: None,
        reward_location: None,
        question: Some(QuestionSpec {
            question: "Kiedy dochodzimy do Nowego Roku?",
            answers: ["31 grudnia", "1 stycznia", "Wigilia", "Trzech Króli"],
            correct: 0,
            clue: "To ostatni dzień roku",
        }),
        phrase: None,
        pairs: None,
    },
];

pub fn stage(id: StageId) -> Option<&'static StageConfig> {
    if (1..=STAGE_COUNT).contains(&id) {
        Some(&STAGES[usize::from(id) - 1])
    } else {
        None
    }
}

/// PIN a player has to enter before stage `id` opens. Stage 1 has none,
/// the landing page already checked `START_PIN`.
pub fn entry_pin(id: StageId) -> Option<&'static str> {
    if id <= 1 {
        None
    } else {
        stage(id - 1).and_then(|prev| prev.unlock_pin)
    }
}

pub const fn is_last_stage(id: StageId) -> bool {
    id == STAGE_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_table_ids_are_dense_and_ordered() {
        for (pos, config) in STAGES.iter().enumerate() {
            assert_eq!(usize::from(config.id), pos + 1);
            assert_eq!(stage(config.id), Some(config));
        }
        assert_eq!(stage(0), None);
        assert_eq!(stage(STAGE_COUNT + 1), None);
    }

    #[test]
    fn every_stage_carries_the_data_its_kind_needs() {
        for config in &STAGES {
            match config.kind {
                GameKind::Question => assert!(config.question.is_some(), "stage {}", config.id),
                GameKind::Hangman => assert!(config.phrase.is_some(), "stage {}", config.id),
                GameKind::Memory => assert!(config.pairs.is_some(), "stage {}", config.id),
                GameKind::TicTacToe => {}
            }
        }
    }

    #[test]
    fn entry_pin_comes_from_the_previous_stage() {
        assert_eq!(entry_pin(1), None);
        for id in 2..=STAGE_COUNT {
            assert_eq!(entry_pin(id), STAGES[usize::from(id) - 2].unlock_pin);
        }
        // every non-final stage must reveal a PIN for the next one
        for config in &STAGES {
            if !is_last_stage(config.id) {
                assert!(config.unlock_pin.is_some(), "stage {}", config.id);
            }
        }
    }
}
