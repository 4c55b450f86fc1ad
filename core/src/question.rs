use crate::{GameError, QuestionSpec, Result};

/// Seconds the player waits after a wrong answer.
pub const COOLDOWN_SECS: u32 = 60;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    NoChange,
    Correct,
    Wrong,
}

impl AnswerOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One multiple-choice question. The host drives [`Quiz::tick`] once per
/// second while the cooldown runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quiz {
    spec: &'static QuestionSpec,
    picked: Option<usize>,
    cooldown: u32,
    clue_shown: bool,
    solved: bool,
}

impl Quiz {
    pub const fn new(spec: &'static QuestionSpec) -> Self {
        Self {
            spec,
            picked: None,
            cooldown: 0,
            clue_shown: false,
            solved: false,
        }
    }

    pub fn spec(&self) -> &'static QuestionSpec {
        self.spec
    }

    pub fn picked(&self) -> Option<usize> {
        self.picked
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn clue_shown(&self) -> bool {
        self.clue_shown
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn submit(&mut self, index: usize) -> Result<AnswerOutcome> {
        if index >= self.spec.answers.len() {
            return Err(GameError::InvalidCell);
        }
        if self.solved {
            return Err(GameError::AlreadyEnded);
        }
        if self.cooldown > 0 || self.picked.is_some() {
            return Ok(AnswerOutcome::NoChange);
        }

        self.picked = Some(index);
        if index == self.spec.correct {
            self.solved = true;
            Ok(AnswerOutcome::Correct)
        } else {
            self.cooldown = COOLDOWN_SECS;
            Ok(AnswerOutcome::Wrong)
        }
    }

    /// Counts the cooldown down one second. On expiry the wrong pick is
    /// cleared and input opens up again. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        if self.cooldown == 0 {
            return false;
        }
        self.cooldown -= 1;
        if self.cooldown == 0 {
            self.picked = None;
        }
        true
    }

    /// Clue may only be toggled while answering is open.
    pub fn toggle_clue(&mut self) -> bool {
        if self.cooldown > 0 || self.solved {
            return false;
        }
        self.clue_shown = !self.clue_shown;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SPEC: QuestionSpec = QuestionSpec {
        question: "W jakim miesiącu obchodzimy Boże Narodzenie?",
        answers: ["Listopad", "Grudzień", "Styczeń", "Luty"],
        correct: 1,
        clue: "To ostatni miesiąc roku",
    };

    #[test]
    fn correct_answer_solves_and_locks_the_quiz() {
        let mut quiz = Quiz::new(&SPEC);

        assert_eq!(quiz.submit(1).unwrap(), AnswerOutcome::Correct);
        assert!(quiz.is_solved());
        assert_eq!(quiz.submit(1), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn wrong_answer_starts_the_cooldown_and_blocks_input() {
        let mut quiz = Quiz::new(&SPEC);

        assert_eq!(quiz.submit(0).unwrap(), AnswerOutcome::Wrong);
        assert_eq!(quiz.cooldown(), COOLDOWN_SECS);
        assert_eq!(quiz.picked(), Some(0));
        assert_eq!(quiz.submit(1).unwrap(), AnswerOutcome::NoChange);
    }

    #[test]
    fn cooldown_expiry_reopens_input() {
        let mut quiz = Quiz::new(&SPEC);
        quiz.submit(0).unwrap();

        for _ in 0..COOLDOWN_SECS {
            assert!(quiz.tick());
        }

        assert_eq!(quiz.cooldown(), 0);
        assert_eq!(quiz.picked(), None);
        assert!(!quiz.tick());
        assert_eq!(quiz.submit(1).unwrap(), AnswerOutcome::Correct);
    }

    #[test]
    fn clue_toggles_only_while_answering_is_open() {
        let mut quiz = Quiz::new(&SPEC);

        assert!(quiz.toggle_clue());
        assert!(quiz.clue_shown());
        assert!(quiz.toggle_clue());
        assert!(!quiz.clue_shown());

        quiz.submit(0).unwrap();
        assert!(!quiz.toggle_clue());

        let mut solved = Quiz::new(&SPEC);
        solved.submit(1).unwrap();
        assert!(!solved.toggle_clue());
    }

    #[test]
    fn out_of_range_answer_is_an_error() {
        let mut quiz = Quiz::new(&SPEC);
        assert_eq!(quiz.submit(4), Err(GameError::InvalidCell));
    }
}
