pub(crate) use hangman::HangmanView;
pub(crate) use memory::MemoryView;
pub(crate) use question::QuestionView;
pub(crate) use tictactoe::TicTacToeView;

mod hangman;
mod memory;
mod question;
mod tictactoe;
