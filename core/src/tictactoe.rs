use alloc::string::ToString;
use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{GameError, Result, StateStore};

/// The eight three-in-a-row lines: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Lost or drawn rounds after which the opponent starts slipping.
pub const MERCY_THRESHOLD: u32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Player,
    Opponent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    PlayerTurn,
    OpponentTurn,
    PlayerWon,
    OpponentWon,
    Drawn,
}

impl RoundState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::PlayerWon | Self::OpponentWon | Self::Drawn)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::PlayerTurn
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    NoChange,
    Placed,
    PlayerWon,
    OpponentWon,
    Drawn,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

pub type Cells = [Option<Mark>; 9];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    cells: Cells,
    state: RoundState,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn from_cells(cells: Cells, state: RoundState) -> Self {
        Self { cells, state }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Places the player's mark. Occupied cells and out-of-turn clicks are
    /// silent no-ops.
    pub fn play(&mut self, index: usize) -> Result<MoveOutcome> {
        let cell = self.cells.get(index).copied().ok_or(GameError::InvalidCell)?;
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if self.state != RoundState::PlayerTurn || cell.is_some() {
            return Ok(MoveOutcome::NoChange);
        }
        Ok(self.place(index, Mark::Player))
    }

    /// Picks and places the opponent's answer. `prior_losses` is the
    /// persisted [`LossTally`] value; at [`MERCY_THRESHOLD`] and above the
    /// opponent degrades to 70% random, 20% block-only, 10% optimal.
    pub fn reply<R: Rng>(&mut self, rng: &mut R, prior_losses: u32) -> Result<MoveOutcome> {
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if self.state != RoundState::OpponentTurn {
            return Ok(MoveOutcome::NoChange);
        }
        let Some(index) = self.pick_reply(rng, prior_losses) else {
            return Ok(MoveOutcome::NoChange);
        };
        Ok(self.place(index, Mark::Opponent))
    }

    /// Starts a fresh round. Does not touch the persisted loss tally.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Line holding the three winning marks, for the endgame highlight.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        LINES
            .into_iter()
            .find(|&line| line_owner(&self.cells, line).is_some())
    }

    fn place(&mut self, index: usize, mark: Mark) -> MoveOutcome {
        self.cells[index] = Some(mark);

        if let Some(winner) = winner(&self.cells) {
            self.state = match winner {
                Mark::Player => RoundState::PlayerWon,
                Mark::Opponent => RoundState::OpponentWon,
            };
            match winner {
                Mark::Player => MoveOutcome::PlayerWon,
                Mark::Opponent => MoveOutcome::OpponentWon,
            }
        } else if self.cells.iter().all(Option::is_some) {
            self.state = RoundState::Drawn;
            MoveOutcome::Drawn
        } else {
            self.state = match mark {
                Mark::Player => RoundState::OpponentTurn,
                Mark::Opponent => RoundState::PlayerTurn,
            };
            MoveOutcome::Placed
        }
    }

    fn pick_reply<R: Rng>(&self, rng: &mut R, prior_losses: u32) -> Option<usize> {
        if prior_losses >= MERCY_THRESHOLD {
            let roll: f64 = rng.random();
            if roll < 0.7 {
                random_free_cell(&self.cells, rng)
            } else if roll < 0.9 {
                winning_move(&self.cells, Mark::Player)
                    .or_else(|| random_free_cell(&self.cells, rng))
            } else {
                self.best_move(rng)
            }
        } else {
            self.best_move(rng)
        }
    }

    /// Win, block, center, random corner, random free cell.
    fn best_move<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if let Some(index) = winning_move(&self.cells, Mark::Opponent) {
            return Some(index);
        }
        if let Some(index) = winning_move(&self.cells, Mark::Player) {
            return Some(index);
        }
        if self.cells[CENTER].is_none() {
            return Some(CENTER);
        }
        let corners: SmallVec<[usize; 4]> = CORNERS
            .into_iter()
            .filter(|&index| self.cells[index].is_none())
            .collect();
        if !corners.is_empty() {
            return Some(corners[rng.random_range(0..corners.len())]);
        }
        random_free_cell(&self.cells, rng)
    }
}

pub fn winner(cells: &Cells) -> Option<Mark> {
    LINES.into_iter().find_map(|line| line_owner(cells, line))
}

fn line_owner(cells: &Cells, [a, b, c]: [usize; 3]) -> Option<Mark> {
    match (cells[a], cells[b], cells[c]) {
        (Some(first), Some(second), Some(third)) if first == second && second == third => {
            Some(first)
        }
        _ => None,
    }
}

/// Cell completing a line for `mark` on the next move, if any.
fn winning_move(cells: &Cells, mark: Mark) -> Option<usize> {
    (0..cells.len()).find(|&index| {
        cells[index].is_none() && {
            let mut trial = *cells;
            trial[index] = Some(mark);
            winner(&trial) == Some(mark)
        }
    })
}

fn random_free_cell<R: Rng>(cells: &Cells, rng: &mut R) -> Option<usize> {
    let free: SmallVec<[usize; 9]> = (0..cells.len())
        .filter(|&index| cells[index].is_none())
        .collect();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.random_range(0..free.len())])
    }
}

/// Lost and drawn rounds since the last player win, persisted separately
/// from stage progress so repeated rounds keep lowering the difficulty.
pub struct LossTally<S> {
    store: S,
}

impl<S: StateStore> LossTally<S> {
    pub const KEY: &'static str = "gwiazdka:tictactoe:losses";

    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get(&self) -> u32 {
        self.store
            .get(Self::KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn record_loss(&self) -> u32 {
        let count = self.get().saturating_add(1);
        self.store.set(Self::KEY, &count.to_string());
        count
    }

    /// Cleared only by a player win.
    pub fn clear(&self) {
        self.store.remove(Self::KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::testing::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const X: Option<Mark> = Some(Mark::Player);
    const O: Option<Mark> = Some(Mark::Opponent);
    const E: Option<Mark> = None;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x6177_6961_7a64_6b61)
    }

    #[test]
    fn detects_wins_on_every_line() {
        for line in LINES {
            let mut cells: Cells = [E; 9];
            for index in line {
                cells[index] = X;
            }
            assert_eq!(winner(&cells), Some(Mark::Player), "{:?}", line);
        }
    }

    #[test]
    fn never_declares_a_winner_without_three_in_a_row() {
        // full board, drawn
        let cells = [X, O, X, X, O, O, O, X, X];
        assert_eq!(winner(&cells), None);

        // mixed line owners
        let cells = [X, X, O, E, E, E, E, E, E];
        assert_eq!(winner(&cells), None);
    }

    #[test]
    fn occupied_cell_and_out_of_turn_clicks_are_no_ops() {
        let mut round = TicTacToe::new();

        assert_eq!(round.play(4).unwrap(), MoveOutcome::Placed);
        assert_eq!(round.state(), RoundState::OpponentTurn);
        // not the player's turn
        assert_eq!(round.play(0).unwrap(), MoveOutcome::NoChange);

        assert!(round.reply(&mut rng(), 0).unwrap().has_update());
        // occupied cell
        assert_eq!(round.play(4).unwrap(), MoveOutcome::NoChange);

        assert_eq!(round.play(9), Err(GameError::InvalidCell));
    }

    #[test]
    fn finished_round_rejects_further_moves() {
        let mut round = TicTacToe::from_cells(
            [X, X, E, O, O, E, E, E, E],
            RoundState::PlayerTurn,
        );

        assert_eq!(round.play(2).unwrap(), MoveOutcome::PlayerWon);
        assert_eq!(round.state(), RoundState::PlayerWon);
        assert_eq!(round.play(5), Err(GameError::AlreadyEnded));
        assert_eq!(round.reply(&mut rng(), 0), Err(GameError::AlreadyEnded));
        assert_eq!(round.winning_line(), Some([0, 1, 2]));
    }

    #[test]
    fn filling_the_board_without_a_winner_draws() {
        let mut round = TicTacToe::from_cells(
            [X, O, X, X, O, O, O, X, E],
            RoundState::PlayerTurn,
        );

        assert_eq!(round.play(8).unwrap(), MoveOutcome::Drawn);
        assert_eq!(round.state(), RoundState::Drawn);
    }

    #[test]
    fn optimal_opponent_takes_an_immediate_win() {
        let mut round = TicTacToe::from_cells(
            [O, O, E, X, X, E, E, E, E],
            RoundState::OpponentTurn,
        );

        assert_eq!(round.reply(&mut rng(), 0).unwrap(), MoveOutcome::OpponentWon);
        assert_eq!(round.cells()[2], O);
    }

    #[test]
    fn optimal_opponent_blocks_the_player_threat() {
        let mut round = TicTacToe::from_cells(
            [X, X, E, O, E, E, E, E, E],
            RoundState::OpponentTurn,
        );

        assert_eq!(round.reply(&mut rng(), 0).unwrap(), MoveOutcome::Placed);
        assert_eq!(round.cells()[2], O);

        // a column threat through the center outranks the corner preference
        let mut round = TicTacToe::from_cells(
            [E, X, E, E, X, E, E, E, E],
            RoundState::OpponentTurn,
        );
        assert_eq!(round.reply(&mut rng(), 0).unwrap(), MoveOutcome::Placed);
        assert_eq!(round.cells()[7], O);
    }

    #[test]
    fn optimal_opponent_prefers_center_then_corners() {
        let mut round = TicTacToe::from_cells(
            [X, E, E, E, E, E, E, E, E],
            RoundState::OpponentTurn,
        );
        round.reply(&mut rng(), 0).unwrap();
        assert_eq!(round.cells()[CENTER], O);

        // center already taken, no threat on the board: a corner is next
        let mut round = TicTacToe::from_cells(
            [E, X, E, E, O, E, E, E, E],
            RoundState::OpponentTurn,
        );
        round.reply(&mut rng(), 0).unwrap();
        let corner = CORNERS.iter().any(|&index| round.cells()[index] == O);
        assert!(corner, "{:?}", round.cells());
    }

    #[test]
    fn degraded_opponent_matches_the_70_20_10_split() {
        // Opponent can win at 2, the player threatens at 5, cells 6..8 are
        // also free. Per policy arm: optimal always wins at 2, block-only
        // plays 5, random is uniform over the five free cells.
        let cells = [O, O, E, X, X, E, E, E, E];
        let mut rng = rng();
        let mut took_win = 0u32;
        let mut took_block = 0u32;
        const TRIALS: u32 = 10_000;

        for _ in 0..TRIALS {
            let mut round = TicTacToe::from_cells(cells, RoundState::OpponentTurn);
            round.reply(&mut rng, MERCY_THRESHOLD).unwrap();
            if round.cells()[2] == O {
                took_win += 1;
            } else if round.cells()[5] == O {
                took_block += 1;
            }
        }

        let win_rate = f64::from(took_win) / f64::from(TRIALS);
        let block_rate = f64::from(took_block) / f64::from(TRIALS);
        // P(win cell) = 0.10 + 0.70 / 5, P(block cell) = 0.20 + 0.70 / 5
        assert!((win_rate - 0.24).abs() < 0.03, "win rate {}", win_rate);
        assert!((block_rate - 0.34).abs() < 0.03, "block rate {}", block_rate);
    }

    #[test]
    fn below_the_threshold_the_opponent_stays_optimal() {
        let cells = [O, O, E, X, X, E, E, E, E];
        let mut rng = rng();

        for _ in 0..100 {
            let mut round = TicTacToe::from_cells(cells, RoundState::OpponentTurn);
            assert_eq!(
                round.reply(&mut rng, MERCY_THRESHOLD - 1).unwrap(),
                MoveOutcome::OpponentWon
            );
        }
    }

    #[test]
    fn restart_clears_the_board_but_not_the_tally() {
        let store = MemoryStore::default();
        let tally = LossTally::new(&store);
        tally.record_loss();

        let mut round = TicTacToe::new();
        round.play(0).unwrap();
        round.restart();

        assert_eq!(round, TicTacToe::new());
        assert_eq!(tally.get(), 1);
    }

    #[test]
    fn loss_tally_counts_up_and_clears_on_a_win() {
        let store = MemoryStore::default();
        let tally = LossTally::new(&store);

        assert_eq!(tally.get(), 0);
        assert_eq!(tally.record_loss(), 1);
        assert_eq!(tally.record_loss(), 2);
        assert_eq!(tally.get(), 2);

        tally.clear();
        assert_eq!(tally.get(), 0);
    }

    #[test]
    fn loss_tally_treats_garbage_as_zero() {
        let store = MemoryStore::default();
        store.put(LossTally::<&MemoryStore>::KEY, "not a number");

        assert_eq!(LossTally::new(&store).get(), 0);
    }
}
