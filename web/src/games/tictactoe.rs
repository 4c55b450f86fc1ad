use gloo::timers::callback::Timeout;
use gwiazdka_core as game;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

use crate::utils::{js_random_seed, loss_tally};

/// Delay before the opponent's answer appears.
const REPLY_MS: u32 = 500;
/// Delay between the winning move and the solved signal.
const SOLVED_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellClicked(usize),
    OpponentMove,
    EmitSolved,
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct TicTacToeProps {
    pub onsolved: Callback<()>,
}

pub(crate) struct TicTacToeView {
    round: game::TicTacToe,
    rng: SmallRng,
    losses: u32,
    // both delays share this slot; dropping it cancels the callback
    pending: Option<Timeout>,
}

impl TicTacToeView {
    fn schedule(&mut self, ctx: &Context<Self>, millis: u32, msg: Msg) {
        let link = ctx.link().clone();
        self.pending = Some(Timeout::new(millis, move || link.send_message(msg)));
    }

    fn record_loss(&mut self) {
        self.losses = loss_tally().record_loss();
        log::debug!("round lost or drawn, tally is now {}", self.losses);
    }

    fn status_text(&self) -> &'static str {
        use game::RoundState::*;
        match self.round.state() {
            PlayerTurn => "🎯 Twój ruch",
            OpponentTurn => "🤖 Ruch komputera",
            PlayerWon => "🎉 Wygrałaś!",
            OpponentWon => "😔 Komputer wygrał",
            Drawn => "🤝 Remis!",
        }
    }

    fn cell_symbol(mark: Option<game::Mark>) -> &'static str {
        match mark {
            Some(game::Mark::Player) => "❌",
            Some(game::Mark::Opponent) => "⭕",
            None => "",
        }
    }
}

impl Component for TicTacToeView {
    type Message = Msg;
    type Properties = TicTacToeProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            round: game::TicTacToe::new(),
            rng: SmallRng::seed_from_u64(js_random_seed()),
            losses: loss_tally().get(),
            pending: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use game::MoveOutcome::*;

        match msg {
            Msg::CellClicked(index) => {
                let outcome = self.round.play(index).unwrap_or(NoChange);
                match outcome {
                    PlayerWon => {
                        loss_tally().clear();
                        self.losses = 0;
                        self.schedule(ctx, SOLVED_MS, Msg::EmitSolved);
                    }
                    Drawn => self.record_loss(),
                    Placed => self.schedule(ctx, REPLY_MS, Msg::OpponentMove),
                    OpponentWon | NoChange => {}
                }
                outcome.has_update()
            }
            Msg::OpponentMove => {
                self.pending = None;
                let outcome = self
                    .round
                    .reply(&mut self.rng, self.losses)
                    .unwrap_or(NoChange);
                match outcome {
                    OpponentWon | Drawn => self.record_loss(),
                    _ => {}
                }
                outcome.has_update()
            }
            Msg::EmitSolved => {
                self.pending = None;
                ctx.props().onsolved.emit(());
                false
            }
            Msg::Restart => {
                // board only; the loss tally survives manual retries
                self.pending = None;
                self.round.restart();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let finished = self.round.is_finished();
        let player_turn = self.round.state() == game::RoundState::PlayerTurn;
        let winning_line = self.round.winning_line().unwrap_or([9, 9, 9]);
        let onrestart = ctx.link().callback(|_| Msg::Restart);

        html! {
            <div class="tictactoe">
                <p class="status">{self.status_text()}</p>
                <small>{"Ty grasz: ❌ | Komputer gra: ⭕"}</small>
                <div class="board">
                    {
                        for self.round.cells().iter().enumerate().map(|(index, &mark)| {
                            let onclick = ctx.link().callback(move |_| Msg::CellClicked(index));
                            let highlight = winning_line.contains(&index);
                            html! {
                                <button
                                    class={classes!("cell", highlight.then_some("winning"))}
                                    disabled={mark.is_some() || finished || !player_turn}
                                    {onclick}
                                >
                                    {Self::cell_symbol(mark)}
                                </button>
                            }
                        })
                    }
                </div>
                if finished && self.round.state() != game::RoundState::PlayerWon {
                    <button class="retry" onclick={onrestart}>{"Spróbuj ponownie"}</button>
                }
            </div>
        }
    }
}
