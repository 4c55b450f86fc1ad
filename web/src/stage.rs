use gwiazdka_core as game;
use yew::prelude::*;

use crate::app::Route;
use crate::games::{HangmanView, MemoryView, QuestionView, TicTacToeView};
use crate::pin::PinInput;
use crate::utils::progress_store;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    PinGate,
    Playing,
    Reward,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    PinAccepted,
    Solved,
    Next,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct StageProps {
    pub stage: game::StageId,
    pub onnavigate: Callback<Route>,
}

/// Host page for one stage: PIN gate, then the stage's mini-game, then the
/// reward hint. Completion is written to the progress store exactly when
/// the engine reports "solved".
pub(crate) struct StageView {
    phase: Phase,
}

impl StageView {
    fn config(ctx: &Context<Self>) -> &'static game::StageConfig {
        // AppView only routes to known unlocked stages
        game::stage(ctx.props().stage).expect("routed to unknown stage")
    }

    fn view_progress_dots(stage: game::StageId) -> Html {
        html! {
            <div class="progress-dots">
                {
                    for game::STAGES.iter().map(|config| {
                        let class = if config.id < stage {
                            "dot done"
                        } else if config.id == stage {
                            "dot current"
                        } else {
                            "dot"
                        };
                        html! { <span class={class}/> }
                    })
                }
            </div>
        }
    }

    fn view_game(&self, ctx: &Context<Self>) -> Html {
        let config = Self::config(ctx);
        let onsolved = ctx.link().callback(|_| Msg::Solved);

        match config.kind {
            game::GameKind::TicTacToe => html! { <TicTacToeView {onsolved}/> },
            game::GameKind::Question => {
                let spec = config.question.as_ref().expect("question stage without data");
                html! { <QuestionView {spec} {onsolved}/> }
            }
            game::GameKind::Hangman => {
                let phrase = config.phrase.expect("hangman stage without phrase");
                html! { <HangmanView {phrase} {onsolved}/> }
            }
            game::GameKind::Memory => {
                let pairs = config.pairs.expect("memory stage without pair count");
                html! { <MemoryView {pairs} {onsolved}/> }
            }
        }
    }

    fn view_reward(&self, ctx: &Context<Self>) -> Html {
        let config = Self::config(ctx);
        let last = game::is_last_stage(config.id);
        let onclick = ctx.link().callback(|_| Msg::Next);

        html! {
            <div class="reward">
                <p class="reward-banner">{"✓ Zadanie ukończone!"}</p>
                if let Some(location) = config.reward_location {
                    <section class="reward-location">
                        <h3>{"🎁 Lokalizacja prezentu"}</h3>
                        <p>{location}</p>
                        if !last {
                            <small>{"💡 Przy prezencie znajdziesz PIN do następnego zadania"}</small>
                        }
                    </section>
                }
                <button {onclick}>
                    { if last { "Zakończ grę" } else { "Następne zadanie" } }
                </button>
            </div>
        }
    }
}

impl Component for StageView {
    type Message = Msg;
    type Properties = StageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let phase = match game::entry_pin(ctx.props().stage) {
            Some(_) => Phase::PinGate,
            None => Phase::Playing,
        };
        Self { phase }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::PinAccepted => {
                self.phase = Phase::Playing;
                true
            }
            Msg::Solved => {
                let stage = ctx.props().stage;
                progress_store().advance(stage);
                log::debug!("stage {} completed", stage);
                self.phase = Phase::Reward;
                true
            }
            Msg::Next => {
                let stage = ctx.props().stage;
                let route = if game::is_last_stage(stage) {
                    Route::Finish
                } else {
                    Route::Stage(stage + 1)
                };
                ctx.props().onnavigate.emit(route);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let config = Self::config(ctx);

        html! {
            <article class="stage">
                { Self::view_progress_dots(config.id) }
                <h2>{format!("Zadanie #{}", config.id)}</h2>
                {
                    match self.phase {
                        Phase::PinGate => {
                            let expected = game::entry_pin(config.id)
                                .expect("pin gate without a configured pin");
                            let on_success = ctx.link().callback(|_| Msg::PinAccepted);
                            html! {
                                <div class="pin-gate">
                                    <p>{"Wpisz PIN znaleziony przy prezencie"}</p>
                                    <PinInput {expected} {on_success}/>
                                </div>
                            }
                        }
                        Phase::Playing => self.view_game(ctx),
                        Phase::Reward => self.view_reward(ctx),
                    }
                }
            </article>
        }
    }
}
