use gloo::timers::callback::Timeout;
use gwiazdka_core as game;
use yew::prelude::*;

const SOLVED_MS: u32 = 1500;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Guess(char),
    Reset,
    EmitSolved,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct HangmanProps {
    pub phrase: &'static str,
    pub onsolved: Callback<()>,
}

pub(crate) struct HangmanView {
    round: game::Hangman,
    _solved_timer: Option<Timeout>,
}

impl HangmanView {
    fn view_phrase(&self) -> Html {
        html! {
            <div class="phrase">
                {
                    for self.round.phrase().chars().map(|letter| {
                        if letter == ' ' {
                            html! { <span class="gap"/> }
                        } else {
                            let shown = self.round.is_guessed(letter);
                            html! {
                                <span class="slot">
                                    { if shown { letter.to_string() } else { String::new() } }
                                </span>
                            }
                        }
                    })
                }
            </div>
        }
    }

    /// Gallows plus one body part per wrong guess.
    fn view_gallows(&self) -> Html {
        let wrong = self.round.wrong_guesses();

        html! {
            <svg viewBox="0 0 200 250" class="gallows">
                <line x1="10" y1="230" x2="150" y2="230" stroke="#374151" stroke-width="4"/>
                <line x1="50" y1="230" x2="50" y2="20" stroke="#374151" stroke-width="4"/>
                <line x1="50" y1="20" x2="130" y2="20" stroke="#374151" stroke-width="4"/>
                <line x1="130" y1="20" x2="130" y2="50" stroke="#374151" stroke-width="4"/>
                if wrong > 0 {
                    <circle cx="130" cy="70" r="20" stroke="#dc2626" stroke-width="3" fill="none"/>
                }
                if wrong > 1 {
                    <line x1="130" y1="90" x2="130" y2="150" stroke="#dc2626" stroke-width="3"/>
                }
                if wrong > 2 {
                    <line x1="130" y1="110" x2="100" y2="130" stroke="#dc2626" stroke-width="3"/>
                }
                if wrong > 3 {
                    <line x1="130" y1="110" x2="160" y2="130" stroke="#dc2626" stroke-width="3"/>
                }
                if wrong > 4 {
                    <line x1="130" y1="150" x2="110" y2="190" stroke="#dc2626" stroke-width="3"/>
                }
                if wrong > 5 {
                    <line x1="130" y1="150" x2="150" y2="190" stroke="#dc2626" stroke-width="3"/>
                }
            </svg>
        }
    }

    fn view_keyboard(&self, ctx: &Context<Self>) -> Html {
        let finished = self.round.state().is_finished();

        html! {
            <div class="keyboard">
                {
                    for game::ALPHABET.chars().map(|letter| {
                        let guessed = self.round.is_guessed(letter);
                        let hit = guessed && self.round.phrase().contains(letter);
                        let class = classes!(
                            "key",
                            guessed.then(|| if hit { "hit" } else { "miss" })
                        );
                        let onclick = ctx.link().callback(move |_| Msg::Guess(letter));
                        html! {
                            <button {class} disabled={guessed || finished} {onclick}>
                                {letter}
                            </button>
                        }
                    })
                }
            </div>
        }
    }
}

impl Component for HangmanView {
    type Message = Msg;
    type Properties = HangmanProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            round: game::Hangman::new(ctx.props().phrase),
            _solved_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Guess(letter) => {
                let outcome = self
                    .round
                    .guess(letter)
                    .unwrap_or(game::GuessOutcome::NoChange);
                if outcome == game::GuessOutcome::Won {
                    let link = ctx.link().clone();
                    self._solved_timer = Some(Timeout::new(SOLVED_MS, move || {
                        link.send_message(Msg::EmitSolved)
                    }));
                }
                outcome.has_update()
            }
            Msg::Reset => {
                self.round.reset();
                true
            }
            Msg::EmitSolved => {
                self._solved_timer = None;
                ctx.props().onsolved.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use game::HangmanState::*;

        let status = match self.round.state() {
            Won => html! { <strong class="won">{"🎉 Brawo! Wygrałaś!"}</strong> },
            Lost => html! { <strong class="lost">{"😔 Przegrałaś"}</strong> },
            InProgress => html! {
                <small>{format!("Pozostało prób: {}", self.round.remaining_tries())}</small>
            },
        };
        let onreset = ctx.link().callback(|_| Msg::Reset);

        html! {
            <div class="hangman">
                <p class="status">{status}</p>
                { self.view_gallows() }
                { self.view_phrase() }
                { self.view_keyboard(ctx) }
                if self.round.state() == Lost {
                    <button class="retry" onclick={onreset}>{"Spróbuj ponownie"}</button>
                }
            </div>
        }
    }
}
