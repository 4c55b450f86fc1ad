use gloo::timers::callback::Timeout;
use gwiazdka_core as game;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

use crate::utils::js_random_seed;

/// A matched pair is fixed quickly, a mismatch stays visible a bit longer.
const MATCH_MS: u32 = 600;
const MISMATCH_MS: u32 = 1000;
const SOLVED_MS: u32 = 500;

/// One face per pair identity.
const CARD_FACES: [&str; 15] = [
    "🎅", "🦌", "⛄", "🎁", "🔔", "⭐", "🕯️", "❄️", "🛷", "🧦", "🍪", "🥛", "🎄", "👼", "🤶",
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(usize),
    Resolve,
    EmitSolved,
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct MemoryProps {
    pub pairs: u8,
    pub onsolved: Callback<()>,
}

pub(crate) struct MemoryView {
    board: game::PairGame,
    rng: SmallRng,
    // resolve and solved delays share this slot
    pending: Option<Timeout>,
}

impl MemoryView {
    fn schedule(&mut self, ctx: &Context<Self>, millis: u32, msg: Msg) {
        let link = ctx.link().clone();
        self.pending = Some(Timeout::new(millis, move || link.send_message(msg)));
    }

    fn card_face(card: game::Card) -> &'static str {
        CARD_FACES
            .get(usize::from(card.pair) - 1)
            .copied()
            .unwrap_or("🎀")
    }
}

impl Component for MemoryView {
    type Message = Msg;
    type Properties = MemoryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut rng = SmallRng::seed_from_u64(js_random_seed());
        let board = game::PairGame::new(ctx.props().pairs, &mut rng);
        Self {
            board,
            rng,
            pending: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use game::{FlipOutcome, ResolveOutcome};

        match msg {
            Msg::CardClicked(position) => {
                let outcome = self
                    .board
                    .flip(position)
                    .unwrap_or(FlipOutcome::NoChange);
                if outcome == FlipOutcome::PairUp {
                    let millis = match self.board.pending_match() {
                        Some(true) => MATCH_MS,
                        _ => MISMATCH_MS,
                    };
                    self.schedule(ctx, millis, Msg::Resolve);
                }
                outcome.has_update()
            }
            Msg::Resolve => {
                self.pending = None;
                let outcome = self.board.resolve();
                if outcome == ResolveOutcome::AllMatched {
                    self.schedule(ctx, SOLVED_MS, Msg::EmitSolved);
                }
                outcome.has_update()
            }
            Msg::EmitSolved => {
                self.pending = None;
                ctx.props().onsolved.emit(());
                false
            }
            Msg::Restart => {
                self.pending = None;
                self.board.reset(&mut self.rng);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onrestart = ctx.link().callback(|_| Msg::Restart);

        html! {
            <div class="memory">
                <div class="toolbar">
                    <small>{format!("Ruchy: {}", self.board.moves())}</small>
                    <button onclick={onrestart}>{"🔄 Od nowa"}</button>
                </div>
                <div class="cards">
                    {
                        for self.board.cards().iter().enumerate().map(|(position, &card)| {
                            let onclick = ctx.link().callback(move |_| Msg::CardClicked(position));
                            let class = classes!(
                                "card",
                                card.face_up.then_some("face-up"),
                                card.matched.then_some("matched"),
                            );
                            html! {
                                <button {class} {onclick}>
                                    { if card.face_up { Self::card_face(card) } else { "🎄" } }
                                </button>
                            }
                        })
                    }
                </div>
                <small class="hint">
                    {format!("💡 Znajdź wszystkie {} par!", ctx.props().pairs)}
                </small>
            </div>
        }
    }
}
