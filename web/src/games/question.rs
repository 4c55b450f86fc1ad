use gloo::timers::callback::{Interval, Timeout};
use gwiazdka_core as game;
use yew::prelude::*;

const SOLVED_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pick(usize),
    Tick,
    ToggleClue,
    EmitSolved,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct QuestionProps {
    pub spec: &'static game::QuestionSpec,
    pub onsolved: Callback<()>,
}

pub(crate) struct QuestionView {
    quiz: game::Quiz,
    cooldown_ticker: Option<Interval>,
    _solved_timer: Option<Timeout>,
}

impl QuestionView {
    fn answer_class(&self, index: usize) -> Classes {
        let correct = self.quiz.spec().correct;
        match self.quiz.picked() {
            Some(picked) if picked == index && index == correct => classes!("answer", "correct"),
            Some(picked) if picked == index => classes!("answer", "wrong"),
            Some(_) => classes!("answer", "dimmed"),
            None => classes!("answer"),
        }
    }
}

impl Component for QuestionView {
    type Message = Msg;
    type Properties = QuestionProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            quiz: game::Quiz::new(ctx.props().spec),
            cooldown_ticker: None,
            _solved_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use game::AnswerOutcome::*;

        match msg {
            Msg::Pick(index) => {
                let outcome = self.quiz.submit(index).unwrap_or(NoChange);
                match outcome {
                    Correct => {
                        let link = ctx.link().clone();
                        self._solved_timer =
                            Some(Timeout::new(SOLVED_MS, move || {
                                link.send_message(Msg::EmitSolved)
                            }));
                    }
                    Wrong => {
                        let link = ctx.link().clone();
                        self.cooldown_ticker =
                            Some(Interval::new(1000, move || link.send_message(Msg::Tick)));
                    }
                    NoChange => {}
                }
                outcome.has_update()
            }
            Msg::Tick => {
                let changed = self.quiz.tick();
                if self.quiz.cooldown() == 0 {
                    self.cooldown_ticker = None;
                }
                changed
            }
            Msg::ToggleClue => self.quiz.toggle_clue(),
            Msg::EmitSolved => {
                self._solved_timer = None;
                ctx.props().onsolved.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let spec = self.quiz.spec();
        let cooldown = self.quiz.cooldown();
        let locked = cooldown > 0 || self.quiz.picked().is_some();
        let ontoggle = ctx.link().callback(|_| Msg::ToggleClue);

        html! {
            <div class="question">
                <h1>{spec.question}</h1>
                <div class="answers">
                    {
                        for spec.answers.iter().enumerate().map(|(index, &answer)| {
                            let onclick = ctx.link().callback(move |_| Msg::Pick(index));
                            let letter = char::from(b'A' + index as u8);
                            html! {
                                <button
                                    class={self.answer_class(index)}
                                    disabled={locked}
                                    {onclick}
                                >
                                    <span class="answer-letter">{letter}</span>
                                    {answer}
                                </button>
                            }
                        })
                    }
                </div>
                if cooldown > 0 {
                    <div class="cooldown">
                        <strong>{format!("{}s", cooldown)}</strong>
                        <p>{"Poczekaj przed kolejną próbą"}</p>
                    </div>
                }
                if !locked {
                    <button class="clue-toggle" onclick={ontoggle}>
                        { if self.quiz.clue_shown() { "Ukryj wskazówkę" } else { "Pokaż wskazówkę" } }
                    </button>
                }
                if self.quiz.clue_shown() {
                    <aside class="clue">{spec.clue}</aside>
                }
            </div>
        }
    }
}
