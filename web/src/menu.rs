use gwiazdka_core as game;
use yew::prelude::*;

use crate::app::Route;
use crate::countdown::CountdownView;
use crate::pin::PinInput;
use crate::theme::Theme;
use crate::utils::progress_store;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Begin,
    Open(game::StageId),
    Continue,
    Reset,
    CycleTheme,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct MenuProps {
    pub onnavigate: Callback<Route>,
}

/// Landing screen. Fresh players see the starting PIN gate, returning
/// players a tile per stage plus a shortcut to where they left off.
pub(crate) struct MenuView {
    progress: game::Progress,
}

impl Component for MenuView {
    type Message = Msg;
    type Properties = MenuProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            progress: progress_store().load(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Begin => {
                ctx.props().onnavigate.emit(Route::Stage(1));
                false
            }
            Msg::Open(stage) => {
                ctx.props().onnavigate.emit(Route::Stage(stage));
                false
            }
            Msg::Continue => {
                let route = if self.progress.is_finished() {
                    Route::Finish
                } else {
                    Route::Stage(self.progress.current_stage())
                };
                ctx.props().onnavigate.emit(route);
                false
            }
            Msg::Reset => {
                progress_store().reset();
                self.progress = progress_store().load();
                true
            }
            Msg::CycleTheme => {
                let next = match Theme::current() {
                    None => Some(Theme::Light),
                    Some(Theme::Light) => Some(Theme::Dark),
                    Some(Theme::Dark) => None,
                };
                Theme::apply(next);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let fresh = self.progress == game::Progress::default();

        html! {
            <article class="menu">
                <header>
                    <h1>{"🌟 Gwiazdka"}</h1>
                    <button
                        class="theme"
                        title="Zmień motyw"
                        onclick={ctx.link().callback(|_| Msg::CycleTheme)}
                    >
                        { theme_icon() }
                    </button>
                </header>
                <CountdownView/>
                {
                    if fresh {
                        self.view_start(ctx)
                    } else {
                        self.view_stages(ctx)
                    }
                }
            </article>
        }
    }
}

impl MenuView {
    fn view_start(&self, ctx: &Context<Self>) -> Html {
        let on_success = ctx.link().callback(|()| Msg::Begin);

        html! {
            <section class="start">
                <p>{"Ktoś ukrył wszystkie prezenty. Wpisz PIN z pierwszego listu, aby rozpocząć poszukiwania."}</p>
                <PinInput expected={game::START_PIN} {on_success} button_text="Rozpocznij"/>
            </section>
        }
    }

    fn view_stages(&self, ctx: &Context<Self>) -> Html {
        let continue_label = if self.progress.is_finished() {
            "Zobacz zakończenie"
        } else {
            "Kontynuuj"
        };

        html! {
            <section class="stages">
                <ul class="stage-list">
                    { for game::STAGES.iter().map(|config| self.view_tile(ctx, config)) }
                </ul>
                <button class="continue" onclick={ctx.link().callback(|_| Msg::Continue)}>
                    { continue_label }
                </button>
                <button class="reset" onclick={ctx.link().callback(|_| Msg::Reset)}>
                    {"Zacznij od początku"}
                </button>
            </section>
        }
    }

    fn view_tile(&self, ctx: &Context<Self>, config: &'static game::StageConfig) -> Html {
        let stage = config.id;
        let completed = self.progress.is_completed(stage);
        let unlocked = self.progress.is_unlocked(stage);

        let class = if completed {
            "tile completed"
        } else if unlocked {
            "tile unlocked"
        } else {
            "tile locked"
        };
        let marker = if completed {
            "✓"
        } else if unlocked {
            "▶"
        } else {
            "🔒"
        };

        html! {
            <li {class}>
                <button
                    disabled={!unlocked}
                    onclick={ctx.link().callback(move |_| Msg::Open(stage))}
                >
                    <span class="marker">{marker}</span>
                    <span class="name">{format!("{}. {}", stage, config.title)}</span>
                </button>
            </li>
        }
    }
}

fn theme_icon() -> &'static str {
    match Theme::current() {
        None => "🌓",
        Some(Theme::Light) => "☀️",
        Some(Theme::Dark) => "🌙",
    }
}
