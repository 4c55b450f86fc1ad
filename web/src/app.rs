use gwiazdka_core as game;
use yew::prelude::*;

use crate::menu::MenuView;
use crate::stage::StageView;
use crate::utils::progress_store;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Route {
    Menu,
    Stage(game::StageId),
    Finish,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Navigate(Route),
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct AppProps {
    #[prop_or_default]
    pub stage: Option<game::StageId>,
}

/// Root component. Holds nothing but the current route; unlock checks
/// happen here so a locked deep link simply falls back to the menu.
#[derive(Debug)]
pub(crate) struct AppView {
    route: Route,
}

fn gate(route: Route) -> Route {
    match route {
        Route::Stage(id) => {
            let progress = progress_store().load();
            if game::stage(id).is_some() && progress.is_unlocked(id) {
                Route::Stage(id)
            } else {
                log::debug!("stage {} not reachable, back to the menu", id);
                Route::Menu
            }
        }
        other => other,
    }
}

impl Component for AppView {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let route = match ctx.props().stage {
            Some(id) => gate(Route::Stage(id)),
            None => Route::Menu,
        };
        Self { route }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => {
                let route = gate(route);
                if self.route != route {
                    self.route = route;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onnavigate = ctx.link().callback(Msg::Navigate);

        html! {
            <div class="gwiazdka">
                {
                    match self.route {
                        Route::Menu => html! { <MenuView {onnavigate}/> },
                        Route::Stage(id) => html! { <StageView stage={id} {onnavigate}/> },
                        Route::Finish => html! { <FinishView {onnavigate}/> },
                    }
                }
            </div>
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct FinishProps {
    pub onnavigate: Callback<Route>,
}

#[function_component(FinishView)]
pub(crate) fn finish_view(props: &FinishProps) -> Html {
    let onnavigate = props.onnavigate.clone();
    let onclick = Callback::from(move |_| {
        progress_store().reset();
        onnavigate.emit(Route::Menu);
    });

    html! {
        <article class="finish">
            <h1>{"🎄 Wszystkie zadania ukończone!"}</h1>
            <p>{"Wesołych świąt! Ostatni prezent czeka pod choinką."}</p>
            <button {onclick}>{"Zagraj jeszcze raz"}</button>
        </article>
    }
}
