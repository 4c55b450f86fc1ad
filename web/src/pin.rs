use gloo::timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const PIN_LEN: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Input(usize, String),
    Backspace(usize),
    Submit,
    ClearError,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct PinProps {
    pub expected: &'static str,
    pub on_success: Callback<()>,
    #[prop_or("Kontynuuj")]
    pub button_text: &'static str,
}

/// Four-digit PIN entry with auto-advancing focus. A wrong code clears
/// the boxes, flashes an error and lets the player retry immediately.
pub(crate) struct PinInput {
    digits: [String; PIN_LEN],
    error: bool,
    refs: [NodeRef; PIN_LEN],
    _error_timer: Option<Timeout>,
}

impl PinInput {
    fn focus(&self, index: usize) {
        if let Some(input) = self.refs[index].cast::<HtmlInputElement>() {
            let _ = input.focus();
        }
    }

    fn entered(&self) -> String {
        self.digits.concat()
    }

    fn is_complete(&self) -> bool {
        self.digits.iter().all(|digit| !digit.is_empty())
    }
}

impl Component for PinInput {
    type Message = Msg;
    type Properties = PinProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            digits: Default::default(),
            error: false,
            refs: Default::default(),
            _error_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(index, value) => {
                let digit = value.chars().rev().find(char::is_ascii_digit);
                self.digits[index] = digit.map(String::from).unwrap_or_default();
                self.error = false;
                if digit.is_some() && index + 1 < PIN_LEN {
                    self.focus(index + 1);
                }
                true
            }
            Msg::Backspace(index) => {
                // move back only when the current box is already empty
                if self.digits[index].is_empty() && index > 0 {
                    self.focus(index - 1);
                }
                false
            }
            Msg::Submit => {
                if self.entered() == ctx.props().expected {
                    ctx.props().on_success.emit(());
                    false
                } else {
                    log::debug!("wrong PIN entered");
                    self.digits = Default::default();
                    self.error = true;
                    self.focus(0);
                    let link = ctx.link().clone();
                    self._error_timer =
                        Some(Timeout::new(1500, move || link.send_message(Msg::ClearError)));
                    true
                }
            }
            Msg::ClearError => {
                self._error_timer = None;
                core::mem::replace(&mut self.error, false)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let error = self.error;
        let complete = self.is_complete();
        let onsubmit = ctx.link().callback(|_| Msg::Submit);

        html! {
            <div class="pin-input">
                <div class="pin-boxes">
                    {
                        for (0..PIN_LEN).map(|index| {
                            let oninput = ctx.link().callback(move |e: InputEvent| {
                                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                                Msg::Input(index, value)
                            });
                            let onkeydown = ctx.link().batch_callback(move |e: KeyboardEvent| {
                                (e.key() == "Backspace").then_some(Msg::Backspace(index))
                            });
                            html! {
                                <input
                                    ref={self.refs[index].clone()}
                                    type="text"
                                    inputmode="numeric"
                                    maxlength="1"
                                    class={classes!("pin-digit", error.then_some("error"))}
                                    value={self.digits[index].clone()}
                                    {oninput}
                                    {onkeydown}
                                />
                            }
                        })
                    }
                </div>
                if error {
                    <p class="pin-error">{"❌ Nieprawidłowy PIN"}</p>
                }
                <button onclick={onsubmit} disabled={!complete}>
                    {ctx.props().button_text}
                </button>
            </div>
        }
    }
}
