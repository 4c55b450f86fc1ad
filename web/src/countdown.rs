use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
use gloo::timers::callback::Interval;
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

/// Next Christmas Eve (00:01 on Dec 24) at or after `now`.
fn christmas_after(now: DateTime<Utc>) -> DateTime<Utc> {
    let this_year = Utc
        .with_ymd_and_hms(now.year(), 12, 24, 0, 1, 0)
        .single()
        .unwrap();
    if this_year > now {
        this_year
    } else {
        Utc.with_ymd_and_hms(now.year() + 1, 12, 24, 0, 1, 0)
            .single()
            .unwrap()
    }
}

/// (days, hours, minutes, seconds), clamped at zero once the date passed.
fn split_remaining(delta: TimeDelta) -> (i64, i64, i64, i64) {
    let secs = delta.num_seconds().max(0);
    (secs / 86_400, secs / 3_600 % 24, secs / 60 % 60, secs % 60)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tick,
}

/// Banner counting down to Christmas Eve, refreshed once per second.
pub(crate) struct CountdownView {
    now: DateTime<Utc>,
    _ticker: Interval,
}

impl Component for CountdownView {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        Self {
            now: utc_now(),
            _ticker: Interval::new(1000, move || link.send_message(Msg::Tick)),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Tick => {
                self.now = utc_now();
                true
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let (days, hours, minutes, seconds) = split_remaining(christmas_after(self.now) - self.now);

        html! {
            <div class="countdown">
                <small>{"Do świąt pozostało"}</small>
                <div class="blocks">
                    <span class="block">{days}<small>{"dni"}</small></span>
                    <span class="block">{format!("{:02}", hours)}<small>{"godz"}</small></span>
                    <span class="block">{format!("{:02}", minutes)}<small>{"min"}</small></span>
                    <span class="block">{format!("{:02}", seconds)}<small>{"sek"}</small></span>
                </div>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn countdown_targets_the_current_year_until_christmas_eve() {
        let target = christmas_after(at(2026, 8, 26));
        assert_eq!((target.year(), target.month(), target.day()), (2026, 12, 24));
    }

    #[test]
    fn countdown_rolls_over_to_the_next_year_after_christmas_eve() {
        let target = christmas_after(at(2026, 12, 25));
        assert_eq!(target.year(), 2027);
    }

    #[test]
    fn remaining_time_splits_into_clock_fields() {
        let delta = TimeDelta::seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);
        assert_eq!(split_remaining(delta), (2, 3, 4, 5));
        assert_eq!(split_remaining(TimeDelta::seconds(-10)), (0, 0, 0, 0));
    }
}
