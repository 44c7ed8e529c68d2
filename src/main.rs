//! Main module for the stage scoreboard application using Yew.
//! Wires the countdown engine, score state machine, and side effects.

use gloo_timers::callback::Timeout;
use log::{info, warn};
use stage_scoreboard::countdown::{CountdownEngine, TickEffect};
use stage_scoreboard::scoreboard::{Scoreboard, TeamSide};
use stage_scoreboard::{
    final_summary, format_clock, score_announcement, Announcement, MediaMap, ScoreChange,
    ScoreDirection,
};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod config;
mod effects;

use components::{CenterMessage, TeamPanel};

// ──────────────────────────────────────────────────────────────────────────────
// Scoreboard state is driven through a reducer so delayed tasks (the
// animation-clear timers) always apply to the latest state instead of a
// snapshot captured when they were scheduled.

#[derive(Clone, PartialEq)]
struct BoardState {
    board: Scoreboard,
}

enum BoardAction {
    Name(TeamSide, String),
    Focus(TeamSide),
    Input(TeamSide, String),
    Submit(TeamSide),
    Cancel(TeamSide),
    Delta(TeamSide, i32),
    ClearAnimation(TeamSide),
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: BoardAction) -> Rc<Self> {
        let mut board = self.board.clone();
        match action {
            BoardAction::Name(side, name) => board.set_name(side, &name),
            BoardAction::Focus(side) => board.focus(side),
            BoardAction::Input(side, text) => board.set_input(side, &text),
            BoardAction::Submit(side) => {
                board.submit(side);
            }
            BoardAction::Cancel(side) => board.cancel(side),
            BoardAction::Delta(side, delta) => {
                board.apply_delta(side, delta);
            }
            BoardAction::ClearAnimation(side) => board.clear_animation(side),
        }
        Rc::new(BoardState { board })
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Run the announcement pipeline for one committed score change:
/// confetti on increases, a transient overlay, and the host callback.
fn publish_change(
    change: ScoreChange,
    media: &Option<MediaMap>,
    overlay: &UseStateHandle<Option<Announcement>>,
    overlay_gen: &UseStateHandle<u32>,
    host: &Option<Callback<ScoreChange>>,
) {
    if change.direction == ScoreDirection::Increase {
        effects::fire_confetti();
    }
    info!(
        "committed score: {} {} to {}",
        change.team,
        change.direction.as_str(),
        change.score
    );
    overlay_gen.set((**overlay_gen).wrapping_add(1));
    overlay.set(Some(score_announcement(&change, media.as_ref())));
    if let Some(host) = host {
        host.emit(change);
    }
}

/// Schedule the 600 ms animation clear for one team, cancelling any
/// previous pending clear by replacing its handle.
fn schedule_animation_clear(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    board: &UseReducerHandle<BoardState>,
    side: TeamSide,
) {
    timer_handle.set(None);

    let timer_handle_clone = timer_handle.clone();
    let board = board.clone();
    let handle = Timeout::new(config::SCORE_ANIMATION_MS, move || {
        board.dispatch(BoardAction::ClearAnimation(side));
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}

// ──────────────────────────────────────────────────────────────────────────────

#[derive(Properties, PartialEq)]
pub struct MainProps {
    /// Host-page hook invoked once per committed, non-zero score change.
    #[prop_or_default]
    pub on_score_change: Option<Callback<ScoreChange>>,
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component(props: &MainProps) -> Html {
    let engine = use_state(|| {
        CountdownEngine::new(config::DEFAULT_MINUTES * 60 + config::DEFAULT_SECONDS)
    });
    let board = use_reducer(|| BoardState {
        board: Scoreboard::new(),
    });
    let media = use_state(|| None::<MediaMap>);
    let overlay = use_state(|| None::<Announcement>);
    let overlay_gen = use_state(|| 0u32);

    // Text states for the duration edit fields
    let minutes_text = use_state(|| config::DEFAULT_MINUTES.to_string());
    let seconds_text = use_state(|| format!("{:02}", config::DEFAULT_SECONDS));

    let expiry_cue = use_state(effects::load_expiry_cue);

    // Pending animation-clear timers, one per team
    let left_anim_timer = use_state(|| None::<Timeout>);
    let right_anim_timer = use_state(|| None::<Timeout>);

    // Load the media map once on mount; failure degrades to text-only
    // announcements.
    {
        let media = media.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match effects::fetch_media_map().await {
                    Ok(map) => {
                        info!("loaded media map");
                        media.set(Some(map));
                    }
                    Err(err) => warn!("media map unavailable: {}", err),
                }
            });
            || ()
        });
    }

    // Countdown scheduling. One pending tick at a time: every transition
    // that changes (running, remaining) re-runs this effect, and the
    // destructor drops the stale timer before a new one is armed.
    {
        let engine_handle = engine.clone();
        let expiry_cue = expiry_cue.clone();
        let interval = engine.interval_ms();
        use_effect_with(
            (engine.is_running(), engine.remaining()),
            move |&(running, remaining)| -> Box<dyn FnOnce()> {
                if !running || remaining == 0 {
                    return Box::new(|| ());
                }
                let handle = Timeout::new(interval, move || {
                    let mut next = (*engine_handle).clone();
                    let fired = next.tick();
                    engine_handle.set(next);
                    for effect in fired {
                        match effect {
                            TickEffect::Speak(cue) => effects::speak(&cue),
                            TickEffect::TimeUp => effects::play_expiry_cue(&expiry_cue),
                        }
                    }
                });
                Box::new(move || drop(handle))
            },
        );
    }

    // --- Timer handlers ---
    let on_toggle = {
        let engine = engine.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*engine).clone();
            next.toggle();
            engine.set(next);
        })
    };

    let on_reset = {
        let engine = engine.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*engine).clone();
            next.reset();
            engine.set(next);
        })
    };

    let on_clock_click = {
        let engine = engine.clone();
        let minutes_text = minutes_text.clone();
        let seconds_text = seconds_text.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*engine).clone();
            if next.begin_edit() {
                minutes_text.set((next.remaining() / 60).to_string());
                seconds_text.set(format!("{:02}", next.remaining() % 60));
                engine.set(next);
            }
        })
    };

    let minutes_oninput = {
        let minutes_text = minutes_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            minutes_text.set(input.value());
        })
    };
    let seconds_oninput = {
        let seconds_text = seconds_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            seconds_text.set(input.value());
        })
    };

    let on_commit_time = {
        let engine = engine.clone();
        let minutes_text = minutes_text.clone();
        let seconds_text = seconds_text.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*engine).clone();
            next.commit_edit(minutes_text.as_str(), seconds_text.as_str());
            engine.set(next);
        })
    };

    // --- Scoreboard handlers ---
    let on_name = {
        let board = board.clone();
        Callback::from(move |(side, name): (TeamSide, String)| {
            board.dispatch(BoardAction::Name(side, name));
        })
    };
    let on_focus = {
        let board = board.clone();
        Callback::from(move |side: TeamSide| board.dispatch(BoardAction::Focus(side)))
    };
    let on_input = {
        let board = board.clone();
        Callback::from(move |(side, text): (TeamSide, String)| {
            board.dispatch(BoardAction::Input(side, text));
        })
    };
    let on_cancel = {
        let board = board.clone();
        Callback::from(move |side: TeamSide| board.dispatch(BoardAction::Cancel(side)))
    };

    let on_commit_score = {
        let board = board.clone();
        let media = media.clone();
        let overlay = overlay.clone();
        let overlay_gen = overlay_gen.clone();
        let left_anim_timer = left_anim_timer.clone();
        let right_anim_timer = right_anim_timer.clone();
        let host = props.on_score_change.clone();
        Callback::from(move |side: TeamSide| {
            let mut preview = board.board.clone();
            let change = preview.submit(side);
            board.dispatch(BoardAction::Submit(side));
            if let Some(change) = change {
                publish_change(change, &media, &overlay, &overlay_gen, &host);
                let timer = match side {
                    TeamSide::Left => &left_anim_timer,
                    TeamSide::Right => &right_anim_timer,
                };
                schedule_animation_clear(timer, &board, side);
            }
        })
    };

    let on_delta = {
        let board = board.clone();
        let media = media.clone();
        let overlay = overlay.clone();
        let overlay_gen = overlay_gen.clone();
        let left_anim_timer = left_anim_timer.clone();
        let right_anim_timer = right_anim_timer.clone();
        let host = props.on_score_change.clone();
        Callback::from(move |(side, delta): (TeamSide, i32)| {
            let mut preview = board.board.clone();
            let change = preview.apply_delta(side, delta);
            board.dispatch(BoardAction::Delta(side, delta));
            if let Some(change) = change {
                publish_change(change, &media, &overlay, &overlay_gen, &host);
                let timer = match side {
                    TeamSide::Left => &left_anim_timer,
                    TeamSide::Right => &right_anim_timer,
                };
                schedule_animation_clear(timer, &board, side);
            }
        })
    };

    let on_finish = {
        let board = board.clone();
        let overlay = overlay.clone();
        let overlay_gen = overlay_gen.clone();
        Callback::from(move |_: MouseEvent| {
            let summary = final_summary(&board.board);
            info!("final summary: {}", summary.headline);
            overlay_gen.set((*overlay_gen).wrapping_add(1));
            overlay.set(Some(summary));
        })
    };

    let on_overlay_close = {
        let overlay = overlay.clone();
        Callback::from(move |_| overlay.set(None))
    };

    let clock_class = if engine.remaining() <= config::DANGER_THRESHOLD_SECS {
        "timer-clock danger"
    } else {
        "timer-clock"
    };
    let winner_label = board.board.winner().label().to_string();

    html! {
        <div class="container">
            <h1>{ "Event Timer & Scoreboard" }</h1>

            // Countdown clock
            <div class="timer-card">
                if engine.is_editing() {
                    <div class="timer-edit">
                        <input
                            type="number"
                            min="0"
                            max="59"
                            value={(*minutes_text).clone()}
                            oninput={minutes_oninput}
                        />
                        <span class="timer-colon">{ ":" }</span>
                        <input
                            type="number"
                            min="0"
                            max="59"
                            value={(*seconds_text).clone()}
                            oninput={seconds_oninput}
                        />
                        <button class="btn-primary" onclick={on_commit_time}>{ "Set Time" }</button>
                    </div>
                } else {
                    <div class={clock_class} onclick={on_clock_click}>
                        { format_clock(engine.remaining()) }
                    </div>
                    <div class="timer-controls">
                        <button class="btn-primary" onclick={on_toggle}>
                            { if engine.is_running() { "Pause" } else { "Start" } }
                        </button>
                        <button class="btn-secondary" onclick={on_reset}>{ "Reset" }</button>
                        <button class="btn-secondary" onclick={on_finish}>{ "Finish" }</button>
                    </div>
                }
            </div>

            // Scoreboard
            <div class="scoreboard">
                <TeamPanel
                    team={board.board.team(TeamSide::Left).clone()}
                    side={TeamSide::Left}
                    on_name={on_name.clone()}
                    on_focus={on_focus.clone()}
                    on_input={on_input.clone()}
                    on_commit={on_commit_score.clone()}
                    on_cancel={on_cancel.clone()}
                    on_delta={on_delta.clone()}
                />
                <TeamPanel
                    team={board.board.team(TeamSide::Right).clone()}
                    side={TeamSide::Right}
                    on_name={on_name}
                    on_focus={on_focus}
                    on_input={on_input}
                    on_commit={on_commit_score}
                    on_cancel={on_cancel}
                    on_delta={on_delta}
                />
            </div>
            <div class="winner-strip">{ format!("Leading: {}", winner_label) }</div>

            if let Some(announcement) = (*overlay).clone() {
                <CenterMessage
                    {announcement}
                    generation={*overlay_gen}
                    on_close={on_overlay_close}
                />
            }
        </div>
    }
}

/// App wrapper passing the host score-change hook to the widget.
#[function_component]
pub fn App() -> Html {
    let on_score_change = Callback::from(|change: ScoreChange| {
        info!(
            "host notified: {} is at {} ({})",
            change.team,
            change.score,
            change.direction.as_str()
        );
    });
    html! { <Main on_score_change={Some(on_score_change)} /> }
}

/// Entry point: initializes the Yew renderer for the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
