//! Stateless view components for the scoreboard UI.
//!
//! These render purely from props; all state lives in the main
//! component's hooks.

use gloo_timers::callback::Timeout;
use stage_scoreboard::scoreboard::{Team, TeamSide};
use stage_scoreboard::{Announcement, ScoreDirection};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Transient full-screen announcement overlay.
///
/// Owns nothing but its dismiss timer: `on_close` fires exactly once per
/// shown announcement, either when the timer elapses or when the viewer
/// clicks it away early. Bumping `generation` replaces the visible
/// announcement and restarts the timer (the old one is dropped by the
/// effect destructor).
#[derive(Properties, PartialEq)]
pub struct CenterMessageProps {
    pub announcement: Announcement,
    pub generation: u32,
    pub on_close: Callback<()>,
}

#[function_component(CenterMessage)]
pub fn center_message(props: &CenterMessageProps) -> Html {
    {
        let on_close = props.on_close.clone();
        let duration = props.announcement.duration_ms;
        use_effect_with((props.generation, duration), move |&(_, duration)| {
            let handle = Timeout::new(duration, move || on_close.emit(()));
            move || drop(handle)
        });
    }

    let dismiss = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="overlay-backdrop" onclick={dismiss}>
            <div class="overlay-card">
                <h2 class="overlay-headline">{ &props.announcement.headline }</h2>
                if let Some(detail) = &props.announcement.detail {
                    <p class="overlay-detail">{ detail }</p>
                }
                if let Some(media) = &props.announcement.media {
                    <img class="overlay-media" src={media.clone()} alt="Score reaction" />
                }
            </div>
        </div>
    }
}

/// One team's name, score (display or edit buffer), and delta buttons.
#[derive(Properties, PartialEq)]
pub struct TeamPanelProps {
    pub team: Team,
    pub side: TeamSide,
    pub on_name: Callback<(TeamSide, String)>,
    pub on_focus: Callback<TeamSide>,
    pub on_input: Callback<(TeamSide, String)>,
    pub on_commit: Callback<TeamSide>,
    pub on_cancel: Callback<TeamSide>,
    pub on_delta: Callback<(TeamSide, i32)>,
}

#[function_component(TeamPanel)]
pub fn team_panel(props: &TeamPanelProps) -> Html {
    let side = props.side;

    let name_oninput = {
        let on_name = props.on_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_name.emit((side, input.value()));
        })
    };

    let score_oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((side, input.value()));
        })
    };

    let score_onblur = {
        let on_commit = props.on_commit.clone();
        Callback::from(move |_: FocusEvent| on_commit.emit(side))
    };

    let score_onkeydown = {
        let on_commit = props.on_commit.clone();
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => on_commit.emit(side),
            "Escape" => on_cancel.emit(side),
            _ => {}
        })
    };

    let score_onclick = {
        let on_focus = props.on_focus.clone();
        Callback::from(move |_: MouseEvent| on_focus.emit(side))
    };

    let minus_onclick = {
        let on_delta = props.on_delta.clone();
        Callback::from(move |_: MouseEvent| on_delta.emit((side, -1)))
    };
    let plus_onclick = {
        let on_delta = props.on_delta.clone();
        Callback::from(move |_: MouseEvent| on_delta.emit((side, 1)))
    };

    let score_class = classes!(
        "team-score",
        props.team.animation.map(|direction| match direction {
            ScoreDirection::Increase => "score-increase",
            ScoreDirection::Decrease => "score-decrease",
        })
    );

    html! {
        <div class="team-panel">
            <input
                class="team-name"
                type="text"
                maxlength="20"
                value={props.team.name.clone()}
                oninput={name_oninput}
            />
            if props.team.editing {
                <input
                    class="team-score-input"
                    type="text"
                    inputmode="numeric"
                    value={props.team.input.clone()}
                    oninput={score_oninput}
                    onblur={score_onblur}
                    onkeydown={score_onkeydown}
                />
            } else {
                <div class={score_class} onclick={score_onclick}>
                    { props.team.score }
                </div>
            }
            <div class="team-controls">
                <button class="score-down" onclick={minus_onclick}>{ "-" }</button>
                <button class="score-up" onclick={plus_onclick}>{ "+" }</button>
            </div>
        </div>
    }
}
