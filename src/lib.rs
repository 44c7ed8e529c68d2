use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub mod countdown;
pub mod scoreboard;

/// Default presentation parameters shared between the core and the UI.
pub mod defaults {
    /// How long a score-change overlay stays on screen.
    pub const SCORE_OVERLAY_MS: u32 = 3_000;
    /// How long the final-score summary overlay stays on screen.
    pub const SUMMARY_OVERLAY_MS: u32 = 20_000;
    /// Label used when neither team is ahead.
    pub const TIE_MARKER: &str = "Tie";
    /// Upper bound on team name length, in characters.
    pub const MAX_NAME_LEN: usize = 20;
}

// Compiled regex for the score-field digit filter
static NON_DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// Direction of a committed score change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDirection {
    Increase,
    Decrease,
}

impl ScoreDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreDirection::Increase => "increase",
            ScoreDirection::Decrease => "decrease",
        }
    }
}

/// Which team currently leads, derived from the two committed scores only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Leading(String),
    Tie,
}

impl Winner {
    /// Display label: the leading team's name, or the tie marker.
    pub fn label(&self) -> &str {
        match self {
            Winner::Leading(name) => name,
            Winner::Tie => defaults::TIE_MARKER,
        }
    }
}

/// One committed, non-zero score change, carrying the winner projection
/// recomputed at commit time so side effects observe a consistent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreChange {
    pub team: String,
    pub score: u32,
    pub direction: ScoreDirection,
    pub winner: Winner,
}

/// Mapping from score direction to a media reference, loaded once at
/// startup from an external JSON resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct MediaMap {
    pub increase: String,
    pub decrease: String,
}

impl MediaMap {
    pub fn from_json(body: &str) -> Result<Self, MediaMapError> {
        if body.trim().is_empty() {
            return Err(MediaMapError::EmptyBody);
        }
        serde_json::from_str(body).map_err(|err| MediaMapError::Malformed(err.to_string()))
    }

    pub fn for_direction(&self, direction: ScoreDirection) -> &str {
        match direction {
            ScoreDirection::Increase => &self.increase,
            ScoreDirection::Decrease => &self.decrease,
        }
    }
}

#[derive(Debug)]
pub enum MediaMapError {
    EmptyBody,
    Malformed(String),
}

impl fmt::Display for MediaMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaMapError::EmptyBody => write!(f, "media map body is empty"),
            MediaMapError::Malformed(detail) => write!(f, "media map is malformed: {}", detail),
        }
    }
}

impl std::error::Error for MediaMapError {}

/// A transient full-screen message shown after a scoring event or an
/// explicit finish action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub headline: String,
    pub detail: Option<String>,
    pub media: Option<String>,
    pub duration_ms: u32,
}

/// Headline template for a committed score change.
pub fn score_headline(change: &ScoreChange) -> String {
    match change.direction {
        ScoreDirection::Increase => format!("Way To Go {}!", change.team),
        ScoreDirection::Decrease => format!("Try Harder {}!", change.team),
    }
}

/// Compose the transient overlay for a committed score change. Media is
/// optional: a missing map degrades to a text-only overlay.
pub fn score_announcement(change: &ScoreChange, media: Option<&MediaMap>) -> Announcement {
    Announcement {
        headline: score_headline(change),
        detail: None,
        media: media.map(|m| m.for_direction(change.direction).to_string()),
        duration_ms: defaults::SCORE_OVERLAY_MS,
    }
}

/// Compose the final-score summary shown by the finish action: the
/// winner (or tie marker) as the headline, both scores as the detail.
pub fn final_summary(board: &scoreboard::Scoreboard) -> Announcement {
    let left = board.team(scoreboard::TeamSide::Left);
    let right = board.team(scoreboard::TeamSide::Right);
    Announcement {
        headline: board.winner().label().to_string(),
        detail: Some(format!(
            "{} {} : {} {}",
            left.name, left.score, right.score, right.name
        )),
        media: None,
        duration_ms: defaults::SUMMARY_OVERLAY_MS,
    }
}

/// Strip every non-digit character from a score-field edit buffer.
pub fn digits_only(input: &str) -> String {
    NON_DIGIT_REGEX.replace_all(input, "").into_owned()
}

/// Parse a committed score buffer. Empty or non-numeric input becomes 0;
/// a digit string past the representable range clamps to the maximum
/// rather than zeroing the score.
pub fn parse_score(input: &str) -> u32 {
    let input = input.trim();
    match input.parse() {
        Ok(value) => value,
        Err(_) if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) => u32::MAX,
        Err(_) => 0,
    }
}

/// Coerce one timer edit field to a non-negative integer; invalid input
/// becomes 0 rather than an error surfaced to the operator.
pub fn coerce_clock_field(input: &str) -> u32 {
    match input.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            debug!("coercing invalid clock field {:?} to 0", input);
            0
        }
    }
}

/// Format remaining seconds as `M:SS` for the clock display.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
