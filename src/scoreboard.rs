//! Two-team score state machine.
//!
//! Each team's score field is either displaying the committed integer or
//! editing a free-text numeric buffer. All mutation goes through named
//! transitions; committed changes come back as [`ScoreChange`] events so
//! the UI can run the announcement pipeline.

use crate::defaults::MAX_NAME_LEN;
use crate::{digits_only, parse_score, ScoreChange, ScoreDirection, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub score: u32,
    /// Transient text buffer, only meaningful while `editing`.
    pub input: String,
    pub editing: bool,
    /// Transient animation tag set on a committed change, cleared by a
    /// one-shot timer in the UI layer.
    pub animation: Option<ScoreDirection>,
}

impl Team {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: 0,
            input: String::new(),
            editing: false,
            animation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    left: Team,
    right: Team,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            left: Team::new("Team 1"),
            right: Team::new("Team 2"),
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Left => &self.left,
            TeamSide::Right => &self.right,
        }
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Left => &mut self.left,
            TeamSide::Right => &mut self.right,
        }
    }

    /// Rename a team, truncated to the display bound.
    pub fn set_name(&mut self, side: TeamSide, name: &str) {
        self.team_mut(side).name = name.chars().take(MAX_NAME_LEN).collect();
    }

    /// Enter score-edit mode, seeding the buffer with the committed
    /// score's text form.
    pub fn focus(&mut self, side: TeamSide) {
        let team = self.team_mut(side);
        if !team.editing {
            team.editing = true;
            team.input = team.score.to_string();
        }
    }

    /// Replace the edit buffer, keeping digits only.
    pub fn set_input(&mut self, side: TeamSide, raw: &str) {
        let team = self.team_mut(side);
        if team.editing {
            team.input = digits_only(raw);
        }
    }

    /// Leave edit mode without committing; the buffer is discarded.
    pub fn cancel(&mut self, side: TeamSide) {
        let team = self.team_mut(side);
        team.editing = false;
        team.input.clear();
    }

    /// Commit the edit buffer as the new score. Empty or unparsable
    /// buffers commit 0. Returns the change event when the committed
    /// score actually moved.
    pub fn submit(&mut self, side: TeamSide) -> Option<ScoreChange> {
        let team = self.team_mut(side);
        if !team.editing {
            return None;
        }
        let next_score = parse_score(&team.input);
        team.input.clear();
        team.editing = false;
        self.commit_score(side, next_score)
    }

    /// Increment/decrement buttons bypass the edit buffer entirely.
    /// The score saturates at zero.
    pub fn apply_delta(&mut self, side: TeamSide, delta: i32) -> Option<ScoreChange> {
        let current = self.team(side).score;
        let next_score = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as u32)
        };
        self.commit_score(side, next_score)
    }

    pub fn clear_animation(&mut self, side: TeamSide) {
        self.team_mut(side).animation = None;
    }

    /// Winner projection: a pure function of the two committed scores.
    pub fn winner(&self) -> Winner {
        match self.left.score.cmp(&self.right.score) {
            std::cmp::Ordering::Greater => Winner::Leading(self.left.name.clone()),
            std::cmp::Ordering::Less => Winner::Leading(self.right.name.clone()),
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }

    fn commit_score(&mut self, side: TeamSide, next_score: u32) -> Option<ScoreChange> {
        let team = self.team_mut(side);
        let previous = team.score;
        team.score = next_score;
        if next_score == previous {
            return None;
        }
        let direction = if next_score > previous {
            ScoreDirection::Increase
        } else {
            ScoreDirection::Decrease
        };
        team.animation = Some(direction);
        let team_name = team.name.clone();
        // Recomputed eagerly so the event carries a winner consistent
        // with the score it reports.
        let winner = self.winner();
        Some(ScoreChange {
            team: team_name,
            score: next_score,
            direction,
            winner,
        })
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_seeds_buffer_with_committed_score() {
        let mut board = Scoreboard::new();
        board.apply_delta(TeamSide::Left, 7);
        board.focus(TeamSide::Left);
        let team = board.team(TeamSide::Left);
        assert!(team.editing);
        assert_eq!(team.input, "7");
    }

    #[test]
    fn typing_strips_non_digits_and_submit_commits() {
        let mut board = Scoreboard::new();
        board.focus(TeamSide::Left);
        board.set_input(TeamSide::Left, "ab12c3");
        assert_eq!(board.team(TeamSide::Left).input, "123");

        let change = board.submit(TeamSide::Left).expect("score moved");
        assert_eq!(change.score, 123);
        assert_eq!(change.direction, ScoreDirection::Increase);

        let team = board.team(TeamSide::Left);
        assert_eq!(team.score, 123);
        assert!(!team.editing);
        assert!(team.input.is_empty());
    }

    #[test]
    fn submitting_an_empty_buffer_commits_zero() {
        let mut board = Scoreboard::new();
        board.apply_delta(TeamSide::Right, 4);
        board.focus(TeamSide::Right);
        board.set_input(TeamSide::Right, "");
        let change = board.submit(TeamSide::Right).expect("4 to 0 is a change");
        assert_eq!(change.score, 0);
        assert_eq!(change.direction, ScoreDirection::Decrease);
    }

    #[test]
    fn submit_without_edit_mode_is_a_noop() {
        let mut board = Scoreboard::new();
        assert_eq!(board.submit(TeamSide::Left), None);
    }

    #[test]
    fn unchanged_submit_produces_no_event_or_animation() {
        let mut board = Scoreboard::new();
        board.apply_delta(TeamSide::Left, 5);
        board.clear_animation(TeamSide::Left);

        board.focus(TeamSide::Left);
        assert_eq!(board.submit(TeamSide::Left), None);
        let team = board.team(TeamSide::Left);
        assert_eq!(team.score, 5);
        assert_eq!(team.animation, None);
    }

    #[test]
    fn cancel_discards_the_buffer() {
        let mut board = Scoreboard::new();
        board.apply_delta(TeamSide::Left, 9);
        board.focus(TeamSide::Left);
        board.set_input(TeamSide::Left, "42");
        board.cancel(TeamSide::Left);

        let team = board.team(TeamSide::Left);
        assert!(!team.editing);
        assert!(team.input.is_empty());
        assert_eq!(team.score, 9);
    }

    #[test]
    fn delta_saturates_at_zero_without_an_event() {
        let mut board = Scoreboard::new();
        assert_eq!(board.apply_delta(TeamSide::Left, -1), None);
        let team = board.team(TeamSide::Left);
        assert_eq!(team.score, 0);
        assert_eq!(team.animation, None);
    }

    #[test]
    fn delta_sets_animation_and_direction() {
        let mut board = Scoreboard::new();
        let up = board.apply_delta(TeamSide::Right, 1).unwrap();
        assert_eq!(up.direction, ScoreDirection::Increase);
        assert_eq!(
            board.team(TeamSide::Right).animation,
            Some(ScoreDirection::Increase)
        );

        let down = board.apply_delta(TeamSide::Right, -1).unwrap();
        assert_eq!(down.direction, ScoreDirection::Decrease);
        assert_eq!(
            board.team(TeamSide::Right).animation,
            Some(ScoreDirection::Decrease)
        );
    }

    #[test]
    fn winner_projection_tracks_every_mutation() {
        let mut board = Scoreboard::new();
        board.apply_delta(TeamSide::Left, 3);
        board.apply_delta(TeamSide::Right, 5);
        assert_eq!(board.winner(), Winner::Leading("Team 2".to_string()));

        let change = board.apply_delta(TeamSide::Left, 1).unwrap(); // 4 v 5
        assert_eq!(change.winner, Winner::Leading("Team 2".to_string()));

        let change = board.apply_delta(TeamSide::Left, 1).unwrap(); // 5 v 5
        assert_eq!(change.winner, Winner::Tie);
        assert_eq!(board.winner(), Winner::Tie);
    }

    #[test]
    fn winner_follows_submit_commits_too() {
        let mut board = Scoreboard::new();
        board.focus(TeamSide::Left);
        board.set_input(TeamSide::Left, "10");
        let change = board.submit(TeamSide::Left).unwrap();
        assert_eq!(change.winner, Winner::Leading("Team 1".to_string()));
    }

    #[test]
    fn names_are_truncated_to_the_display_bound() {
        let mut board = Scoreboard::new();
        board.set_name(TeamSide::Left, "An Extremely Long Team Name Indeed");
        assert_eq!(board.team(TeamSide::Left).name.chars().count(), 20);
        assert_eq!(board.team(TeamSide::Left).name, "An Extremely Long Te");
    }

    #[test]
    fn change_events_carry_the_current_name() {
        let mut board = Scoreboard::new();
        board.set_name(TeamSide::Left, "Reds");
        let change = board.apply_delta(TeamSide::Left, 1).unwrap();
        assert_eq!(change.team, "Reds");
        assert_eq!(change.winner, Winner::Leading("Reds".to_string()));
    }
}
