use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::context::{Context, Mood, Theme, TimeOfDay};
use crate::selector::BREAK_AFTER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Theme,
    Game,
    Feature,
    Break,
    Social,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationKind::Theme => write!(f, "theme"),
            RecommendationKind::Game => write!(f, "game"),
            RecommendationKind::Feature => write!(f, "feature"),
            RecommendationKind::Break => write!(f, "break"),
            RecommendationKind::Social => write!(f, "social"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub action: String,
    pub reason: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buddy_comment: Option<String>,
}

impl Recommendation {
    fn new(kind: RecommendationKind, action: &str, reason: &str, confidence: f32, comment: &str) -> Self {
        Recommendation {
            kind,
            action: action.to_string(),
            reason: reason.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            buddy_comment: Some(comment.to_string()),
        }
    }

    /// Interaction tag recorded when the user applies this suggestion.
    pub fn applied_tag(&self) -> String {
        format!("applied_{}_{}", self.kind, self.action)
    }
}

/// Build the full recommendation list for the current context.
pub fn recommend(context: &Context, session: Duration) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if context.time_of_day == TimeOfDay::Night && context.preferences.theme == Theme::Auto {
        recs.push(Recommendation::new(
            RecommendationKind::Theme,
            "switch_to_dark_neon",
            "Night time detected - darker theme reduces eye strain",
            0.8,
            "Yo, let's switch to night mode! Easier on the eyes for those late-night gaming sessions 🌙",
        ));
    }

    if session > Duration::minutes(BREAK_AFTER) {
        recs.push(Recommendation::new(
            RecommendationKind::Break,
            "suggest_break",
            "Extended session detected - taking breaks improves performance",
            0.9,
            "Dude, you've been crushing it for a while! How about we take 5? I'll save your spot 😄",
        ));
    }

    match context.user_mood {
        Mood::Competitive => recs.push(Recommendation::new(
            RecommendationKind::Game,
            "highlight_leaderboard_games",
            "Competitive mood detected - showing ranked games",
            0.7,
            "I can see that fire in your eyes! Let's find some ranked matches to dominate! 🔥",
        )),
        Mood::Nostalgic => recs.push(Recommendation::new(
            RecommendationKind::Social,
            "show_retro_games",
            "Nostalgic mood detected - classic games recommended",
            0.8,
            "Feeling those retro vibes? Let's dive into some classics that'll bring back the memories! 🕹️",
        )),
        _ => {}
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::context::{ContextTracker, Preference, Preferences};

    #[test]
    fn test_quiet_afternoon_has_no_recommendations() {
        let clock = ManualClock::at_hour(14);
        let tracker = ContextTracker::new(Preferences::default(), clock.now());
        assert!(recommend(tracker.context(), Duration::minutes(10)).is_empty());
    }

    #[test]
    fn test_night_long_competitive_session() {
        let clock = ManualClock::at_hour(23);
        let mut tracker = ContextTracker::new(Preferences::default(), clock.now());
        for _ in 0..5 {
            tracker.record("game_click", clock.now());
        }

        let recs = recommend(tracker.context(), Duration::minutes(50));
        let actions: Vec<&str> = recs.iter().map(|r| r.action.as_str()).collect();
        assert_eq!(
            actions,
            vec!["switch_to_dark_neon", "suggest_break", "highlight_leaderboard_games"]
        );
        assert!(recs.iter().all(|r| (0.0..=1.0).contains(&r.confidence)));
    }

    #[test]
    fn test_theme_suggestion_needs_auto_theme() {
        let clock = ManualClock::at_hour(23);
        let mut tracker = ContextTracker::new(Preferences::default(), clock.now());
        tracker.set_preference(Preference::Theme(Theme::Classic));
        assert!(recommend(tracker.context(), Duration::zero()).is_empty());
    }

    #[test]
    fn test_nostalgic_gets_retro_games() {
        let clock = ManualClock::at_hour(10);
        let mut tracker = ContextTracker::new(Preferences::default(), clock.now());
        tracker.record("social_share", clock.now());
        tracker.record("social_invite", clock.now());

        let recs = recommend(tracker.context(), Duration::minutes(5));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Social);
        assert_eq!(recs[0].applied_tag(), "applied_social_show_retro_games");
    }
}
