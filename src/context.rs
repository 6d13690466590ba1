use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Duration, Local, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::display::DisplaySettings;

/// Interaction tags kept in memory. Only the tail is used for mood.
pub const HISTORY_LIMIT: usize = 100;
/// Number of most recent tags the mood classifier looks at.
pub const MOOD_WINDOW: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Focused,
    Excited,
    Relaxed,
    Competitive,
    Exploratory,
    Nostalgic,
    Curious,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Focused => write!(f, "focused"),
            Mood::Excited => write!(f, "excited"),
            Mood::Relaxed => write!(f, "relaxed"),
            Mood::Competitive => write!(f, "competitive"),
            Mood::Exploratory => write!(f, "exploratory"),
            Mood::Nostalgic => write!(f, "nostalgic"),
            Mood::Curious => write!(f, "curious"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Morning => write!(f, "morning"),
            TimeOfDay::Afternoon => write!(f, "afternoon"),
            TimeOfDay::Evening => write!(f, "evening"),
            TimeOfDay::Night => write!(f, "night"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionPattern {
    Casual,
    Intensive,
    Learning,
    Social,
    Grinding,
}

impl std::str::FromStr for InteractionPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casual" => Ok(InteractionPattern::Casual),
            "intensive" => Ok(InteractionPattern::Intensive),
            "learning" => Ok(InteractionPattern::Learning),
            "social" => Ok(InteractionPattern::Social),
            "grinding" => Ok(InteractionPattern::Grinding),
            other => Err(format!("unknown interaction pattern: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Auto,
    Neon,
    Classic,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationLevel {
    Full,
    Reduced,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuddyFrequency {
    Low,
    Medium,
    High,
}

impl BuddyFrequency {
    /// Minimum gap between two unsolicited buddy messages.
    pub fn min_interval(&self) -> Duration {
        match self {
            BuddyFrequency::Low => Duration::seconds(300),
            BuddyFrequency::Medium => Duration::seconds(180),
            BuddyFrequency::High => Duration::seconds(120),
        }
    }
}

impl std::str::FromStr for BuddyFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(BuddyFrequency::Low),
            "medium" => Ok(BuddyFrequency::Medium),
            "high" => Ok(BuddyFrequency::High),
            other => Err(format!("unknown buddy frequency: {}", other)),
        }
    }
}

impl fmt::Display for BuddyFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuddyFrequency::Low => write!(f, "low"),
            BuddyFrequency::Medium => write!(f, "medium"),
            BuddyFrequency::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub animations: AnimationLevel,
    pub sounds: bool,
    pub buddy_chat: bool,
    pub buddy_frequency: BuddyFrequency,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::Auto,
            animations: AnimationLevel::Full,
            sounds: true,
            buddy_chat: true,
            buddy_frequency: BuddyFrequency::Medium,
        }
    }
}

/// A single preference change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preference {
    Theme(Theme),
    Animations(AnimationLevel),
    Sounds(bool),
    BuddyChat(bool),
    BuddyFrequency(BuddyFrequency),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    pub user_mood: Mood,
    pub time_of_day: TimeOfDay,
    pub session_duration_secs: u64,
    pub interaction_pattern: InteractionPattern,
    pub recent_interactions: VecDeque<String>,
    pub preferences: Preferences,
    pub game_history: Vec<String>,
    pub achievements: Vec<String>,
    pub favorite_games: Vec<String>,
    pub website_settings: DisplaySettings,
}

/// Owns the per-session context and keeps its derived fields current.
#[derive(Debug, Clone)]
pub struct ContextTracker {
    context: Context,
    session_start: DateTime<Local>,
}

impl ContextTracker {
    pub fn new(preferences: Preferences, now: DateTime<Local>) -> Self {
        ContextTracker {
            context: Context {
                user_mood: Mood::Focused,
                time_of_day: TimeOfDay::from_hour(now.hour()),
                session_duration_secs: 0,
                interaction_pattern: InteractionPattern::Casual,
                recent_interactions: VecDeque::new(),
                preferences,
                game_history: Vec::new(),
                achievements: Vec::new(),
                favorite_games: Vec::new(),
                website_settings: DisplaySettings::default(),
            },
            session_start: now,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn session_elapsed(&self, now: DateTime<Local>) -> Duration {
        (now - self.session_start).max(Duration::zero())
    }

    /// Track one interaction and recompute everything derived from history.
    pub fn record(&mut self, tag: &str, now: DateTime<Local>) -> Mood {
        let history = &mut self.context.recent_interactions;
        history.push_back(format!("{}: {}", now.timestamp_millis(), tag));
        while history.len() > HISTORY_LIMIT {
            history.pop_front();
        }

        self.refresh(now);

        let previous = self.context.user_mood;
        self.context.user_mood = classify_mood(self.context.recent_interactions.iter());
        if previous != self.context.user_mood {
            debug!(from = %previous, to = %self.context.user_mood, "mood changed");
        }

        if let Some(game) = strip_marker(tag, "game_") {
            push_unique(&mut self.context.game_history, game);
        }
        if let Some(achievement) = strip_marker(tag, "achievement_") {
            push_unique(&mut self.context.achievements, achievement);
        }

        self.context.user_mood
    }

    /// Update session duration and time of day without recording anything.
    pub fn refresh(&mut self, now: DateTime<Local>) {
        self.context.session_duration_secs = self.session_elapsed(now).num_seconds() as u64;
        self.context.time_of_day = TimeOfDay::from_hour(now.hour());
    }

    pub fn set_preference(&mut self, preference: Preference) {
        let prefs = &mut self.context.preferences;
        match preference {
            Preference::Theme(theme) => prefs.theme = theme,
            Preference::Animations(level) => prefs.animations = level,
            Preference::Sounds(on) => prefs.sounds = on,
            Preference::BuddyChat(on) => prefs.buddy_chat = on,
            Preference::BuddyFrequency(freq) => prefs.buddy_frequency = freq,
        }
    }

    pub fn set_interaction_pattern(&mut self, pattern: InteractionPattern) {
        self.context.interaction_pattern = pattern;
    }

    pub fn add_favorite_game(&mut self, game: &str) {
        push_unique(&mut self.context.favorite_games, game.to_string());
    }
}

/// Classify mood from interaction history. Only the last `MOOD_WINDOW`
/// entries count; the first matching rule wins.
pub fn classify_mood<I, S>(history: I) -> Mood
where
    I: IntoIterator<Item = S>,
    I::IntoIter: DoubleEndedIterator,
    S: AsRef<str>,
{
    let recent: Vec<S> = history.into_iter().rev().take(MOOD_WINDOW).collect();
    let count = |marker: &str| recent.iter().filter(|i| i.as_ref().contains(marker)).count();

    if count("achievement") > 2 {
        return Mood::Excited;
    }
    if count("quick") > 5 {
        return Mood::Excited;
    }
    if count("game") > 4 {
        return Mood::Competitive;
    }
    if count("explore") > 2 {
        return Mood::Curious;
    }
    if count("social") > 1 {
        return Mood::Nostalgic;
    }
    Mood::Focused
}

fn strip_marker(tag: &str, marker: &str) -> Option<String> {
    if tag.contains(marker) {
        Some(tag.replacen(marker, "", 1))
    } else {
        None
    }
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    fn tracker() -> (ContextTracker, ManualClock) {
        let clock = ManualClock::at_hour(14);
        (ContextTracker::new(Preferences::default(), clock.now()), clock)
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
    }

    #[test]
    fn test_achievements_win_over_everything() {
        let mut history = vec!["game_a", "game_b", "game_c", "game_d", "game_e", "game_f"];
        history.extend(["explore", "explore", "explore", "social", "social"]);
        history.extend(["achievement_1", "achievement_2", "achievement_3"]);
        assert_eq!(classify_mood(history), Mood::Excited);
    }

    #[test]
    fn test_mood_priority_order() {
        assert_eq!(classify_mood(["quick"; 6]), Mood::Excited);
        assert_eq!(classify_mood(["quick"; 5]), Mood::Focused);
        assert_eq!(classify_mood(["game"; 5]), Mood::Competitive);
        assert_eq!(classify_mood(["explore"; 3]), Mood::Curious);
        assert_eq!(classify_mood(["social"; 2]), Mood::Nostalgic);
        assert_eq!(classify_mood(Vec::<String>::new()), Mood::Focused);
    }

    #[test]
    fn test_mood_only_counts_recent_window() {
        let mut history = vec!["achievement"; 3];
        history.extend(vec!["idle"; MOOD_WINDOW]);
        assert_eq!(classify_mood(history), Mood::Focused);
    }

    #[test]
    fn test_record_updates_session_and_games() {
        let (mut tracker, clock) = tracker();
        clock.advance(Duration::seconds(90));
        tracker.record("game_tap_racer", clock.now());
        tracker.record("game_tap_racer", clock.now());

        let ctx = tracker.context();
        assert_eq!(ctx.session_duration_secs, 90);
        assert_eq!(ctx.time_of_day, TimeOfDay::Afternoon);
        assert_eq!(ctx.game_history, vec!["tap_racer".to_string()]);
        assert_eq!(ctx.recent_interactions.len(), 2);
        assert!(ctx.recent_interactions[0].ends_with(": game_tap_racer"));
    }

    #[test]
    fn test_record_tracks_achievements_and_mood() {
        let (mut tracker, clock) = tracker();
        for name in ["first_win", "combo", "high_score"] {
            tracker.record(&format!("achievement_{}", name), clock.now());
        }
        assert_eq!(tracker.context().user_mood, Mood::Excited);
        assert_eq!(tracker.context().achievements.len(), 3);
    }

    #[test]
    fn test_history_is_bounded() {
        let (mut tracker, clock) = tracker();
        for i in 0..(HISTORY_LIMIT + 10) {
            tracker.record(&format!("click_{}", i), clock.now());
        }
        let history = &tracker.context().recent_interactions;
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert!(history[0].ends_with(": click_10"));
    }

    #[test]
    fn test_set_preference() {
        let (mut tracker, _) = tracker();
        tracker.set_preference(Preference::BuddyChat(false));
        tracker.set_preference(Preference::BuddyFrequency(BuddyFrequency::High));
        let prefs = &tracker.context().preferences;
        assert!(!prefs.buddy_chat);
        assert_eq!(prefs.buddy_frequency, BuddyFrequency::High);
        assert_eq!(prefs.buddy_frequency.min_interval(), Duration::seconds(120));
    }

    #[test]
    fn test_favorites_and_pattern() {
        let (mut tracker, _) = tracker();
        tracker.add_favorite_game("galaga");
        tracker.add_favorite_game("galaga");
        tracker.set_interaction_pattern(InteractionPattern::Grinding);
        assert_eq!(tracker.context().favorite_games, vec!["galaga".to_string()]);
        assert_eq!(tracker.context().interaction_pattern, InteractionPattern::Grinding);
        assert_eq!("Social".parse::<InteractionPattern>(), Ok(InteractionPattern::Social));
        assert!("afk".parse::<InteractionPattern>().is_err());
    }
}
