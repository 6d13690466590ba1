use std::fmt;

use chrono::{DateTime, Duration, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::context::{Context, Mood};
use crate::responses::{self, Topic, CHAT_BUCKETS, OPEN_ENDED};

/// Sessions younger than this get a greeting.
pub const GREETING_WINDOW: i64 = 2;
/// Sessions older than this get a break suggestion.
pub const BREAK_AFTER: i64 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Greeting,
    Suggestion,
    Celebration,
    Encouragement,
    Casual,
    Achievement,
    Break,
    ChatResponse,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Greeting => write!(f, "greeting"),
            MessageKind::Suggestion => write!(f, "suggestion"),
            MessageKind::Celebration => write!(f, "celebration"),
            MessageKind::Encouragement => write!(f, "encouragement"),
            MessageKind::Casual => write!(f, "casual"),
            MessageKind::Achievement => write!(f, "achievement"),
            MessageKind::Break => write!(f, "break"),
            MessageKind::ChatResponse => write!(f, "chat_response"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Excited,
    Friendly,
    Proud,
    Chill,
    Nostalgic,
    Encouraging,
    Sarcastic,
    Witty,
}

impl Emotion {
    pub fn from_mood(mood: Mood) -> Self {
        match mood {
            Mood::Excited => Emotion::Excited,
            Mood::Competitive => Emotion::Proud,
            Mood::Focused => Emotion::Encouraging,
            Mood::Relaxed => Emotion::Chill,
            Mood::Nostalgic => Emotion::Nostalgic,
            Mood::Curious => Emotion::Friendly,
            Mood::Exploratory => Emotion::Friendly,
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            Emotion::Excited => "🎉",
            Emotion::Friendly => "😊",
            Emotion::Proud => "💪",
            Emotion::Chill => "😎",
            Emotion::Nostalgic => "🕹️",
            Emotion::Encouraging => "🌟",
            Emotion::Sarcastic => "🤖",
            Emotion::Witty => "😏",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuddyMessage {
    pub id: String,
    pub kind: MessageKind,
    pub message: String,
    pub emotion: Emotion,
    pub timestamp: DateTime<Local>,
    pub auto_triggered: bool,
}

impl BuddyMessage {
    pub fn new(
        kind: MessageKind,
        message: impl Into<String>,
        emotion: Emotion,
        timestamp: DateTime<Local>,
        auto_triggered: bool,
    ) -> Self {
        BuddyMessage {
            id: Uuid::new_v4().to_string(),
            kind,
            message: message.into(),
            emotion,
            timestamp,
            auto_triggered,
        }
    }

    /// Confirmation of a display change or optimization.
    pub fn system(message: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self::new(MessageKind::Suggestion, message, Emotion::Friendly, timestamp, true)
    }
}

/// Uniform pick from a fixed table.
pub fn pick<R: Rng + ?Sized>(table: &'static [&'static str], rng: &mut R) -> &'static str {
    table.choose(rng).copied().unwrap_or_default()
}

/// Category of an unsolicited message, by fixed priority.
pub fn message_kind(session: Duration, mood: Mood) -> MessageKind {
    if session < Duration::minutes(GREETING_WINDOW) {
        MessageKind::Greeting
    } else if session > Duration::minutes(BREAK_AFTER) {
        MessageKind::Break
    } else if mood == Mood::Competitive {
        MessageKind::Encouragement
    } else if mood == Mood::Excited {
        MessageKind::Celebration
    } else {
        MessageKind::Casual
    }
}

/// Text table backing a message category. Casual messages follow the mood
/// and fall back to greetings for moods without their own lines.
pub fn table_for(kind: MessageKind, mood: Mood) -> &'static [&'static str] {
    match kind {
        // Greetings always use greeting lines, whatever the mood.
        MessageKind::Greeting => responses::GREETING,
        MessageKind::Break => responses::BREAK,
        MessageKind::Encouragement => responses::COMPETITIVE,
        MessageKind::Celebration => responses::EXCITED,
        MessageKind::Achievement => responses::ACHIEVEMENT,
        _ => match mood {
            Mood::Focused => responses::FOCUSED,
            Mood::Excited => responses::EXCITED,
            Mood::Competitive => responses::COMPETITIVE,
            _ => responses::GREETING,
        },
    }
}

/// First topic whose keywords appear in the lower-cased input.
pub fn classify_chat(text: &str) -> Topic {
    let lower = text.to_lowercase();
    CHAT_BUCKETS
        .iter()
        .find(|bucket| bucket.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|bucket| bucket.topic)
        .unwrap_or(Topic::OpenEnded)
}

pub fn chat_reply<R: Rng + ?Sized>(text: &str, rng: &mut R) -> (Topic, &'static str) {
    let topic = classify_chat(text);
    let table = match topic {
        Topic::OpenEnded => OPEN_ENDED,
        other => responses::responses_for(other),
    };
    (topic, pick(table, rng))
}

/// Rate-limited source of unsolicited buddy messages.
#[derive(Debug, Clone, Default)]
pub struct MessageSelector {
    last_message: Option<DateTime<Local>>,
}

impl MessageSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when buddy chat is off or the minimum interval for the chosen
    /// frequency has not passed yet.
    pub fn auto_message<R: Rng + ?Sized>(
        &mut self,
        context: &Context,
        session: Duration,
        now: DateTime<Local>,
        rng: &mut R,
    ) -> Option<BuddyMessage> {
        let prefs = &context.preferences;
        if !prefs.buddy_chat {
            debug!("buddy chat disabled, no auto message");
            return None;
        }

        if let Some(last) = self.last_message {
            let min_interval = prefs.buddy_frequency.min_interval();
            if now - last < min_interval {
                debug!(
                    since_last = (now - last).num_seconds(),
                    min_interval = min_interval.num_seconds(),
                    "auto message suppressed"
                );
                return None;
            }
        }

        let mood = context.user_mood;
        let kind = message_kind(session, mood);
        let text = pick(table_for(kind, mood), rng);

        self.last_message = Some(now);
        Some(BuddyMessage::new(kind, text, Emotion::from_mood(mood), now, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::context::{BuddyFrequency, ContextTracker, Preferences};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_greeting_checked_before_gaming() {
        assert_eq!(classify_chat("Hey, want to play a game?"), Topic::Greeting);
        assert_eq!(classify_chat("Let's PLAY pacman"), Topic::Gaming);
    }

    #[test]
    fn test_bucket_order() {
        assert_eq!(classify_chat("Who are you"), Topic::Identity);
        assert_eq!(classify_chat("I write code"), Topic::Technology);
        assert_eq!(classify_chat("so stressed"), Topic::Emotion);
        assert_eq!(classify_chat("nice weather"), Topic::Weather);
        assert_eq!(classify_chat("make the font bigger"), Topic::DisplaySettings);
        assert_eq!(classify_chat("research papers"), Topic::Science);
        assert_eq!(classify_chat("music"), Topic::Creativity);
        assert_eq!(classify_chat("need advice"), Topic::Help);
        assert_eq!(classify_chat("purpose of life"), Topic::Philosophy);
        assert_eq!(classify_chat("zzz"), Topic::OpenEnded);
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // "this" contains "hi"
        assert_eq!(classify_chat("this"), Topic::Greeting);
    }

    #[test]
    fn test_chat_reply_comes_from_bucket() {
        let mut rng = rng();
        let (topic, reply) = chat_reply("tell me about programming", &mut rng);
        assert_eq!(topic, Topic::Technology);
        assert!(responses::responses_for(Topic::Technology).contains(&reply));

        let (topic, reply) = chat_reply("zzz", &mut rng);
        assert_eq!(topic, Topic::OpenEnded);
        assert!(OPEN_ENDED.contains(&reply));
    }

    #[test]
    fn test_chat_reply_is_deterministic_for_seed() {
        let a = chat_reply("hello", &mut StdRng::seed_from_u64(42)).1;
        let b = chat_reply("hello", &mut StdRng::seed_from_u64(42)).1;
        assert_eq!(a, b);
    }

    #[test]
    fn test_message_kind_priority() {
        assert_eq!(message_kind(Duration::seconds(30), Mood::Competitive), MessageKind::Greeting);
        assert_eq!(message_kind(Duration::minutes(50), Mood::Excited), MessageKind::Break);
        assert_eq!(message_kind(Duration::minutes(10), Mood::Competitive), MessageKind::Encouragement);
        assert_eq!(message_kind(Duration::minutes(10), Mood::Excited), MessageKind::Celebration);
        assert_eq!(message_kind(Duration::minutes(10), Mood::Curious), MessageKind::Casual);
    }

    #[test]
    fn test_casual_table_follows_mood() {
        assert_eq!(table_for(MessageKind::Casual, Mood::Focused), responses::FOCUSED);
        assert_eq!(table_for(MessageKind::Casual, Mood::Nostalgic), responses::GREETING);
        assert_eq!(table_for(MessageKind::Encouragement, Mood::Focused), responses::COMPETITIVE);
    }

    #[test]
    fn test_emotion_from_mood() {
        assert_eq!(Emotion::from_mood(Mood::Competitive), Emotion::Proud);
        assert_eq!(Emotion::from_mood(Mood::Focused), Emotion::Encouraging);
        assert_eq!(Emotion::from_mood(Mood::Exploratory), Emotion::Friendly);
    }

    #[test]
    fn test_auto_message_is_rate_limited() {
        let clock = ManualClock::at_hour(15);
        let tracker = ContextTracker::new(Preferences::default(), clock.now());
        let mut selector = MessageSelector::new();
        let mut rng = rng();

        let first = selector.auto_message(tracker.context(), Duration::zero(), clock.now(), &mut rng);
        assert_eq!(first.map(|m| m.kind), Some(MessageKind::Greeting));

        clock.advance(Duration::seconds(179));
        let second = selector.auto_message(tracker.context(), Duration::seconds(179), clock.now(), &mut rng);
        assert!(second.is_none());

        clock.advance(Duration::seconds(1));
        let third = selector.auto_message(tracker.context(), Duration::seconds(180), clock.now(), &mut rng);
        let third = third.expect("interval elapsed");
        assert_eq!(third.kind, MessageKind::Casual);
        assert!(responses::FOCUSED.contains(&third.message.as_str()));
        assert!(third.auto_triggered);
    }

    #[test]
    fn test_auto_message_respects_frequency_and_toggle() {
        let clock = ManualClock::at_hour(15);
        let mut tracker = ContextTracker::new(Preferences::default(), clock.now());
        tracker.set_preference(crate::context::Preference::BuddyFrequency(BuddyFrequency::High));
        let mut selector = MessageSelector::new();
        let mut rng = rng();

        assert!(selector.auto_message(tracker.context(), Duration::zero(), clock.now(), &mut rng).is_some());
        clock.advance(Duration::seconds(120));
        assert!(selector
            .auto_message(tracker.context(), Duration::seconds(120), clock.now(), &mut rng)
            .is_some());

        tracker.set_preference(crate::context::Preference::BuddyChat(false));
        clock.advance(Duration::minutes(10));
        assert!(selector
            .auto_message(tracker.context(), Duration::minutes(12), clock.now(), &mut rng)
            .is_none());
    }
}
