use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::chat::{ChatLog, ChatMessage};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::context::{Context, ContextTracker, InteractionPattern, Mood, Preference, Preferences};
use crate::display::DisplayStyle;
use crate::recommendation::{self, Recommendation};
use crate::responses;
use crate::selector::{self, BuddyMessage, Emotion, MessageKind, MessageSelector};

/// Buddy messages remembered for the session.
pub const MESSAGE_HISTORY_LIMIT: usize = 100;

/// Buddy shared between the scheduler task and a front-end.
pub type SharedBuddy = Arc<Mutex<Buddy>>;

/// Lock a shared buddy. A panic while holding the lock leaves plain data
/// behind, so poisoning is ignored.
pub fn lock(buddy: &SharedBuddy) -> MutexGuard<'_, Buddy> {
    buddy.lock().unwrap_or_else(|e| e.into_inner())
}

/// Piper: one instance per session, owning all session state.
pub struct Buddy {
    tracker: ContextTracker,
    selector: MessageSelector,
    chat: ChatLog,
    messages: VecDeque<BuddyMessage>,
    rng: Box<dyn RngCore + Send>,
    clock: Arc<dyn Clock>,
}

impl Buddy {
    pub fn with_parts(
        preferences: Preferences,
        rng: Box<dyn RngCore + Send>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tracker = ContextTracker::new(preferences, clock.now());
        Buddy {
            tracker,
            selector: MessageSelector::new(),
            chat: ChatLog::new(),
            messages: VecDeque::new(),
            rng,
            clock,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let rng: Box<dyn RngCore + Send> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        let mut buddy = Self::with_parts(config.preferences.clone(), rng, Arc::new(SystemClock));
        let mut display = config.display.clone();
        display.sanitize();
        buddy.tracker.context_mut().website_settings = display;
        buddy
    }

    pub fn into_shared(self) -> SharedBuddy {
        Arc::new(Mutex::new(self))
    }

    pub fn context(&self) -> &Context {
        self.tracker.context()
    }

    /// Context with session duration and time of day brought up to date.
    pub fn snapshot(&mut self) -> Context {
        self.tracker.refresh(self.clock.now());
        self.tracker.context().clone()
    }

    pub fn session_elapsed(&self) -> Duration {
        self.tracker.session_elapsed(self.clock.now())
    }

    pub fn track(&mut self, interaction: &str) -> Mood {
        let mood = self.tracker.record(interaction, self.clock.now());
        debug!(interaction, mood = %mood, "interaction tracked");
        mood
    }

    pub fn set_preference(&mut self, preference: Preference) {
        info!(?preference, "preference updated");
        self.tracker.set_preference(preference);
    }

    pub fn set_interaction_pattern(&mut self, pattern: InteractionPattern) {
        self.tracker.set_interaction_pattern(pattern);
    }

    pub fn add_favorite_game(&mut self, game: &str) {
        self.tracker.add_favorite_game(game);
    }

    pub fn toggle_buddy_chat(&mut self) -> bool {
        let enabled = !self.context().preferences.buddy_chat;
        self.set_preference(Preference::BuddyChat(enabled));
        enabled
    }

    /// Unsolicited message, if chat is on and the rate limit allows one.
    pub fn auto_message(&mut self) -> Option<BuddyMessage> {
        let now = self.clock.now();
        self.tracker.refresh(now);
        let session = self.tracker.session_elapsed(now);
        let message = self
            .selector
            .auto_message(self.tracker.context(), session, now, self.rng.as_mut())?;
        info!(kind = %message.kind, "buddy message");
        self.remember(message.clone());
        Some(message)
    }

    /// Record an achievement and cheer for it. Never rate limited.
    pub fn celebrate(&mut self, achievement: &str) -> BuddyMessage {
        self.track(&format!("achievement_{}", achievement));
        let text = selector::pick(responses::ACHIEVEMENT, self.rng.as_mut());
        let message = BuddyMessage::new(
            MessageKind::Achievement,
            text,
            Emotion::Excited,
            self.clock.now(),
            false,
        );
        self.remember(message.clone());
        message
    }

    /// Reply to free text without touching the chat log.
    pub fn chat_reply(&mut self, text: &str) -> BuddyMessage {
        let (topic, reply) = selector::chat_reply(text, self.rng.as_mut());
        debug!(?topic, "chat topic");
        BuddyMessage::new(
            MessageKind::ChatResponse,
            reply,
            Emotion::from_mood(self.context().user_mood),
            self.clock.now(),
            false,
        )
    }

    /// Log the user's message and Piper's answer; returns the whole log.
    pub fn send_chat(&mut self, text: &str) -> Vec<ChatMessage> {
        self.chat.push(ChatMessage::user(text, self.clock.now()));
        self.track(&format!("chat_message_{}", text));

        let reply = self.chat_reply(text);
        self.chat.push(ChatMessage::assistant(reply.message, self.clock.now()));

        self.chat.snapshot()
    }

    pub fn chat_history(&self) -> Vec<ChatMessage> {
        self.chat.snapshot()
    }

    pub fn adjust_brightness(&mut self, level: u32) -> bool {
        let note = self.tracker.context_mut().website_settings.set_brightness(level);
        self.note(note)
    }

    pub fn adjust_contrast(&mut self, level: u32) -> bool {
        let note = self.tracker.context_mut().website_settings.set_contrast(level);
        self.note(note)
    }

    pub fn adjust_font_size(&mut self, level: u32) -> bool {
        let note = self.tracker.context_mut().website_settings.set_font_size(level);
        self.note(note)
    }

    /// Returns the new reduced-motion state.
    pub fn toggle_reduced_motion(&mut self) -> bool {
        let note = self.tracker.context_mut().website_settings.toggle_reduced_motion();
        self.note(Some(note));
        self.context().website_settings.reduced_motion
    }

    /// Apply time and session based display adjustments. Returns the system
    /// messages produced, empty when auto-optimize is off or nothing applied.
    pub fn auto_optimize(&mut self) -> Vec<BuddyMessage> {
        let now = self.clock.now();
        self.tracker.refresh(now);
        let session = self.tracker.session_elapsed(now);
        let hour = self.clock.hour();

        let notes = self
            .tracker
            .context_mut()
            .website_settings
            .auto_optimize(hour, session);

        let messages: Vec<BuddyMessage> = notes
            .into_iter()
            .map(|note| BuddyMessage::system(note, now))
            .collect();
        for message in &messages {
            self.remember(message.clone());
        }
        messages
    }

    pub fn style(&self) -> DisplayStyle {
        self.context().website_settings.style()
    }

    pub fn recommendations(&mut self) -> Vec<Recommendation> {
        let now = self.clock.now();
        self.tracker.refresh(now);
        recommendation::recommend(self.tracker.context(), self.tracker.session_elapsed(now))
    }

    pub fn apply_recommendation(&mut self, recommendation: &Recommendation) -> Mood {
        info!(action = %recommendation.action, "applying recommendation");
        self.track(&recommendation.applied_tag())
    }

    pub fn message_history(&self) -> impl Iterator<Item = &BuddyMessage> {
        self.messages.iter()
    }

    fn note(&mut self, note: Option<String>) -> bool {
        match note {
            Some(text) => {
                let message = BuddyMessage::system(text, self.clock.now());
                self.remember(message);
                true
            }
            None => false,
        }
    }

    fn remember(&mut self, message: BuddyMessage) {
        self.messages.push_back(message);
        while self.messages.len() > MESSAGE_HISTORY_LIMIT {
            self.messages.pop_front();
        }
    }
}
