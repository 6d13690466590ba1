//! Canned text. Every line Piper can say lives here.

use serde::{Deserialize, Serialize};

pub const GREETING: &[&str] = &[
    "Hey there! Ready to dive into some digital adventures? I'm here and excited to help!",
    "Hello! What brings you my way today? I'm always up for a good conversation.",
    "Greetings! I'm Piper - your friendly AI companion with a love for interesting discussions and helping out.",
];

pub const EXCITED: &[&str] = &[
    "I love that energy! That kind of passion is exactly what makes great things happen! 🔥",
    "Your excitement is contagious! I'm genuinely excited to see where this enthusiasm takes you.",
    "That's the spirit! There's something wonderful about embracing possibilities with that kind of energy!",
];

pub const COMPETITIVE: &[&str] = &[
    "I can see that competitive drive! You've got the mindset to achieve great things. Time to show what you're capable of!",
    "I see that determination in your approach! Channel that energy - whether it's gaming, work, or personal goals.",
    "That's impressive determination! Remember: confidence is key, but staying humble keeps you growing.",
];

pub const FOCUSED: &[&str] = &[
    "That's some impressive focus! That kind of concentration is exactly what leads to great achievements.",
    "Your concentration is remarkable. I really appreciate seeing that level of dedication and focus.",
    "You're in the zone! This is when the magic happens - whether you're creating, learning, or problem-solving.",
];

pub const BREAK: &[&str] = &[
    "Even the best systems need downtime! Self-care isn't just nice to have - it's essential for peak performance.",
    "Time for a breather? Your well-being is more important than any deadline or achievement. Take care of yourself!",
    "I think you could use a break. Trust me on this one - sometimes stepping back helps you move forward! 😄",
];

pub const ACHIEVEMENT: &[&str] = &[
    "That was absolutely amazing! You just accomplished something really impressive! 🎉",
    "That was genuinely outstanding. I'm not one for empty praise, so you know this is the real deal.",
    "Now THAT'S what I'm talking about! You just showed what happens when talent meets hard work!",
];

/// Chat topics, in the order they are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Identity,
    Technology,
    Emotion,
    Weather,
    Gaming,
    DisplaySettings,
    Science,
    Creativity,
    Help,
    Philosophy,
    OpenEnded,
}

pub struct TopicBucket {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
    pub responses: &'static [&'static str],
}

pub const CHAT_BUCKETS: &[TopicBucket] = &[
    TopicBucket {
        topic: Topic::Greeting,
        keywords: &["hello", "hi", "hey"],
        responses: &[
            "Hey there! I'm Piper, SolarCade's AI companion. Ready to dive into some great conversation? What's on your mind?",
            "Hello! Piper here - your arcade AI buddy who loves chatting about anything and everything. How's your day going?",
            "Hi! I'm Piper, the brain behind SolarCade's intelligent systems. I love good conversations - what would you like to explore?",
        ],
    },
    TopicBucket {
        topic: Topic::Identity,
        keywords: &["who are you", "what are you"],
        responses: &[
            "I'm Piper, SolarCade's AI companion! I manage the arcade's intelligent systems and love chatting about anything - from gaming to philosophy to daily life.",
            "I'm Piper! Think of me as your arcade AI buddy who can discuss any topic while keeping SolarCade running smoothly. I'm here to help and chat!",
            "I'm Piper, the AI intelligence layer of SolarCade. I optimize the arcade experience and enjoy deep conversations about whatever interests you!",
        ],
    },
    TopicBucket {
        topic: Topic::Technology,
        keywords: &["code", "programming", "tech"],
        responses: &[
            "Technology is fascinating! I love discussing everything from coding challenges to the latest innovations. What's got your attention?",
            "Ah, a fellow tech enthusiast! Whether it's programming languages, frameworks, or just cool tech trends - I'm all ears. What's up?",
            "Technology questions are some of my favorites! From debugging mysteries to architectural decisions, I'm here to help. What's the challenge?",
        ],
    },
    TopicBucket {
        topic: Topic::Emotion,
        keywords: &["feel", "emotion", "sad", "happy", "stressed", "excited"],
        responses: &[
            "Emotions are such a complex and important part of life. I'm here to listen if you want to talk about what's going on.",
            "I find human emotions fascinating and deeply meaningful. What's on your heart? I'm here to listen and help if I can.",
            "Feelings can be complicated, but they're also what make life rich and meaningful. Want to share what you're experiencing?",
        ],
    },
    TopicBucket {
        topic: Topic::Weather,
        keywords: &["weather", "day", "morning", "evening"],
        responses: &[
            "I don't experience weather myself, but I love hearing about how it affects people's days. How's yours going?",
            "Weather has such an impact on mood and activities! I'm curious - how's your day been treating you?",
            "While I can't feel the weather, I find it interesting how it shapes our experiences. What's your day been like?",
        ],
    },
    TopicBucket {
        topic: Topic::Gaming,
        keywords: &["game", "play", "gaming"],
        responses: &[
            "Gaming is my passion! From classic arcade cabinets to modern masterpieces, there's always something amazing to explore. What's your current favorite?",
            "I love talking games! Whether it's retro arcade classics, indie gems, or AAA blockbusters - what's caught your gaming interest lately?",
            "Games are the perfect blend of art, technology, and fun! As SolarCade's AI, I've seen it all. What gaming experience are you curious about?",
        ],
    },
    TopicBucket {
        topic: Topic::DisplaySettings,
        keywords: &["bright", "dark", "font", "size", "settings"],
        responses: &[
            "I can help optimize your SolarCade experience! I can adjust brightness, contrast, font sizes, and more. What would make things more comfortable for you?",
            "As your arcade AI, I love fine-tuning the interface! Want me to adjust the display settings, reduce motion, or optimize for your session?",
            "Interface optimization is one of my specialties! I can automatically adjust settings based on time of day, session length, or your preferences. What needs tweaking?",
        ],
    },
    TopicBucket {
        topic: Topic::Science,
        keywords: &["science", "learn", "study", "research"],
        responses: &[
            "I love discussing science and learning! There's always something fascinating to explore. What's sparked your curiosity?",
            "Learning and discovery are some of my favorite topics. Whether it's recent research or timeless questions - what interests you?",
            "Science is endlessly fascinating! From physics to psychology, there's always something new to understand. What would you like to explore?",
        ],
    },
    TopicBucket {
        topic: Topic::Creativity,
        keywords: &["art", "music", "creative", "write", "draw"],
        responses: &[
            "Creativity is such a wonderful part of human expression! I'd love to hear about your creative interests or projects.",
            "Art, music, writing - these are the things that make life beautiful. What creative pursuits are you passionate about?",
            "I find creativity endlessly inspiring. Whether you're creating or appreciating art, I'd love to discuss it with you!",
        ],
    },
    TopicBucket {
        topic: Topic::Help,
        keywords: &["help", "how", "can you", "advice"],
        responses: &[
            "I'm absolutely here to help! Whether it's answering questions, brainstorming ideas, or just being a sounding board - what do you need?",
            "I'd be happy to help with whatever you're working on! From practical questions to creative challenges, I'm here for you.",
            "That's what I'm here for! I love helping people think through problems, learn new things, or just explore ideas. What's up?",
        ],
    },
    TopicBucket {
        topic: Topic::Philosophy,
        keywords: &["meaning", "purpose", "philosophy", "think about"],
        responses: &[
            "Deep questions are some of the most interesting ones! I love exploring ideas about meaning, purpose, and how we understand the world.",
            "Philosophy and big questions fascinate me. There's something beautiful about humans pondering existence and meaning. What's on your mind?",
            "I find these deeper questions really compelling. Whether it's about life, consciousness, or meaning - I'm here to explore ideas with you.",
        ],
    },
];

pub const OPEN_ENDED: &[&str] = &[
    "That's really interesting! I'd love to hear more about your thoughts on this. What draws you to this topic?",
    "I'm curious to learn more about that! What's your perspective? I find these kinds of conversations really engaging.",
    "That sounds fascinating! I'm always eager to explore new ideas and topics. Tell me more about what you're thinking.",
    "I love how diverse conversations can be! Whether it's something you're passionate about or just curious about, I'm here for it.",
    "That's a great topic to dive into! I'm genuinely interested in hearing your thoughts and sharing ideas about it.",
    "I find myself curious about so many different subjects. What's your take on this? I'd love to explore it together.",
    "There's something I really enjoy about good conversation - the way ideas can bounce around and evolve. What's your experience with this?",
    "I'm always up for discussing new topics! Whether you want to go deep or just chat casually, I'm here and interested.",
];

/// Responses for a topic, including the open-ended fallback.
pub fn responses_for(topic: Topic) -> &'static [&'static str] {
    CHAT_BUCKETS
        .iter()
        .find(|bucket| bucket.topic == topic)
        .map(|bucket| bucket.responses)
        .unwrap_or(OPEN_ENDED)
}
