use std::io::{self, Write};

use anyhow::Result;
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::buddy::{lock, Buddy, SharedBuddy};
use crate::config::Config;
use crate::context::{BuddyFrequency, InteractionPattern, Preference};
use crate::recommendation::Recommendation;
use crate::scheduler::{BuddyEvent, BuddyScheduler};
use crate::selector::BuddyMessage;
use crate::status;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Status,
    Recommendations,
    Apply(usize),
    Track(String),
    Celebrate(String),
    Favorite(String),
    Pattern(InteractionPattern),
    Brightness(u32),
    Contrast(u32),
    FontSize(u32),
    Motion,
    Optimize,
    Style,
    History,
    BuddyChat(bool),
    Frequency(BuddyFrequency),
    Quit,
    /// Free text for Piper.
    Say(String),
    Empty,
    Invalid(String),
}

pub fn parse_command(input: &str) -> ShellCommand {
    let input = input.trim();
    if input.is_empty() {
        return ShellCommand::Empty;
    }
    if !input.starts_with('/') {
        return match input {
            "help" => ShellCommand::Help,
            "exit" | "quit" => ShellCommand::Quit,
            text => ShellCommand::Say(text.to_string()),
        };
    }

    let (name, arg) = match input.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (input, ""),
    };

    match name {
        "/help" => ShellCommand::Help,
        "/status" => ShellCommand::Status,
        "/recs" => ShellCommand::Recommendations,
        "/apply" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => ShellCommand::Apply(n),
            _ => ShellCommand::Invalid("usage: /apply N (from /recs)".to_string()),
        },
        "/track" => required(arg, "usage: /track TAG", ShellCommand::Track),
        "/celebrate" => required(arg, "usage: /celebrate NAME", ShellCommand::Celebrate),
        "/favorite" => required(arg, "usage: /favorite GAME", ShellCommand::Favorite),
        "/pattern" => match arg.parse::<InteractionPattern>() {
            Ok(pattern) => ShellCommand::Pattern(pattern),
            Err(e) => ShellCommand::Invalid(e),
        },
        "/brightness" => level(arg, "/brightness", ShellCommand::Brightness),
        "/contrast" => level(arg, "/contrast", ShellCommand::Contrast),
        "/font" => level(arg, "/font", ShellCommand::FontSize),
        "/motion" => ShellCommand::Motion,
        "/optimize" => ShellCommand::Optimize,
        "/style" => ShellCommand::Style,
        "/history" => ShellCommand::History,
        "/chat" => match arg {
            "on" => ShellCommand::BuddyChat(true),
            "off" => ShellCommand::BuddyChat(false),
            _ => ShellCommand::Invalid("usage: /chat on|off".to_string()),
        },
        "/frequency" => match arg.parse::<BuddyFrequency>() {
            Ok(freq) => ShellCommand::Frequency(freq),
            Err(e) => ShellCommand::Invalid(e),
        },
        "/quit" | "/exit" => ShellCommand::Quit,
        other => ShellCommand::Invalid(format!("unknown command: {}", other)),
    }
}

fn required(arg: &str, usage: &str, build: fn(String) -> ShellCommand) -> ShellCommand {
    if arg.is_empty() {
        ShellCommand::Invalid(usage.to_string())
    } else {
        build(arg.to_string())
    }
}

fn level(arg: &str, name: &str, build: fn(u32) -> ShellCommand) -> ShellCommand {
    match arg.parse::<u32>() {
        Ok(value) => build(value),
        Err(_) => ShellCommand::Invalid(format!("usage: {} N (percent)", name)),
    }
}

pub async fn handle_shell(config: Config) -> Result<()> {
    let timings = config.scheduler.clone();
    let buddy = Buddy::from_config(&config).into_shared();
    let mut shell = ShellMode::new(config, buddy.clone());

    let (handle, mut events) = BuddyScheduler::new(buddy, timings).spawn();
    let result = shell.run(&mut events).await;
    handle.shutdown().await;
    result
}

pub struct ShellMode {
    config: Config,
    buddy: SharedBuddy,
    last_recommendations: Vec<Recommendation>,
}

impl ShellMode {
    pub fn new(config: Config, buddy: SharedBuddy) -> Self {
        ShellMode {
            config,
            buddy,
            last_recommendations: Vec::new(),
        }
    }

    pub async fn run(
        &mut self,
        events: &mut tokio::sync::mpsc::UnboundedReceiver<BuddyEvent>,
    ) -> Result<()> {
        println!("{}", "🕹️  Piper is here! Your retro arcade buddy.".cyan().bold());
        println!("{}", "Type anything to chat, '/help' for commands, '/quit' to leave".dimmed());
        prompt()?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(input) => {
                            if !self.handle_input(&input)? {
                                break;
                            }
                        }
                        None => {
                            println!("\n{}", "See you next game!".cyan());
                            break;
                        }
                    }
                    prompt()?;
                }
                Some(event) = events.recv() => {
                    if self.show_event(event) {
                        prompt()?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Returns false when the shell should exit.
    fn handle_input(&mut self, input: &str) -> Result<bool> {
        match parse_command(input) {
            ShellCommand::Empty => {}
            ShellCommand::Quit => {
                println!("{}", "See you next game!".cyan());
                return Ok(false);
            }
            ShellCommand::Help => show_help(),
            ShellCommand::Status => {
                let context = lock(&self.buddy).snapshot();
                status::print_context(&context);
            }
            ShellCommand::Recommendations => {
                self.last_recommendations = lock(&self.buddy).recommendations();
                print_recommendations(&self.last_recommendations);
            }
            ShellCommand::Apply(n) => match self.last_recommendations.get(n - 1) {
                Some(rec) => {
                    let mood = lock(&self.buddy).apply_recommendation(rec);
                    println!("{} {} (mood: {})", "Applied".green().bold(), rec.action, mood.to_string().yellow());
                }
                None => println!("{}", "No such recommendation, run /recs first".yellow()),
            },
            ShellCommand::Track(tag) => {
                let mood = lock(&self.buddy).track(&tag);
                println!("{} {} (mood: {})", "Tracked".green(), tag, mood.to_string().yellow());
            }
            ShellCommand::Celebrate(name) => {
                let message = lock(&self.buddy).celebrate(&name);
                print_message(&message);
            }
            ShellCommand::Favorite(game) => {
                lock(&self.buddy).add_favorite_game(&game);
                println!("{} {}", "Added to favorites:".green(), game);
            }
            ShellCommand::Pattern(pattern) => {
                lock(&self.buddy).set_interaction_pattern(pattern);
                println!("Play style set to {}", format!("{:?}", pattern).to_lowercase().yellow());
            }
            ShellCommand::Brightness(value) => {
                let applied = lock(&self.buddy).adjust_brightness(value);
                self.after_display_change(applied, "brightness", "50-150")?;
            }
            ShellCommand::Contrast(value) => {
                let applied = lock(&self.buddy).adjust_contrast(value);
                self.after_display_change(applied, "contrast", "50-150")?;
            }
            ShellCommand::FontSize(value) => {
                let applied = lock(&self.buddy).adjust_font_size(value);
                self.after_display_change(applied, "font size", "80-120")?;
            }
            ShellCommand::Motion => {
                lock(&self.buddy).toggle_reduced_motion();
                self.after_display_change(true, "motion", "")?;
            }
            ShellCommand::Optimize => {
                let notes = lock(&self.buddy).auto_optimize();
                if notes.is_empty() {
                    println!("{}", "Nothing to optimize right now".dimmed());
                }
                for note in &notes {
                    print_message(note);
                }
                self.save_display()?;
            }
            ShellCommand::Style => println!("{}", lock(&self.buddy).style()),
            ShellCommand::History => self.show_history(),
            ShellCommand::BuddyChat(enabled) => {
                lock(&self.buddy).set_preference(Preference::BuddyChat(enabled));
                self.config.preferences.buddy_chat = enabled;
                self.config.save()?;
                println!("Buddy chat {}", if enabled { "on".green() } else { "off".red() });
            }
            ShellCommand::Frequency(freq) => {
                lock(&self.buddy).set_preference(Preference::BuddyFrequency(freq));
                self.config.preferences.buddy_frequency = freq;
                self.config.save()?;
                println!("Buddy frequency set to {}", freq.to_string().yellow());
            }
            ShellCommand::Say(text) => {
                let history = lock(&self.buddy).send_chat(&text);
                if let Some(reply) = history.last() {
                    println!("{}: {}", "Piper".green().bold(), reply.message);
                }
            }
            ShellCommand::Invalid(reason) => {
                println!("{}: {}", "Error".red().bold(), reason);
            }
        }
        Ok(true)
    }

    fn after_display_change(&mut self, applied: bool, what: &str, range: &str) -> Result<()> {
        if !applied {
            println!("{} {} must be within {}", "Ignored:".yellow().bold(), what, range);
            return Ok(());
        }
        if let Some(note) = lock(&self.buddy).message_history().last() {
            print_message(note);
        }
        self.save_display()
    }

    fn save_display(&mut self) -> Result<()> {
        self.config.display = lock(&self.buddy).context().website_settings.clone();
        self.config.save()
    }

    fn show_history(&self) {
        let buddy = lock(&self.buddy);
        let chat = buddy.chat_history();
        if chat.is_empty() {
            println!("{}", "No chat yet".yellow());
        }
        for entry in chat {
            let who = if entry.is_user() { "You".cyan().bold() } else { "Piper".green().bold() };
            println!("{} {}: {}", entry.timestamp.format("%H:%M:%S").to_string().dimmed(), who, entry.message);
        }
    }

    /// Returns true if anything was printed.
    fn show_event(&mut self, event: BuddyEvent) -> bool {
        match event {
            BuddyEvent::Message(message) => {
                println!();
                print_message(&message);
                true
            }
            BuddyEvent::Optimized { notes, style } => {
                if notes.is_empty() {
                    return false;
                }
                println!();
                for note in &notes {
                    print_message(note);
                }
                debug!(%style, "display optimized");
                self.config.display = lock(&self.buddy).context().website_settings.clone();
                true
            }
            BuddyEvent::Recommendations(recs) => {
                self.last_recommendations = recs;
                false
            }
            BuddyEvent::MessageExpired(id) => {
                debug!(id = %id, "message hidden");
                false
            }
            BuddyEvent::ContextUpdated(context) => {
                debug!(mood = %context.user_mood, "context refreshed");
                false
            }
        }
    }
}

fn prompt() -> io::Result<()> {
    print!("{}", "piper> ".green().bold());
    io::stdout().flush()
}

fn show_help() {
    println!("\n{}", "Piper Shell Commands".cyan().bold());
    println!();

    println!("{}", "Buddy:".yellow().bold());
    println!("  {} - Chat with Piper", "Any other input".green());
    println!("  {} - Show session context", "/status".green());
    println!("  {} - Show recommendations", "/recs".green());
    println!("  {} - Apply recommendation N", "/apply N".green());
    println!("  {} - Record an interaction", "/track TAG".green());
    println!("  {} - Celebrate an achievement", "/celebrate NAME".green());
    println!("  {} - Remember a favorite game", "/favorite GAME".green());
    println!(
        "  {} - Set play style",
        "/pattern casual|intensive|learning|social|grinding".green()
    );
    println!("  {} - Show chat history", "/history".green());
    println!("  {} - Turn buddy messages on or off", "/chat on|off".green());
    println!("  {} - How often Piper speaks up", "/frequency low|medium|high".green());
    println!();

    println!("{}", "Display:".yellow().bold());
    println!("  {} - Brightness 50-150", "/brightness N".green());
    println!("  {} - Contrast 50-150", "/contrast N".green());
    println!("  {} - Font size 80-120", "/font N".green());
    println!("  {} - Toggle reduced motion", "/motion".green());
    println!("  {} - Optimize for time and session", "/optimize".green());
    println!("  {} - Show the current style", "/style".green());
    println!();

    println!("  {} - Leave the shell", "/quit".green());
    println!();
}

fn print_message(message: &BuddyMessage) {
    println!(
        "{} {} {}",
        message.emotion.emoji(),
        "Piper:".green().bold(),
        message.message
    );
}

fn print_recommendations(recs: &[Recommendation]) {
    if recs.is_empty() {
        println!("{}", "No recommendations right now".yellow());
        return;
    }
    println!("\n{}", "Recommendations".cyan().bold());
    for (i, rec) in recs.iter().enumerate() {
        println!(
            "  {}. [{}] {} ({:.0}%)",
            i + 1,
            rec.kind.to_string().yellow(),
            rec.action,
            rec.confidence * 100.0
        );
        println!("     {}", rec.reason.dimmed());
        if let Some(comment) = &rec.buddy_comment {
            println!("     {}", comment);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert_eq!(parse_command("hey piper"), ShellCommand::Say("hey piper".to_string()));
        assert_eq!(parse_command("   "), ShellCommand::Empty);
        assert_eq!(parse_command("quit"), ShellCommand::Quit);
    }

    #[test]
    fn test_display_commands() {
        assert_eq!(parse_command("/brightness 120"), ShellCommand::Brightness(120));
        assert_eq!(parse_command("/font  90"), ShellCommand::FontSize(90));
        assert_eq!(parse_command("/motion"), ShellCommand::Motion);
        assert!(matches!(parse_command("/contrast high"), ShellCommand::Invalid(_)));
    }

    #[test]
    fn test_argument_commands() {
        assert_eq!(parse_command("/apply 2"), ShellCommand::Apply(2));
        assert!(matches!(parse_command("/apply 0"), ShellCommand::Invalid(_)));
        assert_eq!(
            parse_command("/celebrate high score"),
            ShellCommand::Celebrate("high score".to_string())
        );
        assert!(matches!(parse_command("/track"), ShellCommand::Invalid(_)));
        assert_eq!(parse_command("/chat off"), ShellCommand::BuddyChat(false));
        assert_eq!(
            parse_command("/frequency HIGH"),
            ShellCommand::Frequency(BuddyFrequency::High)
        );
        assert_eq!(
            parse_command("/favorite tap racer"),
            ShellCommand::Favorite("tap racer".to_string())
        );
        assert_eq!(
            parse_command("/pattern grinding"),
            ShellCommand::Pattern(InteractionPattern::Grinding)
        );
        assert!(matches!(parse_command("/pattern afk"), ShellCommand::Invalid(_)));
        assert!(matches!(parse_command("/dance"), ShellCommand::Invalid(_)));
    }
}
