use anyhow::Result;
use colored::*;
use rand::thread_rng;

use crate::buddy::Buddy;
use crate::config::Config;
use crate::context::Context;
use crate::identity::IdentityStore;

pub fn handle_status(config: &Config) -> Result<()> {
    let identity = IdentityStore::new(config.identity_file()).load_or_create(&mut thread_rng());
    let mut buddy = Buddy::from_config(config);
    let context = buddy.snapshot();

    println!("{}", "Piper Status".cyan().bold());
    println!("Player: {} ({})", identity.username.yellow(), identity.id.dimmed());
    println!("Data dir: {}", config.data_dir.display());
    println!();
    print_context(&context);

    let recs = buddy.recommendations();
    if !recs.is_empty() {
        println!("\n{}", "Suggestions".cyan().bold());
        for rec in recs {
            println!("  {} {}", format!("[{}]", rec.kind).yellow(), rec.action);
        }
    }

    Ok(())
}

pub fn print_context(context: &Context) {
    println!("{}", "Session".cyan().bold());
    println!("Mood: {}", context.user_mood.to_string().yellow());
    println!("Time of day: {}", context.time_of_day);
    println!(
        "Session: {}m {}s",
        context.session_duration_secs / 60,
        context.session_duration_secs % 60
    );
    println!("Pattern: {:?}", context.interaction_pattern);
    println!("Interactions: {}", context.recent_interactions.len());

    if !context.game_history.is_empty() {
        println!("Games: {}", context.game_history.join(", "));
    }
    if !context.favorite_games.is_empty() {
        println!("Favorites: {}", context.favorite_games.join(", "));
    }
    if !context.achievements.is_empty() {
        println!("Achievements: {}", context.achievements.join(", ").green());
    }

    let prefs = &context.preferences;
    println!("\n{}", "Preferences".cyan().bold());
    println!("Theme: {:?}", prefs.theme);
    println!("Animations: {:?}", prefs.animations);
    println!("Buddy chat: {}", if prefs.buddy_chat { "on".green() } else { "off".red() });
    println!("Buddy frequency: {}", prefs.buddy_frequency);

    let display = &context.website_settings;
    println!("\n{}", "Display".cyan().bold());
    println!("Brightness: {}%", display.brightness);
    println!("Contrast: {}%", display.contrast);
    println!("Font size: {}%", display.font_size);
    println!("Reduced motion: {}", display.reduced_motion);
    println!("Auto optimize: {}", display.auto_optimize);
}
