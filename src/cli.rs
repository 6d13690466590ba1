use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rand::thread_rng;

use crate::buddy::Buddy;
use crate::config::Config;
use crate::identity::IdentityStore;

#[derive(Parser)]
#[command(name = "piper")]
#[command(about = "Piper, a retro arcade buddy for your terminal")]
#[command(version)]
pub struct Args {
    /// Data directory (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Fixed random seed for repeatable replies
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one message to Piper
    Chat {
        /// Message text
        message: String,
    },
    /// Interactive session with timed buddy messages
    Shell,
    /// Show session, preference and display state
    Status,
    /// Adjust display settings
    Display {
        #[command(subcommand)]
        command: DisplayCommands,
    },
    /// Manage the local player identity
    Identity {
        #[command(subcommand)]
        command: IdentityCommands,
    },
}

#[derive(Subcommand)]
pub enum DisplayCommands {
    /// Brightness percent, 50-150
    Brightness { value: u32 },
    /// Contrast percent, 50-150
    Contrast { value: u32 },
    /// Font size percent, 80-120
    Font { value: u32 },
    /// Toggle reduced motion
    Motion,
    /// Apply time and session based adjustments
    Optimize,
}

#[derive(Subcommand)]
pub enum IdentityCommands {
    Show,
    Login {
        username: String,
    },
    Register {
        username: String,
        email: String,
    },
    Logout,
}

pub fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::new(args.data_dir.clone())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

pub fn handle_chat(config: &Config, message: &str) -> Result<()> {
    let mut buddy = Buddy::from_config(config);
    let reply = buddy.chat_reply(message);
    println!("{}: {}", "You".cyan().bold(), message);
    println!("{} {}: {}", reply.emotion.emoji(), "Piper".green().bold(), reply.message);
    Ok(())
}

pub fn handle_display(config: &mut Config, command: DisplayCommands) -> Result<()> {
    let mut buddy = Buddy::from_config(config);

    let (applied, range) = match command {
        DisplayCommands::Brightness { value } => (buddy.adjust_brightness(value), "50-150"),
        DisplayCommands::Contrast { value } => (buddy.adjust_contrast(value), "50-150"),
        DisplayCommands::Font { value } => (buddy.adjust_font_size(value), "80-120"),
        DisplayCommands::Motion => {
            buddy.toggle_reduced_motion();
            (true, "")
        }
        DisplayCommands::Optimize => {
            let notes = buddy.auto_optimize();
            if notes.is_empty() {
                println!("{}", "Nothing to optimize right now".dimmed());
            }
            (true, "")
        }
    };

    if !applied {
        bail!("value out of range, expected {}", range);
    }

    for note in buddy.message_history() {
        println!("{} {}", "Piper:".green().bold(), note.message);
    }
    println!("{}", buddy.style());

    config.display = buddy.context().website_settings.clone();
    config.save().context("Failed to save display settings")?;
    Ok(())
}

pub fn handle_identity(config: &Config, command: IdentityCommands) -> Result<()> {
    let store = IdentityStore::new(config.identity_file());
    let mut rng = thread_rng();

    match command {
        IdentityCommands::Show => {
            let identity = store.load_or_create(&mut rng);
            println!("{}", "Player".cyan().bold());
            println!("Id: {}", identity.id);
            println!("Name: {}", identity.username.yellow());
            if let Some(email) = &identity.email {
                println!("Email: {}", email);
            }
            if let Some(avatar) = &identity.avatar {
                println!("Avatar: {}", avatar.dimmed());
            }
            if identity.is_guest() {
                println!("{}", "Playing as guest".dimmed());
            }
        }
        IdentityCommands::Login { username } => {
            let identity = store.login(&username, &mut rng)?;
            println!("✅ Logged in as {}", identity.username.green());
        }
        IdentityCommands::Register { username, email } => {
            let identity = store.register(&username, &email, &mut rng)?;
            println!("✅ Registered {} ({})", identity.username.green(), email);
        }
        IdentityCommands::Logout => {
            store.logout()?;
            println!("Logged out, a new guest will be created next time");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_display_with_global_flags() {
        let args = Args::parse_from(["piper", "display", "brightness", "120", "--seed", "7"]);
        assert_eq!(args.seed, Some(7));
        assert!(matches!(
            args.command,
            Commands::Display {
                command: DisplayCommands::Brightness { value: 120 }
            }
        ));
    }

    #[test]
    fn test_display_out_of_range_is_rejected_and_not_saved() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(handle_display(&mut config, DisplayCommands::Brightness { value: 40 }).is_err());
        handle_display(&mut config, DisplayCommands::Contrast { value: 70 }).unwrap();

        let reloaded = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reloaded.display.contrast, 70);
        assert_eq!(reloaded.display.brightness, 100);
    }
}
