//! Command-line front end.
//!
//! Validates user input, calls the [`ProfileService`], and reports every
//! outcome. Anything printed as success has been persisted and applied.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::activation;
use crate::config::AppConfig;
use crate::service::{ProfileService, ProfileUpdate};
use crate::store::{ProfileSelector, ProfileStore};

#[derive(Debug, Parser)]
#[command(name = "ccswitch", version, about = "Switch between Claude API profiles")]
pub struct Cli {
    /// Path to config.toml (default: platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List saved profiles.
    List,
    /// Show the active profile.
    Current,
    /// Save a new profile (inactive until switched to).
    Add {
        name: String,
        base_url: String,
        /// API token; `-` reads it from stdin.
        token: String,
    },
    /// Change a profile; re-applies it if it is active.
    Edit {
        /// Index, id, or name; prefix with `name:` for names that look like an index or id.
        #[arg(allow_negative_numbers = true)]
        profile: ProfileSelector,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
        /// New token; `-` reads it from stdin.
        #[arg(long)]
        token: Option<String>,
    },
    /// Activate a profile.
    Switch {
        /// Index, id, or name; prefix with `name:` for names that look like an index or id.
        #[arg(allow_negative_numbers = true)]
        profile: ProfileSelector,
    },
    /// Delete an inactive profile.
    Delete {
        /// Index, id, or name; prefix with `name:` for names that look like an index or id.
        #[arg(allow_negative_numbers = true)]
        profile: ProfileSelector,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Re-apply the active profile.
    Apply,
}

/// Load config, open the store, and run one command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let service = open_service(&config)?;
    execute(&service, cli.command).await
}

/// Build the service described by `config`.
pub fn open_service(config: &AppConfig) -> Result<ProfileService> {
    let activator = activation::from_config(config)?;
    let path = match config.profiles_path() {
        Some(path) => path,
        None => ProfileStore::default_path().context("Could not determine the home directory")?,
    };
    let store = ProfileStore::open(&path, activator)
        .with_context(|| format!("Failed to open profile store at {}", path.display()))?;
    Ok(ProfileService::new(store))
}

async fn execute(service: &ProfileService, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let profiles = service.profiles();
            if profiles.is_empty() {
                println!("No profiles configured. Add one with `ccswitch add`.");
            }
            for (index, profile) in profiles.iter().enumerate() {
                let marker = if profile.is_active { "✓" } else { " " };
                println!(
                    "{} {:>2}  {}  {}  {}",
                    marker,
                    index,
                    profile.name,
                    profile.base_url,
                    profile.token.masked()
                );
            }
        }
        Command::Current => match service.active() {
            Some(profile) => println!("Active profile: {}", profile.name),
            None => println!("Active profile: none"),
        },
        Command::Add {
            name,
            base_url,
            token,
        } => {
            let token = read_token_if_stdin(token)?;
            require_non_empty(&[("name", &name), ("base URL", &base_url), ("token", &token)])?;
            let (index, _) = service.add(name.as_str(), base_url, token)?;
            println!("Added profile '{}' at index {}.", name, index);
            println!("Run `ccswitch switch {}` to activate it.", index);
        }
        Command::Edit {
            profile,
            name,
            base_url,
            token,
        } => {
            let token = token.map(read_token_if_stdin).transpose()?;
            for (field, value) in [("name", &name), ("base URL", &base_url), ("token", &token)] {
                if let Some(value) = value {
                    require_non_empty(&[(field, value)])?;
                }
            }
            let updated = service
                .edit(
                    profile,
                    ProfileUpdate {
                        name,
                        base_url,
                        token,
                    },
                )
                .await?;
            if updated.is_active {
                println!("Profile '{}' updated and re-applied.", updated.name);
                println!("{}", service.activation_target());
            } else {
                println!("Profile '{}' updated.", updated.name);
            }
        }
        Command::Switch { profile } => {
            let active = service.switch(profile).await?;
            println!("Switched to profile '{}'.", active.name);
            println!("{}", service.activation_target());
        }
        Command::Delete { profile, yes } => {
            let target = service.get(&profile)?;
            if !yes && !confirm(&format!("Delete profile '{}'?", target.name))? {
                println!("Cancelled.");
                return Ok(());
            }
            let removed = service.delete(&profile)?;
            println!("Deleted profile '{}'.", removed.name);
        }
        Command::Apply => {
            let active = service.reapply().await?;
            println!("Re-applied profile '{}'.", active.name);
            println!("{}", service.activation_target());
        }
    }
    Ok(())
}

fn require_non_empty(fields: &[(&str, &String)]) -> Result<()> {
    for (field, value) in fields {
        if value.trim().is_empty() {
            bail!("The {} must not be empty", field);
        }
    }
    Ok(())
}

fn read_token_if_stdin(token: String) -> Result<String> {
    if token != "-" {
        return Ok(token);
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
