use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use treez::api::{ItemError, ListOutcome, PasteRequest, SaveOptions, TreezApi};
use treez::config::TreezConfig;
use treez::error::{Result, TreezError};
use treez::guard::Root;
use treez::model::{Direction, NodeKind};
use treez::ordinal;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, MoveDirection};

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    if let Commands::Config { .. } = &cli.command {
        return handle_config(&cli);
    }

    let api = TreezApi::new(resolve_root(&cli)?);
    match &cli.command {
        Commands::Save {
            folder,
            filename,
            content,
            rename_to,
            split,
        } => {
            let content = match content {
                Some(c) => c.clone(),
                None => read_stdin()?,
            };
            let opts = SaveOptions {
                new_file_name: rename_to.clone(),
                split: *split,
            };
            let outcome = api.save_file(folder, filename, &content, &opts)?;
            emit(&cli, &outcome, outcome.success, &outcome.message, &outcome.errors)
        }
        Commands::Rename {
            folder,
            old_name,
            new_name,
        } => {
            let outcome = api.rename_folder(folder, old_name, new_name)?;
            emit(&cli, &outcome, outcome.success, &outcome.message, &[])
        }
        Commands::Delete { folder, names } => {
            let outcome = api.delete(folder, names)?;
            emit(&cli, &outcome, outcome.success, &outcome.message, &outcome.errors)
        }
        Commands::Move {
            folder,
            filename,
            direction,
        } => {
            let direction = match direction {
                MoveDirection::Up => Direction::Up,
                MoveDirection::Down => Direction::Down,
            };
            let outcome = api.move_up_or_down(folder, filename, direction)?;
            if !cli.json {
                println!(
                    "{} is now {}, {} is now {}",
                    outcome.moved.from.dimmed(),
                    outcome.moved.to,
                    outcome.displaced.from.dimmed(),
                    outcome.displaced.to
                );
            }
            emit(&cli, &outcome, outcome.success, &outcome.message, &[])
        }
        Commands::Paste {
            folder,
            items,
            after,
        } => {
            let request = PasteRequest {
                items: items.clone(),
                target_ordinal: *after,
            };
            let outcome = api.paste(folder, &request)?;
            if !cli.json {
                for moved in &outcome.moved {
                    println!("{} {} {}", moved.from.dimmed(), "→".dimmed(), moved.to);
                }
            }
            emit(&cli, &outcome, outcome.success, &outcome.message, &outcome.errors)
        }
        Commands::Join { folder, filenames } => {
            let outcome = api.join_files(folder, filenames)?;
            emit(&cli, &outcome, outcome.success, &outcome.message, &outcome.errors)
        }
        Commands::MakeFolder {
            folder,
            filename,
            folder_name,
            keep_content,
        } => {
            let outcome = api.make_folder(folder, filename, folder_name, keep_content.as_deref())?;
            emit(&cli, &outcome, outcome.success, &outcome.message, &[])
        }
        Commands::List { folder, recursive } => {
            let outcome = api.list(folder, *recursive)?;
            if cli.json {
                print_json(&outcome)?;
            } else {
                print_listing(&outcome);
            }
            Ok(true)
        }
        Commands::Doctor { folder, fix } => {
            let outcome = api.doctor(folder, *fix)?;
            if !cli.json {
                for path in &outcome.temp_leftovers {
                    eprintln!("  {} {}", "temp leftover:".yellow(), path.display());
                }
                for dup in &outcome.duplicate_ordinals {
                    eprintln!(
                        "  {} {} in {}: {}",
                        "ordinal collision:".yellow(),
                        dup.ordinal,
                        if dup.folder.as_os_str().is_empty() {
                            "<root>".to_string()
                        } else {
                            dup.folder.display().to_string()
                        },
                        dup.names.join(", ")
                    );
                }
            }
            emit(&cli, &outcome, outcome.success, &outcome.message, &[])
        }
        Commands::Config { .. } => unreachable!("handled before root resolution"),
    }
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(TreezError::Io)?;
    Ok(content)
}

/// Prints the outcome (JSON or human) and reports overall success.
fn emit<T: Serialize>(
    cli: &Cli,
    outcome: &T,
    success: bool,
    message: &str,
    errors: &[ItemError],
) -> Result<bool> {
    if cli.json {
        print_json(outcome)?;
        return Ok(success);
    }
    if success {
        println!("{}", message.green());
    } else {
        eprintln!("{}", message.yellow());
    }
    for item in errors {
        eprintln!("  {} {}", format!("{}:", item.name).red(), item.error);
    }
    Ok(success)
}

fn print_json<T: Serialize>(outcome: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_listing(outcome: &ListOutcome) {
    if outcome.entries.is_empty() {
        println!("Empty folder.");
    }
    for entry in &outcome.entries {
        let indent = "  ".repeat(entry.depth);
        let suffix = match entry.node.kind {
            NodeKind::Folder => "/",
            NodeKind::File => "",
        };
        let prefix = ordinal::format(entry.node.ordinal);
        let plain = format!("{}{}{}{}", indent, prefix, entry.node.base, suffix);
        let padding = LINE_WIDTH.saturating_sub(plain.width() + TIME_WIDTH);

        let name = match entry.node.kind {
            NodeKind::Folder => format!("{}{}", entry.node.base.bold(), suffix),
            NodeKind::File => format!("{}{}", entry.node.base, suffix),
        };
        let time = entry
            .node
            .modified
            .map(format_time_ago)
            .unwrap_or_default();
        println!(
            "{}{}{}{}{}",
            indent,
            prefix.dimmed(),
            name,
            " ".repeat(padding),
            time.dimmed()
        );
    }
    if !outcome.unordered.is_empty() {
        println!();
        println!("{}", "Outside the sequence:".dimmed());
        for name in &outcome.unordered {
            println!("  {}", name.dimmed());
        }
    }
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn resolve_root(cli: &Cli) -> Result<Root> {
    if let Some(path) = &cli.root {
        let absolute = if path.is_absolute() {
            path.clone()
        } else {
            std::env::current_dir().map_err(TreezError::Io)?.join(path)
        };
        return Root::new(absolute);
    }

    let config = TreezConfig::load(config_dir()?)?;
    let path = match &cli.store {
        Some(key) => config.resolve(key)?,
        None => config.resolve_default()?,
    };
    Root::new(path.clone())
}

fn config_dir() -> Result<PathBuf> {
    // Overridable so tests (and scripts) can pin the registry location.
    if let Ok(dir) = std::env::var("TREEZ_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let dirs = ProjectDirs::from("com", "treez", "treez").ok_or_else(|| {
        TreezError::BadRequest("could not determine a config directory".to_string())
    })?;
    Ok(dirs.config_dir().to_path_buf())
}

fn handle_config(cli: &Cli) -> Result<bool> {
    let (key, path, default, unset) = match &cli.command {
        Commands::Config {
            key,
            path,
            default,
            unset,
        } => (key.as_deref(), path.clone(), *default, *unset),
        _ => unreachable!(),
    };

    let dir = config_dir()?;
    let mut config = TreezConfig::load(&dir)?;

    match (key, path) {
        (None, _) => {
            if cli.json {
                print_json(&config)?;
                return Ok(true);
            }
            if config.roots.is_empty() {
                println!("No roots configured. Add one with: tz config <key> <path>");
                return Ok(true);
            }
            for (name, root_path) in &config.roots {
                let marker = if config.default_root.as_deref() == Some(name.as_str()) {
                    " (default)"
                } else {
                    ""
                };
                println!("{} = {}{}", name, root_path.display(), marker.dimmed());
            }
            Ok(true)
        }
        (Some(key), None) if unset => {
            if config.remove_root(key) {
                config.save(&dir)?;
                println!("{}", format!("Removed root {}", key).green());
                Ok(true)
            } else {
                eprintln!("{}", format!("No root named {}", key).yellow());
                Ok(false)
            }
        }
        (Some(key), None) if default => {
            // Only an existing key can become the default.
            config.resolve(key)?;
            config.default_root = Some(key.to_string());
            config.save(&dir)?;
            println!("{}", format!("Default root is now {}", key).green());
            Ok(true)
        }
        (Some(key), None) => {
            let root_path = config.resolve(key)?;
            println!("{} = {}", key, root_path.display());
            Ok(true)
        }
        (Some(key), Some(path)) => {
            let absolute = if path.is_absolute() {
                path
            } else {
                std::env::current_dir().map_err(TreezError::Io)?.join(path)
            };
            config.set_root(key, absolute.clone());
            if default {
                config.default_root = Some(key.to_string());
            }
            config.save(&dir)?;
            println!(
                "{}",
                format!("Root {} set to {}", key, absolute.display()).green()
            );
            Ok(true)
        }
    }
}
