//! Remindtop - natural-language stock reminders in your terminal.

mod api;
mod app;
mod cli;
mod config;
mod export;
mod models;
mod parser;
mod store;
mod ui;

use anyhow::Result;
use app::App;
use cli::Args;
use config::Config;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    if args.init_config {
        let Some(path) = Config::default_config_path() else {
            anyhow::bail!("Could not determine a config directory on this platform");
        };
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        Config::write_sample(&path)?;
        println!("Wrote sample config to {}", path.display());
        return Ok(());
    }

    // Load configuration
    let config = if let Some(ref path) = args.config {
        Config::load(path)?
    } else {
        Config::load_or_default()
    };

    // Create application state
    let mut app = App::new(&args, &config)?;

    if args.demo {
        app.seed_demo();
    }

    // Run one-shot or interactive mode
    if let Some(text) = args.one_shot_text() {
        run_once(&mut app, &text, args.export).await
    } else {
        run_session(&mut app).await
    }
}

/// One-shot mode: create a single reminder, print the result, exit.
///
/// Exits non-zero when no reminder was created, so scripts can tell a
/// rejected parse from a successful one.
async fn run_once(app: &mut App, text: &str, export: Option<cli::ExportFormat>) -> Result<()> {
    let before = app.store.reminders().len();
    app.create_reminder(text).await?;
    let created = app.store.reminders().len() > before;

    ui::render_notices(app);

    if let Some(format) = export {
        print!(
            "{}",
            export::export_reminders(app.store.reminders(), format.into())
        );
    } else {
        ui::render_reminders(app);
    }

    if !created {
        std::process::exit(1);
    }
    Ok(())
}

/// Interactive session: a line-based loop over stdin.
async fn run_session(app: &mut App) -> Result<()> {
    println!(
        "remindtop {} - natural-language stock reminders",
        env!("CARGO_PKG_VERSION")
    );
    println!("Type a reminder in plain English, or 'help' for commands.");
    println!();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while app.running {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        dispatch(app, line.trim()).await?;
        ui::render_notices(app);
    }

    Ok(())
}

/// Route one line of input: a known command, or reminder text.
async fn dispatch(app: &mut App, line: &str) -> Result<()> {
    if line.is_empty() {
        return Ok(());
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();

    match command.as_str() {
        "list" if parts.clone().next().is_none() => ui::render_reminders(app),
        "alerts" if parts.clone().next().is_none() => ui::render_alerts(app),
        "stats" => ui::render_stats(app),
        "help" | "?" => ui::render_help(),
        "quit" | "exit" | "q" => app.quit(),
        "demo" => app.seed_demo(),
        "export" => {
            let format = match parts.next() {
                Some("csv") => export::ExportFormat::Csv,
                Some("json") => export::ExportFormat::Json,
                Some("text") | None => export::ExportFormat::Text,
                Some(other) => {
                    println!("Unknown export format: {} (text, csv, json)", other);
                    return Ok(());
                }
            };
            print!("{}", export::export_reminders(app.store.reminders(), format));
        }
        "show" | "cancel" | "delete" | "read" | "dismiss" | "trigger" => {
            let Some(id) = parts.next().and_then(|t| t.parse::<u64>().ok()) else {
                println!("Usage: {} <id>", command);
                return Ok(());
            };
            match command.as_str() {
                "show" => ui::render_reminder_detail(app, id),
                "cancel" => app.cancel_reminder(id),
                "delete" => app.delete_reminder(id),
                "read" => app.read_alert(id),
                "dismiss" => app.dismiss_alert(id),
                "trigger" => {
                    let price = parts.next().and_then(|t| t.parse::<f64>().ok());
                    app.trigger_reminder(id, price);
                }
                _ => unreachable!(),
            }
        }
        // Anything else is reminder text ("list AAPL below $100" included,
        // which is why the bare commands above insist on no arguments).
        _ => app.create_reminder(line).await?,
    }

    Ok(())
}
