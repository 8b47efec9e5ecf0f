//! things3 CLI: run one bridge operation and print the result.
//!
//! Queries print a JSON array on stdout; mutations print nothing.
//!
//! Logging: set `RUST_LOG=things3_bridge=debug` (or pass `--verbose`) to see
//! bridge logs on stderr.

mod cli;
mod settings;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use things3_bridge::{Script, ThingsBridge, script};

use crate::cli::{Cli, Command};
use crate::settings::{Settings, load_settings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "things3=debug,things3_bridge=debug"
        } else {
            "things3=info,things3_bridge=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let flags = Settings {
        interpreter: cli.interpreter.clone(),
        timeout_secs: cli.timeout_secs,
        ..Settings::default()
    };
    let config = load_settings(cli.config.as_deref())?
        .merge(flags)
        .into_bridge_config();
    tracing::debug!(?config, "bridge config resolved");

    if cli.print_script {
        return print_script(&render(&cli.command, &config.application));
    }

    let bridge = ThingsBridge::with_config(config);
    run(&bridge, cli.command)
}

fn run(bridge: &ThingsBridge, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Inbox => print_json(&bridge.get_inbox_tasks().context("inbox query failed")?),
        Command::Today => print_json(&bridge.get_todays_tasks().context("today query failed")?),
        Command::Projects => print_json(&bridge.get_projects().context("projects query failed")?),
        Command::Areas => print_json(&bridge.get_areas().context("areas query failed")?),
        Command::Selected => print_json(
            &bridge
                .get_current_selected_todos()
                .context("selection query failed")?,
        ),
        Command::AssignProject { task, project } => bridge
            .assign_project(&task, &project)
            .with_context(|| format!("failed to assign {task:?} to project {project:?}")),
        Command::AssignArea { task, area } => bridge
            .assign_area(&task, &area)
            .with_context(|| format!("failed to assign {task:?} to area {area:?}")),
        Command::SetTags { task, tags } => bridge
            .set_tags(&task, tags.as_slice())
            .with_context(|| format!("failed to set tags on {task:?}")),
    }
}

fn render(command: &Command, application: &str) -> Script {
    match command {
        Command::Inbox => script::render_query_inbox_in(application),
        Command::Today => script::render_query_today_in(application),
        Command::Projects => script::render_query_projects_in(application),
        Command::Areas => script::render_query_areas_in(application),
        Command::Selected => script::render_query_selected_in(application),
        Command::AssignProject { task, project } => {
            script::render_assign_project_in(application, task, project)
        }
        Command::AssignArea { task, area } => script::render_assign_area_in(application, task, area),
        Command::SetTags { task, tags } => {
            script::render_set_tags_in(application, task, tags.as_slice())
        }
    }
}

fn print_script(script: &Script) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(script.source.as_bytes())?;
    writeln!(stdout, "// argv: {}", serde_json::to_string(&script.args)?)?;
    Ok(())
}

fn print_json<T: Serialize>(records: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, records)?;
    writeln!(stdout)?;
    Ok(())
}
