use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "things3")]
#[command(about = "Query and update Things3 through osascript. Queries print JSON to stdout.")]
pub(crate) struct Cli {
    /// Settings file (default: $XDG_CONFIG_HOME/things3-bridge/settings.yaml).
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Interpreter binary (overrides settings; default: osascript).
    #[arg(long, global = true)]
    pub(crate) interpreter: Option<String>,

    /// Seconds before a hung interpreter is killed; 0 waits forever.
    #[arg(long, global = true)]
    pub(crate) timeout_secs: Option<u64>,

    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    /// Print the rendered script and its arguments instead of running it.
    #[arg(long, global = true)]
    pub(crate) print_script: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// List to-dos in the Inbox.
    Inbox,
    /// List to-dos in Today.
    Today,
    /// List projects.
    Projects,
    /// List areas.
    Areas,
    /// List to-dos selected in the app window.
    Selected,
    /// Move every to-do with this exact title into a project.
    AssignProject {
        /// To-do title (exact match; all matches are moved).
        #[arg(long)]
        task: String,
        /// Target project title.
        #[arg(long)]
        project: String,
    },
    /// Move every to-do with this exact title into an area.
    AssignArea {
        /// To-do title (exact match; all matches are moved).
        #[arg(long)]
        task: String,
        /// Target area title.
        #[arg(long)]
        area: String,
    },
    /// Replace the tags of every to-do with this exact title. No tags clears them.
    SetTags {
        /// To-do title (exact match).
        #[arg(long)]
        task: String,
        /// Tag names.
        tags: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from(["things3", "today", "--verbose"]).unwrap();
        assert_eq!(cli.command, Command::Today);
        assert!(cli.verbose);
        assert!(!cli.print_script);
    }

    #[test]
    fn test_parse_set_tags() {
        let cli =
            Cli::try_parse_from(["things3", "set-tags", "--task", "Buy milk", "Errand", "Quick"])
                .unwrap();
        assert_eq!(
            cli.command,
            Command::SetTags {
                task: "Buy milk".to_string(),
                tags: vec!["Errand".to_string(), "Quick".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "things3",
            "assign-project",
            "--task",
            "Buy milk",
            "--project",
            "Groceries",
            "--timeout-secs",
            "0",
            "--interpreter",
            "/usr/bin/osascript",
        ])
        .unwrap();
        assert_eq!(cli.timeout_secs, Some(0));
        assert_eq!(cli.interpreter.as_deref(), Some("/usr/bin/osascript"));
    }

    #[test]
    fn test_assign_area_requires_area() {
        assert!(Cli::try_parse_from(["things3", "assign-area", "--task", "Buy milk"]).is_err());
    }
}
