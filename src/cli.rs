use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;

use crate::client::identity::SessionStore;
use crate::core::geometry::DEFAULT_CELL_ASPECT;

#[derive(Parser, Debug)]
#[command(name = "spotlight")]
#[command(about = "🔦 Terminal client for the multiplayer spotlight hide-and-seek game")]
#[command(version)]
pub struct Cli {
    /// Game server address: http(s)://host, ws(s)://host/path or host:port
    #[arg(short, long, env = "SPOTLIGHT_SERVER", default_value = "http://127.0.0.1:8080")]
    pub server: String,

    /// Display name; remembered for later sessions
    #[arg(short, long, env = "SPOTLIGHT_PLAYER_NAME")]
    pub name: Option<String>,

    /// Where the display name is remembered between runs
    #[arg(long, env = "SPOTLIGHT_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Minimum gap between movement messages while dragging (0 sends every event)
    #[arg(long, default_value_t = 0)]
    pub move_interval_ms: u64,

    /// Height of a terminal cell divided by its width
    #[arg(long, default_value_t = DEFAULT_CELL_ASPECT)]
    pub cell_aspect: f64,

    /// Log file; the terminal itself is busy drawing the game
    #[arg(long, default_value = "spotlight.log")]
    pub log_file: PathBuf,

    /// Log filter, e.g. "debug" or "spotlight=trace" (falls back to RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Validated runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub server: String,
    pub name: Option<String>,
    pub session_file: PathBuf,
    pub move_interval: Duration,
    pub cell_aspect: f64,
    pub log_file: PathBuf,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        ensure!(
            cli.cell_aspect.is_finite() && cli.cell_aspect > 0.0,
            "--cell-aspect must be a positive number, got {}",
            cli.cell_aspect
        );
        ensure!(!cli.server.trim().is_empty(), "--server must not be empty");

        Ok(Self {
            server: cli.server,
            name: cli.name.filter(|n| !n.trim().is_empty()),
            session_file: cli.session_file.unwrap_or_else(SessionStore::default_path),
            move_interval: Duration::from_millis(cli.move_interval_ms),
            cell_aspect: cli.cell_aspect,
            log_file: cli.log_file,
            log_level: cli.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spotlight").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_cli(parse(&["--server", "http://10.0.0.1"])).unwrap();
        assert_eq!(config.server, "http://10.0.0.1");
        assert_eq!(config.name, None);
        assert_eq!(config.move_interval, Duration::ZERO);
        assert_eq!(config.cell_aspect, DEFAULT_CELL_ASPECT);
        assert_eq!(config.session_file, SessionStore::default_path());
    }

    #[test]
    fn test_explicit_flags() {
        let cli = parse(&[
            "-s", "ws://host/ws", "-n", "Ann", "--move-interval-ms", "40",
            "--cell-aspect", "2.2", "--session-file", "/tmp/name",
        ]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.name.as_deref(), Some("Ann"));
        assert_eq!(config.move_interval, Duration::from_millis(40));
        assert_eq!(config.cell_aspect, 2.2);
        assert_eq!(config.session_file, PathBuf::from("/tmp/name"));
    }

    #[test]
    fn test_blank_name_counts_as_absent() {
        let config = Config::from_cli(parse(&["--server", "h", "--name", "  "])).unwrap();
        assert_eq!(config.name, None);
    }

    #[test]
    fn test_rejects_non_positive_cell_aspect() {
        assert!(Config::from_cli(parse(&["--server", "h", "--cell-aspect", "0"])).is_err());
        assert!(Config::from_cli(parse(&["--server", "h", "--cell-aspect=-1"])).is_err());
    }
}
