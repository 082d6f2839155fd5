//! Env parsing and defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::data::{SourceConfig, SourceKind};
use crate::diagram::Theme;

const DEFAULT_SEED: u64 = 42;
const DEFAULT_INTERVAL_MS: u64 = 800;

/// Snapshot source from the environment. `CASCADE_SOURCE=fixture` replays
/// the file named by `CASCADE_FIXTURE`; anything else (or nothing) runs the
/// simulator with `CASCADE_SEED` / `CASCADE_INTERVAL_MS`.
pub fn source_config() -> SourceConfig {
    let kind = match std::env::var("CASCADE_SOURCE").as_deref() {
        Ok("fixture") => match std::env::var("CASCADE_FIXTURE") {
            Ok(path) => SourceKind::Fixture(PathBuf::from(path)),
            Err(_) => {
                eprintln!(
                    "cascade: CASCADE_SOURCE=fixture but CASCADE_FIXTURE is unset, using simulator"
                );
                SourceKind::Simulated
            }
        },
        Ok("simulated") | Err(_) => SourceKind::Simulated,
        Ok(other) => {
            eprintln!("cascade: unknown CASCADE_SOURCE {other:?}, using simulator");
            SourceKind::Simulated
        }
    };

    SourceConfig {
        kind,
        interval: Duration::from_millis(parse_var("CASCADE_INTERVAL_MS", DEFAULT_INTERVAL_MS)),
        seed: parse_var("CASCADE_SEED", DEFAULT_SEED),
    }
}

fn parse_var(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("cascade: invalid {name} {raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}

/// Light/dark flag from `CASCADE_THEME`; defaults to dark.
pub fn theme_config() -> Theme {
    match std::env::var("CASCADE_THEME").as_deref() {
        Ok("light") => Theme::Light,
        Ok("dark") | Err(_) => Theme::Dark,
        Ok(other) => {
            eprintln!("cascade: unknown CASCADE_THEME {other:?}, using dark");
            Theme::Dark
        }
    }
}

/// Optional path for recording ingested snapshots to a replayable fixture.
pub fn record_path() -> Option<PathBuf> {
    std::env::var("CASCADE_RECORD").ok().map(PathBuf::from)
}
