//! Logging initialization using `log` + `log4rs`.
//!
//! The crate logs through the `log` facade only; this module is the
//! console initialization an embedding process (or the test harness) can
//! opt into.

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    Config,
};

const CONSOLE_APPENDER: &str = "stderr";
const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l})}] {t}: {m}{n}";

/// Crates whitelisted at the requested app level; everything else is
/// silenced unless explicitly enabled via `<crate>=<level>`.
const WHITELISTED_CRATES: &[&str] = &["tessera_core"];

/// Initialize the logger with console output.
///
/// `filters` is a comma-separated expression: a bare level (e.g.
/// `"info"`) applies to this crate; `<module>=<level>` pairs opt
/// specific targets in; `root=<level>` opts in all third-party logs.
///
/// The logger is global; repeated calls are ignored.
pub fn init_logger(filters: &str) {
    let app_level = parse_app_level(filters);
    let root_level = parse_root_override(filters).unwrap_or(LevelFilter::Off);
    let module_levels = parse_module_levels(filters);

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN)))
        .build();

    let mut config_builder =
        Config::builder().appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));

    for crate_name in WHITELISTED_CRATES {
        if !module_levels.iter().any(|(module, _)| module == *crate_name) {
            config_builder = config_builder.logger(
                Logger::builder()
                    .appender(CONSOLE_APPENDER)
                    .additive(false)
                    .build(*crate_name, app_level),
            );
        }
    }

    for (module, level) in &module_levels {
        config_builder = config_builder.logger(
            Logger::builder().appender(CONSOLE_APPENDER).additive(false).build(module, *level),
        );
    }

    let Ok(config) = config_builder.build(Root::builder().appender(CONSOLE_APPENDER).build(root_level))
    else {
        return;
    };
    let _ = log4rs::init_config(config);
}

fn parse_app_level(filters: &str) -> LevelFilter {
    for part in filters.split(',') {
        let part = part.trim();
        if part.is_empty() || part.contains('=') {
            continue;
        }
        if let Ok(level) = part.parse() {
            return level;
        }
    }
    LevelFilter::Info
}

fn parse_root_override(filters: &str) -> Option<LevelFilter> {
    for part in filters.split(',') {
        let Some((module, level_str)) = part.trim().split_once('=') else {
            continue;
        };
        if module.trim() != "root" {
            continue;
        }
        if let Ok(level) = level_str.trim().parse() {
            return Some(level);
        }
    }
    None
}

fn parse_module_levels(filters: &str) -> Vec<(String, LevelFilter)> {
    let mut result = Vec::new();
    for part in filters.split(',') {
        let Some((module, level_str)) = part.trim().split_once('=') else {
            continue;
        };
        let module = module.trim();
        let level_str = level_str.trim();
        if module.is_empty() || level_str.is_empty() || module == "root" {
            continue;
        }
        if let Ok(level) = level_str.parse() {
            result.push((module.to_string(), level));
        }
    }
    result
}
