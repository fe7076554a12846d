/// Tag-based logging for the Armada playground
///
/// Every subsystem logs through a tag so the combined output stays greppable.
/// Debug lines are suppressed unless debug logging was enabled at startup.
use chrono::Utc;
use colored::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(0x[a-fA-F0-9]{8,})").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Config,
    Webserver,
    Sdk,
    Enso,
    CrossChain,
    Executor,
}

impl LogTag {
    fn label(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Webserver => "WEB",
            LogTag::Sdk => "SDK",
            LogTag::Enso => "ENSO",
            LogTag::CrossChain => "BRIDGE",
            LogTag::Executor => "FLOW",
        }
    }

    fn colored_label(&self) -> ColoredString {
        match self {
            LogTag::System => self.label().green().bold(),
            LogTag::Config => self.label().cyan().bold(),
            LogTag::Webserver => self.label().blue().bold(),
            LogTag::Sdk => self.label().magenta().bold(),
            LogTag::Enso => self.label().bright_yellow().bold(),
            LogTag::CrossChain => self.label().bright_cyan().bold(),
            LogTag::Executor => self.label().yellow().bold(),
        }
    }
}

/// Enable or disable debug output globally
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Core log function: tag + event keyword + free-form message
pub fn log(tag: LogTag, event: &str, message: &str) {
    let timestamp = get_timestamp();
    println!(
        "{} {} {} {}",
        tag.colored_label(),
        event.bright_white().bold(),
        format!("[{}]", timestamp).dimmed(),
        format_message(message)
    );
    let _ = io::stdout().flush();
}

pub fn info(tag: LogTag, message: &str) {
    log(tag, "INFO", message);
}

pub fn warn(tag: LogTag, message: &str) {
    let timestamp = get_timestamp();
    println!(
        "{} {} {} {}",
        tag.colored_label(),
        "WARN".yellow().bold(),
        format!("[{}]", timestamp).dimmed(),
        format_message(message).yellow()
    );
    let _ = io::stdout().flush();
}

pub fn error(tag: LogTag, message: &str) {
    let timestamp = get_timestamp();
    println!(
        "{} {} {} {}",
        tag.colored_label(),
        "ERROR".red().bold(),
        format!("[{}]", timestamp).dimmed(),
        format_message(message).red()
    );
    let _ = io::stdout().flush();
}

pub fn debug(tag: LogTag, message: &str) {
    if !is_debug_enabled() {
        return;
    }
    let timestamp = get_timestamp();
    println!(
        "{} {} {} {}",
        tag.colored_label(),
        "DEBUG".purple().bold(),
        format!("[{}]", timestamp).dimmed(),
        format_message(message).dimmed()
    );
    let _ = io::stdout().flush();
}

/// Startup banner
pub fn header(title: &str) {
    println!();
    println!(
        "{} {} {}",
        "⛵".green().bold(),
        "Armada Playground".green().bold(),
        format!("- {}", title).bright_white().bold()
    );
    println!("{}", "─".repeat(50).dimmed());
    let _ = io::stdout().flush();
}

// Shorten long hex blobs (addresses, calldata, tx hashes) so log lines stay readable
fn format_message(message: &str) -> String {
    HEX_RE
        .replace_all(message, |caps: &regex::Captures| {
            let hex = &caps[1];
            if hex.len() > 14 {
                format!(
                    "{}...{}",
                    hex[..8].bright_cyan().bold(),
                    hex[hex.len() - 4..].bright_cyan().bold()
                )
            } else {
                caps[1].bright_cyan().bold().to_string()
            }
        })
        .to_string()
}

fn get_timestamp() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}
