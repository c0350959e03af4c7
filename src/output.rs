//! # Output and Progress Reporting
//!
//! Operators watch a fleet run scroll by, so each library reports when it is
//! cloned or fetched, when it turns out to depend on the bumped module, and
//! when its merge request is created. The orchestrator emits these events
//! through the [`Progress`] trait; the CLI prints them with
//! [`ConsoleProgress`] and tests can collect them instead.
//!
//! ## Respecting User Preferences
//!
//! Console output honours:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: "always", "never" or "auto".
    /// In auto mode colors are off when `NO_COLOR` is set, `CLICOLOR=0`,
    /// `TERM=dumb`, or stdout is not a TTY (unless `CLICOLOR_FORCE=1`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled and `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Receives progress events from an upgrade run.
pub trait Progress {
    /// A workspace is about to be cloned.
    fn cloning(&self, library: &str);

    /// An existing workspace is about to be fetched.
    fn fetching(&self, library: &str);

    /// `library` directly requires `dependency`.
    fn dependent(&self, library: &str, dependency: &str);

    /// Dry run: the branch that would have been created.
    fn would_create(&self, library: &str, branch: &str);

    /// A merge request was opened.
    fn review_requested(&self, library: &str, url: &str);
}

/// Prints progress lines to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleProgress {
    config: OutputConfig,
}

impl ConsoleProgress {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn line(&self, emoji_str: &str, plain: &str, text: String) {
        println!("{} {}", emoji(&self.config, emoji_str, plain), text);
    }

    fn highlight(&self, text: &str) -> String {
        if self.config.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Progress for ConsoleProgress {
    fn cloning(&self, library: &str) {
        self.line("📥", "[CLONE]", format!("cloning: {}", self.highlight(library)));
    }

    fn fetching(&self, library: &str) {
        self.line("🔄", "[FETCH]", format!("fetching: {}", self.highlight(library)));
    }

    fn dependent(&self, library: &str, dependency: &str) {
        self.line(
            "🔗",
            "[DEP]",
            format!("{} depends on {}", self.highlight(library), dependency),
        );
    }

    fn would_create(&self, library: &str, branch: &str) {
        self.line(
            "🔎",
            "[DRY-RUN]",
            format!("would push {} to {}", branch, self.highlight(library)),
        );
    }

    fn review_requested(&self, library: &str, url: &str) {
        self.line("✅", "[MR]", format!("{}: {}", self.highlight(library), url));
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn cloning(&self, _library: &str) {}
    fn fetching(&self, _library: &str) {}
    fn dependent(&self, _library: &str, _dependency: &str) {}
    fn would_create(&self, _library: &str, _branch: &str) {}
    fn review_requested(&self, _library: &str, _url: &str) {}
}
