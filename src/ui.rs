//! Styled terminal output for rename plans.
//!
//! Everything here goes to stdout and is the tool's primary output. Tracing
//! logs go to stderr independently. In JSON mode the UI is silenced so the
//! report is the only thing on stdout.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub quiet: bool,
}

impl UiConfig {
    /// Create UI config from environment and args
    pub fn new(quiet: bool) -> Self {
        Self {
            colors_enabled: should_use_colors(),
            quiet,
        }
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stdout().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI with stdout output
    pub fn new(config: UiConfig) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create UI with custom writer (for testing)
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// Series folder name, plus the derived name when it differs
    pub fn series_header(&mut self, folder_name: &str, display_name: &str) {
        if self.config.quiet {
            return;
        }
        let _ = writeln!(self.writer);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", folder_name.bold());
        } else {
            let _ = writeln!(self.writer, "{}", folder_name);
        }
        if display_name != folder_name {
            if self.config.colors_enabled {
                let _ = writeln!(self.writer, "  {} {}", "->".cyan(), display_name.bold());
            } else {
                let _ = writeln!(self.writer, "  -> {}", display_name);
            }
        }
    }

    /// Print a season heading
    pub fn section(&mut self, title: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "  {}", format!("{}:", title).bold());
        } else {
            let _ = writeln!(self.writer, "  {}:", title);
        }
    }

    /// Print an info message
    pub fn info(&mut self, msg: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", msg);
        }
    }

    /// Print an indented warning inside a season block
    pub fn alert(&mut self, msg: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "    {} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "    ! {}", msg);
        }
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "    {} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "    [ERROR] {}", msg);
        }
    }

    /// Print a dim/muted message
    pub fn dim(&mut self, msg: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// File left out of the plan
    pub fn skipped(&mut self, filename: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "    {} {}", "[SKIP]".yellow(), filename.dimmed());
        } else {
            let _ = writeln!(self.writer, "    [SKIP] {}", filename);
        }
    }

    /// Several sources claiming one target
    pub fn collision(&mut self, target: &str, sources: &[String]) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "    {} {}:", "[COLLISION]".red().bold(), target);
        } else {
            let _ = writeln!(self.writer, "    [COLLISION] {}:", target);
        }
        for source in sources {
            let _ = writeln!(self.writer, "      <- {}", source);
        }
    }

    /// Planned rename (preview)
    pub fn list_item(&mut self, from: &str, to: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "    {}", from.dimmed());
            let _ = writeln!(self.writer, "      {} {}", "->".cyan(), to.bold());
        } else {
            let _ = writeln!(self.writer, "    {}", from);
            let _ = writeln!(self.writer, "      -> {}", to);
        }
    }

    /// Completed rename
    pub fn list_done(&mut self, from: &str, to: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "    {} {} {} {}",
                "✓".green(),
                from.dimmed(),
                "->".green(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "    {} -> {}", from, to);
        }
    }

    /// Rename that could not be performed
    pub fn list_failed(&mut self, from: &str, to: &str, reason: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "    {} {} -> {}: {}",
                "✗".red().bold(),
                from,
                to,
                reason.red()
            );
        } else {
            let _ = writeln!(self.writer, "    [FAILED] {} -> {}: {}", from, to, reason);
        }
    }

    /// File that already has its target name
    pub fn list_unchanged(&mut self, filename: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "    {}", format!("[OK] {}", filename).dimmed());
        } else {
            let _ = writeln!(self.writer, "    [OK] {}", filename);
        }
    }

    /// Print a key-value pair
    pub fn kv(&mut self, key: &str, value: &str) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "  {}: {}", key.bold(), value);
        } else {
            let _ = writeln!(self.writer, "  {}: {}", key, value);
        }
    }

    /// Print a blank line
    pub fn blank(&mut self) {
        if self.config.quiet {
            return;
        }
        let _ = writeln!(self.writer);
    }

    /// Print a separator line
    pub fn separator(&mut self) {
        if self.config.quiet {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", "─".repeat(50).dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", "-".repeat(50));
        }
    }

    /// Print a boxed title (for preview mode)
    pub fn boxed_title(&mut self, title: &str) {
        if self.config.quiet {
            return;
        }
        let width = 50;
        let padding = (width - title.len() - 2) / 2;
        let title_line = format!(
            "║{}{}{}║",
            " ".repeat(padding),
            title,
            " ".repeat(width - padding - title.len() - 2)
        );

        if self.config.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("╔{}╗", "═".repeat(width - 2)).cyan()
            );
            let _ = writeln!(self.writer, "{}", title_line.cyan().bold());
            let _ = writeln!(
                self.writer,
                "{}",
                format!("╚{}╝", "═".repeat(width - 2)).cyan()
            );
        } else {
            let _ = writeln!(self.writer, "╔{}╗", "═".repeat(width - 2));
            let _ = writeln!(self.writer, "{}", title_line);
            let _ = writeln!(self.writer, "╚{}╝", "═".repeat(width - 2));
        }
    }
}
