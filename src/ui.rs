use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// ── Output capability ─────────────────────────────────────────────────────────

/// Everything the workflow prints goes through this trait, so the
/// orchestrator never touches the terminal directly.
pub trait Reporter {
    fn banner(&self);
    /// Numbered step header.
    fn step(&self, step: usize, total: usize, title: &str);
    /// Full-width section header (used for the closing summary).
    fn header(&self, title: &str);
    fn success(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);
    fn kv_box(&self, title: &str, rows: &[(&str, &str)]);
    /// Unadorned text; an empty string prints a blank line.
    fn line(&self, msg: &str);
}

// ── Terminal helpers ──────────────────────────────────────────────────────────

fn term_width() -> usize {
    Term::stdout().size().1.max(60) as usize
}

fn rule() -> String {
    "─".repeat(term_width().min(52))
}

/// Styled terminal output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn banner(&self) {
        let logo = [
            r"   ╦═╗╔╗╔╔═╗  ┌─┐┬  ┬┌─┐┬─┐  ╔╦╗╔═╗╔═╗╦ ╦",
            r"   ╠╦╝║║║╚═╗  │ │└┐┌┘├┤ ├┬┘  ║║║║╣ ╚═╗╠═╣",
            r"   ╩╚═╝╚╝╚═╝  └─┘ └┘ └─┘┴└─  ╩ ╩╚═╝╚═╝╩ ╩",
        ];

        println!();
        for line in &logo {
            println!("{}", style(line).cyan().bold());
        }
        println!();
        println!(
            "{}",
            style("   Reticulum over Meshtastic  ·  Setup  ·  v0.1.0")
                .dim()
                .italic()
        );
        println!();
        println!("{}", style(rule()).dim());
        println!();
    }

    fn step(&self, step: usize, total: usize, title: &str) {
        println!();
        let tag = style(format!(" {}/{} ", step, total)).black().on_cyan().bold();
        let heading = style(format!("  {}", title)).white().bold();
        println!("{}{}", tag, heading);
        println!("{}", style(rule()).dim());
    }

    fn header(&self, title: &str) {
        println!();
        println!("{}", style(rule()).cyan().bold());
        println!("  {}", style(title).cyan().bold());
        println!("{}", style(rule()).cyan().bold());
    }

    /// Green ✓
    fn success(&self, msg: &str) {
        println!("  {}  {}", style("✓").green().bold(), style(msg).green());
    }

    /// Blue →
    fn info(&self, msg: &str) {
        println!("  {}  {}", style("→").blue().bold(), msg);
    }

    /// Yellow ⚠
    fn warning(&self, msg: &str) {
        println!("  {}  {}", style("⚠").yellow().bold(), style(msg).yellow());
    }

    /// Red ✗ — written to stderr.
    fn error(&self, msg: &str) {
        eprintln!("  {}  {}", style("✗").red().bold(), style(msg).red());
    }

    /// Renders a bordered key→value box.
    ///
    /// ```text
    /// ┌─ Speed presets ───────────────────┐
    /// │  8           SHORT_TURBO          │
    /// │  6           SHORT_FAST           │
    /// └───────────────────────────────────┘
    /// ```
    fn kv_box(&self, title: &str, rows: &[(&str, &str)]) {
        const BOX_INNER: usize = 38;

        let dashes = "─".repeat(BOX_INNER.saturating_sub(title.chars().count() + 2));
        println!(
            "  ┌─ {} {}┐",
            style(title).white().bold(),
            style(&dashes).dim()
        );

        for (key, val) in rows {
            println!(
                "  │  {:<13}{}",
                style(*key).dim(),
                style(*val).white().bold()
            );
        }

        println!("  └{}┘", style("─".repeat(BOX_INNER + 2)).dim());
    }

    fn line(&self, msg: &str) {
        println!("{}", msg);
    }
}

// ── Spinner ───────────────────────────────────────────────────────────────────

/// Returns a running braille spinner. Call `pb.finish_and_clear()` when done.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    // The template is a literal; fall back to the default style rather than panic.
    let style = ProgressStyle::with_template("  {spinner:.cyan.bold}  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Puts the cursor back after an interrupt left a prompt half-drawn.
pub fn restore_terminal() {
    let _ = Term::stdout().show_cursor();
    let _ = Term::stderr().show_cursor();
}
