use crate::error::{UnfollowError, UserFriendlyError};
use crate::report::CheckReport;
use console::{style, Emoji, Term};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &UnfollowError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// Prints the result of a check to stdout.
    pub fn print_check_report(&self, report: &CheckReport) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = self.write_check_report(&mut handle, report) {
            report_write_error(&e);
        }
    }

    /// Renders a check result.
    ///
    /// Without a search name: one unfollower per line, then the total when
    /// verbose. With a search name: only the follow-back verdict.
    pub fn write_check_report<W: Write>(
        &self,
        out: &mut W,
        report: &CheckReport,
    ) -> std::io::Result<()> {
        if self.mode == OutputMode::Json {
            let json = serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
            return writeln!(out, "{}", json);
        }

        match report.search {
            None => {
                for username in &report.unfollowers {
                    writeln!(out, "{}", username)?;
                }

                if self.should_show_message(1) {
                    writeln!(out)?;
                    match self.mode {
                        OutputMode::Human if self.use_colors => writeln!(
                            out,
                            "{}Total: {} unfollowers.",
                            INFO,
                            style(report.count).yellow().bold()
                        )?,
                        _ => writeln!(out, "Total: {} unfollowers.", report.count)?,
                    }
                }
            }
            Some(ref search) => {
                if self.use_colors {
                    let verdict = if search.is_following {
                        style(search.message()).green()
                    } else {
                        style(search.message()).red()
                    };
                    writeln!(out, "{}", verdict)?;
                } else {
                    writeln!(out, "{}", search.message())?;
                }
                writeln!(out)?;
            }
        }

        if !report.saved_files.is_empty() && self.should_show_message(1) {
            let files: Vec<String> = report
                .saved_files
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            writeln!(out, "Saved results in {}", files.join(", "))?;
        }

        Ok(())
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error | MessageType::Warning => {
                    eprintln!("{}{}", emoji, color_fn(message))
                }
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error | MessageType::Warning => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        eprintln!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

/// Logs a failed report write. Returns whether it was logged.
///
/// A reader closing the pipe early (`| head`) is expected and stays silent.
fn report_write_error(error: &std::io::Error) -> bool {
    if error.kind() == std::io::ErrorKind::BrokenPipe {
        return false;
    }
    log::warn!("Failed to write report to stdout: {}", error);
    true
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::SearchOutcome;
    use std::path::PathBuf;

    fn report(unfollowers: &[&str], search: Option<SearchOutcome>) -> CheckReport {
        let unfollowers: Vec<String> = unfollowers.iter().map(|s| s.to_string()).collect();
        CheckReport {
            archive: PathBuf::from("export.zip"),
            following: unfollowers.clone(),
            followers: Vec::new(),
            count: unfollowers.len(),
            unfollowers,
            search,
            files_extracted: 2,
            saved_files: Vec::new(),
            checked_at: chrono::Utc::now(),
        }
    }

    fn render(formatter: &OutputFormatter, report: &CheckReport) -> String {
        let mut out = Vec::new();
        formatter.write_check_report(&mut out, report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.should_show_message(0));
    }

    #[test]
    fn test_lists_one_name_per_line() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        let out = render(&formatter, &report(&["a", "c"], None));
        assert_eq!(out, "a\nc\n");
    }

    #[test]
    fn test_verbose_adds_total() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        let out = render(&formatter, &report(&["a", "c"], None));
        assert_eq!(out, "a\nc\n\nTotal: 2 unfollowers.\n");
    }

    #[test]
    fn test_search_replaces_list() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        let search = SearchOutcome::lookup("bob", &["Bob".to_string()], true);
        let out = render(&formatter, &report(&["a"], Some(search)));
        assert_eq!(out, "bob is following you.\n\n");
    }

    #[test]
    fn test_json_report() {
        let formatter = OutputFormatter::new(OutputMode::Json, 0, false);
        let out = render(&formatter, &report(&["a"], None));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["unfollowers"][0], "a");
        assert!(value["search"].is_null());
    }

    struct FailingWriter(std::io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(self.0))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_only_broken_pipe_is_silent() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        let r = report(&["a"], None);

        let closed = formatter
            .write_check_report(&mut FailingWriter(std::io::ErrorKind::BrokenPipe), &r)
            .unwrap_err();
        assert!(!report_write_error(&closed));

        let failed = formatter
            .write_check_report(&mut FailingWriter(std::io::ErrorKind::PermissionDenied), &r)
            .unwrap_err();
        assert!(report_write_error(&failed));
    }

    #[test]
    fn test_saved_files_reported_when_verbose() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        let mut r = report(&[], None);
        r.saved_files = vec![PathBuf::from("results/unfollowers.txt")];
        let out = render(&formatter, &r);
        assert!(out.contains("Saved results in results/unfollowers.txt"));
    }
}
