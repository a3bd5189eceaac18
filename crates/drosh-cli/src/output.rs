use drosh_core::domain::HandlerOutcome;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
///
/// Command results go to stdout, diagnostics to stderr, so the shared link
/// can be piped into other tools.
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
    /// Reports the result of handling one screenshot
    fn outcome(&self, outcome: &HandlerOutcome);
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {}
    fn outcome(&self, outcome: &HandlerOutcome) {
        for line in outcome_lines(outcome) {
            println!("{}", line);
        }
    }
}

/// Stdout lines for a handled screenshot
///
/// Failures print nothing here; the command returns them as its error.
fn outcome_lines(outcome: &HandlerOutcome) -> Vec<String> {
    match outcome {
        HandlerOutcome::Shared { link, .. } => {
            vec!["Share this link!".to_string(), link.url.clone()]
        }
        HandlerOutcome::Failed { .. } => Vec::new(),
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
    fn outcome(&self, outcome: &HandlerOutcome) {
        match serde_json::to_value(outcome) {
            Ok(value) => self.print_json(&value),
            Err(e) => self.error(&format!("Failed to serialize result: {}", e)),
        }
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}
