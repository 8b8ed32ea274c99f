//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::{score_label, AnalysisReport};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for integration with other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n{} {}\n", "█", title)
        }
    }

    fn format_score_line(&self, name: &str, score: u8) -> String {
        let color = match score {
            80..=100 => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        };
        let badge = format!("[{}]", score_label(score));

        format!(
            "  {:<16} {} {}\n",
            name,
            self.colorize(&format!("{:>3}%", score), color),
            self.colorize(&badge, color)
        )
    }

    fn format_skill_list(&self, title: &str, skills: &[String], color: Color) -> String {
        if skills.is_empty() {
            return format!("  {}: none\n", title);
        }
        let joined = skills.join(", ");
        format!("  {}: {}\n", title, self.colorize(&joined, color))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS"));
        if let Some(title) = &report.metadata.job_title {
            output.push_str(&format!("Position: {}\n", title));
        }

        output.push_str(&self.format_header("Scores"));
        output.push_str(&self.format_score_line("Job match", result.match_percentage));
        output.push_str(&self.format_score_line("ATS friendliness", result.ats_score));

        output.push_str(&self.format_header("Skills"));
        output.push_str(&self.format_skill_list("Matched", &result.matched_skills, Color::Green));
        output.push_str(&self.format_skill_list("Missing", &result.missing_skills, Color::Red));

        output.push_str(&self.format_header("Suggestions"));
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
        }

        if self.detailed {
            let metadata = &report.metadata;
            output.push_str(&self.format_header("Details"));
            output.push_str(&format!("  Resume: {}\n", metadata.resume_path));
            output.push_str(&format!("  Job: {}\n", metadata.job_path));
            output.push_str(&format!("  Required skills: {}\n", metadata.required_skill_count));
            output.push_str(&format!(
                "  Generated: {} | Processing time: {}ms\n",
                metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                metadata.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        json.map_err(|e| ScreenerError::OutputFormatting(format!("JSON serialization failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn bullet_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_None_\n".to_string();
        }
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::from("# Resume Analysis\n\n");

        if let Some(title) = &report.metadata.job_title {
            output.push_str(&format!("**Position:** {}\n\n", title));
        }

        output.push_str("## Scores\n\n| Metric | Score |\n|---|---|\n");
        output.push_str(&format!(
            "| Job match | {}% ({}) |\n",
            result.match_percentage,
            score_label(result.match_percentage)
        ));
        output.push_str(&format!(
            "| ATS friendliness | {}% ({}) |\n\n",
            result.ats_score,
            score_label(result.ats_score)
        ));

        output.push_str("## Matched Skills\n\n");
        output.push_str(&Self::bullet_list(&result.matched_skills));
        output.push_str("\n## Missing Skills\n\n");
        output.push_str(&Self::bullet_list(&result.missing_skills));

        output.push_str("\n## Suggestions\n\n");
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        if self.include_metadata {
            let metadata = &report.metadata;
            output.push_str(&format!(
                "\n---\n_Resume `{}` against `{}`, generated {}_\n",
                metadata.resume_path,
                metadata.job_path,
                metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
