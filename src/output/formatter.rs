//! Output formatters: console, JSON, markdown and HTML renderings of a ranking

use crate::config::OutputFormat;
use crate::error::{RankerError, Result};
use crate::output::report::{DetailBlock, RankingReport, TableRow, TABLE_COLUMNS};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting ranking reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored table with optional detail blocks
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Ranking</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1000px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        table { width: 100%; border-collapse: collapse; background: white; }
        th, td { padding: 8px 12px; border-bottom: 1px solid #e9ecef; text-align: left; }
        th { background: #007acc; color: white; }
        details {
            background: white;
            margin: 10px 0;
            padding: 10px 15px;
            border-radius: 6px;
            border-left: 4px solid #17a2b8;
        }
        details.error { border-left-color: #dc3545; }
        summary { font-weight: bold; cursor: pointer; }
        .metadata { font-size: 0.9em; color: #6c757d; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <h1>🏆 Ranking</h1>
    <table>
        <thead>
            <tr>{% for column in columns %}<th>{{ column }}</th>{% endfor %}</tr>
        </thead>
        <tbody>
            {% for row in rows %}
            <tr>
                <td>{{ row.filename }}</td>
                <td>{{ row.match_percentage }}</td>
                <td>{{ row.overall_fit }}</td>
                <td>{{ row.experience_level }}</td>
                <td>{{ row.recommendation }}</td>
            </tr>
            {% endfor %}
        </tbody>
    </table>

    {% for detail in details %}
    <details{% if detail.is_error %} class="error"{% endif %}>
        <summary>{{ detail.title }}</summary>
        <p><strong>Summary:</strong> {{ detail.summary }}</p>
        <p><strong>Key strengths:</strong> {{ detail.key_strengths }}</p>
        <p><strong>Matching skills:</strong> {{ detail.matching_skills }}</p>
        {% if detail.missing_requirements.is_some() %}
        <p><strong>Missing requirements:</strong> {{ detail.missing_requirements.as_deref().unwrap_or_default() }}</p>
        {% endif %}
        <p><strong>Recommendation:</strong> {{ detail.recommendation }}</p>
    </details>
    {% endfor %}

    <div class="metadata">
        <p>Generated by Resume Ranker v{{ version }} on {{ generated_at }} | Model: {{ model }} | {{ resume_count }} resumes, {{ error_count }} failed</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    columns: [&'static str; 5],
    rows: Vec<TableRow>,
    details: Vec<DetailBlock>,
    version: &'a str,
    generated_at: String,
    model: &'a str,
    resume_count: usize,
    error_count: usize,
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

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn fit_color(fit: &str) -> Color {
        match fit {
            "STRONG" => Color::Green,
            "MODERATE" => Color::Yellow,
            "WEAK" => Color::Red,
            "ERROR" => Color::BrightRed,
            _ => Color::White,
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    /// Pads before coloring so escape codes don't skew column widths
    fn format_table(&self, rows: &[TableRow]) -> String {
        let cells: Vec<[String; 5]> = rows.iter().map(TableRow::cells).collect();
        let mut widths = TABLE_COLUMNS.map(|c| c.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        let header: Vec<String> = TABLE_COLUMNS
            .iter()
            .zip(widths.iter())
            .map(|(column, width)| self.bold(&pad(column, *width)))
            .collect();
        output.push_str(&header.join("  "));
        output.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        output.push_str(&rule.join("  "));
        output.push('\n');

        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(i, (cell, width))| {
                    let padded = pad(cell, *width);
                    if i == 2 {
                        self.colorize(&padded, Self::fit_color(cell))
                    } else {
                        padded
                    }
                })
                .collect();
            output.push_str(line.join("  ").trim_end());
            output.push('\n');
        }

        output
    }

    fn format_detail(&self, detail: &DetailBlock) -> String {
        let mut output = String::new();
        let title_color = if detail.is_error { Color::Red } else { Color::Cyan };
        output.push_str(&format!("\n▸ {}\n", self.colorize(&detail.title, title_color)));
        output.push_str(&format!("  {} {}\n", self.bold("Summary:"), detail.summary));
        output.push_str(&format!("  {} {}\n", self.bold("Key strengths:"), detail.key_strengths));
        output.push_str(&format!("  {} {}\n", self.bold("Matching skills:"), detail.matching_skills));
        if let Some(missing) = &detail.missing_requirements {
            output.push_str(&format!(
                "  {} {}\n",
                self.bold("Missing requirements:"),
                self.colorize(missing, Color::Yellow)
            ));
        }
        output.push_str(&format!("  {} {}\n", self.bold("Recommendation:"), detail.recommendation));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("🏆 Ranking"));
        output.push_str(&self.format_table(&report.table_rows()));

        if self.detailed {
            output.push_str(&self.format_header("Details"));
            for detail in report.detail_blocks() {
                output.push_str(&self.format_detail(&detail));
            }
        }

        output.push_str(&format!(
            "\n{} {} resumes analysed with {} in {}ms",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.resume_count,
            report.metadata.model,
            report.metadata.processing_time_ms
        ));
        if report.metadata.error_count > 0 {
            output.push_str(&self.colorize(
                &format!(" ({} failed)", report.metadata.error_count),
                Color::Red,
            ));
        }
        output.push('\n');

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
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::from("# 🏆 Ranking\n\n");

        output.push_str(&format!("| {} |\n", TABLE_COLUMNS.join(" | ")));
        output.push_str(&format!("|{}\n", "---|".repeat(TABLE_COLUMNS.len())));
        for row in report.table_rows() {
            let cells: Vec<String> = row.cells().iter().map(|c| escape_markdown_cell(c)).collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }

        // Detail blocks sit inside raw HTML, so model text is entity-escaped
        for detail in report.detail_blocks() {
            output.push_str(&format!(
                "\n<details>\n<summary>{}</summary>\n\n",
                escape_html(&detail.title)
            ));
            output.push_str(&format!("**Summary:** {}\n\n", escape_html(&detail.summary)));
            output.push_str(&format!(
                "**Key strengths:** {}\n\n",
                escape_html(&detail.key_strengths)
            ));
            output.push_str(&format!(
                "**Matching skills:** {}\n\n",
                escape_html(&detail.matching_skills)
            ));
            if let Some(missing) = &detail.missing_requirements {
                output.push_str(&format!("**Missing requirements:** {}\n\n", escape_html(missing)));
            }
            output.push_str(&format!(
                "**Recommendation:** {}\n\n</details>\n",
                escape_html(&detail.recommendation)
            ));
        }

        if self.include_metadata {
            output.push_str(&format!(
                "\n---\n*Generated by Resume Ranker v{} on {} with {}*\n",
                report.metadata.version,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.model
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let template = HtmlTemplate {
            include_styles: self.include_styles,
            columns: TABLE_COLUMNS,
            rows: report.table_rows(),
            details: report.detail_blocks(),
            version: &report.metadata.version,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            model: &report.metadata.model,
            resume_count: report.metadata.resume_count,
            error_count: report.metadata.error_count,
        };

        template
            .render()
            .map_err(|e| RankerError::OutputFormatting(format!("HTML template failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn generate(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        let formatter = self.formatter(format);
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }

    pub fn save_report(&self, content: &str, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content).map_err(|e| {
            RankerError::OutputFormatting(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn escape_markdown_cell(cell: &str) -> String {
    escape_html(cell).replace('|', "\\|")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
