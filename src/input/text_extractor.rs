//! Text extraction from resume and job description bytes

use crate::error::{RankerError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extract the text of every page of a PDF, pages joined by newlines
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    PdfExtractor.extract(bytes)
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// One string per page, in page order. `pdf_extract` can panic on
    /// malformed input, so the call runs behind `catch_unwind`.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(RankerError::PdfExtraction(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(_) => Err(RankerError::PdfExtraction(
                "PDF decoder panicked (malformed document)".to_string(),
            )),
        }
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.extract_pages(bytes)?.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| RankerError::InvalidInput(format!("Text file is not valid UTF-8: {}", e)))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> Result<String> {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = Regex::new(r"<[^>]*>")
            .map_err(|e| RankerError::InvalidInput(format!("Invalid tag pattern: {}", e)))?;
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}
