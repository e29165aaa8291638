//! Downloadable summary files.
//!
//! The body is always the summary text byte-for-byte; only the file name
//! and MIME type depend on the format.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const FILE_STEM: &str = "discharge_summary";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    #[serde(rename = "txt", alias = "text")]
    Text,
    #[serde(rename = "md", alias = "markdown")]
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Text, ExportFormat::Markdown];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Markdown => "text/markdown; charset=utf-8",
        }
    }

    /// Button label in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Download as TXT",
            Self::Markdown => "Download as MD",
        }
    }
}

/// `discharge_summary_YYYYmmdd_HHMMSS.<ext>` for the given local time.
pub fn export_file_name(format: ExportFormat, now: NaiveDateTime) -> String {
    format!("{FILE_STEM}_{}.{}", now.format("%Y%m%d_%H%M%S"), format.extension())
}

/// `Content-Disposition` value forcing a download under `file_name`.
pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn file_name_is_timestamped() {
        assert_eq!(
            export_file_name(ExportFormat::Text, at(9, 5, 7)),
            "discharge_summary_20261018_090507.txt"
        );
        assert_eq!(
            export_file_name(ExportFormat::Markdown, at(23, 59, 0)),
            "discharge_summary_20261018_235900.md"
        );
    }

    #[test]
    fn mime_types() {
        assert!(ExportFormat::Text.mime().starts_with("text/plain"));
        assert!(ExportFormat::Markdown.mime().starts_with("text/markdown"));
    }

    #[test]
    fn deserializes_from_json() {
        let f: ExportFormat = serde_json::from_str("\"md\"").unwrap();
        assert_eq!(f, ExportFormat::Markdown);
        let f: ExportFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(f, ExportFormat::Text);
    }

    #[test]
    fn disposition_quotes_name() {
        assert_eq!(
            content_disposition("discharge_summary_20261018_090507.md"),
            "attachment; filename=\"discharge_summary_20261018_090507.md\""
        );
    }
}
