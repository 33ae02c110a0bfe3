//! Report request, lookback windows and output formats

use crate::core::error::ReportError;
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Body of the report endpoints
///
/// `duration` and `format` are kept as the caller sent them: the filename
/// is derived from the raw duration, and an unknown format must surface as
/// [`ReportError::UnsupportedFormat`] rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[validate(length(min = 1, message = "duration is required"))]
    pub duration: String,

    #[validate(length(min = 1, message = "format is required"))]
    pub format: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub customer_id: Option<i32>,
}

impl ReportRequest {
    pub fn new(duration: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            duration: duration.into(),
            format: format.into(),
            status: None,
            customer_id: None,
        }
    }

    /// Only keep orders with exactly this status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Only keep orders of this customer
    pub fn with_customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn lookback(&self) -> ReportDuration {
        ReportDuration::from_label(&self.duration)
    }

    pub fn parsed_format(&self) -> Result<ReportFormat, ReportError> {
        self.format.parse()
    }

    /// `admin_report_<duration>.<ext>`
    pub fn default_filename(&self) -> String {
        format!(
            "admin_report_{}.{}",
            self.duration.to_lowercase(),
            extension_for(&self.format)
        )
    }
}

/// Body of the email endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailReportRequest {
    #[validate(required(message = "reportRequest is required"), nested)]
    pub report_request: Option<ReportRequest>,

    #[validate(
        required(message = "emailTo is required"),
        email(message = "emailTo must be a valid email address")
    )]
    pub email_to: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    /// Attachment name; blank means the default report filename
    #[serde(default)]
    pub filename: Option<String>,
}

impl EmailReportRequest {
    /// Attachment name for a report request
    pub fn attachment_name(&self, report: &ReportRequest) -> String {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| report.default_filename())
    }
}

/// Lookback window of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDuration {
    OneWeek,
    OneMonth,
    SixMonths,
}

impl ReportDuration {
    /// Parse `1_WEEK`, `1_MONTH` or `6_MONTHS`; anything else is one month
    pub fn from_label(label: &str) -> Self {
        match label {
            "1_WEEK" => ReportDuration::OneWeek,
            "6_MONTHS" => ReportDuration::SixMonths,
            _ => ReportDuration::OneMonth,
        }
    }

    /// Start of the window ending at `now`
    ///
    /// Months are calendar months, clamped to the end of shorter months.
    pub fn start_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            ReportDuration::OneWeek => now.checked_sub_signed(Duration::days(7)),
            ReportDuration::OneMonth => now.checked_sub_months(Months::new(1)),
            ReportDuration::SixMonths => now.checked_sub_months(Months::new(6)),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Excel,
    Pdf,
    Word,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Excel => "EXCEL",
            ReportFormat::Pdf => "PDF",
            ReportFormat::Word => "WORD",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Excel => "xlsx",
            ReportFormat::Pdf => "pdf",
            ReportFormat::Word => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    /// Case-insensitive: `pdf` and `PDF` are the same format
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EXCEL" => Ok(ReportFormat::Excel),
            "PDF" => Ok(ReportFormat::Pdf),
            "WORD" => Ok(ReportFormat::Word),
            _ => Err(ReportError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// File extension for a raw format label, `dat` when unknown
pub fn extension_for(format: &str) -> &'static str {
    format
        .parse::<ReportFormat>()
        .map(|f| f.extension())
        .unwrap_or("dat")
}

/// Content type for a raw format label, octet-stream when unknown
pub fn content_type_for(format: &str) -> &'static str {
    format
        .parse::<ReportFormat>()
        .map(|f| f.content_type())
        .unwrap_or("application/octet-stream")
}
