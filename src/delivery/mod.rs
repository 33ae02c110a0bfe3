//! Report delivery adapters
//!
//! A rendered report leaves the service in one of three ways:
//!
//! - [`download::ReportDownload`]: streamed back as the HTTP response body
//! - [`local::LocalReportWriter`]: written into the reports directory
//! - [`email::ReportMailer`]: sent as an email attachment

pub mod download;
pub mod email;
pub mod local;

pub use download::{DownloadError, ReportDownload};
pub use email::{
    LoggingMailer, RecordingMailer, ReportEmail, ReportMailer, SmtpReportMailer,
};
pub use local::LocalReportWriter;
