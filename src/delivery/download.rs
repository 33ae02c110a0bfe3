//! Report as an HTTP attachment

use crate::core::error::OrderServiceError;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

pub const ERROR_HEADER: &str = "x-error";

/// Bytes of a report with the headers a browser needs to save it
#[derive(Debug, Clone)]
pub struct ReportDownload {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ReportDownload {
    pub fn new(filename: impl Into<String>, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename.replace('"', ""))
    }
}

impl IntoResponse for ReportDownload {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Failed download: always 400, with the message mirrored in `X-Error`
#[derive(Debug)]
pub struct DownloadError(pub OrderServiceError);

impl From<OrderServiceError> for DownloadError {
    fn from(err: OrderServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DownloadError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::BAD_REQUEST;

        // header values must be visible ASCII
        let value = HeaderValue::from_str(&message)
            .unwrap_or_else(|_| HeaderValue::from_static("Report generation failed"));
        response.headers_mut().insert(ERROR_HEADER, value);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ReportError;

    #[test]
    fn test_download_headers() {
        let response = ReportDownload::new("admin_report_1_week.pdf", "application/pdf", vec![1, 2])
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"admin_report_1_week.pdf\""
        );
    }

    #[test]
    fn test_error_sets_header_and_status() {
        let err = DownloadError(
            ReportError::UnsupportedFormat {
                format: "CSV".to_string(),
            }
            .into(),
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[ERROR_HEADER],
            "Unsupported format: CSV"
        );
    }
}
