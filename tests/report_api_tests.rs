//! HTTP tests for the admin report endpoints
//!
//! These tests verify that:
//! - Downloads carry the format's content type and attachment filename
//! - Failed downloads are 400 with an `X-Error` header
//! - Saved reports land in the configured directory
//! - Emailed reports reach the mailer with attachment, subject and HTML summary

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use order_service::prelude::*;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    server: TestServer,
    mailer: RecordingMailer,
    reports_dir: PathBuf,
    _temp: TempDir,
}

async fn make_harness() -> Harness {
    let store = Arc::new(InMemoryOrderStore::new());
    for (days_ago, customer_id, status) in [(1, 7, "NEW"), (2, 7, "SHIPPED"), (3, 9, "NEW")] {
        store
            .create(
                NewOrder::placed(1, customer_id, 1)
                    .dated(Utc::now() - Duration::days(days_ago))
                    .with_status(status),
            )
            .await
            .unwrap();
    }

    let temp = TempDir::new().unwrap();
    let reports_dir = temp.path().join("reports");
    let mailer = RecordingMailer::new();

    let app = ServerBuilder::new()
        .with_shared_order_store(store)
        .with_product_catalog(InMemoryProductCatalog::new())
        .with_mailer(Arc::new(mailer.clone()))
        .with_reports_dir(reports_dir.clone())
        .build()
        .unwrap();

    Harness {
        server: TestServer::new(app),
        mailer,
        reports_dir,
        _temp: temp,
    }
}

// =============================================================================
// Download
// =============================================================================

#[tokio::test]
async fn test_download_sets_content_headers() {
    let h = make_harness().await;

    let cases = [
        (
            "EXCEL",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "admin_report_1_week.xlsx",
        ),
        ("pdf", "application/pdf", "admin_report_1_week.pdf"),
        (
            "Word",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "admin_report_1_week.docx",
        ),
    ];

    for (format, content_type, filename) in cases {
        let response = h
            .server
            .post("/admin/reports/download")
            .json(&json!({"duration": "1_WEEK", "format": format}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), content_type);
        assert_eq!(
            response.header("content-disposition"),
            format!("attachment; filename=\"{filename}\"").as_str()
        );
        assert!(!response.as_bytes().is_empty());
    }
}

#[tokio::test]
async fn test_download_pdf_starts_with_magic() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/download")
        .json(&json!({"duration": "6_MONTHS", "format": "PDF", "status": "NEW", "customerId": 9}))
        .await;

    response.assert_status_ok();
    assert!(response.as_bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_download_unsupported_format_sets_error_header() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/download")
        .json(&json!({"duration": "1_WEEK", "format": "CSV"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.header("x-error"), "Unsupported format: CSV");
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
}

#[tokio::test]
async fn test_download_requires_duration_and_format() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/download")
        .json(&json!({"duration": "", "format": "PDF"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Save
// =============================================================================

#[tokio::test]
async fn test_save_writes_into_reports_dir() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/save")
        .json(&json!({"duration": "1_MONTH", "format": "WORD"}))
        .await;

    response.assert_status_ok();
    let message = response.json::<Value>()["data"]
        .as_str()
        .unwrap()
        .to_string();
    let path = PathBuf::from(message.strip_prefix("Saved at: ").unwrap());

    assert!(path.is_absolute());
    assert!(path.ends_with("reports/admin_report_1_month.docx"));
    assert!(h.reports_dir.join("admin_report_1_month.docx").exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[tokio::test]
async fn test_save_refuses_duration_with_path() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/save")
        .json(&json!({"duration": "../../escape", "format": "PDF"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "IO_ERROR");
}

// =============================================================================
// Email
// =============================================================================

#[tokio::test]
async fn test_email_uses_defaults() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/email")
        .json(&json!({
            "reportRequest": {"duration": "1_WEEK", "format": "EXCEL"},
            "emailTo": "ops@example.com"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["data"],
        "Report emailed to ops@example.com"
    );

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to, "ops@example.com");
    assert_eq!(email.subject, "Admin Report");
    assert_eq!(email.text_body, "Please find the requested report attached.");
    assert_eq!(email.attachment_name, "admin_report_1_week.xlsx");
    assert_eq!(
        email.content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(!email.attachment.is_empty());

    let html = email.html_body.as_deref().unwrap();
    assert!(html.contains("1_WEEK"));
    assert!(html.contains("EXCEL"));
}

#[tokio::test]
async fn test_email_with_subject_and_filename() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/email")
        .json(&json!({
            "reportRequest": {"duration": "1_WEEK", "format": "PDF"},
            "emailTo": "ops@example.com",
            "subject": "Weekly orders",
            "filename": "weekly.pdf"
        }))
        .await;

    response.assert_status_ok();
    let email = &h.mailer.sent()[0];
    assert_eq!(email.subject, "Weekly orders");
    assert_eq!(email.attachment_name, "weekly.pdf");
    assert!(email.attachment.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_email_rejects_invalid_address() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/email")
        .json(&json!({
            "reportRequest": {"duration": "1_WEEK", "format": "PDF"},
            "emailTo": "not-an-address"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_email_requires_report_request() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/email")
        .json(&json!({"emailTo": "ops@example.com"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_email_with_unsupported_format_sends_nothing() {
    let h = make_harness().await;

    let response = h
        .server
        .post("/admin/reports/email")
        .json(&json!({
            "reportRequest": {"duration": "1_WEEK", "format": "CSV"},
            "emailTo": "ops@example.com"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "UNSUPPORTED_FORMAT");
    assert!(h.mailer.sent().is_empty());
}
