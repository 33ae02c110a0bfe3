//! Admin report HTTP handlers

use super::request::{EmailReportRequest, ReportRequest, content_type_for};
use crate::core::error::{OrderServiceError, OrderServiceResult};
use crate::core::validation::ValidatedJson;
use crate::delivery::email::{ReportEmail, ReportEmailContext, render_summary_html};
use crate::delivery::{DownloadError, ReportDownload};
use crate::server::host::ServerHost;
use crate::server::response::ApiResponse;
use axum::{Json, extract::State};
use chrono::Utc;
use std::sync::Arc;

/// `POST /admin/reports/download`
pub async fn download_report(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<ReportRequest>,
) -> Result<ReportDownload, DownloadError> {
    let bytes = host.reports.generate(&request).await?;

    Ok(ReportDownload::new(
        request.default_filename(),
        content_type_for(&request.format),
        bytes,
    ))
}

/// `POST /admin/reports/save`
pub async fn save_report(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<ReportRequest>,
) -> OrderServiceResult<Json<ApiResponse<String>>> {
    let bytes = host.reports.generate(&request).await?;
    let path = host
        .report_writer
        .save(&request.default_filename(), &bytes)
        .await?;

    Ok(Json(ApiResponse::success(format!(
        "Saved at: {}",
        path.display()
    ))))
}

/// `POST /admin/reports/email`
pub async fn email_report(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<EmailReportRequest>,
) -> OrderServiceResult<Json<ApiResponse<String>>> {
    let (Some(report_request), Some(email_to)) =
        (request.report_request.as_ref(), request.email_to.as_deref())
    else {
        return Err(OrderServiceError::Internal(
            "validated email request is missing fields".to_string(),
        ));
    };

    let generated = host.reports.generate_report(report_request).await?;

    let html = render_summary_html(&ReportEmailContext::new(
        &report_request.duration,
        generated.format.as_str(),
        Utc::now(),
        generated.bytes.len(),
        generated.summary.total_orders,
        generated.summary.unique_customers,
        generated.summary.total_revenue,
    ))?;

    let email = ReportEmail::new(
        email_to,
        request.subject.as_deref(),
        request.attachment_name(report_request),
        generated.format.content_type(),
        generated.bytes,
    )
    .with_html_body(html);

    host.mailer.send(email).await?;
    tracing::info!(to = %email_to, format = %generated.format, "Report emailed");

    Ok(Json(ApiResponse::success(format!(
        "Report emailed to {email_to}"
    ))))
}
