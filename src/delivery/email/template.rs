//! HTML summary body of report emails

use crate::core::error::DeliveryError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

const SUMMARY_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Admin Orders Report</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">Admin Orders Report</h2>
        <p>Please find the requested report attached.</p>
        <table style="border-collapse: collapse;">
            <tr><td><strong>Duration</strong></td><td>{{ duration }}</td></tr>
            <tr><td><strong>Format</strong></td><td>{{ format }}</td></tr>
            <tr><td><strong>Generated at</strong></td><td>{{ generatedAt }}</td></tr>
            <tr><td><strong>File size</strong></td><td>{{ fileSize }}</td></tr>
            <tr><td><strong>Total orders</strong></td><td>{{ totalOrders }}</td></tr>
            <tr><td><strong>Unique customers</strong></td><td>{{ uniqueCustomers }}</td></tr>
            {% if totalRevenue %}<tr><td><strong>Total revenue</strong></td><td>{{ totalRevenue }}</td></tr>{% endif %}
        </table>
    </div>
</body>
</html>
"#;

/// Variables available to the summary template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmailContext {
    pub duration: String,
    pub format: String,
    pub generated_at: String,
    pub file_size: String,
    pub total_orders: usize,
    pub unique_customers: usize,
    pub total_revenue: Option<String>,
}

impl ReportEmailContext {
    pub fn new(
        duration: impl Into<String>,
        format: impl Into<String>,
        generated_at: DateTime<Utc>,
        file_bytes: usize,
        total_orders: usize,
        unique_customers: usize,
        total_revenue: Option<f64>,
    ) -> Self {
        Self {
            duration: duration.into(),
            format: format.into(),
            generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            file_size: format_file_size(file_bytes),
            total_orders,
            unique_customers,
            total_revenue: total_revenue.map(|revenue| format!("{revenue:.2}")),
        }
    }
}

/// Render the HTML summary; values are HTML-escaped
pub fn render_summary_html(context: &ReportEmailContext) -> Result<String, DeliveryError> {
    let context = Context::from_serialize(context).map_err(template_error)?;
    Tera::one_off(SUMMARY_TEMPLATE, &context, true).map_err(template_error)
}

/// `N B`, `N KB` or `N MB`, rounded down
pub fn format_file_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} MB", bytes / MB)
    }
}

fn template_error(err: tera::Error) -> DeliveryError {
    DeliveryError::Template {
        message: err.to_string(),
    }
}
