//! Uniform JSON envelope for every API response

use serde::Serialize;

/// Success/failure envelope
///
/// Successful responses carry `data`; failures carry `message`, a stable
/// `code` and optional `details`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            code: None,
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            code: Some(code.into()),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success("Order deleted")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": "Order deleted"}));
    }

    #[test]
    fn test_failure_envelope() {
        let json =
            serde_json::to_value(ApiResponse::failure("IO_ERROR", "disk full", None)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "disk full");
        assert_eq!(json["code"], "IO_ERROR");
        assert!(json.get("data").is_none());
    }
}
