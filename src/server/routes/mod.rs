//! HTTP route modules

pub mod batches;
pub mod health;
pub mod quotas;
pub mod views;

/// Standard envelope for read endpoints
///
/// Batch submissions bypass this envelope: their body is the feature
/// response itself, whose rollup flags the dashboard consumes directly.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert_eq!(response.data, Some("test data"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_api_response_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["data"], 1);
    }
}
