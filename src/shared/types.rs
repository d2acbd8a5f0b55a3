use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope shared by every JSON response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let body = ApiResponse::success(Some(vec![1, 2]), None, Some(Meta { total: 2 }));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "success": true,
                "data": [1, 2],
                "message": null,
                "meta": { "total": 2 },
                "errors": null
            })
        );
    }

    #[test]
    fn test_error_envelope() {
        let body = ApiResponse::<()>::error(Some("nope".to_string()), None);
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["message"], json!("nope"));
        assert_eq!(value["data"], json!(null));
    }
}
