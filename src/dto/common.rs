use serde::Serialize;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::success(7);
        assert!(response.success);
        assert!(response.message.is_none());
        assert_eq!(response.data, Some(7));

        let response = ApiResponse::success_with_message(7, "Listo".to_string());
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Listo"));
    }
}
