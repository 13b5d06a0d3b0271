use serde::{Deserialize, Serialize};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_serializes_bearer_type() {
        let json = serde_json::to_string(&TokenResponse::bearer("abc".into())).unwrap();
        assert!(json.contains("\"access_token\":\"abc\""));
        assert!(json.contains("\"token_type\":\"bearer\""));
    }
}
