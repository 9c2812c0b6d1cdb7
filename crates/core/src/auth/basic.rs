//! HTTP Basic authentication.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};

use super::{AuthError, AuthRequest, Authenticator, Identity};

/// Authenticator that validates requests against a configured
/// username/password pair sent as `Authorization: Basic <base64>`.
pub struct BasicAuthenticator {
    expected_username: String,
    expected_password: String,
}

impl BasicAuthenticator {
    pub fn new(username: String, password: String) -> Self {
        Self {
            expected_username: username,
            expected_password: password,
        }
    }

    /// Extract the username/password pair from the Authorization header.
    fn extract_credentials(&self, request: &AuthRequest) -> Option<(String, String)> {
        let auth_header = request.headers.get("authorization")?;
        let encoded = auth_header
            .strip_prefix("Basic ")
            .or_else(|| auth_header.strip_prefix("basic "))?;

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;

        // Password may itself contain ':'; only the first separator counts
        let (username, password) = decoded.split_once(':')?;
        Some((username.to_string(), password.to_string()))
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let (username, password) = self
            .extract_credentials(request)
            .ok_or(AuthError::NotAuthenticated)?;

        // Constant-time comparison to prevent timing attacks
        let username_ok = constant_time_eq(username.as_bytes(), self.expected_username.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), self.expected_password.as_bytes());

        if username_ok && password_ok {
            Ok(Identity {
                user_id: username,
                method: "basic".to_string(),
            })
        } else {
            Err(AuthError::InvalidCredentials(
                "Invalid username or password".to_string(),
            ))
        }
    }

    fn method_name(&self) -> &'static str {
        "basic"
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    fn make_request(headers: Vec<(&str, &str)>) -> AuthRequest {
        AuthRequest {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect(),
            source_ip: "127.0.0.1".parse::<IpAddr>().unwrap(),
        }
    }

    fn basic_header(username: &str, password: &str) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", username, password))
        )
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let auth = BasicAuthenticator::new("hook".to_string(), "hunter2".to_string());
        let request = make_request(vec![("Authorization", &basic_header("hook", "hunter2"))]);

        let identity = auth.authenticate(&request).await.unwrap();

        assert_eq!(identity.user_id, "hook");
        assert_eq!(identity.method, "basic");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let auth = BasicAuthenticator::new("hook".to_string(), "hunter2".to_string());
        let request = make_request(vec![("Authorization", &basic_header("hook", "wrong"))]);

        let result = auth.authenticate(&request).await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_wrong_username() {
        let auth = BasicAuthenticator::new("hook".to_string(), "hunter2".to_string());
        let request = make_request(vec![("Authorization", &basic_header("other", "hunter2"))]);

        let result = auth.authenticate(&request).await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_missing_header() {
        let auth = BasicAuthenticator::new("hook".to_string(), "hunter2".to_string());
        let request = make_request(vec![]);

        let result = auth.authenticate(&request).await;

        assert!(matches!(result, Err(AuthError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_malformed_base64() {
        let auth = BasicAuthenticator::new("hook".to_string(), "hunter2".to_string());
        let request = make_request(vec![("Authorization", "Basic !!!not-base64!!!")]);

        let result = auth.authenticate(&request).await;

        assert!(matches!(result, Err(AuthError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_password_containing_colon() {
        let auth = BasicAuthenticator::new("hook".to_string(), "a:b:c".to_string());
        let request = make_request(vec![("Authorization", &basic_header("hook", "a:b:c"))]);

        let identity = auth.authenticate(&request).await.unwrap();
        assert_eq!(identity.user_id, "hook");
    }

    #[test]
    fn test_method_name() {
        let auth = BasicAuthenticator::new("u".to_string(), "p".to_string());
        assert_eq!(auth.method_name(), "basic");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
