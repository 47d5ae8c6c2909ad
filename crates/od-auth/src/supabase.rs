//! # Hosted Auth Client
//!
//! [`AuthProvider`] over the Supabase GoTrue REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sign_in      POST /auth/v1/token?grant_type=password                  │
//! │               { email, password }                                       │
//! │                                                                         │
//! │  sign_up      POST /auth/v1/signup                                     │
//! │               { email, password, data: { full_name, gender,            │
//! │                                          date_of_birth } }              │
//! │                                                                         │
//! │  verify_code  POST /auth/v1/verify                                     │
//! │               { phone, token, type: "sms" }                             │
//! │                                                                         │
//! │  Every call:  apikey: <anon key>                                       │
//! │               Authorization: Bearer <anon key>                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::provider::{
    AuthAction, AuthOutcome, AuthProvider, AuthUser, Session, SignInRequest, SignUpRequest,
    VerifyCodeRequest,
};

const TOKEN_PATH: &str = "auth/v1/token?grant_type=password";
const SIGNUP_PATH: &str = "auth/v1/signup";
const VERIFY_PATH: &str = "auth/v1/verify";

// =============================================================================
// Response Shapes
// =============================================================================

/// Body of a successful token / verify response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token
                .expires_at
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            user: token.user,
        }
    }
}

/// Sign-up answers with a session when email confirmation is off, and
/// with the bare user when it is on.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

// =============================================================================
// Client
// =============================================================================

/// REST client for a hosted Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
}

impl SupabaseClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &AuthConfig) -> AuthResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(SupabaseClient {
            http,
            base_url: config.base_url()?,
            anon_key: config.anon_key.clone(),
        })
    }

    /// POST a JSON body with the project key headers and return the
    /// decoded JSON answer.
    async fn post(&self, path: &str, body: &Value) -> AuthResult<Value> {
        let url = self.base_url.join(path)?;
        debug!(%url, "auth request");

        let resp = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        let message = extract_error_message(&text)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        if status.is_server_error() {
            warn!(status = status.as_u16(), %message, "auth service error");
            Err(AuthError::ServerError {
                status: status.as_u16(),
                message,
            })
        } else {
            debug!(status = status.as_u16(), %message, "auth request rejected");
            Err(AuthError::Rejected(message))
        }
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn sign_in(&self, request: &SignInRequest) -> AuthResult<AuthOutcome> {
        let value = self.post(TOKEN_PATH, &sign_in_body(request)).await?;
        let outcome = session_outcome(AuthAction::SignIn, value)?;
        info!(user_id = %outcome.user.id, "signed in");
        Ok(outcome)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> AuthResult<AuthOutcome> {
        let value = self.post(SIGNUP_PATH, &sign_up_body(request)).await?;
        let outcome = sign_up_outcome(value)?;
        info!(
            user_id = %outcome.user.id,
            confirmed = outcome.session.is_some(),
            "signed up"
        );
        Ok(outcome)
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> AuthResult<AuthOutcome> {
        let value = self.post(VERIFY_PATH, &verify_body(request)).await?;
        let outcome = session_outcome(AuthAction::VerifyCode, value)?;
        info!(user_id = %outcome.user.id, "phone verified");
        Ok(outcome)
    }
}

// =============================================================================
// Bodies and Parsing
// =============================================================================

fn sign_in_body(request: &SignInRequest) -> Value {
    json!({
        "email": request.email.trim(),
        "password": request.password,
    })
}

fn sign_up_body(request: &SignUpRequest) -> Value {
    let profile = &request.profile;
    json!({
        "email": request.email.trim(),
        "password": request.password,
        "data": {
            "full_name": profile.full_name.trim(),
            "gender": profile.gender,
            "date_of_birth": profile.date_of_birth.map(|d| d.to_string()),
        },
    })
}

fn verify_body(request: &VerifyCodeRequest) -> Value {
    json!({
        "phone": request.phone.trim(),
        "token": request.code.trim(),
        "type": "sms",
    })
}

fn session_outcome(action: AuthAction, value: Value) -> AuthResult<AuthOutcome> {
    let session = Session::from(serde_json::from_value::<TokenResponse>(value)?);
    Ok(AuthOutcome {
        action,
        user: session.user.clone(),
        session: Some(session),
    })
}

fn sign_up_outcome(value: Value) -> AuthResult<AuthOutcome> {
    if value.is_null() {
        return Err(AuthError::ParseError("User data is null".into()));
    }
    let outcome = match serde_json::from_value::<SignUpResponse>(value)? {
        SignUpResponse::Session(token) => {
            let session = Session::from(token);
            AuthOutcome {
                action: AuthAction::SignUp,
                user: session.user.clone(),
                session: Some(session),
            }
        }
        SignUpResponse::User(user) => AuthOutcome {
            action: AuthAction::SignUp,
            user,
            session: None,
        },
    };
    Ok(outcome)
}

/// Pulls the human-readable message out of an error body.
///
/// GoTrue uses `error_description`, `msg` or `message` depending on the
/// endpoint and version.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|msg| !msg.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Gender, SignUpProfile};
    use chrono::NaiveDate;

    #[test]
    fn test_sign_up_body_carries_metadata() {
        let request = SignUpRequest {
            email: " ayesha@example.com ".into(),
            password: "secret1".into(),
            profile: SignUpProfile {
                full_name: "Ayesha Khan".into(),
                gender: Gender::Female,
                date_of_birth: NaiveDate::from_ymd_opt(1998, 4, 12),
            },
        };
        let body = sign_up_body(&request);

        assert_eq!(body["email"], "ayesha@example.com");
        assert_eq!(body["data"]["full_name"], "Ayesha Khan");
        assert_eq!(body["data"]["gender"], "Female");
        assert_eq!(body["data"]["date_of_birth"], "1998-04-12");
    }

    #[test]
    fn test_verify_body_is_sms() {
        let body = verify_body(&VerifyCodeRequest {
            phone: "+923001234567".into(),
            code: "123456".into(),
        });
        assert_eq!(body["type"], "sms");
        assert_eq!(body["token"], "123456");
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            Some("Invalid login credentials".into())
        );
        assert_eq!(
            extract_error_message(r#"{"code":422,"msg":"User already registered"}"#),
            Some("User already registered".into())
        );
        assert_eq!(
            extract_error_message(r#"{"message":"Token has expired or is invalid"}"#),
            Some("Token has expired or is invalid".into())
        );
        assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_session_outcome_parses_token() {
        let value = json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1_700_000_000,
            "refresh_token": "refresh",
            "user": { "id": "u1", "email": "ayesha@example.com", "phone": "" }
        });
        let outcome = session_outcome(AuthAction::SignIn, value).unwrap();
        let session = outcome.session.unwrap();

        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.expires_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_sign_up_outcome_without_session() {
        let value = json!({ "id": "u2", "email": "new@example.com", "aud": "authenticated" });
        let outcome = sign_up_outcome(value).unwrap();
        assert_eq!(outcome.user.id, "u2");
        assert!(outcome.session.is_none());

        assert!(sign_up_outcome(Value::Null).is_err());
        assert!(sign_up_outcome(json!({ "unexpected": true })).is_err());
    }

    #[test]
    fn test_client_rejects_bad_config() {
        assert!(SupabaseClient::new(&AuthConfig::default()).is_err());

        let config = AuthConfig {
            url: "https://project.supabase.co".into(),
            anon_key: "anon".into(),
            timeout_secs: 5,
        };
        let client = SupabaseClient::new(&config).unwrap();
        assert_eq!(
            client.base_url.join(SIGNUP_PATH).unwrap().as_str(),
            "https://project.supabase.co/auth/v1/signup"
        );
    }
}
