//! Auth Service Client
//!
//! Talks to a GoTrue-compatible REST API under `{base_url}/auth/v1`. Every
//! request carries the project's public key in the `apikey` header; user
//! scoped calls add the access token as a bearer token.
//!
//! Rejections the caller can act on (stale tokens, wrong password) are
//! mapped to `Ok(None)` or a specific [`GateError`]; anything else becomes
//! [`GateError::Upstream`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::IdentityServiceConfig;
use crate::domain::entity::{auth_user::AuthUser, session::Session, session::SignUpOutcome};
use crate::domain::repository::IdentityService;
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::{GateError, GateResult};
use platform::crypto::PkcePair;

#[derive(Clone)]
pub struct HttpIdentityService {
    client: Client,
    config: Arc<IdentityServiceConfig>,
}

impl HttpIdentityService {
    pub fn new(client: Client, config: IdentityServiceConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
    }

    fn token_grant(&self, grant_type: &str) -> RequestBuilder {
        self.post("token").query(&[("grant_type", grant_type)])
    }

    async fn session_from(response: Response) -> GateResult<Session> {
        Ok(response.json::<SessionDto>().await?.into_session())
    }
}

impl IdentityService for HttpIdentityService {
    async fn get_user(&self, access_token: &str) -> GateResult<Option<AuthUser>> {
        let response = self
            .client
            .get(self.config.endpoint("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                Ok(Some(response.json::<UserDto>().await?.into_user()))
            }
            // expired or revoked token, or the user was deleted
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            _ => Err(unexpected("user", response).await),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> GateResult<Option<Session>> {
        let response = self
            .token_grant("refresh_token")
            .json(&RefreshTokenGrant { refresh_token })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(Self::session_from(response).await?)),
            // reused, revoked or unknown refresh token
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND => Ok(None),
            _ => Err(unexpected("token?grant_type=refresh_token", response).await),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &Password,
    ) -> GateResult<Session> {
        let response = self
            .token_grant("password")
            .json(&PasswordGrant {
                email: email.as_str(),
                password: password.expose(),
            })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Self::session_from(response).await,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                let error = ErrorDto::read(response).await;
                if error.code() == Some("email_not_confirmed") {
                    Err(GateError::EmailNotConfirmed)
                } else {
                    Err(GateError::InvalidCredentials)
                }
            }
            _ => Err(unexpected("token?grant_type=password", response).await),
        }
    }

    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        redirect_to: &str,
        code_challenge: &str,
    ) -> GateResult<SignUpOutcome> {
        let response = self
            .post("signup")
            .query(&[("redirect_to", redirect_to)])
            .json(&SignUpBody {
                email: email.as_str(),
                password: password.expose(),
                code_challenge,
                code_challenge_method: PkcePair::method(),
            })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let outcome = match response.json::<SignUpDto>().await? {
                    SignUpDto::Session(session) => SignUpOutcome::SignedIn(session.into_session()),
                    SignUpDto::User(user) => SignUpOutcome::ConfirmationSent(user.into_user()),
                };
                Ok(outcome)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error = ErrorDto::read(response).await;
                Err(GateError::SignUpRejected(error.message()))
            }
            _ => Err(unexpected("signup", response).await),
        }
    }

    async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> GateResult<Session> {
        let response = self
            .token_grant("pkce")
            .json(&PkceGrant {
                auth_code,
                code_verifier,
            })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Self::session_from(response).await,
            // expired, already used, or verifier mismatch
            status if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS => {
                Err(GateError::SessionInvalid)
            }
            _ => Err(unexpected("token?grant_type=pkce", response).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> GateResult<()> {
        let response = self.post("logout").bearer_auth(access_token).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // nothing left to revoke
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(()),
            _ => Err(unexpected("logout", response).await),
        }
    }
}

/// Error for an answer the caller cannot act on
async fn unexpected(endpoint: &str, response: Response) -> GateError {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GateError::RateLimited;
    }
    let error = ErrorDto::read(response).await;
    GateError::Upstream(format!("{} answered {}: {}", endpoint, status, error.message()))
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
struct RefreshTokenGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct PkceGrant<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    code_challenge: &'a str,
    code_challenge_method: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<DateTime<Utc>>,
}

impl UserDto {
    fn into_user(self) -> AuthUser {
        // phone-only accounts report an empty address
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .map(Email::from_db);
        AuthUser::new(UserId::from_uuid(self.id), email, self.email_confirmed_at)
    }
}

#[derive(Debug, Deserialize)]
struct SessionDto {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    user: UserDto,
}

impl SessionDto {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in.map(Duration::from_secs),
            user: self.user.into_user(),
        }
    }
}

/// Sign-up answers with a session when confirmation is disabled, otherwise
/// with the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpDto {
    Session(SessionDto),
    User(UserDto),
}

/// Error bodies vary between endpoints and service versions
#[derive(Debug, Default, Deserialize)]
struct ErrorDto {
    error_code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl ErrorDto {
    async fn read(response: Response) -> Self {
        response.json::<Self>().await.unwrap_or_default()
    }

    fn code(&self) -> Option<&str> {
        self.error_code.as_deref().or(self.error.as_deref())
    }

    fn message(&self) -> String {
        self.msg
            .as_deref()
            .or(self.error_description.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("no details")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dto_mapping() {
        let dto: UserDto = serde_json::from_value(serde_json::json!({
            "id": "6f1d2c3b-8a4e-4b5f-9c6d-7e8f9a0b1c2d",
            "email": "Ana@Finca.co",
            "email_confirmed_at": "2024-03-01T10:00:00Z",
            "role": "authenticated"
        }))
        .unwrap();

        let user = dto.into_user();
        assert!(user.is_email_confirmed());
        assert_eq!(user.email.unwrap().as_str(), "Ana@Finca.co");
    }

    #[test]
    fn test_empty_email_is_none() {
        let dto: UserDto = serde_json::from_value(serde_json::json!({
            "id": "6f1d2c3b-8a4e-4b5f-9c6d-7e8f9a0b1c2d",
            "email": "",
            "email_confirmed_at": null
        }))
        .unwrap();

        let user = dto.into_user();
        assert!(user.email.is_none());
        assert!(!user.is_email_confirmed());
    }

    #[test]
    fn test_sign_up_dto_variants() {
        let user_only: SignUpDto = serde_json::from_value(serde_json::json!({
            "id": "6f1d2c3b-8a4e-4b5f-9c6d-7e8f9a0b1c2d",
            "email": "ana@finca.co",
            "confirmation_sent_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert!(matches!(user_only, SignUpDto::User(_)));

        let with_session: SignUpDto = serde_json::from_value(serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": {
                "id": "6f1d2c3b-8a4e-4b5f-9c6d-7e8f9a0b1c2d",
                "email": "ana@finca.co",
                "email_confirmed_at": "2024-03-01T10:00:00Z"
            }
        }))
        .unwrap();
        match with_session {
            SignUpDto::Session(session) => {
                let session = session.into_session();
                assert_eq!(session.expires_in, Some(Duration::from_secs(3600)));
                assert_eq!(session.refresh_token, "rt");
            }
            SignUpDto::User(_) => panic!("expected a session"),
        }
    }

    #[test]
    fn test_error_dto_message_fallbacks() {
        let gotrue: ErrorDto = serde_json::from_value(serde_json::json!({
            "code": 400,
            "error_code": "email_not_confirmed",
            "msg": "Email not confirmed"
        }))
        .unwrap();
        assert_eq!(gotrue.code(), Some("email_not_confirmed"));
        assert_eq!(gotrue.message(), "Email not confirmed");

        let oauth: ErrorDto = serde_json::from_value(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        }))
        .unwrap();
        assert_eq!(oauth.code(), Some("invalid_grant"));
        assert_eq!(oauth.message(), "Invalid login credentials");

        assert_eq!(ErrorDto::default().message(), "no details");
    }

    mod against_server {
        use super::*;
        use serde_json::json;
        use wiremock::matchers::{body_json, header, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        const USER_ID: &str = "6f1d2c3b-8a4e-4b5f-9c6d-7e8f9a0b1c2d";

        fn service(server: &MockServer) -> HttpIdentityService {
            HttpIdentityService::new(
                Client::new(),
                IdentityServiceConfig::new(server.uri(), "anon-key"),
            )
        }

        fn user_json() -> serde_json::Value {
            json!({
                "id": USER_ID,
                "email": "ana@finca.co",
                "email_confirmed_at": "2024-03-01T10:00:00Z"
            })
        }

        fn session_json() -> serde_json::Value {
            json!({
                "access_token": "at-new",
                "refresh_token": "rt-new",
                "expires_in": 3600,
                "token_type": "bearer",
                "user": user_json()
            })
        }

        fn credentials() -> (Email, Password) {
            (
                Email::new("ana@finca.co").unwrap(),
                Password::new("cafetal-2024").unwrap(),
            )
        }

        async fn answer_user_with(status: u16) -> GateResult<Option<AuthUser>> {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/auth/v1/user"))
                .respond_with(ResponseTemplate::new(status).set_body_json(json!({"msg": "nope"})))
                .mount(&server)
                .await;
            service(&server).get_user("at").await
        }

        #[tokio::test]
        async fn test_get_user_sends_key_and_bearer() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/auth/v1/user"))
                .and(header("apikey", "anon-key"))
                .and(header("authorization", "Bearer at"))
                .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
                .expect(1)
                .mount(&server)
                .await;

            let user = service(&server).get_user("at").await.unwrap().unwrap();

            assert_eq!(user.id.to_string(), USER_ID);
            assert!(user.is_email_confirmed());
        }

        #[tokio::test]
        async fn test_get_user_stale_token_is_none() {
            for status in [401, 403, 404] {
                assert!(
                    matches!(answer_user_with(status).await, Ok(None)),
                    "status {}",
                    status
                );
            }
        }

        #[tokio::test]
        async fn test_get_user_server_error_is_upstream() {
            let result = answer_user_with(503).await;
            assert!(matches!(result, Err(GateError::Upstream(ref msg)) if msg.contains("503")));
        }

        #[tokio::test]
        async fn test_get_user_rate_limit() {
            assert!(matches!(answer_user_with(429).await, Err(GateError::RateLimited)));
        }

        #[tokio::test]
        async fn test_refresh_session() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .and(query_param("grant_type", "refresh_token"))
                .and(body_json(json!({"refresh_token": "rt-old"})))
                .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .and(body_json(json!({"refresh_token": "rt-used"})))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid Refresh Token: Already Used"
                })))
                .mount(&server)
                .await;
            let identity = service(&server);

            let session = identity.refresh_session("rt-old").await.unwrap().unwrap();
            assert_eq!(session.access_token, "at-new");
            assert_eq!(session.refresh_token, "rt-new");

            assert!(matches!(identity.refresh_session("rt-used").await, Ok(None)));
        }

        #[tokio::test]
        async fn test_refresh_session_server_error_is_upstream() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            let result = service(&server).refresh_session("rt").await;

            assert!(matches!(result, Err(GateError::Upstream(_))));
        }

        #[tokio::test]
        async fn test_sign_in_maps_rejections() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .and(query_param("grant_type", "password"))
                .and(body_json(json!({"email": "ana@finca.co", "password": "cafetal-2024"})))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "code": 400,
                    "error_code": "email_not_confirmed",
                    "msg": "Email not confirmed"
                })))
                .expect(1)
                .mount(&server)
                .await;
            let (email, password) = credentials();

            let result = service(&server).sign_in_with_password(&email, &password).await;
            assert!(matches!(result, Err(GateError::EmailNotConfirmed)));

            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid login credentials"
                })))
                .mount(&server)
                .await;

            let result = service(&server).sign_in_with_password(&email, &password).await;
            assert!(matches!(result, Err(GateError::InvalidCredentials)));
        }

        #[tokio::test]
        async fn test_sign_in_rate_limit() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .respond_with(ResponseTemplate::new(429))
                .mount(&server)
                .await;
            let (email, password) = credentials();

            let result = service(&server).sign_in_with_password(&email, &password).await;

            assert!(matches!(result, Err(GateError::RateLimited)));
        }

        #[tokio::test]
        async fn test_sign_up_outcomes() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/signup"))
                .and(query_param("redirect_to", "http://localhost:3000/auth/callback"))
                .and(body_json(json!({
                    "email": "ana@finca.co",
                    "password": "cafetal-2024",
                    "code_challenge": "challenge",
                    "code_challenge_method": PkcePair::method()
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
                .mount(&server)
                .await;
            let (email, password) = credentials();

            let outcome = service(&server)
                .sign_up(&email, &password, "http://localhost:3000/auth/callback", "challenge")
                .await
                .unwrap();
            assert!(matches!(outcome, SignUpOutcome::ConfirmationSent(_)));

            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/signup"))
                .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                    "code": 422,
                    "error_code": "user_already_exists",
                    "msg": "User already registered"
                })))
                .mount(&server)
                .await;

            let result = service(&server)
                .sign_up(&email, &password, "http://localhost:3000/auth/callback", "challenge")
                .await;
            assert!(
                matches!(result, Err(GateError::SignUpRejected(ref msg)) if msg == "User already registered")
            );
        }

        #[tokio::test]
        async fn test_exchange_code() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .and(query_param("grant_type", "pkce"))
                .and(body_json(json!({"auth_code": "code", "code_verifier": "verifier"})))
                .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/token"))
                .and(body_json(json!({"auth_code": "used", "code_verifier": "verifier"})))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;
            let identity = service(&server);

            let session = identity.exchange_code("code", "verifier").await.unwrap();
            assert_eq!(session.access_token, "at-new");

            let result = identity.exchange_code("used", "verifier").await;
            assert!(matches!(result, Err(GateError::SessionInvalid)));
        }

        #[tokio::test]
        async fn test_sign_out_tolerates_revoked_token() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/logout"))
                .and(header("authorization", "Bearer at"))
                .respond_with(ResponseTemplate::new(204))
                .mount(&server)
                .await;
            Mock::given(method("POST"))
                .and(path("/auth/v1/logout"))
                .and(header("authorization", "Bearer gone"))
                .respond_with(ResponseTemplate::new(401))
                .mount(&server)
                .await;
            let identity = service(&server);

            assert!(identity.sign_out("at").await.is_ok());
            assert!(identity.sign_out("gone").await.is_ok());
        }
    }
}
