//! reqwest-backed implementation of [`AuthRepository`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

use super::AuthRepository;
use crate::dto::{
    AuthResponseDto, AuthSession, EmailUpdateRequest, EmailUpdateVerifyRequest, ErrorBodyDto,
    GoogleLoginRequest, LoginRequest, RefreshRequest, SendOtpRequest, VerifyOtpRequest,
};
use common::{AppError, AppResult, HttpClientConfig};

/// Request correlation header
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest plain-text error body shown to the user verbatim
const MAX_PLAIN_ERROR_LEN: usize = 200;

/// HTTP adapter for the auth endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthRepository {
    client: Client,
    base_url: String,
}

impl HttpAuthRepository {
    /// Build the adapter with the configured timeouts.
    pub fn new(config: &HttpClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        debug!("Auth API at {}", config.base_url);
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body; non-2xx answers become `AppError::Request`.
    async fn post<B>(&self, path: &str, body: &B, bearer: Option<&str>) -> AppResult<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("auth_request", %request_id, path);

        async move {
            let mut builder = self
                .client
                .post(self.url(path))
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .json(body);
            if let Some(token) = bearer {
                builder = builder.bearer_auth(token);
            }

            let response = builder.send().await?;
            let status = response.status();
            if status.is_success() {
                debug!(status = status.as_u16(), "request succeeded");
                return Ok(response);
            }

            Err(error_from_response(response).await)
        }
        .instrument(span)
        .await
    }

    async fn post_for_session<B>(&self, path: &str, body: &B) -> AppResult<AuthSession>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self.post(path, body, None).await?;
        let dto: AuthResponseDto = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Invalid auth response from {}: {}", path, e)))?;
        Ok(dto.into())
    }
}

/// Turn a rejected response into a request error with the backend's message.
async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorBodyDto>(&body) {
        Ok(parsed) => parsed.into_message(),
        Err(_) => {
            let text = body.trim();
            (!text.is_empty() && text.len() <= MAX_PLAIN_ERROR_LEN && !text.starts_with('<'))
                .then(|| text.to_string())
        }
    }
    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    warn!(status = status.as_u16(), %message, "backend rejected request");
    AppError::request(status.as_u16(), message)
}

fn empty_body() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn send_otp(&self, request: SendOtpRequest) -> AppResult<()> {
        self.post("/auth/send-otp", &request, None).await?;
        Ok(())
    }

    async fn verify_otp(&self, request: VerifyOtpRequest) -> AppResult<AuthSession> {
        self.post_for_session("/auth/verify-otp", &request).await
    }

    async fn login(&self, request: LoginRequest) -> AppResult<AuthSession> {
        self.post_for_session("/auth/login", &request).await
    }

    async fn google_login(&self, request: GoogleLoginRequest) -> AppResult<AuthSession> {
        self.post_for_session("/auth/google/login", &request).await
    }

    async fn refresh(&self, request: RefreshRequest) -> AppResult<AuthSession> {
        self.post_for_session("/auth/refresh", &request).await
    }

    async fn logout(&self, access_token: &str) -> AppResult<()> {
        self.post("/auth/logout", &empty_body(), Some(access_token))
            .await?;
        Ok(())
    }

    async fn request_email_update(
        &self,
        access_token: &str,
        request: EmailUpdateRequest,
    ) -> AppResult<()> {
        self.post("/auth/email/request-otp", &request, Some(access_token))
            .await?;
        Ok(())
    }

    async fn verify_email_update(
        &self,
        access_token: &str,
        request: EmailUpdateVerifyRequest,
    ) -> AppResult<()> {
        self.post("/auth/email/verify-otp", &request, Some(access_token))
            .await?;
        Ok(())
    }
}
