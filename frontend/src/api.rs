use gloo_console::error;
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use thiserror::Error;

use shared::auth::{self, CredentialsRequest, TokenResponse};
use shared::error::{GENERIC_PREDICT_ERROR, extract_detail_message};
use shared::feed::FeedSource;
use shared::modality::Modality;
use shared::verdict::{Verdict, parse_verdict};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REGISTER_ENDPOINT: &str = "/auth/register";

/// Failure modes of a prediction request, kept apart so the upload page can
/// show structured server messages verbatim while everything else collapses
/// to the generic message.
#[derive(Debug, Clone, Error)]
pub enum PredictError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {status}")]
    Server { status: u16, detail: Option<String> },
    #[error("unexpected response body: {0}")]
    Malformed(String),
}

impl PredictError {
    /// Message shown inline on the upload page.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_PREDICT_ERROR.to_string(),
        }
    }
}

/// One multipart POST to `/predict/{modality}` carrying the session bearer.
pub async fn predict(
    modality: Modality,
    file: &GlooFile,
    bearer: &str,
) -> Result<Verdict, PredictError> {
    let form_data = web_sys::FormData::new().unwrap();
    form_data.append_with_blob("file", file.as_ref()).unwrap();

    let response = Request::post(&format!("/predict/{modality}"))
        .header("Authorization", &format!("Bearer {bearer}"))
        .body(form_data)
        .expect("Failed to build request.")
        .send()
        .await
        .map_err(|err| PredictError::Network(err.to_string()))?;

    if response.ok() {
        let body = response
            .text()
            .await
            .map_err(|err| PredictError::Malformed(err.to_string()))?;
        parse_verdict(&body).map_err(|err| PredictError::Malformed(err.to_string()))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(PredictError::Server {
            status,
            detail: extract_detail_message(&body),
        })
    }
}

/// One category batch from the feed service.
pub async fn fetch_feed_batch(category: &str, limit: usize) -> Result<Vec<FeedSource>, String> {
    let response = Request::get(&format!("/feed?subreddit={category}&limit={limit}"))
        .send()
        .await
        .map_err(|err| format!("feed fetch for '{category}' failed: {err}"))?;

    if !response.ok() {
        return Err(format!(
            "feed fetch for '{category}' returned status {}",
            response.status()
        ));
    }

    response
        .json::<Vec<FeedSource>>()
        .await
        .map_err(|err| format!("feed response for '{category}' did not parse: {err}"))
}

/// Downloads a feed item's media binary and rewraps it as an upload.
pub async fn fetch_media_file(url: &str, upload_name: &str) -> Result<GlooFile, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| format!("media fetch failed: {err}"))?;

    if !response.ok() {
        return Err(format!("media fetch returned status {}", response.status()));
    }

    let bytes = response
        .binary()
        .await
        .map_err(|err| format!("media body read failed: {err}"))?;
    Ok(GlooFile::new(upload_name, bytes.as_slice()))
}

/// Exchanges credentials for a bearer token at the auth gateway. Failures
/// come back as one of the fixed login-view messages.
pub async fn authenticate(
    endpoint: &str,
    email: String,
    password: String,
) -> Result<String, &'static str> {
    let payload = CredentialsRequest { email, password };
    let response = Request::post(endpoint)
        .json(&payload)
        .expect("Failed to build request.")
        .send()
        .await
        .map_err(|err| {
            error!(format!("Auth request failed: {err:?}"));
            auth::GENERIC_AUTH_ERROR
        })?;

    if response.ok() {
        response
            .json::<TokenResponse>()
            .await
            .map(|body| body.token)
            .map_err(|_| auth::GENERIC_AUTH_ERROR)
    } else {
        Err(auth::failure_message(response.status()))
    }
}
