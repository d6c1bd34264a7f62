use crate::controller::types::{CheckRequest, CheckResult};
use crate::error::{CheckError, Result};
use crate::utils::constants::{FILE_FIELD, SCAN_FIELD};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// The `/check` collaborator. The upload controller only talks to this.
pub trait CheckClient: Send + Sync {
    fn check(&self, request: &CheckRequest) -> impl Future<Output = Result<CheckResult>> + Send;
}

#[derive(Clone)]
pub struct HttpCheckClient {
    http_client: Client,
    check_url: Url,
}

impl HttpCheckClient {
    pub fn new(check_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http_client: builder.build()?,
            check_url,
        })
    }

    pub fn check_url(&self) -> &Url {
        &self.check_url
    }

    // Filenames go out as raw UTF-8 the way browsers send them, with only
    // the characters that would break the header escaped.
    fn form(request: &CheckRequest) -> Form {
        let file_part = Part::bytes(request.file.content.to_vec())
            .file_name(header_safe_filename(&request.file.name));
        Form::new()
            .percent_encode_noop()
            .part(FILE_FIELD, file_part)
            .text(SCAN_FIELD, if request.virustotal { "true" } else { "false" })
    }
}

impl CheckClient for HttpCheckClient {
    async fn check(&self, request: &CheckRequest) -> Result<CheckResult> {
        let start_time = Instant::now();
        info!(
            request_id = %request.id,
            file = %request.file.name,
            bytes = request.file.size(),
            virustotal = request.virustotal,
            "posting file to {}",
            self.check_url
        );

        let response = self
            .http_client
            .post(self.check_url.clone())
            .multipart(Self::form(request))
            .send()
            .await
            .map_err(|e| {
                warn!(request_id = %request.id, "request error: {:?}", e);
                CheckError::from(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(
            request_id = %request.id,
            %status,
            body_len = body.len(),
            "check answered in {:?}",
            start_time.elapsed()
        );

        decode_reply(status, &body)
    }
}

fn header_safe_filename(name: &str) -> String {
    name.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Turn a `/check` response into a result or one of the error kinds.
///
/// A JSON body carrying a truthy `error` is a server error whatever the
/// status; `null`, `false`, `0` and `""` mean no error. A
/// body that is not JSON, or a non-2xx status without `error`, counts as a
/// transport failure.
pub fn decode_reply(status: StatusCode, body: &[u8]) -> Result<CheckResult> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| CheckError::Transport(format!("{status}: unparsable body: {e}")))?;

    match value.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {}
        Some(Value::String(message)) if message.is_empty() => {}
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {}
        Some(Value::String(message)) => return Err(CheckError::Server(message.clone())),
        Some(other) => return Err(CheckError::Server(other.to_string())),
    }

    if !status.is_success() {
        return Err(CheckError::Transport(format!(
            "{status} without an error field"
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| CheckError::Transport(format!("malformed check result: {e}")))
}
