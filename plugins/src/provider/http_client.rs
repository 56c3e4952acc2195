use reqwest::{StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Failures talking to the repository API, split by what the caller can do
/// about them.
#[derive(Debug, Error)]
pub enum RepoApiError {
    /// The model (or the repository/branch) does not exist.
    #[error("no threat model at {url}")]
    NotFound { url: String },
    #[error("repository refused access to {url} ({status})")]
    Unauthorized { status: u16, url: String },
    #[error("repository answered {status} for {url}: {body}")]
    Rejected { status: u16, url: String, body: String },
    #[error("repository unreachable at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unreadable response from {url}: {source} | body={body}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RepoApiError {
    fn from_status(status: StatusCode, url: String, body: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND => RepoApiError::NotFound { url },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RepoApiError::Unauthorized {
                status: status.as_u16(),
                url,
            },
            _ => RepoApiError::Rejected {
                status: status.as_u16(),
                url,
                body: preview_body(body),
            },
        }
    }

    /// Status code of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            RepoApiError::NotFound { .. } => Some(StatusCode::NOT_FOUND.as_u16()),
            RepoApiError::Unauthorized { status, .. } | RepoApiError::Rejected { status, .. } => {
                Some(*status)
            }
            RepoApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            RepoApiError::Decode { .. } => None,
        }
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().nth(BODY_PREVIEW_LIMIT).is_some() {
        out.push_str("...");
    }
    out
}

async fn parse_json_response(resp: reqwest::Response) -> anyhow::Result<Value> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await.map_err(|source| RepoApiError::Transport {
        url: url.clone(),
        source,
    })?;

    if !status.is_success() {
        return Err(RepoApiError::from_status(status, url, &body).into());
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str::<Value>(&body).map_err(|source| {
        RepoApiError::Decode {
            url,
            body: preview_body(&body),
            source,
        }
        .into()
    })
}

/// The repository API answers `{"status": <code>, "data": <payload>}`.
/// Bodies without the envelope are passed through unchanged.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Client for the threat-model endpoints of one repository branch.
#[derive(Clone)]
pub struct RepoApiClient {
    token: String,
    http: reqwest::Client,
    // Everything up to and including the branch segment.
    branch_url: Url,
    url_models: Url,
}

impl RepoApiClient {
    pub fn new(
        base_url: &str,
        token: String,
        repo: &str,
        branch: &str,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let mut branch_url = Url::parse(base_url.trim_end_matches('/'))?;
        {
            let mut segments = branch_url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("base url cannot carry a path: {base_url}"))?;
            segments.pop_if_empty().extend(["api", "threatmodel"]);
            segments.extend(repo.split('/').filter(|s| !s.is_empty()));
            segments.push(branch);
        }
        let url_models = join_segments(&branch_url, &["models"])?;
        Ok(Self {
            token,
            http,
            branch_url,
            url_models,
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.token)
        }
    }

    fn model_url(&self, model: &str, action: &str) -> anyhow::Result<Url> {
        join_segments(&self.branch_url, &[model, action])
    }

    /// Names of the models on the branch.
    pub async fn models(&self) -> anyhow::Result<Value> {
        let url = &self.url_models;
        tracing::debug!(target: "tmstore.remote", stage = "remote.http.models.in", url = %url);
        let resp = self
            .auth(self.http.get(url.clone()))
            .send()
            .await
            .map_err(|source| RepoApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        let v = parse_json_response(resp).await?;
        tracing::debug!(target: "tmstore.remote", stage = "remote.http.models.out", status = %status);
        Ok(unwrap_envelope(v))
    }

    /// One model document, unwrapped from the envelope.
    pub async fn model(&self, model: &str) -> anyhow::Result<Value> {
        let url = self.model_url(model, "data")?;
        tracing::debug!(
            target: "tmstore.remote",
            stage = "remote.http.model.in",
            url = %url,
            model = %model
        );
        let resp = self
            .auth(self.http.get(url.clone()))
            .send()
            .await
            .map_err(|source| RepoApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        let v = parse_json_response(resp).await?;
        tracing::debug!(target: "tmstore.remote", stage = "remote.http.model.out", status = %status);
        Ok(unwrap_envelope(v))
    }

    /// POSTs a new model. Fails if the repository already has it.
    pub async fn create(&self, model: &str, body: &Value) -> anyhow::Result<()> {
        let url = self.model_url(model, "create")?;
        tracing::debug!(
            target: "tmstore.remote",
            stage = "remote.http.create.in",
            url = %url,
            model = %model
        );
        let resp = self
            .auth(self.http.post(url.clone()).json(body))
            .send()
            .await
            .map_err(|source| RepoApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        parse_json_response(resp).await?;
        tracing::debug!(target: "tmstore.remote", stage = "remote.http.create.out", status = %status);
        Ok(())
    }

    /// PUTs over an existing model.
    pub async fn update(&self, model: &str, body: &Value) -> anyhow::Result<()> {
        let url = self.model_url(model, "update")?;
        tracing::debug!(
            target: "tmstore.remote",
            stage = "remote.http.update.in",
            url = %url,
            model = %model
        );
        let resp = self
            .auth(self.http.put(url.clone()).json(body))
            .send()
            .await
            .map_err(|source| RepoApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        parse_json_response(resp).await?;
        tracing::debug!(target: "tmstore.remote", stage = "remote.http.update.out", status = %status);
        Ok(())
    }
}

fn join_segments(base: &Url, tail: &[&str]) -> anyhow::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("base url cannot carry a path: {base}"))?
        .extend(tail);
    Ok(url)
}
