use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use tmstore_core::api::{
    ProviderKind, RemoteProviderConfig, StorageProvider, ThreatModel, ThreatModelSummary,
};

use super::http_client::RepoApiClient;

/// Models kept in a git-hosting repository behind the threat-model API.
pub struct RemoteRepoProvider {
    client: RepoApiClient,
}

impl RemoteRepoProvider {
    pub fn new(cfg: &RemoteProviderConfig) -> anyhow::Result<Self> {
        if cfg.repo.trim().is_empty() {
            anyhow::bail!("remote provider needs a repository (owner/name)");
        }
        let client = RepoApiClient::new(
            &cfg.base_url,
            cfg.token.clone(),
            &cfg.repo,
            &cfg.branch,
            cfg.timeout_ms,
        )?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StorageProvider for RemoteRepoProvider {
    fn name(&self) -> &str {
        "remote"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Remote
    }

    async fn fetch_all(&self) -> anyhow::Result<Vec<ThreatModelSummary>> {
        match self.client.models().await? {
            Value::Array(items) => Ok(items.into_iter().map(ThreatModelSummary::new).collect()),
            Value::Null => Ok(Vec::new()),
            other => anyhow::bail!("expected a model list, got {other}"),
        }
    }

    async fn fetch(&self, name: &str) -> anyhow::Result<ThreatModel> {
        let value = self
            .client
            .model(name)
            .await
            .with_context(|| format!("fetch threat model {name}"))?;
        Ok(ThreatModel::from_value(value)?)
    }

    async fn create(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        let body = Value::Object(model.as_map().clone());
        self.client.create(target, &body).await
    }

    async fn update(&self, model: &ThreatModel, target: &str) -> anyhow::Result<()> {
        let body = Value::Object(model.as_map().clone());
        self.client.update(target, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cfg(url: &str) -> RemoteProviderConfig {
        RemoteProviderConfig {
            base_url: url.to_string(),
            token: "tkn".to_string(),
            repo: "acme/models".to_string(),
            branch: "dev".to_string(),
            timeout_ms: 1_000,
        }
    }

    #[test]
    fn test_requires_repo() {
        let mut c = cfg("http://localhost:3000");
        c.repo = " ".to_string();
        assert!(RemoteRepoProvider::new(&c).is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_lists_names() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/threatmodel/acme/models/dev/models")
            .match_header("authorization", "Bearer tkn")
            .with_status(200)
            .with_body(r#"{"status":200,"data":["One","Two"]}"#)
            .create_async()
            .await;

        let p = RemoteRepoProvider::new(&cfg(&server.url())).unwrap();
        let names: Vec<_> = p
            .fetch_all()
            .await
            .unwrap()
            .iter()
            .filter_map(|s| s.name().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_fetch_parses_document() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/threatmodel/acme/models/dev/One/data")
            .with_status(200)
            .with_body(r#"{"status":200,"data":{"summary":{"title":"One"},"detail":{}}}"#)
            .create_async()
            .await;

        let p = RemoteRepoProvider::new(&cfg(&server.url())).unwrap();
        let model = p.fetch("One").await.unwrap();
        assert_eq!(model.title(), Some("One"));
    }

    #[tokio::test]
    async fn test_fetch_missing_model_is_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/threatmodel/acme/models/dev/Gone/data")
            .with_status(404)
            .create_async()
            .await;

        let p = RemoteRepoProvider::new(&cfg(&server.url())).unwrap();
        let err = p.fetch("Gone").await.unwrap_err();
        assert!(crate::provider::is_not_found(&err));
        assert!(err.to_string().contains("Gone"));
    }

    #[tokio::test]
    async fn test_create_posts_document() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/threatmodel/acme/models/dev/One/create")
            .match_body(Matcher::Json(json!({"summary": {"title": "One"}})))
            .with_status(201)
            .with_body(r#"{"status":201,"data":{}}"#)
            .create_async()
            .await;

        let p = RemoteRepoProvider::new(&cfg(&server.url())).unwrap();
        let model = ThreatModel::from_value(json!({"summary": {"title": "One"}})).unwrap();
        p.create(&model, "One").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_failure_is_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/api/threatmodel/acme/models/dev/One/update")
            .with_status(500)
            .create_async()
            .await;

        let p = RemoteRepoProvider::new(&cfg(&server.url())).unwrap();
        assert!(p.update(&ThreatModel::new(), "One").await.is_err());
    }
}
