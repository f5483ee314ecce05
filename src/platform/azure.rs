use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::Platform;
use crate::error::{AdoError, Result};
use crate::model::build::DefinitionReference;
use crate::model::patch::PatchOperation;
use crate::model::work_item::WorkItem;

const API_VERSION: &str = "7.0";
const CONTINUATION_HEADER: &str = "x-ms-continuationtoken";

pub struct AzureDevOps {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl AzureDevOps {
    pub fn new(org_url: String, token: String) -> Self {
        // PATs go in the password slot with an empty user name
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!(":{token}"));
        Self {
            base_url: org_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {encoded}"),
            client: reqwest::Client::new(),
        }
    }

    fn work_item_url(&self, id: u64) -> String {
        format!("{}/_apis/wit/workitems/{id}", self.base_url)
    }

    fn definitions_url(&self, project: &str) -> String {
        format!(
            "{}/{}/_apis/build/definitions",
            self.base_url,
            urlencoding::encode(project)
        )
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .query(&[("api-version", API_VERSION)])
    }

    async fn send(&self, req: RequestBuilder, operation: &str, subject: &str) -> Result<Response> {
        log::debug!("{operation}: {subject}");
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| AdoError::remote(operation, e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AdoError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdoError::remote(
                operation,
                format!("{subject} returned {status}: {}", error_message(&body)),
            ));
        }
        Ok(resp)
    }
}

async fn parse_json<T: DeserializeOwned>(resp: Response, operation: &str) -> Result<T> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| AdoError::remote(operation, e.to_string()))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AdoError::remote(operation, format!("unexpected response: {e}")))
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Prefer the platform's own error message over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Deserialize)]
struct ListResponse<T> {
    value: Vec<T>,
}

#[async_trait]
impl Platform for AzureDevOps {
    fn name(&self) -> &str {
        "Azure DevOps"
    }

    async fn get_work_item(&self, id: u64) -> Result<WorkItem> {
        let req = self
            .client
            .get(self.work_item_url(id))
            .query(&[("$expand", "relations")]);
        let resp = self
            .send(req, "Fetch work item", &format!("Work item {id}"))
            .await?;
        parse_json(resp, "Fetch work item").await
    }

    async fn update_work_item(&self, ops: &[PatchOperation], id: u64) -> Result<WorkItem> {
        let body = serde_json::to_vec(ops)?;
        let req = self
            .client
            .patch(self.work_item_url(id))
            .header(CONTENT_TYPE, "application/json-patch+json")
            .body(body);
        let resp = self
            .send(req, "Update work item", &format!("Work item {id}"))
            .await?;
        parse_json(resp, "Update work item").await
    }

    async fn get_definitions(&self, project: &str) -> Result<Vec<DefinitionReference>> {
        let url = self.definitions_url(project);
        let subject = format!("Project {project}");
        let mut definitions = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut req = self.client.get(&url);
            if let Some(token) = &continuation {
                req = req.query(&[("continuationToken", token.as_str())]);
            }
            let resp = self.send(req, "List build definitions", &subject).await?;

            continuation = resp
                .headers()
                .get(CONTINUATION_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(String::from);

            let page: ListResponse<DefinitionReference> =
                parse_json(resp, "List build definitions").await?;
            definitions.extend(page.value);

            if continuation.is_none() {
                break;
            }
        }

        Ok(definitions)
    }
}
