use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{
    DataEnvelope, LightcastSkill, SkillQuery, SkillType, TokenResponse, VersionInfo,
};
use super::SkillCatalog;
use crate::config::LightcastConfig;
use crate::util::SecretString;

const SKILL_FIELDS: &str = "id,name,type,description,infoUrl";

/// Authenticated client for the Lightcast open skills API.
pub struct LightcastClient {
    api_url: String,
    token: SecretString,
    client: Client,
}

impl LightcastClient {
    /// Exchange the configured client credentials for a bearer token.
    pub async fn connect(config: &LightcastConfig) -> Result<Self> {
        let client_id = config.client_id()?;
        let client_secret = config.client_secret()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        debug!("Requesting Lightcast token from {}", config.auth_url);
        let response = client
            .post(&config.auth_url)
            .form(&[
                ("client_id", client_id.expose()),
                ("client_secret", client_secret.expose()),
                ("grant_type", "client_credentials"),
                ("scope", config.scope.as_str()),
            ])
            .send()
            .await
            .context("Failed to send Lightcast authentication request")?;

        let token: TokenResponse = read_json(response, "authentication").await?;
        info!("Lightcast authenticated");

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: token.access_token.into(),
            client,
        })
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        self.client
            .get(url)
            .bearer_auth(self.token.expose())
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send Lightcast request to {}", url))
    }
}

/// `{api_url}/skills/{id}` with `id` as one percent-encoded path segment.
fn skill_url(api_url: &str, id: &str) -> Result<Url> {
    let mut url =
        Url::parse(api_url).with_context(|| format!("Invalid Lightcast API URL: {}", api_url))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("Lightcast API URL cannot take a path: {}", api_url))?
        .pop_if_empty()
        .push("skills")
        .push(id);
    Ok(url)
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        bail!("Lightcast {} error {}: {}", what, status, error_text);
    }
    response
        .json()
        .await
        .with_context(|| format!("Failed to parse Lightcast {} response", what))
}

#[async_trait]
impl SkillCatalog for LightcastClient {
    async fn skill_types(&self) -> Result<Vec<SkillType>> {
        let response = self.get(&self.api_url, &[]).await?;
        let info: VersionInfo = read_json(response, "version").await?;
        Ok(info.attributions.types)
    }

    async fn search(&self, query: &SkillQuery) -> Result<Vec<LightcastSkill>> {
        let mut params = vec![
            ("fields", SKILL_FIELDS.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(ref q) = query.query {
            params.push(("q", q.clone()));
        }
        if let Some(ref type_id) = query.type_id {
            params.push(("typeIds", type_id.clone()));
        }

        let url = format!("{}/skills", self.api_url);
        let response = self.get(&url, &params).await?;
        let envelope: DataEnvelope<Vec<LightcastSkill>> = read_json(response, "search").await?;
        debug!("Lightcast search returned {} skills", envelope.data.len());
        Ok(envelope.data)
    }

    async fn get_skill(&self, id: &str) -> Result<Option<LightcastSkill>> {
        let url = skill_url(&self.api_url, id)?;
        let response = self
            .get(url.as_str(), &[("fields", SKILL_FIELDS.to_string())])
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: DataEnvelope<Option<LightcastSkill>> =
            read_json(response, "skill lookup").await?;
        Ok(envelope.data)
    }
}
