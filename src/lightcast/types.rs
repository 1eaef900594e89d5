use serde::{Deserialize, Serialize};

use crate::skill::SkillSource;

/// A skill record as the Lightcast skills API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightcastSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub skill_type: Option<SkillType>,
    #[serde(rename = "infoUrl", default)]
    pub info_url: Option<String>,
}

impl LightcastSkill {
    pub fn to_source(&self) -> SkillSource {
        SkillSource {
            identifier: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn type_name(&self) -> &str {
        self.skill_type
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillType {
    pub id: String,
    pub name: String,
}

/// Listing filter. Both fields empty lists the catalog head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillQuery {
    pub query: Option<String>,
    pub type_id: Option<String>,
    pub limit: usize,
}

impl SkillQuery {
    pub fn keyword(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: Some(query.into()),
            type_id: None,
            limit,
        }
    }

    pub fn of_type(type_id: impl Into<String>, limit: usize) -> Self {
        Self {
            query: None,
            type_id: Some(type_id.into()),
            limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionInfo {
    #[serde(default)]
    pub attributions: Attributions,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Attributions {
    #[serde(default)]
    pub types: Vec<SkillType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}
