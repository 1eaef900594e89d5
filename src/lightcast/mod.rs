//! Skill source feed: the Lightcast open skills catalog.
//!
//! The transformation pipeline only ever sees [`SkillSource`](crate::skill::SkillSource)
//! values; this module is where they come from.

pub mod client;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use client::LightcastClient;
pub use types::{LightcastSkill, SkillQuery, SkillType};

/// Browsing interface over a skills catalog.
#[async_trait]
pub trait SkillCatalog: Send + Sync {
    async fn skill_types(&self) -> Result<Vec<SkillType>>;
    async fn search(&self, query: &SkillQuery) -> Result<Vec<LightcastSkill>>;
    async fn get_skill(&self, id: &str) -> Result<Option<LightcastSkill>>;
}

/// Small canned catalog for `--dry-run`.
pub struct MockCatalog {
    types: Vec<SkillType>,
    skills: Vec<LightcastSkill>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        let specialized = SkillType {
            id: "ST1".to_string(),
            name: "Specialized Skill".to_string(),
        };
        let common = SkillType {
            id: "ST2".to_string(),
            name: "Common Skill".to_string(),
        };
        let skill = |id: &str, name: &str, description: &str, kind: &SkillType| LightcastSkill {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            skill_type: Some(kind.clone()),
            info_url: None,
        };
        let skills = vec![
            skill(
                "KS1200364C9C1LK3V5Q1",
                "Python (Programming Language)",
                "A general-purpose, high-level programming language.",
                &specialized,
            ),
            skill(
                "KS440W865GC4VRBW6LJP",
                "Data Visualization",
                "Presenting data in graphical form so patterns are easy to see.",
                &specialized,
            ),
            skill(
                "KS1218W78FGVPVP2KXPX",
                "Communication",
                "Exchanging information clearly with others.",
                &common,
            ),
        ];
        Self {
            types: vec![specialized, common],
            skills,
        }
    }

    pub fn with_skills(types: Vec<SkillType>, skills: Vec<LightcastSkill>) -> Self {
        Self { types, skills }
    }
}

#[async_trait]
impl SkillCatalog for MockCatalog {
    async fn skill_types(&self) -> Result<Vec<SkillType>> {
        Ok(self.types.clone())
    }

    async fn search(&self, query: &SkillQuery) -> Result<Vec<LightcastSkill>> {
        let needle = query.query.as_deref().map(str::to_lowercase);
        Ok(self
            .skills
            .iter()
            .filter(|s| match needle {
                Some(ref n) => s.name.to_lowercase().contains(n),
                None => true,
            })
            .filter(|s| match query.type_id {
                Some(ref t) => s.skill_type.as_ref().is_some_and(|st| &st.id == t),
                None => true,
            })
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn get_skill(&self, id: &str) -> Result<Option<LightcastSkill>> {
        Ok(self.skills.iter().find(|s| s.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog_keyword_search_is_case_insensitive() {
        let catalog = MockCatalog::new();
        let found = catalog
            .search(&SkillQuery::keyword("PYTHON", 20))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "KS1200364C9C1LK3V5Q1");
    }

    #[tokio::test]
    async fn test_mock_catalog_type_filter_and_limit() {
        let catalog = MockCatalog::new();
        let found = catalog.search(&SkillQuery::of_type("ST1", 1)).await.unwrap();
        assert_eq!(found.len(), 1);
        let found = catalog.search(&SkillQuery::of_type("ST2", 30)).await.unwrap();
        assert_eq!(found[0].name, "Communication");
    }

    #[tokio::test]
    async fn test_mock_catalog_get_skill() {
        let catalog = MockCatalog::new();
        assert!(catalog.get_skill("KS1218W78FGVPVP2KXPX").await.unwrap().is_some());
        assert!(catalog.get_skill("missing").await.unwrap().is_none());
    }
}
