//! Data model shared by the transformation pipeline and its collaborators.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A raw skill record as it comes out of the taxonomy catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSource {
    #[serde(alias = "id")]
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SkillSource {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description if present and not blank.
    pub fn described(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// The five-step mastery scale. Declaration order is the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProficiencyLevel {
    Poor,
    Basic,
    Intermediate,
    Advanced,
    Exceptional,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 5] = [
        ProficiencyLevel::Poor,
        ProficiencyLevel::Basic,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
        ProficiencyLevel::Exceptional,
    ];

    /// Lowercase wire key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProficiencyLevel::Poor => "poor",
            ProficiencyLevel::Basic => "basic",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
            ProficiencyLevel::Exceptional => "exceptional",
        }
    }

    /// Published statement-count range for the level. Only the lower bound is enforced.
    pub fn advisory_range(&self) -> (usize, usize) {
        match self {
            ProficiencyLevel::Poor => (2, 5),
            ProficiencyLevel::Basic => (2, 4),
            ProficiencyLevel::Intermediate => (2, 4),
            ProficiencyLevel::Advanced => (2, 5),
            ProficiencyLevel::Exceptional => (2, 3),
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = anyhow::Error;

    // Case-sensitive on purpose: "Poor" is not a level key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ProficiencyLevel::ALL.iter().find(|l| l.as_str() == s) {
            Some(level) => Ok(*level),
            None => bail!("Unknown proficiency level: {}", s),
        }
    }
}

/// Advisory bounds on the total statement count of a skill.
pub const TOTAL_STATEMENTS_ADVISORY: (usize, usize) = (10, 21);

/// Observable statements per level, serialized in canonical level order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levels {
    pub poor: Vec<String>,
    pub basic: Vec<String>,
    pub intermediate: Vec<String>,
    pub advanced: Vec<String>,
    pub exceptional: Vec<String>,
}

impl Levels {
    pub fn get(&self, level: ProficiencyLevel) -> &[String] {
        match level {
            ProficiencyLevel::Poor => &self.poor,
            ProficiencyLevel::Basic => &self.basic,
            ProficiencyLevel::Intermediate => &self.intermediate,
            ProficiencyLevel::Advanced => &self.advanced,
            ProficiencyLevel::Exceptional => &self.exceptional,
        }
    }

    pub(crate) fn get_mut(&mut self, level: ProficiencyLevel) -> &mut Vec<String> {
        match level {
            ProficiencyLevel::Poor => &mut self.poor,
            ProficiencyLevel::Basic => &mut self.basic,
            ProficiencyLevel::Intermediate => &mut self.intermediate,
            ProficiencyLevel::Advanced => &mut self.advanced,
            ProficiencyLevel::Exceptional => &mut self.exceptional,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProficiencyLevel, &[String])> + '_ {
        ProficiencyLevel::ALL
            .into_iter()
            .map(move |level| (level, self.get(level)))
    }

    pub fn total_statements(&self) -> usize {
        self.iter().map(|(_, statements)| statements.len()).sum()
    }
}

/// A skill in People Protocol form. Only the validator constructs these from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedSkill {
    pub name: String,
    pub description: String,
    #[serde(rename = "lightcast_id")]
    pub source_identifier: String,
    pub levels: Levels,
}

impl TransformedSkill {
    /// Soft-bound drift: levels above their published maximum and a total outside 10-21.
    pub fn advisories(&self) -> Vec<String> {
        let mut notes = Vec::new();
        for (level, statements) in self.levels.iter() {
            let (_, max) = level.advisory_range();
            if statements.len() > max {
                notes.push(format!(
                    "Level \"{}\" has {} statements (suggested at most {})",
                    level,
                    statements.len(),
                    max
                ));
            }
        }

        let total = self.levels.total_statements();
        let (min_total, max_total) = TOTAL_STATEMENTS_ADVISORY;
        if total < min_total || total > max_total {
            notes.push(format!(
                "Skill has {} statements in total (suggested {}-{})",
                total, min_total, max_total
            ));
        }
        notes
    }
}
