//! Structural checks on a parsed candidate, and its projection into [`TransformedSkill`].

use serde_json::Value;

use super::error::{LevelViolation, StructuralValidationError};
use super::extractor::Candidate;
use crate::llm::prompts::DEFAULT_DESCRIPTION;
use crate::skill::{Levels, ProficiencyLevel, SkillSource, TransformedSkill};

/// Hard lower bound on statements per level.
pub const MIN_STATEMENTS_PER_LEVEL: usize = 2;

/// Statement count at `level`. Missing keys and non-array values count as zero.
fn statement_count(candidate: &Candidate, level: ProficiencyLevel) -> usize {
    candidate
        .get("levels")
        .and_then(Value::as_object)
        .and_then(|levels| levels.get(level.as_str()))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Every level below the minimum, in canonical order.
pub fn check_levels(candidate: &Candidate) -> Vec<LevelViolation> {
    ProficiencyLevel::ALL
        .into_iter()
        .filter_map(|level| {
            let found = statement_count(candidate, level);
            (found < MIN_STATEMENTS_PER_LEVEL).then_some(LevelViolation {
                level,
                found,
                minimum: MIN_STATEMENTS_PER_LEVEL,
            })
        })
        .collect()
}

/// Accept `candidate` as a skill for `source`, or list everything wrong with its levels.
///
/// The identifier always comes from `source`. Name and description come from
/// the candidate when it has non-empty strings for them.
pub fn validate(
    candidate: Candidate,
    source: &SkillSource,
) -> Result<TransformedSkill, StructuralValidationError> {
    let violations = check_levels(&candidate);
    if !violations.is_empty() {
        return Err(StructuralValidationError { violations });
    }

    let name = non_empty_str(&candidate, "name").unwrap_or(&source.name);
    let description = non_empty_str(&candidate, "description")
        .or_else(|| source.described())
        .unwrap_or(DEFAULT_DESCRIPTION);

    let mut levels = Levels::default();
    if let Some(raw_levels) = candidate.get("levels").and_then(Value::as_object) {
        for level in ProficiencyLevel::ALL {
            if let Some(items) = raw_levels.get(level.as_str()).and_then(Value::as_array) {
                *levels.get_mut(level) = items.iter().map(statement_text).collect();
            }
        }
    }

    Ok(TransformedSkill {
        name: name.to_string(),
        description: description.to_string(),
        source_identifier: source.identifier.clone(),
        levels,
    })
}

// Blank means whitespace-only; a non-blank value is returned exactly as written.
fn non_empty_str<'a>(candidate: &'a Candidate, key: &str) -> Option<&'a str> {
    candidate
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

// Content is never rewritten; a non-string element keeps its JSON text.
fn statement_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(value: Value) -> Candidate {
        match value {
            Value::Object(map) => map,
            _ => panic!("test candidate must be an object"),
        }
    }

    fn two_each() -> Value {
        json!({
            "name": "Data Visualization",
            "description": "Presents data visually",
            "lightcast_id": "ESCOXXX",
            "levels": {
                "poor": ["p1", "p2"],
                "basic": ["b1", "b2"],
                "intermediate": ["i1", "i2"],
                "advanced": ["a1", "a2"],
                "exceptional": ["e1", "e2"]
            }
        })
    }

    fn source() -> SkillSource {
        SkillSource::new("ESCOXXX", "Data Visualization")
            .with_description("Ability to present data visually")
    }

    #[test]
    fn test_exactly_two_per_level_passes() {
        assert!(check_levels(&candidate(two_each())).is_empty());
        let skill = validate(candidate(two_each()), &source()).unwrap();
        assert_eq!(skill.levels.total_statements(), 10);
        assert_eq!(skill.levels.poor, vec!["p1", "p2"]);
    }

    #[test]
    fn test_single_statement_level_is_named_with_count() {
        let mut value = two_each();
        value["levels"]["basic"] = json!(["only one"]);
        let violations = check_levels(&candidate(value));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, ProficiencyLevel::Basic);
        assert_eq!(violations[0].found, 1);
    }

    #[test]
    fn test_string_instead_of_array_counts_as_zero() {
        let mut value = two_each();
        value["levels"]["advanced"] = json!("a single statement");
        let violations = check_levels(&candidate(value));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, ProficiencyLevel::Advanced);
        assert_eq!(violations[0].found, 0);
    }

    #[test]
    fn test_differently_cased_key_is_missing() {
        let mut value = two_each();
        let levels = value["levels"].as_object_mut().unwrap();
        let poor = levels.remove("poor").unwrap();
        levels.insert("Poor".to_string(), poor);
        let violations = check_levels(&candidate(value));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, ProficiencyLevel::Poor);
        assert_eq!(violations[0].found, 0);
    }

    #[test]
    fn test_missing_levels_object_reports_all_five() {
        let violations = check_levels(&candidate(json!({"name": "X"})));
        let levels: Vec<ProficiencyLevel> = violations.iter().map(|v| v.level).collect();
        assert_eq!(levels, ProficiencyLevel::ALL.to_vec());
        assert!(violations.iter().all(|v| v.found == 0));
    }

    #[test]
    fn test_levels_not_an_object_reports_all_five() {
        let violations = check_levels(&candidate(json!({"levels": ["p1", "p2"]})));
        assert_eq!(violations.len(), 5);
    }

    #[test]
    fn test_upper_bound_is_not_enforced() {
        let mut value = two_each();
        value["levels"]["exceptional"] = json!(["e1", "e2", "e3", "e4", "e5", "e6"]);
        let skill = validate(candidate(value), &source()).unwrap();
        assert_eq!(skill.levels.exceptional.len(), 6);
    }

    #[test]
    fn test_identifier_always_comes_from_source() {
        let mut value = two_each();
        value["lightcast_id"] = json!("SOMETHING_ELSE");
        let skill = validate(candidate(value), &source()).unwrap();
        assert_eq!(skill.source_identifier, "ESCOXXX");
    }

    #[test]
    fn test_model_may_edit_name_and_description() {
        let mut value = two_each();
        value["name"] = json!("Data Visualisation");
        let skill = validate(candidate(value), &source()).unwrap();
        assert_eq!(skill.name, "Data Visualisation");
        assert_eq!(skill.description, "Presents data visually");
    }

    #[test]
    fn test_model_name_and_description_kept_verbatim() {
        let mut value = two_each();
        value["name"] = json!("  Data Visualization ");
        value["description"] = json!("Presents data visually.\n");
        let skill = validate(candidate(value), &source()).unwrap();
        assert_eq!(skill.name, "  Data Visualization ");
        assert_eq!(skill.description, "Presents data visually.\n");
    }

    #[test]
    fn test_blank_or_missing_name_falls_back_to_source() {
        let mut value = two_each();
        value["name"] = json!("  ");
        value.as_object_mut().unwrap().remove("description");
        let skill = validate(candidate(value), &source()).unwrap();
        assert_eq!(skill.name, "Data Visualization");
        assert_eq!(skill.description, "Ability to present data visually");
    }

    #[test]
    fn test_description_placeholder_when_nobody_has_one() {
        let mut value = two_each();
        value.as_object_mut().unwrap().remove("description");
        let skill = validate(candidate(value), &SkillSource::new("KS1", "Python")).unwrap();
        assert_eq!(skill.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_non_string_statements_are_kept_as_json_text() {
        let mut value = two_each();
        value["levels"]["poor"] = json!(["Misses deadlines", 42]);
        let skill = validate(candidate(value), &source()).unwrap();
        assert_eq!(skill.levels.poor, vec!["Misses deadlines", "42"]);
    }
}
