//! End-to-end behavior of the transformation pipeline against scripted model responses.

use anyhow::Result;
use people_protocol::export::FrameworkDocument;
use people_protocol::llm::client::LlmClient;
use people_protocol::pipeline::batch::run_batch;
use people_protocol::pipeline::error::TransformError;
use people_protocol::pipeline::extractor::extract_candidate;
use people_protocol::pipeline::validator::{check_levels, validate};
use people_protocol::pipeline::Transformer;
use people_protocol::skill::{ProficiencyLevel, SkillSource};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Replays canned responses in order and records every prompt it sees.
struct ScriptedClient {
    responses: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No more mock responses"))
    }
}

fn data_visualization() -> SkillSource {
    SkillSource::new("ESCOXXX", "Data Visualization")
        .with_description("Ability to present data visually")
}

fn statements(n: usize, level: &str) -> Vec<String> {
    (1..=n)
        .map(|i| format!("{} statement {} about charts", level, i))
        .collect()
}

fn skill_json(counts: [usize; 5]) -> Value {
    let mut levels = serde_json::Map::new();
    for (level, n) in ProficiencyLevel::ALL.iter().zip(counts) {
        levels.insert(level.as_str().to_string(), json!(statements(n, level.as_str())));
    }
    json!({
        "name": "Data Visualization",
        "description": "Ability to present data visually",
        "lightcast_id": "ESCOXXX",
        "levels": levels,
    })
}

fn fenced(value: &Value) -> String {
    format!(
        "Sure, here it is:\n\n```json\n{}\n```\n",
        serde_json::to_string_pretty(value).unwrap()
    )
}

#[test]
fn test_extraction_tiers_agree() {
    let body = serde_json::to_string_pretty(&skill_json([2, 2, 2, 2, 2])).unwrap();
    let bare = extract_candidate(&body).unwrap();
    let tagged = extract_candidate(&format!("Result:\n```json\n{}\n```", body)).unwrap();
    let untagged = extract_candidate(&format!("Result:\n```\n{}\n```\nDone.", body)).unwrap();
    assert_eq!(bare, tagged);
    assert_eq!(bare, untagged);
}

#[test]
fn test_extraction_failure_is_reported() {
    let err = extract_candidate("I could not produce a rubric for this skill.").unwrap_err();
    assert!(err.to_string().contains("no parseable JSON object"));
}

#[test]
fn test_validator_boundaries() {
    let source = data_visualization();

    let exact = skill_json([2, 2, 2, 2, 2]);
    let exact = exact.as_object().unwrap().clone();
    assert!(validate(exact, &source).is_ok());

    let short = skill_json([2, 2, 1, 2, 2]);
    let err = validate(short.as_object().unwrap().clone(), &source).unwrap_err();
    assert_eq!(err.levels(), vec![ProficiencyLevel::Intermediate]);
    assert_eq!(err.violations[0].found, 1);

    let two_short = skill_json([0, 2, 2, 1, 2]);
    let msg = validate(two_short.as_object().unwrap().clone(), &source)
        .unwrap_err()
        .to_string();
    assert!(msg.contains("\"poor\""));
    assert!(msg.contains("\"advanced\""));
}

#[test]
fn test_missing_level_counts_as_zero() {
    let mut value = skill_json([2, 2, 2, 2, 2]);
    value["levels"]
        .as_object_mut()
        .unwrap()
        .remove("exceptional");
    let violations = check_levels(value.as_object().unwrap());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].level, ProficiencyLevel::Exceptional);
    assert_eq!(violations[0].found, 0);
}

#[tokio::test]
async fn test_fenced_response_becomes_skill() {
    let client = ScriptedClient::new(vec![fenced(&skill_json([2, 2, 2, 2, 2]))]);
    let transformer = Transformer::new(&client);

    let skill = transformer.transform(&data_visualization()).await.unwrap();
    assert_eq!(skill.source_identifier, "ESCOXXX");
    assert_eq!(skill.levels.total_statements(), 10);

    let prompt = client.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Name: Data Visualization"));
    assert!(prompt.contains("Description: Ability to present data visually"));
    assert!(prompt.contains("Lightcast ID: ESCOXXX"));
}

#[tokio::test]
async fn test_one_poor_statement_is_rejected() {
    let client = ScriptedClient::new(vec![fenced(&skill_json([1, 2, 2, 2, 2]))]);
    let transformer = Transformer::new(&client);

    let failure = transformer
        .transform(&data_visualization())
        .await
        .unwrap_err();
    assert!(failure.is_structural());
    match failure.kind {
        TransformError::Validation(ref err) => {
            let msg = err.to_string();
            assert!(msg.contains("\"poor\""));
            assert!(msg.contains("found 1"));
        }
        ref other => panic!("expected validation failure, got {}", other),
    }
}

#[tokio::test]
async fn test_identifier_survives_model_edits() {
    let mut value = skill_json([2, 2, 2, 2, 2]);
    value["lightcast_id"] = json!("ESCO-REWRITTEN");
    let client = ScriptedClient::new(vec![fenced(&value)]);
    let transformer = Transformer::new(&client);

    let skill = transformer.transform(&data_visualization()).await.unwrap();
    assert_eq!(skill.source_identifier, "ESCOXXX");
}

#[tokio::test]
async fn test_exported_skill_validates_again() {
    let client = ScriptedClient::new(vec![fenced(&skill_json([3, 2, 4, 2, 2]))]);
    let transformer = Transformer::new(&client);
    let source = data_visualization();
    let skill = transformer.transform(&source).await.unwrap();

    let wire = serde_json::to_string(&skill).unwrap();
    let reparsed = extract_candidate(&wire).unwrap();
    assert!(check_levels(&reparsed).is_empty());
    let again = validate(reparsed, &source).unwrap();
    assert_eq!(again, skill);

    let document = FrameworkDocument::new(vec![skill]);
    let parsed: Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
    assert_eq!(parsed["framework"], "People Protocol");
    assert_eq!(parsed["skills"][0]["lightcast_id"], "ESCOXXX");
}

#[tokio::test]
async fn test_batch_keeps_going_after_failures() {
    let client = ScriptedClient::new(vec![
        fenced(&skill_json([2, 2, 2, 2, 2])),
        "no json here".to_string(),
        fenced(&skill_json([2, 1, 2, 2, 2])),
    ]);
    let transformer = Transformer::new(&client);
    let sources = vec![
        SkillSource::new("KS1", "Python"),
        SkillSource::new("KS2", "Welding"),
        SkillSource::new("KS3", "Communication"),
    ];

    let mut out = Vec::new();
    let outcome = run_batch(&transformer, &sources, false, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome.attempted(), 3);
    assert_eq!(outcome.transformed.len(), 1);
    assert_eq!(outcome.failures[0].skill_id, "KS2");
    assert!(matches!(
        outcome.failures[0].kind,
        TransformError::Extraction(_)
    ));
    assert!(outcome.failures[1].is_structural());
    assert_eq!(client.calls(), 3);

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("[1/3] Python... ✓"));
    assert!(printed.contains("[3/3] Communication... ✗"));
}

#[tokio::test]
async fn test_retry_invalid_regenerates_structural_failures_only() {
    let client = ScriptedClient::new(vec![
        fenced(&skill_json([2, 2, 2, 2, 1])),
        fenced(&skill_json([2, 2, 2, 2, 2])),
        "still no json".to_string(),
    ]);
    let transformer = Transformer::new(&client);
    let sources = vec![
        SkillSource::new("KS1", "Python"),
        SkillSource::new("KS2", "Welding"),
    ];

    let mut out = Vec::new();
    let outcome = run_batch(&transformer, &sources, true, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome.transformed.len(), 1);
    assert_eq!(outcome.transformed[0].source_identifier, "KS1");
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(client.calls(), 3);
}
