// Prompt template for turning a catalog skill into a People Protocol skill

use crate::skill::SkillSource;

/// Substituted when the catalog record has no usable description.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Render the transformation prompt for one skill. Pure and total.
pub fn build_transformation_prompt(source: &SkillSource) -> String {
    let skill_description = source.described().unwrap_or(DEFAULT_DESCRIPTION);
    format!(
        r#"You are transforming skills into the People Protocol framework format.

## What is a Skill?

Skills are technical and functional competencies required for a role. They are NOT:
- Behaviors/Values (universal organizational attributes)
- Deliverables (output metrics like speed, quality)
- Personality traits (abstract characteristics)

Skills provide clear roadmaps for growth, objective recruitment criteria, and standardized expectations.

## The Five Proficiency Levels

Each skill uses a consistent five-level scale that builds cumulatively. An employee at "Advanced" has demonstrated all behaviors at Poor (absence of), Basic, and Intermediate levels.

| Level | Label | Definition |
|-------|-------|------------|
| 1 | **Poor** | Red flag behaviors. No employee should exhibit these. Indicates fundamental gaps or negative impact. |
| 2 | **Basic** | Minimum acceptable standard. Foundational competency expected of entry-level employees. |
| 3 | **Intermediate** | Solid proficiency. Independent execution with reliability on complex tasks. |
| 4 | **Advanced** | High mastery. Strategic application, innovation, and ability to handle novel situations. |
| 5 | **Exceptional** | World-class. Industry-leading expertise that only the very best demonstrate. |

## Observable Statement Requirements

Each statement must be:
- **Observable**: Based on actions a manager can witness, not internal states
- **Specific**: Describes concrete behaviors, not vague qualities
- **Binary**: Can be answered Yes or No without ambiguity
- **Action-oriented**: Uses verbs that describe what someone does
- **Level-appropriate**: Complexity matches the proficiency level

**Good examples**: "Delivers tasks on time", "Identifies errors in seemingly correct statements by applying critical thinking", "Breaks down simple problems based on data and resolves them"

**Bad examples**: "Has good time management", "Thinks critically", "Is pretty good at problem-solving"

## Statement Quantity Per Level

**CRITICAL - MANDATORY REQUIREMENT**: Each level MUST have 2 or more statements. There should NEVER be 0 or 1 statement for any level.

- **Poor**: 2-5 statements (define clear "red lines") - **AT LEAST 2, NEVER 0 OR 1**
- **Basic**: 2-4 statements (core foundational behaviors) - **AT LEAST 2, NEVER 0 OR 1**
- **Intermediate**: 2-4 statements (solid independent performance) - **AT LEAST 2, NEVER 0 OR 1**
- **Advanced**: 2-5 statements (multiple aspects of mastery) - **AT LEAST 2, NEVER 0 OR 1**
- **Exceptional**: 2-3 statements (rare, distinctive achievements) - **AT LEAST 2, NEVER 0 OR 1**

**Total per skill**: 10-21 observable statements (minimum 10: 2 per level x 5 levels).

**VALIDATION**: Your response will be rejected if ANY level has fewer than 2 statements. Check every level before returning your response.

## Statement Writing Patterns by Level

**Poor Level** (what NOT to do):
- "Demonstrates unstructured [skill], fails to [expected outcome]"
- "Lacks [key attribute], [negative consequence]"
- "[Negative behavior] when challenged"
- "Unable to [basic expectation]"

**Basic Level** (foundational competency):
- "Shows common sense by [observable action]"
- "Can [basic task] based on [inputs]"
- "[Core competency]: [expected output]"
- "Recognizes [fundamental concepts] and applies them correctly"

**Intermediate Level** (independent execution):
- "Identifies [nuanced issues] by applying [method]"
- "Delves into [complex areas] until reaching deep understanding"
- "Consistently [positive behavior] without supervision"
- "Able to [complex output] with minimal guidance"

**Advanced Level** (strategic mastery):
- "Can synthesize [complex inputs] and connect [non-obvious elements]"
- "Approaches [skill area] in an innovative way"
- "Able to [teach/mentor/develop] others in [skill area]"
- "Creates [frameworks/standards] adopted by the team"

**Exceptional Level** (industry-leading):
- "Engages in [abstract/theoretical work] at the highest level"
- "Solves [unprecedented challenges] using [advanced methods]"
- "Recognized externally as an authority in [skill area]"
- "Redefines [industry/field] standards and expectations"

## Scorecard Mechanics

Managers assess skills by reviewing each statement starting from Poor, marking "Yes" or "No" based on observed behavior, and stopping at the first "No" response. The employee's level is the highest level where all statements are "Yes".

**Critical**: Earlier statements (Poor, Basic) must be absolute prerequisites. A "No" at Basic means the employee scores Poor, regardless of advanced capabilities.

## Quality Checklist

Before generating statements, ensure:
- All statements are observable (manager can answer Yes/No)
- Each statement is distinct (no duplicates across levels)
- Poor level describes genuinely problematic behaviors
- Basic level is achievable by entry-level employees
- Exceptional level is genuinely rare (top 1-5%)
- Statements use action verbs (demonstrates, delivers, identifies, creates)
- Statements avoid subjective qualifiers (good, bad, excellent)
- Progression from Poor to Exceptional shows clear capability increase

## Output Format

Return ONLY valid JSON in this exact structure (no markdown, no explanation):

{{
  "name": "Skill Name",
  "description": "One-line definition",
  "lightcast_id": "original_id",
  "levels": {{
    "poor": ["statement 1", "statement 2"],
    "basic": ["statement 1", "statement 2"],
    "intermediate": ["statement 1", "statement 2"],
    "advanced": ["statement 1", "statement 2", "statement 3"],
    "exceptional": ["statement 1", "statement 2"]
  }}
}}

## Skill to Transform

Name: {skill_name}
Description: {skill_description}
Lightcast ID: {skill_id}

Return ONLY the JSON object, nothing else."#,
        skill_name = source.name,
        skill_description = skill_description,
        skill_id = source.identifier,
    )
}
