//! Structured output schema declared to the provider.
//!
//! Advisory only: the provider is expected but not guaranteed to honour it, so
//! replies are still validated by `AnalysisResult`'s deserializer.

use serde_json::{json, Value};

/// Wire names of every field an analysis reply must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "matchScore",
    "summary",
    "matchingSkills",
    "missingSkills",
    "culturalFit",
    "recommendations",
    "yearsExperienceMatch",
];

pub fn analysis_response_schema() -> Value {
    let string_array = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "matchScore": { "type": "NUMBER" },
            "summary": { "type": "STRING" },
            "matchingSkills": string_array,
            "missingSkills": string_array,
            "culturalFit": { "type": "STRING" },
            "recommendations": string_array,
            "yearsExperienceMatch": { "type": "STRING" }
        },
        "required": REQUIRED_FIELDS
    })
}
