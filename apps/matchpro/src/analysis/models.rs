use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::errors::AppError;
use crate::intake::UploadedFile;

pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
pub const MISSING_RESUME_MESSAGE: &str = "Please upload a resume.";
pub const SHORT_JOB_DESCRIPTION_MESSAGE: &str =
    "Please enter a valid job description (min 50 chars).";

/// One validated submit: a resume plus a trimmed job description.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: UploadedFile,
    pub job_description: String,
}

impl AnalysisRequest {
    pub fn new(resume: UploadedFile, job_description: &str) -> Result<Self, AppError> {
        Ok(Self {
            resume,
            job_description: validate_job_description(job_description)?,
        })
    }
}

/// Returns the trimmed job description, or a validation error when it is
/// shorter than `MIN_JOB_DESCRIPTION_CHARS` characters after trimming.
pub fn validate_job_description(job_description: &str) -> Result<String, AppError> {
    let trimmed = job_description.trim();
    if trimmed.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(AppError::validation(SHORT_JOB_DESCRIPTION_MESSAGE));
    }
    Ok(trimmed.to_string())
}

/// The provider's fit report. Every field is required; a reply missing or
/// mistyping any of them fails deserialization as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_match_score")]
    pub match_score: u8, // 0 – 100
    pub summary: String,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub cultural_fit: String,
    pub recommendations: Vec<String>,
    pub years_experience_match: String,
}

impl AnalysisResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.match_score)
    }
}

/// Display band for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            76..=u8::MAX => ScoreBand::Strong,
            51..=75 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "Strong match",
            ScoreBand::Moderate => "Moderate match",
            ScoreBand::Weak => "Weak match",
        }
    }
}

/// Rounds a provider score to the nearest integer; `None` when it is not a
/// finite number within 0–100.
pub fn normalize_match_score(raw: f64) -> Option<u8> {
    if !raw.is_finite() {
        return None;
    }
    let rounded = raw.round();
    (0.0..=100.0).contains(&rounded).then_some(rounded as u8)
}

fn deserialize_match_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    normalize_match_score(raw)
        .ok_or_else(|| D::Error::custom(format!("matchScore {raw} is outside 0-100")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESULT: &str = r#"{
        "matchScore": 42,
        "summary": "Solid data background, light on infrastructure.",
        "matchingSkills": ["Python", "SQL"],
        "missingSkills": ["AWS", "Kubernetes"],
        "culturalFit": "Collaborative, analytical.",
        "recommendations": ["Add cloud certifications", "Quantify data pipeline work"],
        "yearsExperienceMatch": "Candidate has 3 years, Role requires 5+"
    }"#;

    fn resume() -> UploadedFile {
        UploadedFile::from_bytes("resume.txt", None, b"Python, SQL, 3 years experience").unwrap()
    }

    #[test]
    fn test_full_result_deserializes_field_for_field() {
        let result: AnalysisResult = serde_json::from_str(FULL_RESULT).unwrap();
        assert_eq!(result.match_score, 42);
        assert_eq!(result.summary, "Solid data background, light on infrastructure.");
        assert_eq!(result.matching_skills, vec!["Python", "SQL"]);
        assert_eq!(result.missing_skills, vec!["AWS", "Kubernetes"]);
        assert_eq!(result.cultural_fit, "Collaborative, analytical.");
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(
            result.years_experience_match,
            "Candidate has 3 years, Role requires 5+"
        );
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        let full: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
        for field in crate::analysis::schema::REQUIRED_FIELDS {
            let mut partial = full.clone();
            partial.as_object_mut().unwrap().remove(field);
            let err = serde_json::from_value::<AnalysisResult>(partial).unwrap_err();
            assert!(
                err.to_string().contains(field),
                "error for missing {field} was: {err}"
            );
        }
    }

    #[test]
    fn test_null_and_mistyped_fields_are_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
        value["summary"] = serde_json::Value::Null;
        assert!(serde_json::from_value::<AnalysisResult>(value).is_err());

        let mut value: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
        value["matchingSkills"] = serde_json::json!("Python, SQL");
        assert!(serde_json::from_value::<AnalysisResult>(value).is_err());

        let mut value: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
        value["matchScore"] = serde_json::json!("42");
        assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut value: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
        value["confidence"] = serde_json::json!("high");
        assert!(serde_json::from_value::<AnalysisResult>(value).is_ok());
    }

    #[test]
    fn test_fractional_score_rounds() {
        let mut value: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
        value["matchScore"] = serde_json::json!(72.6);
        let result: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.match_score, 73);
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        for bad in [serde_json::json!(101), serde_json::json!(-3), serde_json::json!(250.0)] {
            let mut value: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
            value["matchScore"] = bad;
            assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
        }
    }

    #[test]
    fn test_normalize_match_score_bounds() {
        assert_eq!(normalize_match_score(0.0), Some(0));
        assert_eq!(normalize_match_score(100.0), Some(100));
        assert_eq!(normalize_match_score(100.4), Some(100));
        assert_eq!(normalize_match_score(100.5), None);
        assert_eq!(normalize_match_score(f64::NAN), None);
    }

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(76), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(75), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(51), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Weak);
    }

    #[test]
    fn test_job_description_is_trimmed() {
        let jd = format!("   {}   \n", "x".repeat(MIN_JOB_DESCRIPTION_CHARS));
        let request = AnalysisRequest::new(resume(), &jd).unwrap();
        assert_eq!(request.job_description.len(), MIN_JOB_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_short_job_description_is_rejected_after_trim() {
        // 49 visible characters padded well past 50 with whitespace.
        let jd = format!("{}{}", "y".repeat(MIN_JOB_DESCRIPTION_CHARS - 1), " ".repeat(20));
        let err = validate_job_description(&jd).unwrap_err();
        assert_eq!(err.user_message(), SHORT_JOB_DESCRIPTION_MESSAGE);
        assert!(validate_job_description("").is_err());
    }

    #[test]
    fn test_job_description_length_counts_characters_not_bytes() {
        let jd = "é".repeat(MIN_JOB_DESCRIPTION_CHARS);
        assert!(validate_job_description(&jd).is_ok());
        let short = "é".repeat(MIN_JOB_DESCRIPTION_CHARS / 2 + 1);
        assert!(short.len() >= MIN_JOB_DESCRIPTION_CHARS);
        assert!(validate_job_description(&short).is_err());
    }
}
