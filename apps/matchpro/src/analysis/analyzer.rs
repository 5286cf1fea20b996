//! Analysis Client: one provider call per `analyze`, strictly validated.
//!
//! `Session` holds an `Arc<dyn AnalysisProvider>`; tests swap in a fake.

use async_trait::async_trait;
use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM};
use crate::analysis::schema::analysis_response_schema;
use crate::errors::AppError;
use crate::intake::UploadedFile;
use crate::llm_client::{Attachment, GenerateRequest, LlmClient, LlmError, MODEL};

/// Anything that can turn a resume and a job description into a fit report.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(
        &self,
        resume: &UploadedFile,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError>;
}

/// Gemini-backed provider.
pub struct GeminiAnalyzer {
    llm: LlmClient,
}

impl GeminiAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AnalysisProvider for GeminiAnalyzer {
    async fn analyze(
        &self,
        resume: &UploadedFile,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError> {
        let prompt = build_analysis_prompt(job_description);
        let schema = analysis_response_schema();
        let request = GenerateRequest {
            system: ANALYSIS_SYSTEM,
            prompt: &prompt,
            attachment: Some(Attachment {
                mime_type: resume.mime_type().as_str(),
                data: resume.content(),
            }),
            response_schema: Some(&schema),
        };

        info!("Analyzing '{}' with {}", resume.name(), MODEL);

        let result: AnalysisResult = self.llm.generate_json(&request).await.map_err(|e| match e {
            LlmError::MissingApiKey => AppError::MissingCredential,
            other => AppError::Llm(format!("Resume analysis failed: {other}")),
        })?;

        info!("Analysis complete: match_score={}", result.match_score);
        Ok(result)
    }
}
