#![allow(dead_code)]

use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::analyzer::AnalysisProvider;
use crate::analysis::models::{AnalysisRequest, AnalysisResult, MISSING_RESUME_MESSAGE};
use crate::errors::AppError;
use crate::intake::UploadedFile;

/// Session state owned by the top-level controller.
///
/// At most one resume and one result are held at a time. `submit` takes
/// `&mut self`, so a second analysis cannot start while one is in flight.
pub struct Session {
    provider: Arc<dyn AnalysisProvider>,
    resume: Option<UploadedFile>,
    result: Option<AnalysisResult>,
}

impl Session {
    pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            provider,
            resume: None,
            result: None,
        }
    }

    /// Makes `file` the active resume, returning the one it replaces.
    pub fn select_resume(&mut self, file: UploadedFile) -> Option<UploadedFile> {
        debug!("Selected resume '{}'", file.name());
        self.resume.replace(file)
    }

    pub fn clear_resume(&mut self) {
        self.resume = None;
    }

    pub fn current_resume(&self) -> Option<&UploadedFile> {
        self.resume.as_ref()
    }

    pub fn current_result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Discards the current result ("Start New Analysis").
    pub fn start_new_analysis(&mut self) {
        self.result = None;
    }

    /// Validates the inputs, runs one analysis and stores its result.
    ///
    /// Validation failures never reach the provider. The previous result is
    /// cleared before the call, so a failed analysis leaves no result behind.
    pub async fn submit(&mut self, job_description: &str) -> Result<&AnalysisResult, AppError> {
        let resume = self
            .resume
            .clone()
            .ok_or_else(|| AppError::validation(MISSING_RESUME_MESSAGE))?;
        let request = AnalysisRequest::new(resume, job_description)?;

        self.result = None;
        info!(
            "Submitting analysis for '{}' ({} chars of job description)",
            request.resume.name(),
            request.job_description.chars().count()
        );

        let result = self
            .provider
            .analyze(&request.resume, &request.job_description)
            .await?;
        Ok(self.result.insert(result))
    }
}
