//! Resume PDF upload, AI extraction and upload history.

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::models::ai::{
    ExtractResumeResponse, ExtractedResumeData, SaveExtractedResumeRequest,
    SaveExtractedResumeResponse, UploadedResume,
};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A PDF picked for upload. Checked client-side before any request is made.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::InvalidUpload(format!("Could not read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name, bytes))
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let is_pdf_name = Path::new(&self.file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf_name {
            return Err(ClientError::InvalidUpload(
                "Only PDF files are supported".to_string(),
            ));
        }
        if self.bytes.is_empty() {
            return Err(ClientError::InvalidUpload("The file is empty".to_string()));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ClientError::InvalidUpload(
                "File size must be at most 10 MB".to_string(),
            ));
        }
        if !self.bytes.starts_with(PDF_MAGIC) {
            return Err(ClientError::InvalidUpload(
                "The file is not a valid PDF".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct ResumeExtractor {
    client: ApiClient,
}

impl ResumeExtractor {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn extract(&self, upload: &ResumeUpload) -> Result<ExtractResumeResponse, ClientError> {
        upload.validate()?;
        debug!("Uploading {} ({} bytes)", upload.file_name, upload.bytes.len());

        let part = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let response: ExtractResumeResponse = self
            .client
            .post_multipart("/api/ai/extract-resume", form)
            .await?;
        info!(
            "Extracted {} entries from {} ({} tokens)",
            response.extracted_data.entry_count(),
            upload.file_name,
            response.tokens_used
        );
        Ok(response)
    }

    /// Persists reviewed extraction results as regular section entries.
    pub async fn save_extracted(
        &self,
        data: &ExtractedResumeData,
    ) -> Result<SaveExtractedResumeResponse, ClientError> {
        self.client
            .post(
                "/api/ai/save-extracted-resume",
                &SaveExtractedResumeRequest {
                    extracted_data: data,
                },
            )
            .await
    }

    pub async fn history(&self) -> Result<Vec<UploadedResume>, ClientError> {
        self.client.get("/api/ai/uploaded-resumes").await
    }
}
