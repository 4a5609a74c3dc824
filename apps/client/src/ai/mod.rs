//! AI rephrasing of titles and bullet points. Each call costs the user
//! credits; an exhausted balance comes back as a backend rejection.

use tracing::info;

use crate::api_client::ApiClient;
use crate::errors::{ClientError, FieldError};
use crate::models::ai::{
    GenerateSubpointsRequest, GenerateSubpointsResponse, RephraseSubpointsRequest,
    RephraseSubpointsResponse, RephraseTitleRequest, RephraseTitleResponse,
};
use crate::validation::{FieldChecks, Rule};

pub const MAX_INPUT_LEN: usize = 250;

const SECTIONS: &[&str] = &[
    "heading",
    "education",
    "experience",
    "project",
    "skill",
    "certification",
    "award",
    "volunteer",
];

fn check_target(section: &str, item_id: &str) -> FieldChecks {
    FieldChecks::new()
        .ensure(
            SECTIONS.contains(&section),
            "section",
            format!("Unknown section '{section}'"),
        )
        .field("itemId", "Item id", Some(item_id), &[Rule::Required])
}

fn text_rules() -> [Rule; 2] {
    [Rule::Required, Rule::MaxLen(MAX_INPUT_LEN)]
}

pub fn validate_title(section: &str, item_id: &str, title: &str) -> Result<(), FieldError> {
    check_target(section, item_id)
        .field("title", "Title", Some(title), &text_rules())
        .finish()
}

pub fn validate_subpoints(section: &str, item_id: &str, subpoints: &[String]) -> Result<(), FieldError> {
    let mut checks = check_target(section, item_id).ensure(
        !subpoints.is_empty(),
        "subpoints",
        "At least one subpoint is required",
    );
    for (i, subpoint) in subpoints.iter().enumerate() {
        checks = checks.field(
            format!("subpoints.{i}"),
            "Subpoint",
            Some(subpoint.as_str()),
            &text_rules(),
        );
    }
    checks.finish()
}

pub fn validate_generate(
    section: &str,
    item_id: &str,
    tech_stack: Option<&str>,
    name: Option<&str>,
) -> Result<(), FieldError> {
    check_target(section, item_id)
        .field("techStack", "Tech stack", tech_stack, &[Rule::MaxLen(MAX_INPUT_LEN)])
        .field("name", "Name", name, &[Rule::MaxLen(MAX_INPUT_LEN)])
        .finish()
}

#[derive(Clone)]
pub struct Rephraser {
    client: ApiClient,
}

impl Rephraser {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn rephrase_title(
        &self,
        section: &str,
        item_id: &str,
        title: &str,
    ) -> Result<String, ClientError> {
        validate_title(section, item_id, title)?;
        let response: RephraseTitleResponse = self
            .client
            .post(
                "/api/ai/rephrase-title",
                &RephraseTitleRequest {
                    section,
                    item_id,
                    current_title: title.trim(),
                },
            )
            .await?;
        info!("Rephrased {section} title ({} tokens)", response.tokens_used);
        Ok(response.rephrased_title)
    }

    pub async fn rephrase_subpoints(
        &self,
        section: &str,
        item_id: &str,
        subpoints: &[String],
    ) -> Result<Vec<String>, ClientError> {
        validate_subpoints(section, item_id, subpoints)?;
        let response: RephraseSubpointsResponse = self
            .client
            .post(
                "/api/ai/rephrase-subpoints",
                &RephraseSubpointsRequest {
                    section,
                    item_id,
                    subpoints,
                },
            )
            .await?;
        info!(
            "Rephrased {} {section} subpoints ({} tokens)",
            response.rephrased_subpoints.len(),
            response.tokens_used
        );
        Ok(response.rephrased_subpoints)
    }

    pub async fn generate_subpoints(
        &self,
        section: &str,
        item_id: &str,
        tech_stack: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<String>, ClientError> {
        validate_generate(section, item_id, tech_stack, name)?;
        let response: GenerateSubpointsResponse = self
            .client
            .post(
                "/api/ai/generate-subpoints",
                &GenerateSubpointsRequest {
                    section,
                    item_id,
                    tech_stack: tech_stack.map(str::trim).filter(|t| !t.is_empty()),
                    name: name.map(str::trim).filter(|n| !n.is_empty()),
                },
            )
            .await?;
        info!("Generated {} {section} subpoints", response.subpoints.len());
        Ok(response.subpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_limits() {
        assert!(validate_title("project", "p1", "Resume builder").is_ok());
        let err = validate_title("project", "p1", &"x".repeat(251)).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "Title must be at most 250 characters");
        assert_eq!(
            validate_title("project", "p1", " ").unwrap_err().message,
            "Title cannot be empty"
        );
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = validate_title("hobbies", "h1", "Chess").unwrap_err();
        assert_eq!(err.field, "section");
    }

    #[test]
    fn test_subpoints_need_content() {
        let err = validate_subpoints("experience", "e1", &[]).unwrap_err();
        assert_eq!(err.field, "subpoints");

        let points = vec!["Shipped v2".to_string(), String::new()];
        let err = validate_subpoints("experience", "e1", &points).unwrap_err();
        assert_eq!(err.field, "subpoints.1");
    }

    #[test]
    fn test_generate_optional_inputs() {
        assert!(validate_generate("project", "p1", None, None).is_ok());
        assert!(validate_generate("project", "p1", Some(""), Some("Templar")).is_ok());
        let long = "y".repeat(251);
        assert_eq!(
            validate_generate("project", "p1", Some(&long), None)
                .unwrap_err()
                .field,
            "techStack"
        );
    }
}
