use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::experience::ProjectItem;
use super::heading::CustomLink;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedHeading {
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub custom_links: Vec<CustomLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedExperience {
    pub company: String,
    pub location: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProject {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub tech_stack: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub link_label: Option<String>,
    #[serde(default)]
    pub subpoints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEducation {
    pub institution: String,
    pub location: String,
    pub degree: String,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub max_gpa: Option<f64>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCertification {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub platform: String,
    #[serde(default)]
    pub certification_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAward {
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedVolunteer {
    #[serde(default)]
    pub position: String,
    pub organization: String,
    pub location: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResumeData {
    #[serde(default)]
    pub heading: Option<ExtractedHeading>,
    #[serde(default)]
    pub experiences: Vec<ExtractedExperience>,
    #[serde(default)]
    pub projects: Vec<ExtractedProject>,
    #[serde(default)]
    pub education: Vec<ExtractedEducation>,
    #[serde(default)]
    pub skills: Vec<ExtractedSkill>,
    #[serde(default)]
    pub certifications: Vec<ExtractedCertification>,
    #[serde(default)]
    pub awards: Vec<ExtractedAward>,
    #[serde(default)]
    pub volunteer_experiences: Vec<ExtractedVolunteer>,
}

impl ExtractedResumeData {
    /// Total number of section entries found, heading included.
    pub fn entry_count(&self) -> usize {
        usize::from(self.heading.is_some())
            + self.experiences.len()
            + self.projects.len()
            + self.education.len()
            + self.skills.len()
            + self.certifications.len()
            + self.awards.len()
            + self.volunteer_experiences.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractResumeResponse {
    pub extracted_data: ExtractedResumeData,
    pub extraction_id: String,
    pub resume_url: String,
    pub thumbnail_url: String,
    pub tokens_used: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveExtractedResumeRequest<'a> {
    pub extracted_data: &'a ExtractedResumeData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveExtractedResumeResponse {
    #[serde(default)]
    pub heading_id: Option<String>,
    #[serde(default)]
    pub experience_ids: Vec<String>,
    #[serde(default)]
    pub project_ids: Vec<String>,
    #[serde(default)]
    pub education_ids: Vec<String>,
    #[serde(default)]
    pub skill_ids: Vec<String>,
    #[serde(default)]
    pub certification_ids: Vec<String>,
    #[serde(default)]
    pub award_ids: Vec<String>,
    #[serde(default)]
    pub volunteer_ids: Vec<String>,
    pub message: String,
}

/// One previously uploaded resume, as listed in the upload history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedResume {
    pub id: String,
    pub user_id: String,
    pub cloudinary_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub extracted_data: ExtractedResumeData,
    pub tokens_used: u64,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct RephraseTitleRequest<'a> {
    pub section: &'a str,
    pub item_id: &'a str,
    pub current_title: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RephraseTitleResponse {
    pub rephrased_title: String,
    pub tokens_used: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RephraseSubpointsRequest<'a> {
    pub section: &'a str,
    pub item_id: &'a str,
    pub subpoints: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RephraseSubpointsResponse {
    pub rephrased_subpoints: Vec<String>,
    pub tokens_used: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateSubpointsRequest<'a> {
    pub section: &'a str,
    pub item_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateSubpointsResponse {
    pub subpoints: Vec<String>,
    pub tokens_used: u64,
}
