use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::award::AwardRecord;
use crate::models::certification::CertificationRecord;
use crate::models::education::EducationRecord;
use crate::models::experience::ExperienceRecord;
use crate::models::heading::HeadingRecord;
use crate::models::project::ProjectRecord;
use crate::models::skill::SkillRecord;
use crate::models::volunteer::VolunteerRecord;

/// A named selection of the user's section entries. The backend returns the
/// referenced entries populated, in the order they were picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomResumeRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub headings: Vec<HeadingRecord>,
    #[serde(default)]
    pub educations: Vec<EducationRecord>,
    #[serde(default)]
    pub experiences: Vec<ExperienceRecord>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub volunteers: Vec<VolunteerRecord>,
    #[serde(default)]
    pub certifications: Vec<CertificationRecord>,
    #[serde(default)]
    pub awards: Vec<AwardRecord>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomResumePayload {
    pub name: String,
    pub heading_ids: Vec<String>,
    pub education_ids: Vec<String>,
    pub experience_ids: Vec<String>,
    pub project_ids: Vec<String>,
    pub skill_ids: Vec<String>,
    pub volunteer_ids: Vec<String>,
    pub certification_ids: Vec<String>,
    pub award_ids: Vec<String>,
}

/// Everything a custom resume can pick from (`GET /api/custom-resume/user-elements`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserElements {
    pub headings: Vec<HeadingRecord>,
    pub educations: Vec<EducationRecord>,
    pub experiences: Vec<ExperienceRecord>,
    pub projects: Vec<ProjectRecord>,
    pub skills: Vec<SkillRecord>,
    pub volunteers: Vec<VolunteerRecord>,
    pub certifications: Vec<CertificationRecord>,
    pub awards: Vec<AwardRecord>,
}

impl UserElements {
    pub fn entry_count(&self) -> usize {
        self.headings.len()
            + self.educations.len()
            + self.experiences.len()
            + self.projects.len()
            + self.skills.len()
            + self.volunteers.len()
            + self.certifications.len()
            + self.awards.len()
    }
}
