use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ClientError, FieldError};
use crate::models::custom_resume::{CustomResumePayload, CustomResumeRecord, UserElements};
use crate::models::Identified;
use crate::sections::{text, Section, SectionEditor};
use crate::validation::patterns::TITLE;
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

/// Picks entries from every section by id, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomResumeForm {
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

impl CustomResumeForm {
    fn selections(&self) -> [(&'static str, &'static str, &[String]); 8] {
        [
            ("headingIds", "Heading", self.heading_ids.as_slice()),
            ("educationIds", "Education", self.education_ids.as_slice()),
            ("experienceIds", "Experience", self.experience_ids.as_slice()),
            ("projectIds", "Project", self.project_ids.as_slice()),
            ("skillIds", "Skill", self.skill_ids.as_slice()),
            ("volunteerIds", "Volunteer", self.volunteer_ids.as_slice()),
            ("certificationIds", "Certification", self.certification_ids.as_slice()),
            ("awardIds", "Award", self.award_ids.as_slice()),
        ]
    }
}

const RULES: &[CrossFieldRule<CustomResumeForm>] = &[CrossFieldRule {
    field: "entries",
    message: "Select at least one entry",
    holds: |f: &CustomResumeForm| f.selections().iter().any(|(_, _, ids)| !ids.is_empty()),
}];

fn no_repeats(ids: &[String]) -> bool {
    let mut seen = HashSet::new();
    ids.iter().all(|id| seen.insert(id.trim()))
}

fn ids(ids: &[String]) -> Vec<String> {
    ids.iter().map(|id| text(id)).collect()
}

fn ids_of<R: Identified>(records: &[R]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

pub struct CustomResumes;

impl Section for CustomResumes {
    const RESOURCE: &'static str = "custom-resume";
    const LABEL: &'static str = "Custom resume";

    type Record = CustomResumeRecord;
    type Form = CustomResumeForm;
    type Payload = CustomResumePayload;

    fn validate(form: &CustomResumeForm) -> Result<(), FieldError> {
        let mut checks = FieldChecks::new().field(
            "name",
            "Name",
            Some(form.name.as_str()),
            &[
                Rule::Required,
                Rule::MaxLen(100),
                Rule::Pattern(&TITLE, "contains unsupported characters"),
            ],
        );
        for (key, label, selected) in form.selections() {
            checks = checks.ensure(
                no_repeats(selected),
                key,
                format!("{label} entries can only be picked once"),
            );
        }
        checks.finish()?;
        check_rules(form, RULES)
    }

    fn to_payload(form: &CustomResumeForm) -> CustomResumePayload {
        CustomResumePayload {
            name: text(&form.name),
            heading_ids: ids(&form.heading_ids),
            education_ids: ids(&form.education_ids),
            experience_ids: ids(&form.experience_ids),
            project_ids: ids(&form.project_ids),
            skill_ids: ids(&form.skill_ids),
            volunteer_ids: ids(&form.volunteer_ids),
            certification_ids: ids(&form.certification_ids),
            award_ids: ids(&form.award_ids),
        }
    }

    fn to_form(record: &CustomResumeRecord) -> CustomResumeForm {
        CustomResumeForm {
            name: record.name.clone(),
            heading_ids: ids_of(&record.headings),
            education_ids: ids_of(&record.educations),
            experience_ids: ids_of(&record.experiences),
            project_ids: ids_of(&record.projects),
            skill_ids: ids_of(&record.skills),
            volunteer_ids: ids_of(&record.volunteers),
            certification_ids: ids_of(&record.certifications),
            award_ids: ids_of(&record.awards),
        }
    }
}

impl SectionEditor<CustomResumes> {
    /// Every entry the user could pick, across all sections.
    pub async fn user_elements(&self) -> Result<UserElements, ClientError> {
        let value = self
            .api
            .get_one(CustomResumes::RESOURCE, "user-elements")
            .await?;
        let elements: UserElements = serde_json::from_value(value)?;
        debug!("{} entries available for custom resumes", elements.entry_count());
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::sections::award::AwardForm;
    use crate::sections::testing::FakeBackend;
    use crate::sections::{Awards, SectionState};

    fn valid_form() -> CustomResumeForm {
        CustomResumeForm {
            name: "Backend roles".to_string(),
            heading_ids: vec!["h1".to_string()],
            award_ids: vec!["a2".to_string(), "a1".to_string()],
            ..CustomResumeForm::default()
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(CustomResumes::validate(&valid_form()).is_ok());
    }

    #[test]
    fn test_name_is_required() {
        let form = CustomResumeForm {
            name: " ".to_string(),
            ..valid_form()
        };
        let err = CustomResumes::validate(&form).unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Name cannot be empty");
    }

    #[test]
    fn test_empty_selection_rejected() {
        let form = CustomResumeForm {
            name: "Nothing picked".to_string(),
            ..CustomResumeForm::default()
        };
        let err = CustomResumes::validate(&form).unwrap_err();
        assert_eq!(err.field, "entries");
        assert_eq!(err.message, "Select at least one entry");
    }

    #[test]
    fn test_same_entry_picked_twice() {
        let mut form = valid_form();
        form.award_ids.push(" a1".to_string());
        let err = CustomResumes::validate(&form).unwrap_err();
        assert_eq!(err.field, "awardIds");
        assert_eq!(err.message, "Award entries can only be picked once");
    }

    #[test]
    fn test_edit_form_keeps_pick_order() {
        let record: CustomResumeRecord = serde_json::from_value(json!({
            "id": "c1",
            "user_id": "u1",
            "name": "Backend roles",
            "awards": [
                { "id": "a2", "user_id": "u1", "title": "Hackathon Winner", "date": "Aug 2022",
                  "created_at": "2024-05-01T10:00:00", "updated_at": "2024-05-01T10:00:00" },
                { "id": "a1", "user_id": "u1", "title": "Dean's List", "date": "May 2022",
                  "created_at": "2024-05-01T10:00:00", "updated_at": "2024-05-01T10:00:00" }
            ],
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-01T10:00:00"
        }))
        .unwrap();

        let form = CustomResumes::to_form(&record);

        assert_eq!(form.award_ids, vec!["a2", "a1"]);
        assert!(form.heading_ids.is_empty());
        assert_eq!(form.name, "Backend roles");
    }

    #[tokio::test]
    async fn test_create_sends_snake_case_ids_and_get_finds_it() {
        let backend = Arc::new(FakeBackend::default());
        let editor = SectionEditor::<CustomResumes>::new(backend.clone());

        let outcome = editor.create(SectionState::new(), &valid_form()).await;
        assert_eq!(outcome.notices[0].message, "Custom resume added successfully");
        assert_eq!(outcome.state.items[0].name, "Backend roles");

        let stored = backend.stored("custom-resume");
        assert_eq!(stored[0]["award_ids"], json!(["a2", "a1"]));
        assert_eq!(stored[0]["skill_ids"], json!([]));

        let fetched = editor.get("id1").await.unwrap();
        assert_eq!(fetched.name, "Backend roles");
        assert!(editor.get("id9").await.unwrap_err().is_not_found());
        assert_eq!(
            backend.calls(),
            vec![
                "POST custom-resume",
                "GET custom-resume",
                "GET custom-resume id1",
                "GET custom-resume id9"
            ]
        );
    }

    #[tokio::test]
    async fn test_user_elements_lists_every_section() {
        let backend = Arc::new(FakeBackend::default());
        let awards = SectionEditor::<Awards>::new(backend.clone());
        let form = AwardForm {
            title: "Dean's List".to_string(),
            date: "May 2022".to_string(),
        };
        awards.create(SectionState::new(), &form).await;

        let editor = SectionEditor::<CustomResumes>::new(backend.clone());
        let elements = editor.user_elements().await.unwrap();

        assert_eq!(elements.awards.len(), 1);
        assert_eq!(elements.awards[0].title, "Dean's List");
        assert_eq!(elements.entry_count(), 1);
    }
}
