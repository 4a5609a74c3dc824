use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::format::date_range::is_ordered;
use crate::format::{escape, unescape};
use crate::models::experience::{ExperiencePayload, ExperienceRecord, ProjectItem};
use crate::sections::{text, Section};
use crate::validation::patterns::{FREE_TEXT, LOCATION, ORGANIZATION, TITLE};
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

pub const MAX_PROJECTS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceProjectForm {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceForm {
    pub company: String,
    pub location: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub projects: Vec<ExperienceProjectForm>,
}

fn unique_titles(form: &ExperienceForm) -> bool {
    let mut seen = HashSet::new();
    form.projects
        .iter()
        .all(|p| seen.insert(p.title.trim().to_lowercase()))
}

const RULES: &[CrossFieldRule<ExperienceForm>] = &[
    CrossFieldRule {
        field: "endDate",
        message: "End date cannot be before start date",
        holds: |f: &ExperienceForm| is_ordered(&f.start_date, &f.end_date),
    },
    CrossFieldRule {
        field: "projects",
        message: "Project titles must be unique",
        holds: unique_titles,
    },
];

pub struct Experiences;

impl Section for Experiences {
    const RESOURCE: &'static str = "experience";
    const LABEL: &'static str = "Experience";

    type Record = ExperienceRecord;
    type Form = ExperienceForm;
    type Payload = ExperiencePayload;

    fn validate(form: &ExperienceForm) -> Result<(), FieldError> {
        let mut checks = FieldChecks::new()
            .field(
                "company",
                "Company",
                Some(form.company.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(100),
                    Rule::Pattern(&ORGANIZATION, "contains unsupported characters"),
                ],
            )
            .field(
                "location",
                "Location",
                Some(form.location.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(50),
                    Rule::Pattern(&LOCATION, "can only contain letters, spaces and . , ' -"),
                ],
            )
            .field(
                "position",
                "Position",
                Some(form.position.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(100),
                    Rule::Pattern(&TITLE, "contains unsupported characters"),
                ],
            )
            .field(
                "startDate",
                "Start date",
                Some(form.start_date.as_str()),
                &[Rule::Required, Rule::MonthYear],
            )
            .field(
                "endDate",
                "End date",
                Some(form.end_date.as_str()),
                &[Rule::Required, Rule::MonthYearOrPresent],
            )
            .ensure(
                form.projects.len() <= MAX_PROJECTS,
                "projects",
                format!("At most {MAX_PROJECTS} projects can be listed"),
            );

        for (i, project) in form.projects.iter().enumerate() {
            checks = checks
                .field(
                    format!("projects.{i}.title"),
                    "Project title",
                    Some(project.title.as_str()),
                    &[
                        Rule::Required,
                        Rule::MaxLen(100),
                        Rule::Pattern(&TITLE, "contains unsupported characters"),
                    ],
                )
                .field(
                    format!("projects.{i}.description"),
                    "Project description",
                    Some(project.description.as_str()),
                    &[
                        Rule::Required,
                        Rule::MaxLen(250),
                        Rule::Pattern(&FREE_TEXT, "contains unsupported characters"),
                    ],
                );
        }

        checks.finish()?;
        check_rules(form, RULES)
    }

    fn to_payload(form: &ExperienceForm) -> ExperiencePayload {
        ExperiencePayload {
            company: text(&form.company),
            location: text(&form.location),
            position: text(&form.position),
            start_date: text(&form.start_date),
            end_date: text(&form.end_date),
            projects: form
                .projects
                .iter()
                .map(|p| ProjectItem {
                    title: text(&p.title),
                    description: escape(p.description.trim()),
                })
                .collect(),
        }
    }

    fn to_form(record: &ExperienceRecord) -> ExperienceForm {
        ExperienceForm {
            company: record.company.clone(),
            location: record.location.clone(),
            position: record.position.clone(),
            start_date: record.start_date.clone(),
            end_date: record.end_date.clone(),
            projects: record
                .projects
                .iter()
                .map(|p| ExperienceProjectForm {
                    title: p.title.clone(),
                    description: unescape(&p.description),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sections::testing::FakeBackend;
    use crate::sections::{SectionEditor, SectionState};

    fn valid_form() -> ExperienceForm {
        ExperienceForm {
            company: "Acme Corp".to_string(),
            location: "Bengaluru".to_string(),
            position: "Software Engineer".to_string(),
            start_date: "Jun 2021".to_string(),
            end_date: "Present".to_string(),
            projects: vec![ExperienceProjectForm {
                title: "Billing revamp".to_string(),
                description: "Increased revenue by 25%".to_string(),
            }],
        }
    }

    #[test]
    fn test_description_escaped_in_payload() {
        let payload = Experiences::to_payload(&valid_form());
        assert_eq!(payload.projects[0].description, r"Increased revenue by 25\%");
    }

    #[test]
    fn test_duplicate_project_titles_rejected() {
        let mut form = valid_form();
        form.projects.push(ExperienceProjectForm {
            title: "billing revamp ".to_string(),
            description: "Second pass".to_string(),
        });
        let err = Experiences::validate(&form).unwrap_err();
        assert_eq!(err.field, "projects");
        assert_eq!(err.message, "Project titles must be unique");
    }

    #[test]
    fn test_long_description_points_at_project() {
        let mut form = valid_form();
        form.projects[0].description = "x".repeat(251);
        let err = Experiences::validate(&form).unwrap_err();
        assert_eq!(err.field, "projects.0.description");
        assert_eq!(err.message, "Project description must be at most 250 characters");
    }

    #[test]
    fn test_end_before_start_rejected() {
        let form = ExperienceForm {
            start_date: "Jun 2021".to_string(),
            end_date: "Jan 2020".to_string(),
            ..valid_form()
        };
        assert_eq!(Experiences::validate(&form).unwrap_err().field, "endDate");
    }

    #[tokio::test]
    async fn test_percent_survives_edit_save_cycles() {
        let backend = Arc::new(FakeBackend::default());
        let editor = SectionEditor::<Experiences>::new(backend.clone());

        let outcome = editor.create(SectionState::new(), &valid_form()).await;
        assert!(!outcome.has_error(), "{:?}", outcome.notices);
        let stored = backend.stored("experience")[0]["projects"][0]["description"].clone();
        assert_eq!(stored, r"Increased revenue by 25\%");

        let mut state = outcome.state;
        for _ in 0..3 {
            let (opened, form) = SectionEditor::<Experiences>::open_edit(state, "id1");
            let form = form.unwrap();
            assert_eq!(form.projects[0].description, "Increased revenue by 25%");
            let outcome = editor.update(opened, "id1", &form).await;
            assert!(!outcome.has_error(), "{:?}", outcome.notices);
            state = outcome.state;
        }

        let stored_after = backend.stored("experience")[0]["projects"][0]["description"].clone();
        assert_eq!(stored_after, stored);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let backend = Arc::new(FakeBackend::default());
        let editor = SectionEditor::<Experiences>::new(backend.clone());
        let state = editor.create(SectionState::new(), &valid_form()).await.state;

        let outcome = editor.confirm_delete(state).await;
        assert!(outcome.has_error());
        assert!(!backend.calls().iter().any(|c| c.starts_with("DELETE")));

        let state = SectionEditor::<Experiences>::request_delete(outcome.state, "id1");
        let state = SectionEditor::<Experiences>::cancel_delete(state);
        assert!(!backend.calls().iter().any(|c| c.starts_with("DELETE")));

        let state = SectionEditor::<Experiences>::request_delete(state, "id1");
        let outcome = editor.confirm_delete(state).await;
        assert!(!outcome.has_error(), "{:?}", outcome.notices);
        assert!(outcome.state.items.is_empty());
        assert_eq!(outcome.notices[0].message, "Experience deleted successfully");
    }
}
