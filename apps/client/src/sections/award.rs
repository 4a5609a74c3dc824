use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::models::award::{AwardPayload, AwardRecord};
use crate::sections::{text, Section};
use crate::validation::patterns::TITLE;
use crate::validation::{FieldChecks, Rule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwardForm {
    pub title: String,
    pub date: String,
}

pub struct Awards;

impl Section for Awards {
    const RESOURCE: &'static str = "award";
    const LABEL: &'static str = "Award";

    type Record = AwardRecord;
    type Form = AwardForm;
    type Payload = AwardPayload;

    fn validate(form: &AwardForm) -> Result<(), FieldError> {
        FieldChecks::new()
            .field(
                "title",
                "Title",
                Some(form.title.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(150),
                    Rule::Pattern(&TITLE, "contains unsupported characters"),
                ],
            )
            .field(
                "date",
                "Date",
                Some(form.date.as_str()),
                &[Rule::Required, Rule::MonthYear],
            )
            .finish()
    }

    fn to_payload(form: &AwardForm) -> AwardPayload {
        AwardPayload {
            title: text(&form.title),
            date: text(&form.date),
        }
    }

    fn to_form(record: &AwardRecord) -> AwardForm {
        AwardForm {
            title: record.title.clone(),
            date: record.date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sections::testing::FakeBackend;
    use crate::sections::{FormStatus, SectionEditor, SectionState};

    fn valid_form() -> AwardForm {
        AwardForm {
            title: "Smart India Hackathon Winner".to_string(),
            date: "Aug 2022".to_string(),
        }
    }

    #[test]
    fn test_present_is_not_a_valid_award_date() {
        let form = AwardForm {
            date: "Present".to_string(),
            ..valid_form()
        };
        let err = Awards::validate(&form).unwrap_err();
        assert_eq!(err.field, "date");
        assert_eq!(err.message, "Date must look like \"Jan 2024\"");
    }

    #[test]
    fn test_title_length_counted_in_chars() {
        // 150 chars, 300 bytes
        let form = AwardForm {
            title: "é".repeat(150),
            ..valid_form()
        };
        let err = Awards::validate(&form).unwrap_err();
        assert_eq!(err.message, "Title contains unsupported characters");

        let form = AwardForm {
            title: "a".repeat(151),
            ..valid_form()
        };
        assert_eq!(
            Awards::validate(&form).unwrap_err().message,
            "Title must be at most 150 characters"
        );
    }

    #[tokio::test]
    async fn test_update_refetches_list() {
        let backend = Arc::new(FakeBackend::default());
        let editor = SectionEditor::<Awards>::new(backend.clone());
        let state = editor.create(SectionState::new(), &valid_form()).await.state;

        let (state, form) = SectionEditor::<Awards>::open_edit(state, "id1");
        let form = AwardForm {
            title: "Hackathon Runner-up".to_string(),
            ..form.unwrap()
        };
        let outcome = editor.update(state, "id1", &form).await;

        assert_eq!(outcome.notices[0].message, "Award updated successfully");
        assert_eq!(outcome.state.items[0].title, "Hackathon Runner-up");
        assert_eq!(outcome.state.form, FormStatus::Idle);
        assert_eq!(
            backend.calls(),
            vec!["POST award", "GET award", "PUT award id1", "GET award"]
        );
    }

    #[tokio::test]
    async fn test_update_of_missing_entry_reports_not_found() {
        let backend = Arc::new(FakeBackend::default());
        let editor = SectionEditor::<Awards>::new(backend);
        let outcome = editor
            .update(SectionState::new().open_edit("nope"), "nope", &valid_form())
            .await;
        assert!(outcome.has_error());
        assert_eq!(outcome.notices[0].message, "Award not found");
    }
}
