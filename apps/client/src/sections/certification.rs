use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::format::date_range::is_ordered;
use crate::format::{format_date_range, parse_date_range, DateRange};
use crate::models::certification::{CertificationPayload, CertificationRecord};
use crate::sections::{optional_text, text, Section};
use crate::validation::patterns::{ORGANIZATION, PERSON_NAME, TITLE};
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationForm {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub instructor: Option<String>,
    pub platform: String,
    pub certification_link: Option<String>,
}

const RULES: &[CrossFieldRule<CertificationForm>] = &[CrossFieldRule {
    field: "endDate",
    message: "End date cannot be before start date",
    holds: |f: &CertificationForm| is_ordered(&f.start_date, &f.end_date),
}];

pub struct Certifications;

impl Section for Certifications {
    const RESOURCE: &'static str = "certification";
    const LABEL: &'static str = "Certification";

    type Record = CertificationRecord;
    type Form = CertificationForm;
    type Payload = CertificationPayload;

    fn validate(form: &CertificationForm) -> Result<(), FieldError> {
        FieldChecks::new()
            .field(
                "title",
                "Title",
                Some(form.title.as_str()),
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
            .field(
                "instructor",
                "Instructor",
                form.instructor.as_deref(),
                &[
                    Rule::MaxLen(50),
                    Rule::Pattern(&PERSON_NAME, "can only contain letters, spaces and . ' -"),
                ],
            )
            .field(
                "platform",
                "Platform",
                Some(form.platform.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(50),
                    Rule::Pattern(&ORGANIZATION, "contains unsupported characters"),
                ],
            )
            .field(
                "certificationLink",
                "Certification link",
                form.certification_link.as_deref(),
                &[Rule::MaxLen(200), Rule::Url],
            )
            .finish()?;
        check_rules(form, RULES)
    }

    fn to_payload(form: &CertificationForm) -> CertificationPayload {
        CertificationPayload {
            title: text(&form.title),
            date_range: format_date_range(&DateRange {
                start: text(&form.start_date),
                end: text(&form.end_date),
            }),
            instructor: optional_text(form.instructor.as_deref()),
            platform: text(&form.platform),
            certification_link: optional_text(form.certification_link.as_deref()),
        }
    }

    fn to_form(record: &CertificationRecord) -> CertificationForm {
        let range = parse_date_range(&record.date_range);
        CertificationForm {
            title: record.title.clone(),
            start_date: range.start,
            end_date: range.end,
            instructor: record.instructor.clone(),
            platform: record.platform.clone(),
            certification_link: record.certification_link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CertificationForm {
        CertificationForm {
            title: "AWS Certified Developer".to_string(),
            start_date: "Jan 2023".to_string(),
            end_date: "Mar 2023".to_string(),
            instructor: None,
            platform: "Amazon Web Services".to_string(),
            certification_link: Some("https://aws.amazon.com/verify/abc".to_string()),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(Certifications::validate(&valid_form()).is_ok());
    }

    #[test]
    fn test_missing_platform_reports_empty() {
        let form = CertificationForm {
            platform: "   ".to_string(),
            ..valid_form()
        };
        let err = Certifications::validate(&form).unwrap_err();
        assert_eq!(err.field, "platform");
        assert_eq!(err.message, "Platform cannot be empty");
    }

    #[test]
    fn test_instructor_pattern() {
        let form = CertificationForm {
            instructor: Some("Dr. Ng 2".to_string()),
            ..valid_form()
        };
        assert_eq!(Certifications::validate(&form).unwrap_err().field, "instructor");
    }

    #[test]
    fn test_end_before_start_rejected() {
        let form = CertificationForm {
            end_date: "Dec 2022".to_string(),
            ..valid_form()
        };
        assert_eq!(Certifications::validate(&form).unwrap_err().field, "endDate");
    }

    #[test]
    fn test_record_round_trip() {
        let payload = Certifications::to_payload(&valid_form());
        assert_eq!(payload.date_range, "Jan 2023 - Mar 2023");

        let record: CertificationRecord = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "user_id": "u1",
            "title": payload.title,
            "date_range": payload.date_range,
            "platform": payload.platform,
            "certification_link": payload.certification_link,
            "created_at": "2024-02-01T08:30:00",
            "updated_at": "2024-02-01T08:30:00"
        }))
        .unwrap();
        assert_eq!(Certifications::to_form(&record), valid_form());
    }
}
