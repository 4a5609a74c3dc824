use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::format::date_range::is_ordered;
use crate::format::{escape, unescape};
use crate::models::volunteer::{VolunteerPayload, VolunteerRecord};
use crate::sections::{text, Section};
use crate::validation::patterns::{FREE_TEXT, LOCATION, ORGANIZATION};
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolunteerForm {
    pub organization: String,
    pub location: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

const RULES: &[CrossFieldRule<VolunteerForm>] = &[CrossFieldRule {
    field: "endDate",
    message: "End date cannot be before start date",
    holds: |f: &VolunteerForm| is_ordered(&f.start_date, &f.end_date),
}];

pub struct Volunteers;

impl Section for Volunteers {
    const RESOURCE: &'static str = "volunteer";
    const LABEL: &'static str = "Volunteer";

    type Record = VolunteerRecord;
    type Form = VolunteerForm;
    type Payload = VolunteerPayload;

    fn validate(form: &VolunteerForm) -> Result<(), FieldError> {
        FieldChecks::new()
            .field(
                "organization",
                "Organization",
                Some(form.organization.as_str()),
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
                "description",
                "Description",
                Some(form.description.as_str()),
                &[
                    Rule::Required,
                    Rule::MinLen(10),
                    Rule::MaxLen(250),
                    Rule::Pattern(&FREE_TEXT, "contains unsupported characters"),
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
            .finish()?;
        check_rules(form, RULES)
    }

    fn to_payload(form: &VolunteerForm) -> VolunteerPayload {
        VolunteerPayload {
            organization: text(&form.organization),
            location: text(&form.location),
            description: escape(form.description.trim()),
            start_date: text(&form.start_date),
            end_date: text(&form.end_date),
        }
    }

    fn to_form(record: &VolunteerRecord) -> VolunteerForm {
        VolunteerForm {
            organization: record.organization.clone(),
            location: record.location.clone(),
            description: unescape(&record.description),
            start_date: record.start_date.clone(),
            end_date: record.end_date.clone(),
        }
    }
}
