use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::format::date_range::is_ordered;
use crate::format::{escape, format_date_range, parse_date_range, unescape, DateRange};
use crate::models::project::{ProjectPayload, ProjectRecord};
use crate::sections::{optional_text, text, Section};
use crate::validation::patterns::{FREE_TEXT, TECH_STACK, TITLE};
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

pub const MAX_SUBPOINTS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectForm {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub tech_stack: String,
    pub github_link: Option<String>,
    pub subpoints: Vec<String>,
}

const RULES: &[CrossFieldRule<ProjectForm>] = &[CrossFieldRule {
    field: "endDate",
    message: "End date cannot be before start date",
    holds: |f: &ProjectForm| is_ordered(&f.start_date, &f.end_date),
}];

pub struct Projects;

impl Section for Projects {
    const RESOURCE: &'static str = "project";
    const LABEL: &'static str = "Project";

    type Record = ProjectRecord;
    type Form = ProjectForm;
    type Payload = ProjectPayload;

    fn validate(form: &ProjectForm) -> Result<(), FieldError> {
        let mut checks = FieldChecks::new()
            .field(
                "name",
                "Project name",
                Some(form.name.as_str()),
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
                "techStack",
                "Tech stack",
                Some(form.tech_stack.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(150),
                    Rule::Pattern(&TECH_STACK, "contains unsupported characters"),
                ],
            )
            .field(
                "githubLink",
                "GitHub link",
                form.github_link.as_deref(),
                &[Rule::MaxLen(200), Rule::Url],
            )
            .ensure(
                form.subpoints.len() <= MAX_SUBPOINTS,
                "subpoints",
                format!("At most {MAX_SUBPOINTS} subpoints can be listed"),
            );

        for (i, subpoint) in form.subpoints.iter().enumerate() {
            checks = checks.field(
                format!("subpoints.{i}"),
                "Subpoint",
                Some(subpoint.as_str()),
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

    fn to_payload(form: &ProjectForm) -> ProjectPayload {
        ProjectPayload {
            name: text(&form.name),
            date_range: format_date_range(&DateRange {
                start: text(&form.start_date),
                end: text(&form.end_date),
            }),
            tech_stack: text(&form.tech_stack),
            github_link: optional_text(form.github_link.as_deref()),
            subpoints: form.subpoints.iter().map(|s| escape(s.trim())).collect(),
        }
    }

    fn to_form(record: &ProjectRecord) -> ProjectForm {
        let range = parse_date_range(&record.date_range);
        ProjectForm {
            name: record.name.clone(),
            start_date: range.start,
            end_date: range.end,
            tech_stack: record.tech_stack.clone(),
            github_link: record.github_link.clone(),
            subpoints: record.subpoints.iter().map(|s| unescape(s)).collect(),
        }
    }
}
