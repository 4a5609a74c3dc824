use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::format::{format_degree, format_gpa, parse_degree, Centi, Degree, Gpa, DEGREE_MAX_LEN};
use crate::format::date_range::is_ordered;
use crate::models::education::{EducationPayload, EducationRecord};
use crate::sections::{is_present, optional_text, text, Section};
use crate::validation::patterns::{COURSE, DEGREE_PART, DEGREE_PROGRAM, LOCATION, ORGANIZATION};
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

pub const MAX_COURSES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationForm {
    pub institution: String,
    pub location: String,
    pub program: String,
    pub major: String,
    pub specialization: Option<String>,
    pub gpa: Option<String>,
    pub max_gpa: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub courses: Vec<String>,
}

impl EducationForm {
    pub fn degree(&self) -> Degree {
        Degree {
            program: text(&self.program),
            major: text(&self.major),
            specialization: optional_text(self.specialization.as_deref()),
        }
    }
}

const RULES: &[CrossFieldRule<EducationForm>] = &[
    CrossFieldRule {
        field: "maxGpa",
        message: "Maximum GPA is required when GPA is provided",
        holds: |f: &EducationForm| !is_present(f.gpa.as_deref()) || is_present(f.max_gpa.as_deref()),
    },
    CrossFieldRule {
        field: "gpa",
        message: "GPA cannot be greater than maximum GPA",
        holds: |f: &EducationForm| {
            let gpa = f.gpa.as_deref().and_then(Centi::parse);
            let max = f.max_gpa.as_deref().and_then(Centi::parse);
            match (gpa, max) {
                (Some(gpa), Some(max)) => gpa <= max,
                _ => true,
            }
        },
    },
    CrossFieldRule {
        field: "major",
        message: "Degree must be at most 100 characters",
        holds: |f: &EducationForm| format_degree(&f.degree()).chars().count() <= DEGREE_MAX_LEN,
    },
    CrossFieldRule {
        field: "endDate",
        message: "End date cannot be before start date",
        holds: |f: &EducationForm| is_ordered(&f.start_date, &f.end_date),
    },
];

pub struct Educations;

impl Section for Educations {
    const RESOURCE: &'static str = "education";
    const LABEL: &'static str = "Education";

    type Record = EducationRecord;
    type Form = EducationForm;
    type Payload = EducationPayload;

    fn validate(form: &EducationForm) -> Result<(), FieldError> {
        let mut checks = FieldChecks::new()
            .field(
                "institution",
                "Institution",
                Some(form.institution.as_str()),
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
                "program",
                "Program",
                Some(form.program.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(50),
                    Rule::Pattern(
                        &DEGREE_PROGRAM,
                        "can only contain letters, numbers and . , & ' / separated by single spaces",
                    ),
                ],
            )
            .field(
                "major",
                "Major",
                Some(form.major.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(50),
                    Rule::Pattern(
                        &DEGREE_PART,
                        "can only contain letters, numbers and . , & ' / - separated by single spaces",
                    ),
                ],
            )
            .field(
                "specialization",
                "Specialization",
                form.specialization.as_deref(),
                &[
                    Rule::MaxLen(50),
                    Rule::Pattern(
                        &DEGREE_PART,
                        "can only contain letters, numbers and . , & ' / - separated by single spaces",
                    ),
                ],
            )
            .field(
                "gpa",
                "GPA",
                form.gpa.as_deref(),
                &[
                    Rule::Decimal { max_places: 2 },
                    Rule::Range { min: 0.0, max: 100.0 },
                ],
            )
            .field(
                "maxGpa",
                "Maximum GPA",
                form.max_gpa.as_deref(),
                &[
                    Rule::Decimal { max_places: 2 },
                    Rule::Range { min: 1.0, max: 100.0 },
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
                form.courses.len() <= MAX_COURSES,
                "courses",
                format!("At most {MAX_COURSES} courses can be listed"),
            );

        for (i, course) in form.courses.iter().enumerate() {
            checks = checks.field(
                format!("courses.{i}"),
                "Course",
                Some(course.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(50),
                    Rule::Pattern(&COURSE, "contains unsupported characters"),
                ],
            );
        }

        checks.finish()?;
        check_rules(form, RULES)
    }

    fn to_payload(form: &EducationForm) -> EducationPayload {
        let gpa = optional_text(form.gpa.as_deref()).and_then(|g| Centi::parse(&g));
        let max_gpa = optional_text(form.max_gpa.as_deref()).and_then(|m| Centi::parse(&m));
        EducationPayload {
            institution: text(&form.institution),
            location: text(&form.location),
            degree: format_degree(&form.degree()),
            gpa,
            max_gpa,
            start_date: text(&form.start_date),
            end_date: text(&form.end_date),
            courses: form
                .courses
                .iter()
                .filter_map(|c| optional_text(Some(c.as_str())))
                .collect(),
        }
    }

    fn to_form(record: &EducationRecord) -> EducationForm {
        let degree = parse_degree(&record.degree);
        EducationForm {
            institution: record.institution.clone(),
            location: record.location.clone(),
            program: degree.program,
            major: degree.major,
            specialization: degree.specialization,
            gpa: record.gpa.map(Centi::to_plain_string),
            max_gpa: record.max_gpa.map(Centi::to_plain_string),
            start_date: record.start_date.clone(),
            end_date: record.end_date.clone(),
            courses: record.courses.clone().unwrap_or_default(),
        }
    }
}

/// `"7.84 / 10.00"` for list rows; `None` when no GPA was recorded.
pub fn gpa_display(record: &EducationRecord) -> Option<String> {
    record.gpa.map(|value| {
        format_gpa(&Gpa {
            value: Some(value),
            max: record.max_gpa,
        })
    })
}
