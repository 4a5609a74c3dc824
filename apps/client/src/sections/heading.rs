use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::format::{format_phone, parse_phone, Phone};
use crate::models::heading::{CustomLink, HeadingPayload, HeadingRecord};
use crate::sections::{is_present, text, Section};
use crate::validation::patterns::{COUNTRY_CODE, LINK_LABEL, MOBILE_NUMBER};
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

pub const MAX_CUSTOM_LINKS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomLinkForm {
    pub label: String,
    pub url: String,
}

/// The mobile number is edited as a country code (`"+91"`) and ten digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingForm {
    pub country_code: Option<String>,
    pub mobile_number: Option<String>,
    pub custom_links: Vec<CustomLinkForm>,
}

fn unique_labels(form: &HeadingForm) -> bool {
    let mut seen = HashSet::new();
    form.custom_links
        .iter()
        .all(|l| seen.insert(l.label.trim().to_lowercase()))
}

const RULES: &[CrossFieldRule<HeadingForm>] = &[
    CrossFieldRule {
        field: "customLinks",
        message: "Link labels must be unique",
        holds: unique_labels,
    },
    CrossFieldRule {
        field: "mobileNumber",
        message: "Mobile number is required when a country code is provided",
        holds: |f: &HeadingForm| {
            !is_present(f.country_code.as_deref()) || is_present(f.mobile_number.as_deref())
        },
    },
    CrossFieldRule {
        field: "countryCode",
        message: "Country code is required when a mobile number is provided",
        holds: |f: &HeadingForm| {
            !is_present(f.mobile_number.as_deref()) || is_present(f.country_code.as_deref())
        },
    },
];

pub struct Headings;

impl Section for Headings {
    const RESOURCE: &'static str = "heading";
    const LABEL: &'static str = "Heading";

    type Record = HeadingRecord;
    type Form = HeadingForm;
    type Payload = HeadingPayload;

    fn validate(form: &HeadingForm) -> Result<(), FieldError> {
        let mut checks = FieldChecks::new()
            .field(
                "countryCode",
                "Country code",
                form.country_code.as_deref(),
                &[Rule::Pattern(&COUNTRY_CODE, "must be + followed by 1 to 3 digits")],
            )
            .field(
                "mobileNumber",
                "Mobile number",
                form.mobile_number.as_deref(),
                &[Rule::Pattern(&MOBILE_NUMBER, "must be exactly 10 digits")],
            )
            .ensure(
                form.custom_links.len() <= MAX_CUSTOM_LINKS,
                "customLinks",
                format!("At most {MAX_CUSTOM_LINKS} links can be added"),
            );

        for (i, link) in form.custom_links.iter().enumerate() {
            checks = checks
                .field(
                    format!("customLinks.{i}.label"),
                    "Link label",
                    Some(link.label.as_str()),
                    &[
                        Rule::Required,
                        Rule::MaxLen(15),
                        Rule::Pattern(&LINK_LABEL, "can only contain letters, numbers, spaces and . -"),
                    ],
                )
                .field(
                    format!("customLinks.{i}.url"),
                    "Link URL",
                    Some(link.url.as_str()),
                    &[Rule::Required, Rule::MaxLen(200), Rule::Url],
                );
        }

        checks.finish()?;
        check_rules(form, RULES)
    }

    fn to_payload(form: &HeadingForm) -> HeadingPayload {
        let country_code = form
            .country_code
            .as_deref()
            .map(|c| c.trim().trim_start_matches('+'))
            .unwrap_or_default();
        let number = form.mobile_number.as_deref().map(str::trim).unwrap_or_default();
        let mobile = (!number.is_empty()).then(|| {
            format_phone(&Phone {
                country_code: country_code.to_string(),
                number: number.to_string(),
            })
        });

        HeadingPayload {
            mobile,
            custom_links: form
                .custom_links
                .iter()
                .map(|l| CustomLink {
                    label: text(&l.label),
                    url: text(&l.url),
                })
                .collect(),
        }
    }

    fn to_form(record: &HeadingRecord) -> HeadingForm {
        let phone = record.mobile.as_deref().map(parse_phone).unwrap_or_default();
        HeadingForm {
            country_code: (!phone.country_code.is_empty()).then(|| format!("+{}", phone.country_code)),
            mobile_number: (!phone.number.is_empty()).then_some(phone.number),
            custom_links: record
                .custom_links
                .iter()
                .map(|l| CustomLinkForm {
                    label: l.label.clone(),
                    url: l.url.clone(),
                })
                .collect(),
        }
    }
}
