use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::FieldError;
use crate::format::{format_list, parse_list};
use crate::models::skill::{SkillPayload, SkillRecord};
use crate::sections::{text, Section};
use crate::validation::patterns::{SKILL_ITEM, TITLE};
use crate::validation::{check_rules, CrossFieldRule, FieldChecks, Rule};

pub const MAX_ITEMS: usize = 20;

/// `items` is edited as one comma-separated input ("Rust, Go, SQL").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillForm {
    pub category: String,
    pub items: String,
}

fn no_duplicates(form: &SkillForm) -> bool {
    let mut seen = HashSet::new();
    parse_list(&form.items)
        .iter()
        .all(|item| seen.insert(item.to_lowercase()))
}

const RULES: &[CrossFieldRule<SkillForm>] = &[CrossFieldRule {
    field: "items",
    message: "Skills must not contain duplicates",
    holds: no_duplicates,
}];

pub struct Skills;

impl Section for Skills {
    const RESOURCE: &'static str = "skill";
    const LABEL: &'static str = "Skill";

    type Record = SkillRecord;
    type Form = SkillForm;
    type Payload = SkillPayload;

    fn validate(form: &SkillForm) -> Result<(), FieldError> {
        let items = parse_list(&form.items);
        let mut checks = FieldChecks::new()
            .field(
                "category",
                "Category",
                Some(form.category.as_str()),
                &[
                    Rule::Required,
                    Rule::MaxLen(50),
                    Rule::Pattern(&TITLE, "contains unsupported characters"),
                ],
            )
            .field("items", "Skills", Some(form.items.as_str()), &[Rule::Required])
            .ensure(
                !items.is_empty(),
                "items",
                "At least one skill is required",
            )
            .ensure(
                items.len() <= MAX_ITEMS,
                "items",
                format!("At most {MAX_ITEMS} skills can be listed"),
            );

        for item in &items {
            checks = checks.field(
                "items",
                "Each skill",
                Some(item.as_str()),
                &[
                    Rule::MaxLen(30),
                    Rule::Pattern(
                        &SKILL_ITEM,
                        "can only contain letters, numbers and . + # / & ( ) - separated by single spaces",
                    ),
                ],
            );
        }

        checks.finish()?;
        check_rules(form, RULES)
    }

    fn to_payload(form: &SkillForm) -> SkillPayload {
        SkillPayload {
            category: text(&form.category),
            items: parse_list(&form.items),
        }
    }

    fn to_form(record: &SkillRecord) -> SkillForm {
        SkillForm {
            category: record.category.clone(),
            items: format_list(&record.items),
        }
    }
}
