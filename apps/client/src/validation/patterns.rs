// Whitelist character classes for resume form fields.
// Composite sub-fields (degree parts, skill items, phone pieces) exclude the
// separators their flat form uses, which is what keeps parse(format(x)) exact.

use once_cell::sync::Lazy;
use regex::Regex;

pub static ORGANIZATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 .,&'()/\-]+$").unwrap());

pub static LOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z .,'\-]+$").unwrap());

pub static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 .,&'()/:+#|\-]+$").unwrap());

pub static PERSON_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z .'\-]+$").unwrap());

// No hyphen: " - " separates program from major.
pub static DEGREE_PROGRAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9.,&'/]+(?: [A-Za-z0-9.,&'/]+)*$").unwrap());

// No parentheses: the specialization is the trailing "(...)".
pub static DEGREE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9.,&'/\-]+(?: [A-Za-z0-9.,&'/\-]+)*$").unwrap());

pub static COURSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 .,&'()/+#:\-]+$").unwrap());

// No commas: skill lists are edited as one comma-separated string.
pub static SKILL_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9.+#/&()\-]+(?: [A-Za-z0-9.+#/&()\-]+)*$").unwrap());

pub static TECH_STACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 .,+#/&()\-]+$").unwrap());

pub static FREE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[A-Za-z0-9\s.,;:!?'"()\[\]&%$#@+*/=~_\\\-]+$"#).unwrap());

pub static LINK_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 .\-]+$").unwrap());

pub static COUNTRY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+\d{1,3}$").unwrap());

pub static MOBILE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());

pub static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

pub static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

pub static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{4}$").unwrap()
});

pub static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

pub static WHOLE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_program_rejects_separators() {
        assert!(DEGREE_PROGRAM.is_match("Bachelor of Technology"));
        assert!(DEGREE_PROGRAM.is_match("B.Tech"));
        assert!(!DEGREE_PROGRAM.is_match("B - Tech"));
        assert!(!DEGREE_PROGRAM.is_match(" Bachelor"));
        assert!(!DEGREE_PROGRAM.is_match("Bachelor  of Arts"));
    }

    #[test]
    fn test_degree_part_rejects_parentheses() {
        assert!(DEGREE_PART.is_match("Electronics and Tele-communication"));
        assert!(!DEGREE_PART.is_match("Computer Science (AI)"));
    }

    #[test]
    fn test_skill_item_allows_common_names() {
        for item in ["C++", "C#", "Node.js", "CI/CD", "Objective-C", "Google Cloud"] {
            assert!(SKILL_ITEM.is_match(item), "{item} should match");
        }
        assert!(!SKILL_ITEM.is_match("Rust, Go"));
    }

    #[test]
    fn test_month_year() {
        assert!(MONTH_YEAR.is_match("Jan 2024"));
        assert!(!MONTH_YEAR.is_match("January 2024"));
        assert!(!MONTH_YEAR.is_match("Present"));
    }

    #[test]
    fn test_free_text_rejects_markup() {
        assert!(FREE_TEXT.is_match("Increased revenue by 25% (Q3)"));
        assert!(!FREE_TEXT.is_match("<script>"));
        assert!(!FREE_TEXT.is_match("{braces}"));
    }
}
