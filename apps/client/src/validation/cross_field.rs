use crate::errors::FieldError;

/// A relationship between sibling fields of one form.
/// `holds` returns `true` when the bundle satisfies the rule.
pub struct CrossFieldRule<B> {
    pub field: &'static str,
    pub message: &'static str,
    pub holds: fn(&B) -> bool,
}

/// Evaluates `rules` in order and returns the first violation.
pub fn first_violation<B>(bundle: &B, rules: &[CrossFieldRule<B>]) -> Option<FieldError> {
    rules
        .iter()
        .find(|rule| !(rule.holds)(bundle))
        .map(|rule| FieldError::new(rule.field, rule.message))
}

pub fn check_rules<B>(bundle: &B, rules: &[CrossFieldRule<B>]) -> Result<(), FieldError> {
    match first_violation(bundle, rules) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
