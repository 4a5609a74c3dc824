/// Degree as edited: program, major and an optional specialization.
/// Flat form: `"Program - Major (Specialization)"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Degree {
    pub program: String,
    pub major: String,
    pub specialization: Option<String>,
}

pub const DEGREE_MAX_LEN: usize = 100;

pub fn format_degree(degree: &Degree) -> String {
    let mut flat = degree.program.clone();
    if !degree.major.is_empty() {
        flat.push_str(" - ");
        flat.push_str(&degree.major);
    }
    if let Some(spec) = degree.specialization.as_deref().filter(|s| !s.is_empty()) {
        flat.push_str(" (");
        flat.push_str(spec);
        flat.push(')');
    }
    flat
}

/// Never fails. Degrees saved before the structured editor existed usually
/// have no separator and come back as a program with an empty major.
pub fn parse_degree(flat: &str) -> Degree {
    let flat = flat.trim();

    let (rest, specialization) = match flat.strip_suffix(')').and_then(|s| s.rsplit_once(" (")) {
        Some((rest, spec)) if !spec.is_empty() => (rest, Some(spec.trim().to_string())),
        _ => (flat, None),
    };

    let (program, major) = match rest.split_once(" - ") {
        Some((program, major)) => (program.trim(), major.trim()),
        None => (rest.trim(), ""),
    };

    Degree {
        program: program.to_string(),
        major: major.to_string(),
        specialization,
    }
}
