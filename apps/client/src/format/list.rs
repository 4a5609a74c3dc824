/// Skill items are edited as one comma-separated input.
pub fn format_list(items: &[String]) -> String {
    items.join(", ")
}

pub fn parse_list(flat: &str) -> Vec<String> {
    flat.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
