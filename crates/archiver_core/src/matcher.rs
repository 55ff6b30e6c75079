/// Fuzzy match for the bulk archive control.
///
/// Accepts a control when its accessible label or visible text contains any
/// of the configured tokens, case-insensitively. Tokens are expected in
/// lowercase (the default config provides "archive" and "archivar").
pub fn is_archive_control_label(tokens: &[String], aria_label: Option<&str>, text: &str) -> bool {
    let label = aria_label.unwrap_or("").to_lowercase();
    let text = text.to_lowercase();
    tokens
        .iter()
        .any(|token| label.contains(token.as_str()) || text.contains(token.as_str()))
}
