/// Collapses every run of whitespace (spaces, tabs, newlines, NBSP) into a
/// single space and trims both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
