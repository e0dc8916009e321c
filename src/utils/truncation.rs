const MAX_DETAIL_LENGTH: usize = 160;

/// Shorten a status detail for single-line display, keeping both ends.
pub fn truncate_detail(detail: &str) -> String {
    truncate_middle(detail, MAX_DETAIL_LENGTH)
}

pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let half = max_chars / 2;
    let start: String = text.chars().take(half).collect();
    let end: String = text.chars().skip(count - half).collect();
    format!("{} … [{} chars] … {}", start, count - 2 * half, end)
}
