/// Number of decimal digits needed to print every index below `count`.
///
/// Used to align address columns in dumps and traces.
///
/// # Examples
/// ```
/// use bcvm_core::width_for_count;
/// assert_eq!(width_for_count(0), 1);
/// assert_eq!(width_for_count(10), 1);
/// assert_eq!(width_for_count(11), 2);
/// ```
pub fn width_for_count(count: usize) -> usize {
    let mut max = count.saturating_sub(1);
    let mut width = 1;
    while max >= 10 {
        max /= 10;
        width += 1;
    }
    width
}

/// Truncate text to `max_len` characters, marking the cut with an ellipsis.
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
    format!("{truncated}…")
}
