use std::borrow::Cow;

pub fn truncate_middle<'a>(value: &'a str, max_chars: usize) -> Cow<'a, str> {
    if value.chars().count() <= max_chars {
        return Cow::Borrowed(value);
    }

    if max_chars <= 3 {
        return Cow::Owned("...".chars().take(max_chars).collect());
    }

    let keep = max_chars - 3;
    let left = keep / 2;
    let right = keep - left;
    let start: String = value.chars().take(left).collect();
    let end: String = value
        .chars()
        .rev()
        .take(right)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    Cow::Owned(format!("{start}...{end}"))
}

pub fn compose_status(left: &str, right: &str, width: usize) -> String {
    let left_chars = left.chars().count();
    let right_chars = right.chars().count();

    if right.is_empty() || left_chars + 1 + right_chars >= width {
        return left.to_string();
    }

    let spaces = width.saturating_sub(left_chars + right_chars);
    format!("{left}{}{}", " ".repeat(spaces), right)
}

/// Field values are shown on one line; line breaks become a visible marker.
pub fn single_line(value: &str) -> Cow<'_, str> {
    if value.contains('\n') {
        Cow::Owned(value.replace("\r\n", "\n").replace('\n', " ⏎ "))
    } else {
        Cow::Borrowed(value)
    }
}
