use unicode_width::UnicodeWidthStr;

/// Keep at most `max_chars` characters; no ellipsis is added
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Left-justify to `width` display columns; longer text is left as is
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - text_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Main Street Store", 14), "Main Street St");
        assert_eq!(truncate_chars("short", 14), "short");
        assert_eq!(truncate_chars("2024-01-15T10:00:00", 10), "2024-01-15");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("カフェ東京駅前店", 3), "カフェ");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("Hello", 10), "Hello     ");
        assert_eq!(pad_to_width("Hello World", 5), "Hello World");
        assert_eq!(pad_to_width("東京", 6), "東京  ");
    }
}
