use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Trims `text` to at most `max_width` terminal columns, ending with `…`
/// when something was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Staking", 10), "Staking");
    }

    #[test]
    fn long_text_is_ellipsized_by_columns() {
        assert_eq!(truncate_to_width("Testing Framework Functions Reference", 12), "Testing Fra…");
        assert_eq!(truncate_to_width("\u{3164}\u{3164} Deep", 3).chars().last(), Some('…'));
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
