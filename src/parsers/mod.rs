use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Clean a detail-table key or value. Amazon embeds left-to-right marks
/// (U+200E) in its spec tables; they are invisible but poison comparisons.
pub fn normalize_detail_text(text: &str) -> String {
    clean_text(text).replace('\u{200e}', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Sony \n  WH-1000XM5   "), "Sony WH-1000XM5");
    }

    #[test]
    fn clean_text_decodes_entities() {
        assert_eq!(clean_text("Johnson &amp; Johnson"), "Johnson & Johnson");
    }

    #[test]
    fn clean_text_empty_input() {
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn normalize_detail_text_strips_ltr_marks() {
        assert_eq!(normalize_detail_text("\u{200e}450 g"), "450 g");
        assert_eq!(
            normalize_detail_text("\u{200e}Item\u{200e} Weight"),
            "Item Weight"
        );
    }
}
