use scraper::ElementRef;

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Trims the cell text and swaps the locale decimal comma for a period.
pub fn normalize_decimal(text: &str) -> String {
    text.trim().replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_comma_decimal() {
        assert_eq!(normalize_decimal("  0,1234\n"), "0.1234");
    }

    #[test]
    fn leaves_period_decimal_alone() {
        assert_eq!(normalize_decimal("0.1234"), "0.1234");
    }

    #[test]
    fn extracts_nested_text() {
        let html = scraper::Html::parse_fragment("<p>0,<b>12</b>34</p>");
        let selector = scraper::Selector::parse("p").unwrap();
        let p = html.select(&selector).next().unwrap();
        assert_eq!(extract_text(p), "0,1234");
    }
}
