//! Text helpers shared by the matcher and the keyword classifier.

/// Words that carry no meaning for variable lookup.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "from", "in", "of", "on", "or", "the", "to", "with",
];

/// Lowercases, trims and collapses every run of non-alphanumeric
/// characters into a single space.
pub fn normalize_text(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits text into distinct lowercase tokens in order of first appearance.
///
/// Stopwords and purely numeric tokens are dropped.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for part in raw.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
        if part.is_empty()
            || part.chars().all(|c| c.is_ascii_digit())
            || STOPWORDS.contains(&part)
        {
            continue;
        }
        if !tokens.iter().any(|t| t == part) {
            tokens.push(part.to_string());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_case() {
        assert_eq!(normalize_text("  GDP.Price_GDP "), "gdp price gdp");
        assert_eq!(normalize_text("Q/Q -- growth"), "q q growth");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn tokenize_drops_noise() {
        assert_eq!(
            tokenize("Index of the 2017 Price, price INDEX"),
            vec!["index", "price"]
        );
    }
}
