//! Detection of table header and separator lines.

/// Substrings found in the column header rows of the invoice tables.
pub const DEFAULT_HEADER_KEYWORDS: [&str; 8] = [
    "п/п",
    "Код",
    "Бар-код",
    "Наименование товара",
    "Кол-во",
    "Сумма отп.",
    "|товара|",
    "(USD)",
];

/// Filter for lines that belong to a table header or are rule lines.
#[derive(Debug, Clone)]
pub struct HeaderFilter {
    keywords: Vec<String>,
}

impl HeaderFilter {
    /// Create a filter matching the given keywords.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the line is a header or separator to drop.
    ///
    /// Separators are non-empty lines made only of `-` and `.`.
    pub fn is_header_or_separator(&self, line: &str) -> bool {
        let stripped = line.trim();

        if !stripped.is_empty() && stripped.chars().all(|c| c == '-' || c == '.') {
            return true;
        }

        self.keywords.iter().any(|kw| stripped.contains(kw.as_str()))
    }
}

impl Default for HeaderFilter {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_lines() {
        let filter = HeaderFilter::default();
        assert!(filter.is_header_or_separator("-----------"));
        assert!(filter.is_header_or_separator("  ---...---  "));
        assert!(filter.is_header_or_separator("."));
        assert!(!filter.is_header_or_separator(""));
        assert!(!filter.is_header_or_separator("   "));
        assert!(!filter.is_header_or_separator("--- total ---"));
    }

    #[test]
    fn test_keyword_lines() {
        let filter = HeaderFilter::default();
        assert!(filter.is_header_or_separator("| № п/п | Код | Бар-код |"));
        assert!(filter.is_header_or_separator("Наименование товара"));
        assert!(filter.is_header_or_separator("Цена (USD)"));
        assert!(filter.is_header_or_separator("|товара|"));
        assert!(!filter.is_header_or_separator("1. 100 4840000000000 Товар 1.000 2.500 2.500"));
        assert!(!filter.is_header_or_separator("Заявка № 15 от 01.02.2024"));
    }

    #[test]
    fn test_custom_keywords() {
        let filter = HeaderFilter::new(["Qty"]);
        assert!(filter.is_header_or_separator("Name Qty Price"));
        assert!(!filter.is_header_or_separator("Кол-во"));
    }
}
