// Language filter for the starred list.

use std::collections::BTreeSet;
use std::fmt;

use super::row::Row;

/// Label of the "show all" choice.
pub const ALL_LABEL: &str = "All";

/// Selected language filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Language(String),
}

impl LanguageFilter {
    /// Parse user input; blank input and `All` mean show all.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_LABEL {
            LanguageFilter::All
        } else {
            LanguageFilter::Language(value.to_string())
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Language(lang) => row.language.as_deref() == Some(lang.as_str()),
        }
    }

    /// Derive the filtered view, keeping the original order.
    pub fn apply<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    /// Next choice when cycling through `All` followed by `languages`.
    pub fn cycle(&self, languages: &[String], forward: bool) -> Self {
        let choices = languages.len() + 1;
        let current = match self {
            LanguageFilter::All => 0,
            LanguageFilter::Language(lang) => languages
                .iter()
                .position(|l| l == lang)
                .map_or(0, |i| i + 1),
        };
        let next = if forward {
            (current + 1) % choices
        } else {
            (current + choices - 1) % choices
        };

        match next {
            0 => LanguageFilter::All,
            i => LanguageFilter::Language(languages[i - 1].clone()),
        }
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => f.write_str(ALL_LABEL),
            LanguageFilter::Language(lang) => f.write_str(lang),
        }
    }
}

/// Distinct languages present in `rows`, sorted.
pub fn languages(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.language.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
