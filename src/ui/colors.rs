// Language color lookup.
// Matches the colors GitHub uses for its language bar.

use ratatui::style::Color;

/// Fallback for languages missing from the table.
pub const UNKNOWN: Color = Color::Gray;

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("ActionScript", "#882B0F"),
    ("Assembly", "#6E4C13"),
    ("C", "#555555"),
    ("C#", "#178600"),
    ("C++", "#F34B7D"),
    ("CSS", "#563D7C"),
    ("Clojure", "#DB5855"),
    ("CoffeeScript", "#244776"),
    ("Common Lisp", "#3FB68B"),
    ("Crystal", "#000100"),
    ("Dart", "#00B4AB"),
    ("Dockerfile", "#384D54"),
    ("Elixir", "#6E4A7E"),
    ("Elm", "#60B5CC"),
    ("Emacs Lisp", "#C065DB"),
    ("Erlang", "#B83998"),
    ("F#", "#B845FC"),
    ("Go", "#00ADD8"),
    ("Groovy", "#4298B8"),
    ("HTML", "#E34C26"),
    ("Haskell", "#5E5086"),
    ("Java", "#B07219"),
    ("JavaScript", "#F1E05A"),
    ("Julia", "#A270BA"),
    ("Jupyter Notebook", "#DA5B0B"),
    ("Kotlin", "#A97BFF"),
    ("Lua", "#000080"),
    ("Makefile", "#427819"),
    ("Nim", "#FFC200"),
    ("Nix", "#7E7EFF"),
    ("OCaml", "#EF7A08"),
    ("Objective-C", "#438EFF"),
    ("PHP", "#4F5D95"),
    ("Perl", "#0298C3"),
    ("PowerShell", "#012456"),
    ("Python", "#3572A5"),
    ("R", "#198CE7"),
    ("Ruby", "#701516"),
    ("Rust", "#DEA584"),
    ("SCSS", "#C6538C"),
    ("Scala", "#C22D40"),
    ("Shell", "#89E051"),
    ("Swift", "#F05138"),
    ("TeX", "#3D6117"),
    ("TypeScript", "#3178C6"),
    ("Vim Script", "#199F4B"),
    ("Vue", "#41B883"),
    ("Zig", "#EC915C"),
];

/// Color for `language`, or [`UNKNOWN`].
pub fn language_color(language: &str) -> Color {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .and_then(|(_, hex)| parse_hex(hex))
        .unwrap_or(UNKNOWN)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language() {
        assert_eq!(language_color("Rust"), Color::Rgb(0xDE, 0xA5, 0x84));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(language_color("rust"), UNKNOWN);
        assert_eq!(language_color("Brainfunk"), UNKNOWN);
    }

    #[test]
    fn test_table_entries_parse() {
        for (name, hex) in LANGUAGE_COLORS {
            assert!(parse_hex(hex).is_some(), "bad color for {}", name);
        }
    }
}
