// Plain-text output for non-interactive runs.

use std::io::{self, Write};

use crate::state::{LanguageFilter, Row, SessionOutcome};

/// Write one tab-separated line per row plus a count footer.
pub fn write_rows<W: Write>(out: &mut W, rows: &[&Row], cached: bool) -> io::Result<()> {
    for row in rows {
        writeln!(
            out,
            "{}\t★{}\t{}\t{}",
            row.full_name(),
            row.stars,
            row.language.as_deref().unwrap_or("-"),
            row.description_or_empty()
        )?;
    }
    writeln!(
        out,
        "{} repositories{}",
        rows.len(),
        if cached { " (cached)" } else { "" }
    )
}

/// Print a session outcome. Returns false if the session failed.
pub fn print_outcome<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    outcome: &SessionOutcome,
    filter: &LanguageFilter,
) -> io::Result<bool> {
    match outcome {
        SessionOutcome::Failed { error, .. } => {
            writeln!(err, "{}", error)?;
            Ok(false)
        }
        SessionOutcome::Abandoned => Ok(false),
        SessionOutcome::Completed {
            cache_error: Some(e),
            ..
        } => {
            writeln!(err, "warning: {}", e)?;
            write_rows(out, &filter.apply(outcome.rows()), false)?;
            Ok(true)
        }
        _ => {
            write_rows(out, &filter.apply(outcome.rows()), outcome.is_cached())?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitmarksError;

    fn rows() -> Vec<Row> {
        vec![
            Row {
                owner: "tokio-rs".to_string(),
                repo: "tokio".to_string(),
                description: Some("Async runtime".to_string()),
                language: Some("Rust".to_string()),
                stars: 30000,
            },
            Row {
                owner: "golang".to_string(),
                repo: "go".to_string(),
                description: None,
                language: None,
                stars: 120000,
            },
        ]
    }

    fn render(outcome: &SessionOutcome, filter: &LanguageFilter) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = print_outcome(&mut out, &mut err, outcome, filter).unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_prints_filtered_rows() {
        let outcome = SessionOutcome::Cached {
            rows: rows(),
            cached_at: None,
        };
        let (ok, out, err) = render(&outcome, &LanguageFilter::parse("Rust"));

        assert!(ok);
        assert!(err.is_empty());
        assert_eq!(
            out,
            "tokio-rs/tokio\t★30000\tRust\tAsync runtime\n1 repositories (cached)\n"
        );
    }

    #[test]
    fn test_missing_fields_render_as_placeholders() {
        let outcome = SessionOutcome::Completed {
            rows: rows(),
            cache_error: None,
        };
        let (_, out, _) = render(&outcome, &LanguageFilter::All);
        assert!(out.contains("golang/go\t★120000\t-\t\n"));
        assert!(out.ends_with("2 repositories\n"));
    }

    #[test]
    fn test_failure_goes_to_stderr() {
        let outcome = SessionOutcome::Failed {
            error: GitmarksError::IdentityNotFound("ghost-user".into()),
            partial: Vec::new(),
        };
        let (ok, out, err) = render(&outcome, &LanguageFilter::All);

        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, "User \"ghost-user\" not found.\n");
    }

    #[test]
    fn test_cache_warning_still_prints_rows() {
        let outcome = SessionOutcome::Completed {
            rows: rows(),
            cache_error: Some(GitmarksError::CacheWrite("read-only".into())),
        };
        let (ok, out, err) = render(&outcome, &LanguageFilter::All);

        assert!(ok);
        assert!(err.starts_with("warning: Failed to write cache"));
        assert!(out.ends_with("2 repositories\n"));
    }
}
