use std::io::Write;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::db::{self, StoreError};
use crate::feed::{self, FeedError};
use crate::import::{ImportError, Importer, Tally};

/// Failures that end a run before a report is printed.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("database initialization failed")]
    Store(#[from] StoreError),
    #[error("cannot load news document")]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

// Entry point: store -> read -> parse -> import -> report
pub fn run<W: Write>(config: &Config, mut out: W) -> Result<Tally, FatalError> {
    let conn = db::open(&config.database)?;
    info!(database = %config.database.display(), "store ready");

    let roots = feed::load(&config.input)?;
    info!(input = %config.input.display(), roots = roots.len(), "news document loaded");

    let mut importer = Importer::new(&conn, config.filters, &mut out);
    importer.import_all(&roots)?;
    let tally = importer.finish();

    report(&mut out, tally).map_err(ImportError::from)?;
    info!(
        categories = tally.categories,
        materials = tally.materials,
        "import finished"
    );

    Ok(tally)
}

pub fn report<W: Write>(out: &mut W, tally: Tally) -> std::io::Result<()> {
    writeln!(
        out,
        "Imported {} categories and {} news",
        tally.categories, tally.materials
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn chain(err: &dyn std::error::Error) -> Vec<String> {
        let mut messages = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            messages.push(cause.to_string());
            source = cause.source();
        }
        messages
    }

    #[test]
    fn fatal_messages_do_not_repeat_their_causes() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::new(dir.path().join("absent.json"))
            .with_database(dir.path().join("news.sqlite"));

        let err = run(&config, Vec::new()).unwrap_err();
        let messages = chain(&err);

        assert_eq!(messages[0], "cannot load news document");
        assert!(messages[1].starts_with("cannot read "));
        assert!(messages[1].contains("absent.json"));
        assert_eq!(messages.len(), 3);
        for (i, message) in messages.iter().enumerate() {
            for later in &messages[i + 1..] {
                assert!(!message.contains(later.as_str()), "{message:?} repeats {later:?}");
            }
        }
    }

    #[test]
    fn store_failure_keeps_rusqlite_cause_in_chain() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::new(dir.path().join("news.json"))
            .with_database(dir.path().join("missing/dir/news.sqlite"));

        let err = run(&config, Vec::new()).unwrap_err();

        assert!(matches!(err, FatalError::Store(_)));
        assert_eq!(err.to_string(), "database initialization failed");
        assert!(err.source().unwrap().source().is_some());
    }

    #[test]
    fn report_line() {
        let mut out = Vec::new();
        report(
            &mut out,
            Tally {
                categories: 3,
                materials: 7,
            },
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Imported 3 categories and 7 news\n"
        );
    }
}
