use rusqlite::Connection;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

use crate::config::Filters;
use crate::db::{self, InsertError};
use crate::feed::{Category, Material};

/// Rows confirmed as inserted during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub categories: usize,
    pub materials: usize,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("storage failed while importing {entity}")]
    Storage {
        entity: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("cannot write status line")]
    Output(#[from] io::Error),
}

/// Walks a category forest in pre-order and writes one status line per insert attempt.
pub struct Importer<'a, W> {
    conn: &'a Connection,
    filters: Filters,
    out: W,
    tally: Tally,
}

impl<'a, W: Write> Importer<'a, W> {
    pub fn new(conn: &'a Connection, filters: Filters, out: W) -> Self {
        Self {
            conn,
            filters,
            out,
            tally: Tally::default(),
        }
    }

    pub fn import_all(&mut self, roots: &[Category]) -> Result<(), ImportError> {
        for category in roots {
            self.import_category(category)?;
        }

        Ok(())
    }

    /// Imports `root` and everything nested in it, in pre-order.
    pub fn import_category(&mut self, root: &Category) -> Result<(), ImportError> {
        // Explicit stack: children pushed in reverse so the first one is walked next
        let mut pending = vec![root];

        while let Some(category) = pending.pop() {
            if self.filters.only_active_categories && !category.is_active() {
                debug!(id = category.id, name = %category.name, "skipping inactive category");
                continue;
            }

            self.insert_category(category)?;

            // Nested rows keep the source parent id even if the category row was rejected
            for material in &category.news {
                self.import_material(material, category.id)?;
            }

            pending.extend(category.subcategories.iter().rev());
        }

        Ok(())
    }

    fn insert_category(&mut self, category: &Category) -> Result<(), ImportError> {
        match db::insert_category(self.conn, category.id, &category.name) {
            Ok(()) => {
                self.tally.categories += 1;
                writeln!(self.out, "Category '{}' created", category.name)?;
            }
            Err(InsertError::Rejected(e)) => {
                writeln!(self.out, "Category '{}' not created - {}", category.name, e)?;
            }
            Err(InsertError::Storage(source)) => {
                return Err(ImportError::Storage {
                    entity: format!("category '{}'", category.name),
                    source,
                });
            }
        }

        Ok(())
    }

    fn import_material(&mut self, material: &Material, category_id: i64) -> Result<(), ImportError> {
        if self.filters.only_active_news && !material.is_active() {
            debug!(id = material.id, category_id, "skipping inactive news");
            return Ok(());
        }

        match db::insert_material(self.conn, category_id, material) {
            Ok(()) => {
                self.tally.materials += 1;
                writeln!(self.out, "News '{}' imported", material.label())?;
            }
            Err(InsertError::Rejected(e)) => {
                writeln!(self.out, "News '{}' not imported - {}", material.label(), e)?;
            }
            Err(InsertError::Storage(source)) => {
                return Err(ImportError::Storage {
                    entity: format!("news '{}'", material.label()),
                    source,
                });
            }
        }

        Ok(())
    }

    pub fn finish(self) -> Tally {
        self.tally
    }
}
