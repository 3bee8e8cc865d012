use rusqlite::{Connection, ErrorCode, params};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::feed::Material;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open database {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("cannot create schema")]
    Schema(#[source] rusqlite::Error),
}

/// Outcome of a failed single-row insert.
#[derive(Debug, Error)]
pub enum InsertError {
    // Unique id or name already taken; only this row is affected
    #[error("row rejected")]
    Rejected(#[source] rusqlite::Error),
    #[error("storage failure")]
    Storage(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for InsertError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                InsertError::Rejected(err)
            }
            _ => InsertError::Storage(err),
        }
    }
}

// Open (or create) the store and make sure both tables exist
pub fn open(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    init(&conn)?;

    Ok(conn)
}

pub fn init(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS category (
            id   INTEGER UNIQUE,
            name VARCHAR UNIQUE
        );

        -- category_id is not a foreign key: news may outlive a rejected category row
        CREATE TABLE IF NOT EXISTS material (
            id          INTEGER UNIQUE,
            category_id INTEGER,
            title       VARCHAR,
            image       VARCHAR,
            description VARCHAR,
            text        TEXT,
            date        VARCHAR
        );
        ",
    )
    .map_err(StoreError::Schema)?;

    Ok(())
}

pub fn insert_category(conn: &Connection, id: i64, name: &str) -> Result<(), InsertError> {
    conn.execute(
        "INSERT INTO category (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;

    Ok(())
}

pub fn insert_material(
    conn: &Connection,
    category_id: i64,
    material: &Material,
) -> Result<(), InsertError> {
    conn.execute(
        "
        INSERT INTO material
        (id, category_id, title, image, description, text, date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ",
        params![
            material.id,
            category_id,
            material.title,
            material.image,
            material.description,
            material.text,
            material.date
        ],
    )?;

    Ok(())
}
