use encoding_rs::UTF_8;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("cannot read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} is not valid UTF-8")]
    Encoding { path: PathBuf },
    #[error("malformed JSON in {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub active: Option<bool>,
    #[serde(default)]
    pub news: Vec<Material>,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Material {
    pub id: i64,
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub text: Option<String>,
    pub date: Option<String>,
    pub active: Option<bool>,
}

impl Category {
    // Only an explicit `false` marks a node inactive
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }
}

impl Drop for Category {
    // Unlink nested levels one by one so very deep trees do not exhaust the stack
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.subcategories);
        while let Some(mut category) = pending.pop() {
            pending.append(&mut category.subcategories);
        }
    }
}

impl Material {
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    /// Name used in status lines: the title, or `#id` for untitled items.
    pub fn label(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("#{}", self.id),
        }
    }
}

/// Read a news document from disk and parse its root categories.
pub fn load(path: &Path) -> Result<Vec<Category>, FeedError> {
    let bytes = fs::read(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, had_errors) = UTF_8.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(FeedError::Encoding {
            path: path.to_path_buf(),
        });
    }

    parse(&text).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a document of any nesting depth; the stack grows on the heap as needed.
pub fn parse(text: &str) -> Result<Vec<Category>, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();

    let roots = Vec::<Category>::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;

    Ok(roots)
}
