use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "news.sqlite";

/// Opt-in rules excluding inactive nodes from an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filters {
    /// Skip categories marked `"active": false`, together with everything nested in them.
    pub only_active_categories: bool,
    /// Skip individual news items marked `"active": false`.
    pub only_active_news: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: PathBuf,
    pub input: PathBuf,
    pub filters: Filters,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DB_FILE),
            input: input.into(),
            filters: Filters::default(),
        }
    }

    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fixed_store_and_no_filters() {
        let config = Config::new("news.json");
        assert_eq!(config.database, PathBuf::from("news.sqlite"));
        assert_eq!(config.input, PathBuf::from("news.json"));
        assert_eq!(config.filters, Filters::default());
        assert!(!config.filters.only_active_categories);
        assert!(!config.filters.only_active_news);
    }
}
