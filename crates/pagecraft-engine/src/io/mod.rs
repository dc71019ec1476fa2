use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::{InMemoryPageStore, Page};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse pages file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid pages file {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// On-disk layout of a pages file
#[derive(Debug, Default, Deserialize)]
struct PagesFile {
    #[serde(default)]
    pages: Vec<Page>,
}

/// Parse pages from TOML text (`[[pages]]` tables with `[[pages.content]]` blocks)
pub fn parse_pages(text: &str) -> Result<Vec<Page>, toml::de::Error> {
    let file: PagesFile = toml::from_str(text)?;
    Ok(file.pages)
}

/// Read seed pages from a TOML file
pub fn load_pages(path: &Path) -> Result<Vec<Page>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let pages = parse_pages(&text).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for (i, page) in pages.iter().enumerate() {
        if pages[..i].iter().any(|other| other.id == page.id) {
            return Err(IoError::Invalid {
                path: path.to_path_buf(),
                reason: format!("duplicate page id {}", page.id),
            });
        }
    }

    log::info!("loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// Page store for the given pages file, or the seeded demo store when none is configured
pub fn open_store(pages_path: Option<&Path>) -> Result<InMemoryPageStore, IoError> {
    match pages_path {
        Some(path) => Ok(InMemoryPageStore::new(load_pages(path)?)),
        None => Ok(InMemoryPageStore::seeded()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{BlockKind, HeadingLevel};
    use crate::models::PageStore;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const PAGES: &str = r#"
[[pages]]
id = "garden"
title = "Garden"
emoji = "🌱"
last_edited = "Edited today"

[[pages.content]]
id = "1"
type = "heading"
level = 2
content = "Beds"

[[pages.content]]
id = "2"
type = "todo"
checked = true
content = "Water tomatoes"

[[pages.content]]
id = "3"
type = "ordered-list"
content = "Dig"

[[pages.content]]
id = "4"
type = "image"
url = "https://example.com/bed.png"
content = "Raised bed"
"#;

    #[test]
    fn test_parse_pages() {
        let pages = parse_pages(PAGES).unwrap();
        assert_eq!(pages.len(), 1);
        let kinds: Vec<_> = pages[0].content.iter().map(|b| b.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading {
                    level: HeadingLevel::H2
                },
                BlockKind::Todo { checked: true },
                BlockKind::OrderedList,
                BlockKind::Image {
                    url: Some("https://example.com/bed.png".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_bad_heading_level() {
        let text = r#"
[[pages]]
id = "p"
title = "P"

[[pages.content]]
id = "1"
type = "heading"
level = 7
content = "Too deep"
"#;
        assert!(parse_pages(text).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("pages.toml");
        assert!(matches!(load_pages(&missing), Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_duplicate_page_ids() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pages.toml");
        fs::write(&path, format!("{PAGES}\n{PAGES}")).unwrap();
        assert!(matches!(load_pages(&path), Err(IoError::Invalid { .. })));
    }

    #[test]
    fn test_open_store_from_pages_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pages.toml");
        fs::write(&path, PAGES).unwrap();

        let store = open_store(Some(&path)).unwrap();

        let page = store.page("garden").unwrap();
        assert_eq!(page.title, "Garden");
        assert_eq!(page.content.len(), 4);
        assert_eq!(page.content[1].content, "Water tomatoes");
        assert!(store.page("page-1").is_none());
    }

    #[test]
    fn test_load_reports_parse_error_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pages.toml");
        let text = r#"
[[pages]]
id = "p"
title = "P"

[[pages.content]]
id = "1"
type = "callout"
content = "Unknown"
"#;
        fs::write(&path, text).unwrap();

        let err = load_pages(&path).unwrap_err();

        assert!(matches!(err, IoError::Parse { .. }));
        assert!(err.to_string().contains("pages.toml"));
    }

    #[test]
    fn test_open_store_defaults_to_seeded() {
        let store = open_store(None).unwrap();
        assert_eq!(store, InMemoryPageStore::seeded());
    }
}
