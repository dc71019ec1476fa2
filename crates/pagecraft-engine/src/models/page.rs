use serde::{Deserialize, Serialize};

use crate::editing::{Block, Editor};

/// A page: header metadata plus its seed content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub last_edited: String,
    #[serde(default)]
    pub content: Vec<Block>,
}

impl Page {
    /// Fresh editor over a copy of this page's content
    pub fn editor(&self, read_only: bool) -> Editor {
        Editor::new(self.content.clone()).with_read_only(read_only)
    }

    pub fn header(&self) -> PageHeader {
        PageHeader::from(self)
    }
}

/// Transient page header state: editable title and favourite star
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub title: String,
    pub emoji: String,
    pub last_edited: String,
    pub favorite: bool,
}

impl PageHeader {
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }

    /// Title as shown in the header, falling back to "Untitled"
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

impl From<&Page> for PageHeader {
    fn from(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            emoji: page.emoji.clone(),
            last_edited: page.last_edited.clone(),
            favorite: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page {
            id: "p".to_string(),
            title: "Plan".to_string(),
            emoji: "🗺️".to_string(),
            last_edited: "Edited today".to_string(),
            content: vec![Block::paragraph("1", "hello")],
        }
    }

    #[test]
    fn test_header_rename_and_favorite() {
        let mut header = page().header();
        assert!(!header.favorite);
        assert!(header.toggle_favorite());
        header.rename("   ");
        assert_eq!(header.display_title(), "Untitled");
        header.rename("Roadmap");
        assert_eq!(header.display_title(), "Roadmap");
    }

    #[test]
    fn test_editor_does_not_alias_page_content() {
        let page = page();
        let mut editor = page.editor(false);
        editor.apply(crate::editing::Cmd::EnterKey { index: 0 });
        assert_eq!(page.content.len(), 1);
        assert_eq!(editor.document().len(), 2);
    }
}
