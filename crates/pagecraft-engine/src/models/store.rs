use crate::editing::{Block, Editor, HeadingLevel};
use crate::models::page::Page;

/// Lookup from page id to page content.
///
/// The editor never calls back into the store; it only receives a copy of
/// the content when a page is opened.
pub trait PageStore {
    fn page(&self, id: &str) -> Option<&Page>;

    fn pages(&self) -> &[Page];
}

/// Outcome of resolving a page id for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Found { page: Page, editor: Editor },
    NotFound { id: String },
}

impl PageView {
    /// Message shown by the presentation layer for unknown pages
    pub const NOT_FOUND_MESSAGE: &'static str = "Page not found";
}

/// Resolve `id` against `store`, opening an editor over a copy of its content
pub fn resolve_page(store: &impl PageStore, id: &str, read_only: bool) -> PageView {
    match store.page(id) {
        Some(page) => {
            log::info!("opening page {id} ({} blocks)", page.content.len());
            PageView::Found {
                editor: page.editor(read_only),
                page: page.clone(),
            }
        }
        None => {
            log::info!("page {id} not found");
            PageView::NotFound { id: id.to_string() }
        }
    }
}

/// Page store backed by a vector, seeded with the demo workspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryPageStore {
    pages: Vec<Page>,
}

impl InMemoryPageStore {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// The three demo pages listed in the sidebar
    pub fn seeded() -> Self {
        Self::new(vec![project_roadmap(), meeting_notes(), ideas()])
    }

    /// "Getting Started" workspace home page
    pub fn home() -> Page {
        Page {
            id: "getting-started".to_string(),
            title: "Getting Started".to_string(),
            emoji: "👋".to_string(),
            last_edited: "Edited just now".to_string(),
            content: vec![
                Block::heading("1", HeadingLevel::H1, "Welcome to your workspace"),
                Block::paragraph(
                    "2",
                    "Use this document to get started with your new workspace.",
                ),
                Block::heading("3", HeadingLevel::H2, "What is pagecraft?"),
                Block::paragraph(
                    "4",
                    "pagecraft is an all-in-one workspace for your notes, tasks, wikis, and databases.",
                ),
                Block::todo("5", true, "Create your first page"),
                Block::todo("6", false, "Add some content"),
                Block::todo("7", false, "Share with your team"),
                Block::heading("8", HeadingLevel::H2, "Get organized with databases"),
                Block::paragraph("9", "Create powerful databases to organize your work."),
            ],
        }
    }
}

impl PageStore for InMemoryPageStore {
    fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    fn pages(&self) -> &[Page] {
        &self.pages
    }
}

/// Mock page served for a public share link; always opened read-only
pub fn public_note(note_id: &str) -> Page {
    Page {
        id: note_id.to_string(),
        title: "Public Shared Note".to_string(),
        emoji: "📝".to_string(),
        last_edited: "Shared via public link".to_string(),
        content: vec![
            Block::heading("1", HeadingLevel::H1, "This is a publicly shared note"),
            Block::paragraph(
                "2",
                "Anyone with the link can view this content without signing in.",
            ),
            Block::heading("3", HeadingLevel::H2, "How public sharing works"),
            Block::list("4", "Generate a public link for your note"),
            Block::list("5", "Share the link with anyone"),
            Block::list("6", "They can view the content without an account"),
            Block::paragraph("7", format!("This note was shared with ID: {note_id}")),
        ],
    }
}

fn project_roadmap() -> Page {
    Page {
        id: "page-1".to_string(),
        title: "Project Roadmap".to_string(),
        emoji: "🗺️".to_string(),
        last_edited: "Edited 2 days ago".to_string(),
        content: vec![
            Block::heading("1", HeadingLevel::H1, "Project Roadmap"),
            Block::paragraph("2", "Our plan for the next quarter."),
            Block::heading("3", HeadingLevel::H2, "Q1 Goals"),
            Block::todo("4", true, "Launch new website"),
            Block::todo("5", true, "Implement user authentication"),
            Block::todo("6", false, "Create admin dashboard"),
            Block::heading("7", HeadingLevel::H2, "Q2 Goals"),
            Block::todo("8", false, "Add payment processing"),
            Block::todo("9", false, "Implement analytics"),
        ],
    }
}

fn meeting_notes() -> Page {
    Page {
        id: "page-2".to_string(),
        title: "Meeting Notes".to_string(),
        emoji: "📝".to_string(),
        last_edited: "Edited yesterday".to_string(),
        content: vec![
            Block::heading("1", HeadingLevel::H1, "Team Meeting - April 15, 2023"),
            Block::paragraph("2", "Attendees: Alex, Jamie, Casey, Taylor"),
            Block::heading("3", HeadingLevel::H2, "Agenda"),
            Block::list("4", "Project updates"),
            Block::list("5", "Roadmap review"),
            Block::list("6", "Open discussion"),
            Block::heading("7", HeadingLevel::H2, "Action Items"),
            Block::todo("8", false, "Alex to update project documentation"),
            Block::todo("9", false, "Jamie to schedule next meeting"),
        ],
    }
}

fn ideas() -> Page {
    Page {
        id: "page-3".to_string(),
        title: "Ideas & Inspiration".to_string(),
        emoji: "💡".to_string(),
        last_edited: "Edited 3 days ago".to_string(),
        content: vec![
            Block::heading("1", HeadingLevel::H1, "Ideas & Inspiration"),
            Block::paragraph(
                "2",
                "A collection of ideas and inspiration for future projects.",
            ),
            Block::heading("3", HeadingLevel::H2, "Design Inspiration"),
            Block::list("4", "Minimal and clean interfaces"),
            Block::list("5", "Dark mode with accent colors"),
            Block::list("6", "Micro-interactions for better UX"),
            Block::heading("7", HeadingLevel::H2, "Feature Ideas"),
            Block::list("8", "AI-powered content suggestions"),
            Block::list("9", "Collaborative editing in real-time"),
            Block::list("10", "Advanced search with filters"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seeded_store_lookup() {
        let store = InMemoryPageStore::seeded();
        assert_eq!(store.pages().len(), 3);
        assert_eq!(store.page("page-2").map(|p| p.title.as_str()), Some("Meeting Notes"));
        assert!(store.page("page-9").is_none());
    }

    #[test]
    fn test_resolve_unknown_page() {
        let store = InMemoryPageStore::seeded();
        assert_eq!(
            resolve_page(&store, "missing", false),
            PageView::NotFound {
                id: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_known_page_opens_editor() {
        let store = InMemoryPageStore::seeded();
        match resolve_page(&store, "page-1", true) {
            PageView::Found { page, editor } => {
                assert_eq!(page.title, "Project Roadmap");
                assert!(editor.is_read_only());
                assert_eq!(editor.document().len(), 9);
            }
            PageView::NotFound { .. } => panic!("page-1 should resolve"),
        }
    }

    #[test]
    fn test_public_note_names_its_id() {
        let page = public_note("abc123");
        let last = page.content.last().unwrap();
        assert_eq!(last.content, "This note was shared with ID: abc123");
    }
}
