use crate::editing::block::{BlockId, BlockKind, HeadingLevel};
use crate::editing::editor::Editor;

/// Immutable view of an editor for rendering.
///
/// Front-ends render from snapshots and never touch the document directly;
/// edits go back through [`Editor::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Editor version for change detection
    pub version: u64,
    pub read_only: bool,
    pub blocks: Vec<RenderBlock>,
}

/// UI-ready block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBlock {
    pub id: BlockId,
    /// Position in the document
    pub index: usize,
    pub kind: RenderKind,
    /// Body text, heading text or image caption
    pub content: String,
    /// Focused block; never set in read-only mode
    pub is_active: bool,
    pub editable: bool,
}

/// Rendering strategy per block type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderKind {
    Paragraph,
    Heading { level: HeadingLevel },
    Todo { checked: bool },
    Bullet,
    /// Positional number, the block's document index plus one
    Numbered { number: usize },
    Code,
    Image { source: ImageSource },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    /// Upload placeholder, only offered while editable
    Placeholder,
    /// Read-only image without a url renders nothing
    Missing,
}

impl RenderBlock {
    /// Image blocks expose url and caption inputs while focused
    pub fn shows_image_inputs(&self) -> bool {
        self.is_active && matches!(self.kind, RenderKind::Image { .. })
    }
}

impl Snapshot {
    pub(crate) fn from_editor(editor: &Editor) -> Self {
        let read_only = editor.is_read_only();
        let active = if read_only { None } else { editor.active_block() };

        let blocks = editor
            .document()
            .blocks()
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let kind = match &block.kind {
                    BlockKind::Paragraph => RenderKind::Paragraph,
                    BlockKind::Heading { level } => RenderKind::Heading { level: *level },
                    BlockKind::Todo { checked } => RenderKind::Todo { checked: *checked },
                    BlockKind::List => RenderKind::Bullet,
                    BlockKind::OrderedList => RenderKind::Numbered { number: index + 1 },
                    BlockKind::Code => RenderKind::Code,
                    BlockKind::Image { url } => RenderKind::Image {
                        source: match url {
                            Some(url) => ImageSource::Url(url.clone()),
                            None if read_only => ImageSource::Missing,
                            None => ImageSource::Placeholder,
                        },
                    },
                };

                RenderBlock {
                    id: block.id.clone(),
                    index,
                    kind,
                    content: block.content.clone(),
                    is_active: active == Some(&block.id),
                    editable: !read_only,
                }
            })
            .collect();

        Self {
            version: editor.version(),
            read_only,
            blocks,
        }
    }
}
