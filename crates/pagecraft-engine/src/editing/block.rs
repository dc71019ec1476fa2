use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable block identifier.
///
/// Seeded content carries short ids like `"1"`; blocks created by the editor
/// get a uuid v4. Ids are never reused within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, globally unique id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Heading size, restricted to levels 1 to 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const H1: HeadingLevel = HeadingLevel(1);
    pub const H2: HeadingLevel = HeadingLevel(2);
    pub const H3: HeadingLevel = HeadingLevel(3);

    pub fn new(level: u8) -> Option<Self> {
        (1..=3).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self::H1
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("heading level must be 1, 2 or 3, got {level}"))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

/// Fieldless block type tag, used when inserting or retyping blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    Heading,
    Todo,
    List,
    OrderedList,
    Code,
    Image,
}

impl BlockType {
    /// Every block type, in the order the type menu offers them
    pub const ALL: [BlockType; 7] = [
        BlockType::Paragraph,
        BlockType::Heading,
        BlockType::Todo,
        BlockType::List,
        BlockType::OrderedList,
        BlockType::Code,
        BlockType::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::Todo => "todo",
            BlockType::List => "list",
            BlockType::OrderedList => "ordered-list",
            BlockType::Code => "code",
            BlockType::Image => "image",
        }
    }

    /// The type following this one in [`BlockType::ALL`], wrapping around
    pub fn next(self) -> Self {
        let position = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block variant carrying exactly the fields its type needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockKind {
    Paragraph,
    Heading {
        #[serde(default)]
        level: HeadingLevel,
    },
    Todo {
        #[serde(default)]
        checked: bool,
    },
    List,
    OrderedList,
    Code,
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl BlockKind {
    /// Kind with type-appropriate defaults: level 1, unchecked, no url
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Paragraph => BlockKind::Paragraph,
            BlockType::Heading => BlockKind::Heading {
                level: HeadingLevel::default(),
            },
            BlockType::Todo => BlockKind::Todo { checked: false },
            BlockType::List => BlockKind::List,
            BlockType::OrderedList => BlockKind::OrderedList,
            BlockType::Code => BlockKind::Code,
            BlockType::Image => BlockKind::Image { url: None },
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Paragraph => BlockType::Paragraph,
            BlockKind::Heading { .. } => BlockType::Heading,
            BlockKind::Todo { .. } => BlockType::Todo,
            BlockKind::List => BlockType::List,
            BlockKind::OrderedList => BlockType::OrderedList,
            BlockKind::Code => BlockType::Code,
            BlockKind::Image { .. } => BlockType::Image,
        }
    }
}

/// A single typed unit of page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
}

impl Block {
    /// Empty block of the given type with a freshly generated id
    pub fn new(block_type: BlockType) -> Self {
        Self::with_id(BlockId::generate(), block_type)
    }

    pub fn with_id(id: impl Into<BlockId>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::default_for(block_type),
            content: String::new(),
        }
    }

    pub fn paragraph(id: impl Into<BlockId>, content: impl Into<String>) -> Self {
        Self::with_id(id, BlockType::Paragraph).with_content(content)
    }

    pub fn heading(id: impl Into<BlockId>, level: HeadingLevel, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Heading { level },
            content: content.into(),
        }
    }

    pub fn todo(id: impl Into<BlockId>, checked: bool, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Todo { checked },
            content: content.into(),
        }
    }

    pub fn list(id: impl Into<BlockId>, content: impl Into<String>) -> Self {
        Self::with_id(id, BlockType::List).with_content(content)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Merge a partial update into this block.
    ///
    /// When the update names a block type the kind is rebuilt from that
    /// type, taking type-specific fields from the update or the defaults.
    /// Otherwise the type-specific fields only apply if they belong to the
    /// current kind. Content always survives a retype.
    pub fn merge(&mut self, update: BlockUpdate) {
        let BlockUpdate {
            content,
            block_type,
            level,
            checked,
            url,
        } = update;

        if let Some(content) = content {
            self.content = content;
        }

        match block_type {
            Some(block_type) => {
                self.kind = match BlockKind::default_for(block_type) {
                    BlockKind::Heading { level: default } => BlockKind::Heading {
                        level: level.unwrap_or(default),
                    },
                    BlockKind::Todo { checked: default } => BlockKind::Todo {
                        checked: checked.unwrap_or(default),
                    },
                    BlockKind::Image { .. } => BlockKind::Image {
                        url: url.filter(|u| !u.is_empty()),
                    },
                    other => other,
                };
            }
            None => match &mut self.kind {
                BlockKind::Heading { level: current } => {
                    if let Some(level) = level {
                        *current = level;
                    }
                }
                BlockKind::Todo { checked: current } => {
                    if let Some(checked) = checked {
                        *current = checked;
                    }
                }
                BlockKind::Image { url: current } => {
                    // An empty url clears the image
                    if let Some(url) = url {
                        *current = (!url.is_empty()).then_some(url);
                    }
                }
                _ => {}
            },
        }
    }
}

/// Partial set of block fields merged by an update command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockUpdate {
    pub content: Option<String>,
    pub block_type: Option<BlockType>,
    pub level: Option<HeadingLevel>,
    pub checked: Option<bool>,
    pub url: Option<String>,
}

impl BlockUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn retype(block_type: BlockType) -> Self {
        Self {
            block_type: Some(block_type),
            ..Self::default()
        }
    }

    pub fn heading(level: HeadingLevel) -> Self {
        Self::retype(BlockType::Heading).with_level(level)
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::default()
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: HeadingLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, None)]
    #[case(1, Some(1))]
    #[case(3, Some(3))]
    #[case(4, None)]
    fn test_heading_level_bounds(#[case] level: u8, #[case] expected: Option<u8>) {
        assert_eq!(HeadingLevel::new(level).map(HeadingLevel::get), expected);
    }

    #[rstest]
    #[case(BlockType::Heading, BlockKind::Heading { level: HeadingLevel::H1 })]
    #[case(BlockType::Todo, BlockKind::Todo { checked: false })]
    #[case(BlockType::Image, BlockKind::Image { url: None })]
    #[case(BlockType::OrderedList, BlockKind::OrderedList)]
    fn test_default_fields(#[case] block_type: BlockType, #[case] expected: BlockKind) {
        let block = Block::new(block_type);
        assert_eq!(block.kind, expected);
        assert_eq!(block.content, "");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(BlockId::generate(), BlockId::generate());
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(BlockType::Paragraph.next(), BlockType::Heading);
        assert_eq!(BlockType::Image.next(), BlockType::Paragraph);
    }

    #[test]
    fn test_retype_to_todo_resets_checked() {
        let mut block = Block::todo("1", true, "ship it");
        block.merge(BlockUpdate::retype(BlockType::Todo));
        assert_eq!(block.kind, BlockKind::Todo { checked: false });
        assert_eq!(block.content, "ship it");
    }

    #[test]
    fn test_retype_drops_foreign_fields() {
        let mut block = Block::paragraph("1", "caption");
        block.merge(BlockUpdate {
            block_type: Some(BlockType::List),
            level: Some(HeadingLevel::H2),
            checked: Some(true),
            ..BlockUpdate::default()
        });
        assert_eq!(block.kind, BlockKind::List);
    }

    #[test]
    fn test_field_update_ignored_for_other_kinds() {
        let mut block = Block::paragraph("1", "text");
        block.merge(BlockUpdate::checked(true));
        assert_eq!(block, Block::paragraph("1", "text"));
    }

    #[test]
    fn test_image_url_update_and_clear() {
        let mut block = Block::with_id("1", BlockType::Image);
        block.merge(BlockUpdate::url("https://example.com/cat.png"));
        assert_eq!(
            block.kind,
            BlockKind::Image {
                url: Some("https://example.com/cat.png".to_string())
            }
        );

        block.merge(BlockUpdate::url(""));
        assert_eq!(block.kind, BlockKind::Image { url: None });
    }

    #[rstest]
    #[case(Some("https://example.com/cat.png"), Some("https://example.com/cat.png"))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_retype_to_image_takes_url(#[case] url: Option<&str>, #[case] expected: Option<&str>) {
        let mut block = Block::paragraph("1", "A cat");
        block.merge(BlockUpdate {
            url: url.map(str::to_string),
            ..BlockUpdate::retype(BlockType::Image)
        });
        assert_eq!(
            block.kind,
            BlockKind::Image {
                url: expected.map(str::to_string)
            }
        );
        assert_eq!(block.content, "A cat");
    }

    #[test]
    fn test_content_only_update_keeps_image_url() {
        let mut block = Block::with_id("1", BlockType::Image);
        block.merge(BlockUpdate::url("a.png"));
        block.merge(BlockUpdate::content("A cat"));
        assert_eq!(
            block.kind,
            BlockKind::Image {
                url: Some("a.png".to_string())
            }
        );
        assert_eq!(block.content, "A cat");
    }
}
