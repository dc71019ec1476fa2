use crate::editing::{ImageSource, RenderBlock, RenderKind, Snapshot};

/// Placeholder line shown for editable image blocks without a url
pub const IMAGE_PLACEHOLDER: &str = "[ Click to add an image ]";

/// Plain-text rendering of a snapshot, one or more lines per block
pub fn to_lines(snapshot: &Snapshot) -> Vec<String> {
    let mut lines = Vec::new();
    for block in &snapshot.blocks {
        block_lines(block, &mut lines);
    }
    lines
}

/// Marker printed in front of a block's text, e.g. `"## "` or `"[x] "`
pub fn prefix(kind: &RenderKind) -> String {
    match kind {
        RenderKind::Heading { level } => format!("{} ", "#".repeat(level.get() as usize)),
        RenderKind::Todo { checked: true } => "[x] ".to_string(),
        RenderKind::Todo { checked: false } => "[ ] ".to_string(),
        RenderKind::Bullet => "• ".to_string(),
        RenderKind::Numbered { number } => format!("{number}. "),
        RenderKind::Paragraph | RenderKind::Code | RenderKind::Image { .. } => String::new(),
    }
}

fn block_lines(block: &RenderBlock, lines: &mut Vec<String>) {
    match &block.kind {
        RenderKind::Code => {
            lines.push("```".to_string());
            lines.extend(block.content.lines().map(str::to_string));
            lines.push("```".to_string());
        }
        RenderKind::Image { source } => {
            match source {
                ImageSource::Url(url) => lines.push(format!("[image: {url}]")),
                ImageSource::Placeholder => lines.push(IMAGE_PLACEHOLDER.to_string()),
                ImageSource::Missing => return,
            }
            if !block.content.is_empty() {
                lines.push(block.content.clone());
            }
        }
        kind => lines.push(format!("{}{}", prefix(kind), block.content)),
    }
}
