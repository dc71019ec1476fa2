use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::editing::{ImageSource, RenderBlock, RenderKind, Snapshot};

/// Render a snapshot as an HTML fragment, one element per block.
///
/// Block content is always escaped; it is plain text and never interpreted
/// as markup. Editable snapshots mark text elements `contenteditable`.
pub fn to_html(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for block in &snapshot.blocks {
        out.push_str(&render_block(block));
        out.push('\n');
    }
    out
}

/// Standalone public page: header with emoji, title and subtitle followed by the blocks
pub fn to_page_html(emoji: &str, title: &str, subtitle: &str, snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str("<article class=\"page\">\n<header>");
    if !emoji.is_empty() {
        out.push_str(&format!("<span class=\"emoji\">{}</span>", encode_text(emoji)));
    }
    out.push_str(&format!(
        "<h1>{}</h1><span class=\"subtitle\">{}</span></header>\n",
        encode_text(title),
        encode_text(subtitle)
    ));
    out.push_str(&to_html(snapshot));
    out.push_str("</article>\n");
    out
}

fn render_block(block: &RenderBlock) -> String {
    let id = encode_double_quoted_attribute(block.id.as_str());
    let editable = if block.editable {
        " contenteditable=\"true\""
    } else {
        ""
    };
    let text = encode_text(&block.content);

    match &block.kind {
        RenderKind::Paragraph => format!("<p id=\"block-{id}\"{editable}>{text}</p>"),
        RenderKind::Heading { level } => {
            let n = level.get();
            format!("<h{n} id=\"block-{id}\"{editable}>{text}</h{n}>")
        }
        RenderKind::Todo { checked } => {
            let checked_attr = if *checked { " checked" } else { "" };
            let disabled = if block.editable { "" } else { " disabled" };
            let class = if *checked { " class=\"done\"" } else { "" };
            format!(
                "<div class=\"todo\"><input type=\"checkbox\"{checked_attr}{disabled}>\
                 <span id=\"block-{id}\"{class}{editable}>{text}</span></div>"
            )
        }
        RenderKind::Bullet => format!(
            "<div class=\"bullet\"><span class=\"marker\">•</span>\
             <span id=\"block-{id}\"{editable}>{text}</span></div>"
        ),
        RenderKind::Numbered { number } => format!(
            "<div class=\"numbered\"><span class=\"marker\">{number}.</span>\
             <span id=\"block-{id}\"{editable}>{text}</span></div>"
        ),
        RenderKind::Code => {
            format!("<pre id=\"block-{id}\"{editable}><code>{text}</code></pre>")
        }
        RenderKind::Image { source } => render_image(block, source),
    }
}

fn render_image(block: &RenderBlock, source: &ImageSource) -> String {
    let id = encode_double_quoted_attribute(block.id.as_str());
    match source {
        ImageSource::Url(url) => {
            let alt = if block.content.is_empty() {
                "Image"
            } else {
                block.content.as_str()
            };
            let mut out = format!(
                "<figure id=\"block-{id}\"><img src=\"{}\" alt=\"{}\">",
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(alt)
            );
            if !block.content.is_empty() {
                out.push_str(&format!(
                    "<figcaption>{}</figcaption>",
                    encode_text(&block.content)
                ));
            }
            out.push_str("</figure>");
            out
        }
        ImageSource::Placeholder => format!(
            "<div id=\"block-{id}\" class=\"image-placeholder\">Click to add an image</div>"
        ),
        ImageSource::Missing => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Block, BlockType, BlockUpdate, Cmd, Editor, HeadingLevel};

    #[test]
    fn test_content_is_escaped() {
        let editor = Editor::read_only(vec![Block::paragraph("1", "<b>bold</b> & co")]);
        insta::assert_snapshot!(
            to_html(&editor.snapshot()).trim_end(),
            @"<p id=\"block-1\">&lt;b&gt;bold&lt;/b&gt; &amp; co</p>"
        );
    }

    #[test]
    fn test_editable_heading() {
        let editor = Editor::new(vec![Block::heading("1", HeadingLevel::H2, "Goals")]);
        insta::assert_snapshot!(
            to_html(&editor.snapshot()).trim_end(),
            @"<h2 id=\"block-1\" contenteditable=\"true\">Goals</h2>"
        );
    }

    #[test]
    fn test_read_only_todo_is_disabled() {
        let editor = Editor::read_only(vec![Block::todo("4", true, "Launch")]);
        let html = to_html(&editor.snapshot());
        assert!(html.contains("checked disabled"));
        assert!(html.contains("class=\"done\""));
        assert!(!html.contains("contenteditable"));
    }

    #[test]
    fn test_image_with_caption() {
        let mut editor = Editor::new(vec![Block::with_id("1", BlockType::Image)]);
        editor.apply(Cmd::update(
            "1",
            BlockUpdate::url("https://example.com/a.png?x=1&y=\"2\"").with_content("A cat"),
        ));
        let html = to_html(&editor.snapshot());
        assert!(html.contains("src=\"https://example.com/a.png?x=1&amp;y=&quot;2&quot;\""));
        assert!(html.contains("<figcaption>A cat</figcaption>"));
    }

    #[test]
    fn test_read_only_image_without_url_renders_nothing() {
        let editor = Editor::read_only(vec![Block::with_id("1", BlockType::Image)]);
        assert_eq!(to_html(&editor.snapshot()), "\n");
    }

    #[test]
    fn test_page_wrapper() {
        let editor = Editor::read_only(vec![Block::paragraph("1", "hi")]);
        let html = to_page_html("📝", "Notes & Ideas", "Shared via public link", &editor.snapshot());
        assert!(html.starts_with("<article class=\"page\">"));
        assert!(html.contains("<h1>Notes &amp; Ideas</h1>"));
        assert!(html.ends_with("</article>\n"));
    }

    #[test]
    fn test_every_block_kind_renders_one_line() {
        let editor = Editor::new(vec![
            Block::list("1", "milk"),
            Block::with_id("2", BlockType::OrderedList).with_content("first"),
            Block::with_id("3", BlockType::Code).with_content("let x = 1;"),
            Block::with_id("4", BlockType::Image),
        ]);
        insta::assert_snapshot!(
            to_html(&editor.snapshot()).trim_end(),
            @r#"
        <div class="bullet"><span class="marker">•</span><span id="block-1" contenteditable="true">milk</span></div>
        <div class="numbered"><span class="marker">2.</span><span id="block-2" contenteditable="true">first</span></div>
        <pre id="block-3" contenteditable="true"><code>let x = 1;</code></pre>
        <div id="block-4" class="image-placeholder">Click to add an image</div>
        "#
        );
    }
}
