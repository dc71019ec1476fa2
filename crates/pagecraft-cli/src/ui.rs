use pagecraft_engine::editing::{ImageSource, RenderBlock, RenderKind, Snapshot};
use pagecraft_engine::models::workspace::Section;
use pagecraft_engine::render::text::{IMAGE_PLACEHOLDER, prefix};
use pagecraft_engine::{ColumnKind, PageHeader, PageView, Table};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table as TableWidget, Wrap},
};

use crate::app::{App, Focus, ImageField, View, active_block_type};

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
        .split(rows[0]);

    render_sidebar(f, app, chunks[0]);

    match &app.view {
        View::Page {
            route,
            header,
            editor,
        } => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)].as_ref())
                .split(chunks[1]);
            render_header(
                f,
                header,
                app.title_edit.as_deref(),
                editor.is_read_only(),
                content[0],
            );

            let snapshot = editor.snapshot();
            let mut lines = page_lines(&snapshot, app.image_field);
            if let Some(block_type) = active_block_type(editor) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("-- {block_type} --"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            let title = route.path().unwrap_or_default();
            let body = Paragraph::new(lines)
                .block(bordered(&title, app.focus == Focus::Content))
                .wrap(Wrap { trim: false });
            f.render_widget(body, content[1]);
        }
        View::Database { table, row, column } => {
            render_table(f, table, *row, *column, app.focus == Focus::Content, chunks[1]);
        }
        View::NotFound(_) => {
            let message = Paragraph::new(PageView::NOT_FOUND_MESSAGE)
                .block(bordered("Content", app.focus == Focus::Content));
            f.render_widget(message, chunks[1]);
        }
    }

    let footer = match &app.status {
        Some(status) => status.lines().next().unwrap_or_default().to_string(),
        None => help_text(app).to_string(),
    };
    f.render_widget(Paragraph::new(footer), rows[1]);

    if let Some(status) = &app.status
        && status.lines().count() > 1
    {
        render_popup(f, status, chunks[1]);
    }
}

fn bordered(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn render_sidebar(f: &mut Frame, app: &mut App, area: Rect) {
    let mut previous = None;
    let items: Vec<ListItem> = app
        .workspace
        .entries()
        .iter()
        .map(|entry| {
            let mut lines = Vec::new();
            if previous != Some(entry.section) && entry.section == Section::Pages {
                lines.push(Line::from(Span::styled(
                    "Pages",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            previous = Some(entry.section);
            lines.push(Line::from(format!("{} {}", entry.emoji, entry.label)));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(bordered("Workspace", app.focus == Focus::Sidebar))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.nav_state);
}

fn render_header(
    f: &mut Frame,
    header: &PageHeader,
    title_edit: Option<&str>,
    read_only: bool,
    area: Rect,
) {
    let title = match title_edit {
        Some(title) => Span::styled(
            format!("{title}▏"),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        None => Span::styled(
            header.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    };
    let star = if header.favorite { " ★" } else { "" };
    let mode = if read_only { "  [read-only]" } else { "" };
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", header.emoji)),
            title,
            Span::styled(star, Style::default().fg(Color::Yellow)),
            Span::styled(mode, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            header.last_edited.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Styled lines for every block in a page snapshot
pub fn page_lines(snapshot: &Snapshot, image_field: ImageField) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in &snapshot.blocks {
        block_lines(block, image_field, &mut lines);
    }
    lines
}

fn block_lines(block: &RenderBlock, image_field: ImageField, lines: &mut Vec<Line<'static>>) {
    let mut style = match &block.kind {
        RenderKind::Heading { level } => {
            let color = match level.get() {
                1 => Color::Cyan,
                2 => Color::LightBlue,
                _ => Color::Blue,
            };
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        }
        RenderKind::Todo { checked: true } => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        RenderKind::Code => Style::default().fg(Color::Green).bg(Color::Black),
        _ => Style::default(),
    };
    if block.is_active {
        style = style.add_modifier(Modifier::REVERSED);
    }

    match &block.kind {
        RenderKind::Code => {
            let code: Vec<&str> = if block.content.is_empty() {
                vec![""]
            } else {
                block.content.lines().collect()
            };
            lines.extend(
                code.into_iter()
                    .map(|line| Line::from(Span::styled(format!("  {line}"), style))),
            );
        }
        RenderKind::Image { source } => {
            let image = match source {
                ImageSource::Url(url) => format!("🖼  {url}"),
                ImageSource::Placeholder => IMAGE_PLACEHOLDER.to_string(),
                ImageSource::Missing => return,
            };
            lines.push(Line::from(Span::styled(image, style)));
            if !block.content.is_empty() {
                lines.push(Line::from(Span::styled(
                    block.content.clone(),
                    Style::default().add_modifier(Modifier::ITALIC),
                )));
            }
            if block.shows_image_inputs() {
                let marker = |field| if image_field == field { "▸" } else { " " };
                let url = match source {
                    ImageSource::Url(url) => url.as_str(),
                    _ => "",
                };
                lines.push(Line::from(format!("{} url: {url}", marker(ImageField::Url))));
                lines.push(Line::from(format!(
                    "{} caption: {}",
                    marker(ImageField::Caption),
                    block.content
                )));
            }
        }
        kind => {
            let marker = prefix(kind);
            let marker_style = match kind {
                RenderKind::Todo { checked: true } => Style::default().fg(Color::Green),
                _ => Style::default().fg(Color::DarkGray),
            };
            lines.push(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled(block.content.clone(), style),
            ]));
        }
    }
}

fn render_table(f: &mut Frame, table: &Table, row: usize, column: usize, focused: bool, area: Rect) {
    let header = Row::new(table.columns.iter().map(|c| {
        let arrow = match table.sort() {
            Some(state) if state.column_id == c.id => match state.direction {
                pagecraft_engine::SortDirection::Ascending => " ↑",
                pagecraft_engine::SortDirection::Descending => " ↓",
            },
            _ => "",
        };
        Cell::from(format!("{}{arrow}", c.title))
    }))
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = table.rows.iter().enumerate().map(|(r, data)| {
        Row::new(table.columns.iter().enumerate().map(|(c, col)| {
            let value = data.get(&col.id).unwrap_or_default();
            let mut style = match col.kind {
                ColumnKind::Select if !value.is_empty() => {
                    Style::default().fg(badge_color(table.option_color(&col.id, value)))
                }
                _ => Style::default(),
            };
            let text = if table.is_editing(&data.id, &col.id) {
                style = style.add_modifier(Modifier::UNDERLINED);
                format!("{value}▏")
            } else if col.kind == ColumnKind::Person && value.is_empty() {
                "Assign to...".to_string()
            } else {
                value.to_string()
            };
            if focused && r == row && c == column {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Cell::from(text).style(style)
        }))
    });

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(16),
        Constraint::Percentage(14),
        Constraint::Percentage(16),
        Constraint::Percentage(24),
    ];
    let widget = TableWidget::new(rows, widths)
        .header(header)
        .block(bordered("📊 Task Database", focused));
    f.render_widget(widget, area);
}

fn badge_color(name: &str) -> Color {
    match name {
        "blue" => Color::Blue,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        _ => Color::Gray,
    }
}

fn render_popup(f: &mut Frame, status: &str, area: Rect) {
    let height = (status.lines().count() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(height + 1),
        width: area.width.saturating_sub(2),
        height,
    };
    let lines: Vec<Line> = status.lines().map(|l| Line::from(l.to_string())).collect();
    f.render_widget(ratatui::widgets::Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Share"))
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn help_text(app: &App) -> &'static str {
    match (app.focus, &app.view) {
        (Focus::Sidebar, _) => "q: Quit | ↑/k ↓/j: Move | Enter/→: Open",
        (Focus::Content, View::Database { .. }) => {
            "Esc: Back | ←→↑↓: Move | Enter: Edit/Cycle | s: Sort | n: New row"
        }
        (Focus::Content, View::Page { .. }) if app.title_edit.is_some() => {
            "Enter: Save title | Esc: Cancel"
        }
        (Focus::Content, View::Page { editor, .. }) if editor.is_read_only() => {
            "Esc: Back | ^F: Favorite | ^S: Share"
        }
        (Focus::Content, _) => {
            "Esc: Back | Enter: New block | ^R: Rename | ^T: Type | ^L: Level | ^X: Check | Tab: Url | ^F: Favorite | ^S: Share"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_engine::editing::{Block, BlockType, Cmd, Editor};
    use pretty_assertions::assert_eq;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_page_lines_markers() {
        let editor = Editor::read_only(vec![
            Block::todo("1", true, "done"),
            Block::with_id("2", BlockType::OrderedList).with_content("two"),
        ]);
        let lines = page_lines(&editor.snapshot(), ImageField::Caption);
        let text: Vec<_> = lines.iter().map(plain).collect();
        assert_eq!(text, vec!["[x] done", "2. two"]);
    }

    #[test]
    fn test_active_image_shows_inputs() {
        let mut editor = Editor::new(vec![Block::with_id("1", BlockType::Image)]);
        editor.apply(Cmd::focus("1"));
        let lines = page_lines(&editor.snapshot(), ImageField::Url);
        let text: Vec<_> = lines.iter().map(plain).collect();
        assert_eq!(text, vec![IMAGE_PLACEHOLDER, "▸ url: ", "  caption: "]);
    }
}
