use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pagecraft_engine::editing::{
    Block, BlockKind, BlockType, BlockUpdate, Cmd, Editor, HeadingLevel, Patch,
};
use pagecraft_engine::{
    CellRef, ColumnKind, InMemoryPageStore, PageHeader, PageView, PublicLink, Route,
    ShareTarget, Table, Workspace, public_note, resolve_page, share_url,
};
use ratatui::widgets::ListState;

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Field of an image block that typed text goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Caption,
    Url,
}

/// What the content pane shows
pub enum View {
    Page {
        route: Route,
        header: PageHeader,
        editor: Editor,
    },
    Database {
        table: Table,
        row: usize,
        column: usize,
    },
    NotFound(String),
}

pub struct App {
    pub store: InMemoryPageStore,
    pub workspace: Workspace,
    pub nav_state: ListState,
    pub view: View,
    pub focus: Focus,
    pub image_field: ImageField,
    pub status: Option<String>,
    /// Title being typed while renaming the open page
    pub title_edit: Option<String>,
    read_only: bool,
    public_base_url: String,
}

impl App {
    pub fn new(store: InMemoryPageStore, read_only: bool, public_base_url: String) -> Self {
        let workspace = Workspace::from_store(&store);
        let mut app = Self {
            store,
            workspace,
            nav_state: ListState::default(),
            view: View::NotFound(String::new()),
            focus: Focus::Sidebar,
            image_field: ImageField::Caption,
            status: None,
            title_edit: None,
            read_only,
            public_base_url,
        };
        app.open(Route::Home);
        app
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Replace the content pane with whatever `route` leads to
    pub fn open(&mut self, route: Route) {
        self.status = None;
        self.title_edit = None;
        self.image_field = ImageField::Caption;
        self.nav_state.select(self.workspace.position(&route));

        self.view = match route {
            Route::Home => {
                let page = InMemoryPageStore::home();
                View::Page {
                    route: Route::Home,
                    header: page.header(),
                    editor: page.editor(self.read_only),
                }
            }
            Route::Database => View::Database {
                table: Table::task_database(),
                row: 0,
                column: 0,
            },
            Route::Page(id) => match resolve_page(&self.store, &id, self.read_only) {
                PageView::Found { page, editor } => View::Page {
                    route: Route::Page(id),
                    header: page.header(),
                    editor,
                },
                PageView::NotFound { id } => View::NotFound(id),
            },
            Route::Public(id) => {
                let page = public_note(&id);
                View::Page {
                    route: Route::Public(id),
                    header: page.header(),
                    editor: page.editor(true),
                }
            }
            Route::NotFound => View::NotFound(String::new()),
        };
    }

    /// Handle one key press; returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Content => {
                self.handle_content_key(key);
                false
            }
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) -> bool {
        let len = self.workspace.entries().len();
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.nav_state.selected().map_or(0, |i| (i + 1) % len);
                self.nav_state.select(Some(i));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let i = match self.nav_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.nav_state.select(Some(i));
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                if let Some(entry) = self
                    .nav_state
                    .selected()
                    .and_then(|i| self.workspace.entries().get(i))
                {
                    let route = entry.route.clone();
                    self.open(route);
                }
                self.focus = Focus::Content;
                self.focus_first_block();
            }
            _ => {}
        }
        false
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc && self.title_edit.take().is_some() {
            return;
        }
        if key.code == KeyCode::Esc {
            if let View::Page { editor, .. } = &mut self.view {
                editor.apply(Cmd::SetActiveBlock(None));
            }
            if let View::Database { table, .. } = &mut self.view {
                table.end_edit();
            }
            self.focus = Focus::Sidebar;
            return;
        }

        match &self.view {
            View::Page { .. } => self.handle_editor_key(key),
            View::Database { .. } => self.handle_table_key(key),
            View::NotFound(_) => {}
        }
    }

    fn focus_first_block(&mut self) {
        if let View::Page { editor, .. } = &mut self.view
            && let Some(first) = editor.document().get(0)
        {
            let id = first.id.clone();
            editor.apply(Cmd::SetActiveBlock(Some(id)));
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let View::Page { editor, header, .. } = &mut self.view else {
            return;
        };

        if let Some(title) = &mut self.title_edit {
            match key.code {
                KeyCode::Enter => {
                    header.rename(title.trim());
                    self.status = Some(format!("Renamed to {}", header.display_title()));
                    self.title_edit = None;
                }
                KeyCode::Backspace => {
                    title.pop();
                }
                KeyCode::Char(c) if !ctrl => title.push(c),
                _ => {}
            }
            return;
        }

        if ctrl && key.code == KeyCode::Char('r') && !editor.is_read_only() {
            self.title_edit = Some(header.title.clone());
            return;
        }

        // Header actions work in read-only views too
        if ctrl {
            match key.code {
                KeyCode::Char('f') => {
                    let starred = header.toggle_favorite();
                    let message = if starred {
                        "Added to favorites"
                    } else {
                        "Removed from favorites"
                    };
                    self.status = Some(message.to_string());
                    return;
                }
                KeyCode::Char('s') => {
                    self.status = Some(share_summary(header, &self.public_base_url));
                    return;
                }
                _ => {}
            }
        }

        let Some(index) = editor.active_index() else {
            if matches!(key.code, KeyCode::Down | KeyCode::Up) {
                // Nothing focused yet; start at the top
                if let Some(first) = editor.document().get(0) {
                    let id = first.id.clone();
                    editor.apply(Cmd::SetActiveBlock(Some(id)));
                }
            }
            return;
        };
        let Some(block) = editor.document().get(index).cloned() else {
            return;
        };

        let patch = match key.code {
            KeyCode::Up => move_focus(editor, index.checked_sub(1)),
            KeyCode::Down => move_focus(editor, Some(index + 1)),
            KeyCode::Enter if !key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.image_field = ImageField::Caption;
                Some(editor.apply(Cmd::EnterKey { index }))
            }
            KeyCode::Enter => Some(append_text(editor, &block, self.image_field, "\n")),
            KeyCode::Tab if matches!(block.kind, BlockKind::Image { .. }) => {
                self.image_field = match self.image_field {
                    ImageField::Caption => ImageField::Url,
                    ImageField::Url => ImageField::Caption,
                };
                None
            }
            KeyCode::Backspace => {
                let field = field_text(&block, self.image_field);
                if field.is_empty() && self.image_field == ImageField::Caption {
                    Some(editor.apply(Cmd::BackspaceOnEmpty { index }))
                } else {
                    let mut text = field.to_string();
                    text.pop();
                    Some(set_text(editor, &block, self.image_field, text))
                }
            }
            KeyCode::Char('t') if ctrl => Some(editor.apply(Cmd::update(
                block.id.clone(),
                BlockUpdate::retype(block.block_type().next()),
            ))),
            KeyCode::Char('l') if ctrl => match block.kind {
                BlockKind::Heading { level } => {
                    let next = HeadingLevel::new(level.get() % 3 + 1).unwrap_or_default();
                    Some(editor.apply(Cmd::update(
                        block.id.clone(),
                        BlockUpdate::heading(next),
                    )))
                }
                _ => None,
            },
            KeyCode::Char('x') if ctrl => match block.kind {
                BlockKind::Todo { checked } => Some(editor.apply(Cmd::update(
                    block.id.clone(),
                    BlockUpdate::checked(!checked),
                ))),
                _ => None,
            },
            KeyCode::Char(c) if !ctrl => {
                Some(append_text(editor, &block, self.image_field, &c.to_string()))
            }
            _ => None,
        };

        if let Some(patch) = patch
            && patch.active_block.as_ref() != Some(&block.id)
        {
            self.image_field = ImageField::Caption;
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let View::Database { table, row, column } = &mut self.view else {
            return;
        };
        let row_count = table.rows.len();
        let column_count = table.columns.len();

        if let Some(cell) = table.editing().cloned() {
            match key.code {
                KeyCode::Enter => table.end_edit(),
                KeyCode::Backspace => {
                    let mut value = cell_value(table, &cell);
                    value.pop();
                    table.update_cell(&cell.row_id, &cell.column_id, value);
                }
                KeyCode::Char(c) => {
                    let mut value = cell_value(table, &cell);
                    value.push(c);
                    table.update_cell(&cell.row_id, &cell.column_id, value);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') if row_count > 0 => *row = (*row + 1) % row_count,
            KeyCode::Up | KeyCode::Char('k') if row_count > 0 => {
                *row = (*row + row_count - 1) % row_count
            }
            KeyCode::Right | KeyCode::Char('l') => *column = (*column + 1) % column_count,
            KeyCode::Left | KeyCode::Char('h') => {
                *column = (*column + column_count - 1) % column_count
            }
            KeyCode::Char('s') => {
                let column_id = table.columns[*column].id.clone();
                table.sort_by(&column_id);
            }
            KeyCode::Char('n') => {
                table.add_row();
                *row = table.rows.len() - 1;
            }
            KeyCode::Enter => {
                let Some(row_id) = table.rows.get(*row).map(|r| r.id.clone()) else {
                    return;
                };
                let (column_id, kind) = {
                    let target = &table.columns[*column];
                    (target.id.clone(), target.kind)
                };
                match kind {
                    ColumnKind::Select | ColumnKind::Person => {
                        let current = table
                            .row(&row_id)
                            .and_then(|r| r.get(&column_id))
                            .unwrap_or_default()
                            .to_string();
                        let next = next_choice(&table.choices(&column_id), &current);
                        table.update_cell(&row_id, &column_id, next);
                    }
                    ColumnKind::Text | ColumnKind::Date => table.begin_edit(CellRef {
                        row_id,
                        column_id,
                    }),
                }
            }
            _ => {}
        }
    }
}

fn move_focus(editor: &mut Editor, index: Option<usize>) -> Option<Patch> {
    let id = editor.document().get(index?)?.id.clone();
    Some(editor.apply(Cmd::SetActiveBlock(Some(id))))
}

fn field_text(block: &Block, field: ImageField) -> &str {
    match (&block.kind, field) {
        (BlockKind::Image { url }, ImageField::Url) => url.as_deref().unwrap_or_default(),
        _ => &block.content,
    }
}

fn set_text(editor: &mut Editor, block: &Block, field: ImageField, text: String) -> Patch {
    let update = match (&block.kind, field) {
        (BlockKind::Image { .. }, ImageField::Url) => BlockUpdate::url(text),
        _ => BlockUpdate::content(text),
    };
    editor.apply(Cmd::update(block.id.clone(), update))
}

fn append_text(editor: &mut Editor, block: &Block, field: ImageField, extra: &str) -> Patch {
    let text = format!("{}{extra}", field_text(block, field));
    set_text(editor, block, field, text)
}

fn cell_value(table: &Table, cell: &CellRef) -> String {
    table
        .row(&cell.row_id)
        .and_then(|r| r.cells.get(&cell.column_id))
        .cloned()
        .unwrap_or_default()
}

fn next_choice(choices: &[&str], current: &str) -> String {
    match choices.iter().position(|c| *c == current) {
        Some(i) => choices[(i + 1) % choices.len()].to_string(),
        None => choices.first().map(|c| c.to_string()).unwrap_or_default(),
    }
}

/// Status line listing a fresh public link and the social share urls
pub fn share_summary(header: &PageHeader, public_base_url: &str) -> String {
    let link = PublicLink::generate(public_base_url);
    let mut parts = vec![format!("Public link: {}", link.url)];
    parts.extend(ShareTarget::ALL.iter().map(|target| {
        format!(
            "{}: {}",
            target.label(),
            share_url(*target, header.display_title(), &link.url)
        )
    }));
    parts.join("\n")
}

/// Type shown in the editor footer for the focused block
pub fn active_block_type(editor: &Editor) -> Option<BlockType> {
    editor
        .active_index()
        .and_then(|i| editor.document().get(i))
        .map(Block::block_type)
}
