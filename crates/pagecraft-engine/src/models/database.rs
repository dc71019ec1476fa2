use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    Text,
    Select,
    Date,
    Person,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub kind: ColumnKind,
}

/// A select choice and the badge colour it is shown with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    /// Cell values keyed by column id; absent and empty both mean "no value"
    pub cells: BTreeMap<String, String>,
}

impl Row {
    pub fn get(&self, column_id: &str) -> Option<&str> {
        self.cells
            .get(column_id)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Address of a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub row_id: String,
    pub column_id: String,
}

pub const DEFAULT_OPTION_COLOR: &str = "gray";

/// Spreadsheet-like table with typed columns, held entirely in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Choices for select columns, keyed by column id
    pub options: BTreeMap<String, Vec<SelectOption>>,
    /// Assignable people for person columns
    pub people: Vec<String>,
    sort: Option<SortState>,
    editing: Option<CellRef>,
}

impl Table {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            options: BTreeMap::new(),
            people: Vec::new(),
            sort: None,
            editing: None,
        }
    }

    pub fn with_options(mut self, column_id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        self.options.insert(column_id.into(), options);
        self
    }

    pub fn with_people(mut self, people: Vec<String>) -> Self {
        self.people = people;
        self
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn editing(&self) -> Option<&CellRef> {
        self.editing.as_ref()
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    /// Sort rows by `column_id`.
    ///
    /// Sorting the same column again flips the direction, a different column
    /// starts ascending. Rows without a value go last when ascending and first
    /// when descending. Unknown columns are ignored.
    pub fn sort_by(&mut self, column_id: &str) {
        if self.column(column_id).is_none() {
            log::debug!("sort on unknown column {column_id} ignored");
            return;
        }

        let direction = match &self.sort {
            Some(state) if state.column_id == column_id => state.direction.flip(),
            _ => SortDirection::Ascending,
        };

        self.rows.sort_by(|a, b| {
            let ordering = match (a.get(column_id), b.get(column_id)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        self.sort = Some(SortState {
            column_id: column_id.to_string(),
            direction,
        });
    }

    /// Append a row with an empty value in every column; returns its id
    pub fn add_row(&mut self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let cells = self
            .columns
            .iter()
            .map(|column| (column.id.clone(), String::new()))
            .collect();
        self.rows.push(Row {
            id: id.clone(),
            cells,
        });
        id
    }

    /// Set one cell; unknown rows or columns are ignored
    pub fn update_cell(&mut self, row_id: &str, column_id: &str, value: impl Into<String>) -> bool {
        if self.column(column_id).is_none() {
            return false;
        }
        match self.rows.iter_mut().find(|row| row.id == row_id) {
            Some(row) => {
                row.cells.insert(column_id.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    pub fn begin_edit(&mut self, cell: CellRef) {
        self.editing = Some(cell);
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    pub fn is_editing(&self, row_id: &str, column_id: &str) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|cell| cell.row_id == row_id && cell.column_id == column_id)
    }

    /// Badge colour for a select value, gray when unknown
    pub fn option_color(&self, column_id: &str, value: &str) -> &str {
        self.options
            .get(column_id)
            .and_then(|options| options.iter().find(|o| o.value == value))
            .map(|o| o.color.as_str())
            .unwrap_or(DEFAULT_OPTION_COLOR)
    }

    /// Choices offered when editing a cell of `column_id`
    pub fn choices(&self, column_id: &str) -> Vec<&str> {
        match self.column(column_id).map(|c| c.kind) {
            Some(ColumnKind::Select) => self
                .options
                .get(column_id)
                .map(|options| options.iter().map(|o| o.value.as_str()).collect())
                .unwrap_or_default(),
            Some(ColumnKind::Person) => self.people.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The seeded "Task Database" demo table
    pub fn task_database() -> Self {
        let column = |id: &str, title: &str, kind| Column {
            id: id.to_string(),
            title: title.to_string(),
            kind,
        };
        let option = |value: &str, color: &str| SelectOption {
            value: value.to_string(),
            color: color.to_string(),
        };
        let row = |id: &str, name: &str, status: &str, priority: &str, due: &str, who: &str| Row {
            id: id.to_string(),
            cells: [
                ("name", name),
                ("status", status),
                ("priority", priority),
                ("dueDate", due),
                ("assignee", who),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        };

        Table::new(
            vec![
                column("name", "Name", ColumnKind::Text),
                column("status", "Status", ColumnKind::Select),
                column("priority", "Priority", ColumnKind::Select),
                column("dueDate", "Due Date", ColumnKind::Date),
                column("assignee", "Assignee", ColumnKind::Person),
            ],
            vec![
                row("1", "Redesign homepage", "In Progress", "High", "2023-06-15", "Alex Turner"),
                row("2", "Fix navigation bug", "To Do", "Medium", "2023-06-20", "Jamie Smith"),
                row("3", "Update documentation", "Done", "Low", "2023-06-10", "Casey Jones"),
                row("4", "Implement new feature", "In Progress", "High", "2023-06-25", "Alex Turner"),
                row("5", "Review pull requests", "To Do", "Medium", "2023-06-18", "Jamie Smith"),
            ],
        )
        .with_options(
            "status",
            vec![
                option("To Do", "gray"),
                option("In Progress", "blue"),
                option("Done", "green"),
            ],
        )
        .with_options(
            "priority",
            vec![
                option("Low", "gray"),
                option("Medium", "yellow"),
                option("High", "red"),
            ],
        )
        .with_people(vec![
            "Alex Turner".to_string(),
            "Jamie Smith".to_string(),
            "Casey Jones".to_string(),
        ])
    }
}
