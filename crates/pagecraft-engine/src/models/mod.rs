pub mod database;
pub mod page;
pub mod store;
pub mod workspace;

pub use database::{CellRef, Column, ColumnKind, Row, SelectOption, SortDirection, SortState, Table};
pub use page::{Page, PageHeader};
pub use store::{InMemoryPageStore, PageStore, PageView, public_note, resolve_page};
pub use workspace::{NavEntry, Route, Section, Workspace};
