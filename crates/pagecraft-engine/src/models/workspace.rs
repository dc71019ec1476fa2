use crate::models::store::PageStore;

pub const HOME_ROUTE: &str = "/workspace";
pub const DATABASE_ROUTE: &str = "/workspace/database";
pub const PUBLIC_PREFIX: &str = "/public/";

/// Where a route string leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Database,
    Page(String),
    Public(String),
    NotFound,
}

impl Route {
    pub fn parse(route: &str) -> Self {
        let route = route.trim_end_matches('/');
        if route == HOME_ROUTE {
            return Route::Home;
        }
        if route == DATABASE_ROUTE {
            return Route::Database;
        }
        if let Some(id) = route.strip_prefix(PUBLIC_PREFIX)
            && is_segment(id)
        {
            return Route::Public(id.to_string());
        }
        if let Some(id) = route.strip_prefix("/workspace/")
            && is_segment(id)
        {
            return Route::Page(id.to_string());
        }
        Route::NotFound
    }

    pub fn path(&self) -> Option<String> {
        match self {
            Route::Home => Some(HOME_ROUTE.to_string()),
            Route::Database => Some(DATABASE_ROUTE.to_string()),
            Route::Page(id) => Some(format!("{HOME_ROUTE}/{id}")),
            Route::Public(id) => Some(format!("{PUBLIC_PREFIX}{id}")),
            Route::NotFound => None,
        }
    }
}

fn is_segment(s: &str) -> bool {
    !s.is_empty() && !s.contains('/')
}

/// Sidebar section an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Workspace,
    Pages,
}

/// One sidebar link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub section: Section,
    pub label: String,
    pub emoji: String,
    pub route: Route,
}

/// Static sidebar navigation built from a page store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    entries: Vec<NavEntry>,
}

impl Workspace {
    pub fn from_store(store: &impl PageStore) -> Self {
        let mut entries = vec![
            NavEntry {
                section: Section::Workspace,
                label: "Getting Started".to_string(),
                emoji: "👋".to_string(),
                route: Route::Home,
            },
            NavEntry {
                section: Section::Workspace,
                label: "Task Database".to_string(),
                emoji: "📊".to_string(),
                route: Route::Database,
            },
        ];
        entries.extend(store.pages().iter().map(|page| NavEntry {
            section: Section::Pages,
            label: page.title.clone(),
            emoji: page.emoji.clone(),
            route: Route::Page(page.id.clone()),
        }));
        Self { entries }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Index of the entry for `route`, used to highlight the current location
    pub fn position(&self, route: &Route) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.route == route)
    }
}
