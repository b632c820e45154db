use ratatui::widgets::ListState;

pub const MAX_SUGGESTIONS: usize = 10;

/// Titles containing `input`, ignoring case, in catalog order, at most ten.
pub fn filter_titles(catalog: &[String], input: &str) -> Vec<String> {
    let needle = input.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// Dropdown under the search box.
#[derive(Debug, Default)]
pub struct Autocomplete {
    catalog: Vec<String>,
    suggestions: Vec<String>,
    pub visible: bool,
    pub list_state: ListState,
}

impl Autocomplete {
    pub fn set_catalog(&mut self, catalog: Vec<String>) {
        self.catalog = catalog;
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Re-filters after a keystroke; shows the dropdown only when something matched.
    pub fn update(&mut self, input: &str) {
        self.suggestions = filter_titles(&self.catalog, input);
        self.visible = !self.suggestions.is_empty();
        self.list_state.select(None);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.list_state.select(None);
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.hide();
    }

    pub fn highlighted(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.list_state
            .selected()
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }

    pub fn next(&mut self) {
        if !self.visible || self.suggestions.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.suggestions.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if !self.visible || self.suggestions.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.suggestions.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}
