/// Default lookback window, in days, for the article query.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Current query constraints. Empty strings mean "no filter" to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub category: String,
    pub source: String,
    pub window_days: u32,
    default_window_days: u32,
}

impl FilterState {
    pub fn new(default_window_days: u32) -> Self {
        Self {
            search_text: String::new(),
            category: String::new(),
            source: String::new(),
            window_days: default_window_days,
            default_window_days,
        }
    }

    /// Restore every filter to its default.
    pub fn reset(&mut self) {
        *self = Self::new(self.default_window_days);
    }

    /// Query parameters for `/api/articles`. All four keys are always present.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("q", self.search_text.clone()),
            ("category", self.category.clone()),
            ("source", self.source.clone()),
            ("days", self.window_days.to_string()),
        ]
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

/// One entry of a category or source selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn category(value: impl Into<String>) -> Self {
        let value = value.into();
        let label = capitalize_first(&value);
        Self { value, label }
    }

    pub fn source(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Step through `["" (All), options...]` starting from `current`.
///
/// An unknown `current` is treated as "All".
pub fn cycle_option(options: &[FilterOption], current: &str, forward: bool) -> String {
    let values: Vec<&str> = std::iter::once("")
        .chain(options.iter().map(|o| o.value.as_str()))
        .collect();
    let pos = values.iter().position(|v| *v == current).unwrap_or(0);
    let len = values.len();
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    values[next].to_string()
}

/// Step through the configured time windows. An unknown `current` restarts at the first option.
pub fn cycle_window(options: &[u32], current: u32, forward: bool) -> u32 {
    if options.is_empty() {
        return current;
    }
    let len = options.len();
    match options.iter().position(|d| *d == current) {
        Some(pos) => match forward {
            true => options[(pos + 1) % len],
            false => options[(pos + len - 1) % len],
        },
        None => options[0],
    }
}

/// Display label for a selector value.
pub fn option_label<'a>(options: &'a [FilterOption], value: &str) -> &'a str {
    match value.is_empty() {
        true => "All",
        false => options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or("All"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_with_seven_days() {
        let filters = FilterState::default();
        assert!(filters.search_text.is_empty());
        assert!(filters.category.is_empty());
        assert!(filters.source.is_empty());
        assert_eq!(filters.window_days, 7);
    }

    #[test]
    fn reset_restores_configured_default() {
        let mut filters = FilterState::new(3);
        filters.search_text = "rust".to_string();
        filters.category = "technology".to_string();
        filters.source = "BBC News".to_string();
        filters.window_days = 30;

        filters.reset();
        assert_eq!(filters, FilterState::new(3));
    }

    #[test]
    fn query_pairs_keep_empty_values() {
        let mut filters = FilterState::default();
        filters.search_text = "climate".to_string();
        let pairs = filters.query_pairs();
        assert_eq!(pairs[0], ("q", "climate".to_string()));
        assert_eq!(pairs[1], ("category", String::new()));
        assert_eq!(pairs[2], ("source", String::new()));
        assert_eq!(pairs[3], ("days", "7".to_string()));
    }

    #[test]
    fn category_labels_are_capitalized() {
        assert_eq!(FilterOption::category("technology").label, "Technology");
        assert_eq!(FilterOption::category("technology").value, "technology");
        assert_eq!(FilterOption::category("").label, "");
        assert_eq!(FilterOption::source("bbc-news").label, "bbc-news");
    }

    #[test]
    fn cycling_wraps_through_all() {
        let options = vec![FilterOption::category("business"), FilterOption::category("science")];
        assert_eq!(cycle_option(&options, "", true), "business");
        assert_eq!(cycle_option(&options, "business", true), "science");
        assert_eq!(cycle_option(&options, "science", true), "");
        assert_eq!(cycle_option(&options, "", false), "science");
        assert_eq!(cycle_option(&options, "gone", true), "business");
        assert_eq!(cycle_option(&[], "", true), "");
    }

    #[test]
    fn window_cycling() {
        let windows = [1, 7, 30];
        assert_eq!(cycle_window(&windows, 7, true), 30);
        assert_eq!(cycle_window(&windows, 30, true), 1);
        assert_eq!(cycle_window(&windows, 1, false), 30);
        assert_eq!(cycle_window(&windows, 14, true), 1);
        assert_eq!(cycle_window(&[], 14, true), 14);
    }

    #[test]
    fn labels_fall_back_to_all() {
        let options = vec![FilterOption::category("health")];
        assert_eq!(option_label(&options, ""), "All");
        assert_eq!(option_label(&options, "health"), "Health");
        assert_eq!(option_label(&options, "sports"), "All");
    }
}
