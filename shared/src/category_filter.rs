use crate::embedded::CategoryOption;

/// Keeps the category select in sync with the chosen transaction type
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFilter {
    categories: Vec<CategoryOption>,
    /// Selection rendered by the server, restored once when it becomes available
    initial_selection: Option<String>,
}

/// Options to render and the value to select afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    pub options: Vec<&'a CategoryOption>,
    pub selected: Option<String>,
}

impl CategoryFilter {
    pub fn new(categories: Vec<CategoryOption>, initial_selection: Option<&str>) -> Self {
        Self {
            categories,
            initial_selection: initial_selection.filter(|value| !value.is_empty()).map(str::to_string),
        }
    }

    pub fn categories(&self) -> &[CategoryOption] {
        &self.categories
    }

    /// Categories for `transaction_type` (all of them when it is empty).
    ///
    /// `current` survives when still listed; otherwise the initial selection is
    /// restored and consumed.
    pub fn apply(&mut self, transaction_type: &str, current: &str) -> FilterOutcome<'_> {
        let visible: Vec<&CategoryOption> = self
            .categories
            .iter()
            .filter(|category| transaction_type.is_empty() || category.kind == transaction_type)
            .collect();

        let listed = |id: &str| visible.iter().any(|category| category.id == id);
        let selected = if !current.is_empty() && listed(current) {
            Some(current.to_string())
        } else {
            match self.initial_selection.as_deref() {
                Some(initial) if listed(initial) => {
                    let initial = initial.to_string();
                    self.initial_selection = None;
                    Some(initial)
                }
                _ => None,
            }
        };

        FilterOutcome {
            options: visible,
            selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str, kind: &str) -> CategoryOption {
        CategoryOption {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            color: None,
        }
    }

    fn sample() -> Vec<CategoryOption> {
        vec![
            category("1", "Salário", "income"),
            category("2", "Mercado", "expense"),
            category("3", "Aluguel", "expense"),
        ]
    }

    fn ids(outcome: &FilterOutcome<'_>) -> Vec<String> {
        outcome.options.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_filters_by_type() {
        let mut filter = CategoryFilter::new(sample(), None);
        let outcome = filter.apply("expense", "");
        assert_eq!(ids(&outcome), vec!["2", "3"]);
        assert_eq!(outcome.selected, None);

        let all = filter.apply("", "");
        assert_eq!(all.options.len(), 3);
    }

    #[test]
    fn test_keeps_current_selection_when_available() {
        let mut filter = CategoryFilter::new(sample(), None);
        assert_eq!(filter.apply("expense", "3").selected.as_deref(), Some("3"));
        assert_eq!(filter.apply("income", "3").selected, None);
    }

    #[test]
    fn test_restores_initial_selection_once() {
        let mut filter = CategoryFilter::new(sample(), Some("2"));
        // server rendered the form with type "income" but category 2 selected
        assert_eq!(filter.apply("income", "2").selected, None);
        assert_eq!(filter.apply("expense", "").selected.as_deref(), Some("2"));
        // consumed
        assert_eq!(filter.apply("income", "").selected, None);
        assert_eq!(filter.apply("expense", "").selected, None);
    }
}
