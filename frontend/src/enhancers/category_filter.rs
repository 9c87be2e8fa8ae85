use gloo::events::EventListener;
use shared::embedded::parse_categories;
use shared::{CategoryFilter, FilterOutcome};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlOptionElement, HtmlSelectElement};

use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;

pub const TYPE_SELECT_ID: &str = "id_transaction_type";
pub const CATEGORY_SELECT_ID: &str = "id_category";

/// Limit the category select to the chosen transaction type
pub fn install() -> Result<bool, DomError> {
    let type_select = dom::element_by_id::<HtmlSelectElement>(TYPE_SELECT_ID)?;
    let category_select = dom::element_by_id::<HtmlSelectElement>(CATEGORY_SELECT_ID)?;
    match (type_select, category_select) {
        (Some(type_select), Some(category_select)) => Ok(bind(type_select, category_select)),
        _ => Ok(false),
    }
}

/// `false` when the embedded categories cannot be read; the select then keeps
/// whatever the server rendered
pub fn bind(type_select: HtmlSelectElement, category_select: HtmlSelectElement) -> bool {
    let categories = match parse_categories(category_select.get_attribute("data-categories").as_deref()) {
        Ok(categories) => categories,
        Err(err) => {
            Logger::warn_with_component("category-filter", &err.to_string());
            return false;
        }
    };
    let initial = category_select.value();
    let filter = Rc::new(RefCell::new(CategoryFilter::new(categories, Some(&initial))));

    let refresh = {
        let type_select = type_select.clone();
        move || {
            let mut filter = filter.borrow_mut();
            let outcome = filter.apply(&type_select.value(), &category_select.value());
            if let Err(err) = render(&category_select, &outcome) {
                Logger::error_with_component("category-filter", &format!("cannot render options: {}", err));
            }
        }
    };
    refresh();
    EventListener::new(&type_select, "change", move |_| refresh()).forget();
    true
}

/// Replace every option but the first (the empty choice)
fn render(select: &HtmlSelectElement, outcome: &FilterOutcome<'_>) -> Result<(), DomError> {
    while select.length() > 1 {
        select.remove_with_index(1);
    }
    for category in &outcome.options {
        let option = HtmlOptionElement::new_with_text_and_value(&category.name, &category.id)?;
        option.set_attribute("data-type", &category.kind)?;
        if let Some(color) = &category.color {
            option.set_attribute("data-color", color)?;
        }
        select.append_child(&option)?;
    }
    if let Some(selected) = &outcome.selected {
        select.set_value(selected);
    }
    Ok(())
}
