use chrono::NaiveDate;
use shared::Navigator;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Window};

use crate::services::logging::Logger;

/// Failure to reach or use a page element
#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("element `{0}` has an unexpected type")]
    WrongType(String),
    #[error("dom call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn body() -> Result<HtmlElement, DomError> {
    document()?.body().ok_or(DomError::NoBody)
}

/// Element by id, cast to `T`. Absent elements are `Ok(None)`.
pub fn element_by_id<T: JsCast>(id: &str) -> Result<Option<T>, DomError> {
    match document()?.get_element_by_id(id) {
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|_| DomError::WrongType(format!("#{}", id))),
        None => Ok(None),
    }
}

/// All elements matching `selector` in the document
pub fn query_all(selector: &str) -> Result<Vec<Element>, DomError> {
    let list = document()?.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// All elements matching `selector` below `root`
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Closest ancestor (or self) matching `selector`; invalid selectors count as no match
pub fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// First descendant matching `selector`
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Where per-field feedback is appended: the `.relative` wrapper, else the parent
pub fn field_container(field: &Element) -> Option<Element> {
    closest(field, ".relative").or_else(|| field.parent_element())
}

/// Current value of an input, select or textarea
pub fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let list = element.class_list();
    let result = if enabled { list.add_1(class) } else { list.remove_1(class) };
    if let Err(err) = result {
        Logger::debug_with_component("dom", &format!("class toggle `{}` failed: {:?}", class, err));
    }
}

pub fn set_classes(element: &Element, classes: &[&str], enabled: bool) {
    for class in classes {
        set_class(element, class, enabled);
    }
}

/// Milliseconds since the epoch, the time base of the notification queue
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Today's date in the browser's local time zone
pub fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

/// Navigates the current tab
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, href: &str) {
        let result = window().and_then(|window| window.location().set_href(href).map_err(DomError::from));
        if let Err(err) = result {
            Logger::error_with_component("navigation", &format!("failed to open {}: {}", href, err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_field_container_prefers_relative_wrapper() {
        let doc = document().unwrap();
        let wrapper = doc.create_element("div").unwrap();
        wrapper.set_class_name("relative");
        let inner = doc.create_element("span").unwrap();
        let input = doc.create_element("input").unwrap();
        inner.append_child(&input).unwrap();
        wrapper.append_child(&inner).unwrap();

        let container = field_container(&input).unwrap();
        assert_eq!(container, wrapper);

        let lone = doc.create_element("input").unwrap();
        let parent = doc.create_element("p").unwrap();
        parent.append_child(&lone).unwrap();
        assert_eq!(field_container(&lone).unwrap(), parent);
    }

    #[wasm_bindgen_test]
    fn test_field_value_reads_inputs() {
        let doc = document().unwrap();
        let input: HtmlInputElement = doc.create_element("input").unwrap().dyn_into().unwrap();
        input.set_value("Nubank");
        assert_eq!(field_value(&input), "Nubank");
        let div = doc.create_element("div").unwrap();
        assert_eq!(field_value(&div), "");
    }

    #[wasm_bindgen_test]
    fn test_today_is_available() {
        assert!(today().is_some());
    }
}
