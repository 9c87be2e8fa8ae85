//! Warn before leaving a page with edited, unsubmitted POST forms.

use gloo::events::{EventListener, EventListenerOptions};
use shared::forms::{any_blocks_unload, snapshot};
use shared::DirtyTracker;
use std::cell::RefCell;
use std::rc::Rc;
use js_sys::Array;
use wasm_bindgen::JsCast;
use web_sys::{BeforeUnloadEvent, Element, FormData, HtmlFormElement};

use crate::enhancers::validation::POST_FORM_SELECTOR;
use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;

const VISIBLE_FIELDS: &str = r#"input:not([type="hidden"]), select, textarea"#;

type Tracked = Rc<RefCell<Vec<(Element, DirtyTracker)>>>;

pub fn install() -> Result<usize, DomError> {
    let tracked: Tracked = Rc::new(RefCell::new(Vec::new()));
    for form in dom::query_all(POST_FORM_SELECTOR)? {
        // delete confirmations only carry the CSRF token
        if dom::query_in(&form, VISIBLE_FIELDS).is_none() {
            continue;
        }
        track(&form, &tracked);
    }

    let count = tracked.borrow().len();
    if count > 0 {
        let window = dom::window()?;
        EventListener::new_with_options(&window, "beforeunload", EventListenerOptions::enable_prevent_default(), move |event| {
            let blocks = any_blocks_unload(tracked.borrow().iter().map(|(_, tracker)| tracker));
            if blocks {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
                    event.set_return_value("");
                }
            }
        })
        .forget();
    }
    Logger::debug_with_component("unsaved-changes", &format!("tracking {} forms", count));
    Ok(count)
}

fn track(form: &Element, tracked: &Tracked) {
    let index = {
        let mut tracked = tracked.borrow_mut();
        tracked.push((form.clone(), DirtyTracker::new(form_snapshot(form))));
        tracked.len() - 1
    };

    for event in ["input", "change"] {
        let tracked = tracked.clone();
        EventListener::new(form, event, move |_| {
            let mut tracked = tracked.borrow_mut();
            let (form, tracker) = &mut tracked[index];
            let dirty = tracker.update(&form_snapshot(form));
            if let Err(err) = form.set_attribute("data-dirty", if dirty { "true" } else { "false" }) {
                Logger::debug_with_component("unsaved-changes", &format!("{:?}", err));
            }
        })
        .forget();
    }

    let tracked = tracked.clone();
    EventListener::new(form, "submit", move |event| {
        // a cancelled submit keeps the page, so the warning stays armed
        if event.default_prevented() {
            return;
        }
        let mut tracked = tracked.borrow_mut();
        let (form, tracker) = &mut tracked[index];
        tracker.mark_submitting();
        if let Err(err) = form.set_attribute("data-submitting", "true") {
            Logger::debug_with_component("unsaved-changes", &format!("{:?}", err));
        }
    })
    .forget();
}

/// What the browser would submit, as the form's `FormData` sees it
pub fn form_snapshot(form: &Element) -> String {
    match form_entries(form) {
        Ok(entries) => snapshot(entries),
        Err(err) => {
            Logger::warn_with_component("unsaved-changes", &format!("cannot read form data: {}", err));
            String::new()
        }
    }
}

fn form_entries(form: &Element) -> Result<Vec<(String, String)>, DomError> {
    let form = form
        .dyn_ref::<HtmlFormElement>()
        .ok_or_else(|| DomError::WrongType("form".to_string()))?;
    let data = FormData::new_with_form(form)?;
    let Some(entries) = js_sys::try_iter(&data)? else {
        return Ok(Vec::new());
    };
    let mut pairs = Vec::new();
    for entry in entries {
        let entry = Array::from(&entry?);
        // file inputs yield `File` values, which never count as edits
        if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
            pairs.push((name, value));
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::{Event, HtmlInputElement};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_edits_mark_the_form_dirty() {
        let doc = dom::document().unwrap();
        let form = doc.create_element("form").unwrap();
        form.set_attribute("method", "post").unwrap();
        form.set_inner_html(
            r#"<input type="hidden" name="csrfmiddlewaretoken" value="abc">
               <input name="name" value="Nubank">
               <input type="checkbox" name="active">"#,
        );
        dom::body().unwrap().append_child(&form).unwrap();

        assert_eq!(form_snapshot(&form), "name=Nubank");

        let tracked: Tracked = Rc::new(RefCell::new(Vec::new()));
        track(&form, &tracked);
        let name: HtmlInputElement = dom::query_in(&form, r#"input[name="name"]"#).unwrap().dyn_into().unwrap();
        name.set_value("Inter");
        form.dispatch_event(&Event::new("input").unwrap()).unwrap();
        assert_eq!(form.get_attribute("data-dirty").as_deref(), Some("true"));
        assert!(tracked.borrow()[0].1.blocks_unload());

        form.dispatch_event(&Event::new("submit").unwrap()).unwrap();
        assert!(!tracked.borrow()[0].1.blocks_unload());
        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_snapshot_follows_form_data() {
        let doc = dom::document().unwrap();
        let form = doc.create_element("form").unwrap();
        form.set_inner_html(
            r#"<fieldset disabled><input name="locked" value="x"></fieldset>
               <select name="tags" multiple>
                 <option value="a" selected>A</option>
                 <option value="b">B</option>
                 <option value="c" selected>C</option>
               </select>
               <input type="file" name="receipt">
               <button type="submit" name="save" value="1">Salvar</button>"#,
        );
        dom::body().unwrap().append_child(&form).unwrap();

        let snapshot = form_snapshot(&form);
        assert!(!snapshot.contains("locked"));
        assert!(!snapshot.contains("save"));
        assert!(!snapshot.contains("receipt"));
        assert!(snapshot.contains("tags=a"));
        assert!(snapshot.contains("tags=c"));
        form.remove();
    }
}
