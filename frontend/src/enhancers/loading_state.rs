use gloo::events::EventListener;
use shared::forms::loading_label;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, PageTransitionEvent};

use crate::enhancers::validation::POST_FORM_SELECTOR;
use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;

const ORIGINAL_CONTENT: &str = "data-original-content";
const BUSY_LOOK: [&str; 2] = ["opacity-75", "cursor-not-allowed"];
const SPINNER: &str = r#"<svg class="animate-spin h-5 w-5 mr-2 inline-block" fill="none" viewBox="0 0 24 24"><circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle><path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"></path></svg>"#;

/// Busy submit buttons on POST forms, restored when the page comes back from
/// the back/forward cache
pub fn install() -> Result<usize, DomError> {
    let forms = dom::query_all(POST_FORM_SELECTOR)?;
    for form in &forms {
        bind_form(form);
    }

    EventListener::new(&*dom::window()?, "pageshow", |event| {
        let restored = event.dyn_ref::<PageTransitionEvent>().map(PageTransitionEvent::persisted).unwrap_or(false);
        if restored {
            restore_all();
        }
    })
    .forget();
    Ok(forms.len())
}

pub fn bind_form(form: &Element) {
    let owner = form.clone();
    EventListener::new(form, "submit", move |event| {
        if event.default_prevented() {
            return;
        }
        let button = dom::query_in(&owner, r#"button[type="submit"]"#).and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());
        if let Some(button) = button.filter(|button| !button.disabled()) {
            show(&button);
        }
    })
    .forget();
}

pub fn show(button: &HtmlButtonElement) {
    let label = loading_label(&button.text_content().unwrap_or_default());
    if let Err(err) = button.set_attribute(ORIGINAL_CONTENT, &button.inner_html()) {
        Logger::warn_with_component("loading-state", &format!("{:?}", err));
        return;
    }
    button.set_disabled(true);
    dom::set_classes(button, &BUSY_LOOK, true);
    button.set_inner_html(SPINNER);
    if let Err(err) = button.append_with_str_1(label) {
        Logger::debug_with_component("loading-state", &format!("{:?}", err));
    }
}

/// No-op for a button that is not busy
pub fn hide(button: &HtmlButtonElement) {
    let Some(original) = button.get_attribute(ORIGINAL_CONTENT) else {
        return;
    };
    button.set_inner_html(&original);
    if let Err(err) = button.remove_attribute(ORIGINAL_CONTENT) {
        Logger::debug_with_component("loading-state", &format!("{:?}", err));
    }
    button.set_disabled(false);
    dom::set_classes(button, &BUSY_LOOK, false);
}

fn restore_all() {
    let busy = dom::query_all(&format!("button[{}]", ORIGINAL_CONTENT)).unwrap_or_default();
    for button in busy.iter().filter_map(|button| button.dyn_ref::<HtmlButtonElement>()) {
        hide(button);
    }
}
