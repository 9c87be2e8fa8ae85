//! Client-side validation of the app's POST forms.
//!
//! A form is bound to a list of [`Rule`]s chosen by which fields it contains.
//! Rules validate on their own events (usually blur), clear their error while
//! the user edits, and all run on submit. A failed submit is cancelled,
//! reported with an error toast and scrolled to the first error.

pub mod account_form;
pub mod category_form;
pub mod feedback;
pub mod profile_form;
pub mod transaction_form;

use gloo::events::{EventListener, EventListenerOptions};
use shared::{FieldResult, ValidationConfig};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;
use crate::services::notifier::Notifier;
use feedback::SuccessMarker;

pub const POST_FORM_SELECTOR: &str = r#"form[method="post" i]"#;
pub const INVALID_FORM_MESSAGE: &str = "Por favor, corrija os erros no formulário.";

pub type Check = Rc<dyn Fn(&Element) -> FieldResult>;

/// One field and how it is checked
#[derive(Clone)]
pub struct Rule {
    pub field: Element,
    pub check: Check,
    /// Events that validate the field outside of submit
    pub validate_on: &'static [&'static str],
    /// Events that clear the field's error
    pub clear_on: &'static [&'static str],
}

impl Rule {
    pub fn new(field: Element, check: impl Fn(&Element) -> FieldResult + 'static) -> Self {
        Self {
            field,
            check: Rc::new(check),
            validate_on: &[],
            clear_on: &[],
        }
    }

    pub fn validate_on(mut self, events: &'static [&'static str]) -> Self {
        self.validate_on = events;
        self
    }

    pub fn clear_on(mut self, events: &'static [&'static str]) -> Self {
        self.clear_on = events;
        self
    }

    /// Check the field and render the outcome; `true` when valid
    pub fn run(&self, marker: SuccessMarker) -> bool {
        let rendered = match (self.check)(&self.field) {
            Ok(()) if dom::field_value(&self.field).trim().is_empty() => {
                // an empty optional field is neither an error nor a success
                feedback::clear(&self.field);
                return true;
            }
            Ok(()) => feedback::show_success(&self.field, marker).map(|_| true),
            Err(err) => feedback::show_error(&self.field, &err.to_string()).map(|_| false),
        };
        rendered.unwrap_or_else(|err| {
            Logger::warn_with_component("validation", &format!("cannot render field feedback: {}", err));
            (self.check)(&self.field).is_ok()
        })
    }
}

/// Which rule set a form gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Transaction,
    Category,
    Profile,
    /// Any other form with `required` fields, e.g. accounts
    Generic,
}

impl FormKind {
    pub fn detect(form: &Element) -> Option<Self> {
        let has = |selector: &str| dom::query_in(form, selector).is_some();
        if has("#id_transaction_type") && has("#id_amount") {
            Some(FormKind::Transaction)
        } else if has("#id_name") && (has("#id_color") || has("#id_category_type")) {
            Some(FormKind::Category)
        } else if has("#id_first_name, #id_last_name, #id_phone, #id_birth_date") {
            Some(FormKind::Profile)
        } else if has("[required]") {
            Some(FormKind::Generic)
        } else {
            None
        }
    }

    pub fn success_marker(self) -> SuccessMarker {
        match self {
            FormKind::Transaction => SuccessMarker::Border,
            FormKind::Profile => SuccessMarker::BorderAndLabel,
            FormKind::Category | FormKind::Generic => SuccessMarker::Clear,
        }
    }

    pub fn rules(self, form: &Element, config: &ValidationConfig) -> Vec<Rule> {
        match self {
            FormKind::Transaction => transaction_form::rules(form, config),
            FormKind::Category => category_form::rules(form, config),
            FormKind::Profile => profile_form::rules(form, config),
            FormKind::Generic => account_form::rules(form),
        }
    }
}

/// Bind validators to every POST form on the page. Must run before any other
/// submit handler so later handlers can see a cancelled submit.
pub fn install(notifier: &Notifier, config: &ValidationConfig) -> Result<usize, DomError> {
    let mut bound = 0;
    for form in dom::query_all(POST_FORM_SELECTOR)? {
        let Some(kind) = FormKind::detect(&form) else {
            continue;
        };
        let rules = kind.rules(&form, config);
        if rules.is_empty() {
            continue;
        }
        Logger::debug_with_component("validation", &format!("{:?} form with {} rules", kind, rules.len()));
        if kind == FormKind::Generic {
            account_form::track_submit_button(&form, &rules);
        }
        bind_form(&form, rules, kind.success_marker(), notifier);
        bound += 1;
    }
    Ok(bound)
}

pub fn bind_form(form: &Element, rules: Vec<Rule>, marker: SuccessMarker, notifier: &Notifier) {
    for rule in &rules {
        for event in rule.validate_on {
            let target = rule.field.clone();
            let rule = rule.clone();
            EventListener::new(&target, *event, move |_| {
                rule.run(marker);
            })
            .forget();
        }
        for event in rule.clear_on {
            let field = rule.field.clone();
            EventListener::new(&rule.field, *event, move |_| feedback::clear(&field)).forget();
        }
    }

    let notifier = notifier.clone();
    let form_element = form.clone();
    EventListener::new_with_options(form, "submit", EventListenerOptions::enable_prevent_default(), move |event| {
        // every rule runs so each invalid field shows its message
        let failures = rules.iter().filter(|rule| !rule.run(marker)).count();
        if failures == 0 {
            return;
        }
        event.prevent_default();
        Logger::info_with_component("validation", &format!("submit blocked, {} invalid fields", failures));
        notifier.error(INVALID_FORM_MESSAGE);
        scroll_to_first_error(&form_element);
    })
    .forget();
}

fn scroll_to_first_error(form: &Element) {
    let Some(first) = dom::query_in(form, &format!(".{}", feedback::FIELD_ERROR_CLASS)) else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    first.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Current value of the field as an input/select, trimmed
pub(crate) fn trimmed_value(field: &Element) -> String {
    dom::field_value(field).trim().to_string()
}

/// Whether the field carries the BRL mask
pub(crate) fn is_masked(field: &Element) -> bool {
    field.class_list().contains("currency-input")
}

/// Field `#id` within `form`
pub(crate) fn field(form: &Element, id: &str) -> Option<Element> {
    dom::query_in(form, &format!("#{}", id))
}

pub(crate) fn is_select(field: &Element) -> bool {
    field.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FieldError, ToastConfig};
    use wasm_bindgen_test::*;
    use web_sys::{Event, HtmlInputElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn form(html: &str) -> Element {
        let doc = dom::document().unwrap();
        let form = doc.create_element("form").unwrap();
        form.set_attribute("method", "post").unwrap();
        form.set_inner_html(html);
        dom::body().unwrap().append_child(&form).unwrap();
        form
    }

    #[wasm_bindgen_test]
    fn test_detects_form_kinds() {
        let transaction = form(r#"<select id="id_transaction_type"></select><input id="id_amount">"#);
        let category = form(r#"<input id="id_name"><input id="id_color">"#);
        let profile = form(r#"<input id="id_phone">"#);
        let account = form(r#"<input name="name" required>"#);
        let delete = form(r#"<input type="hidden" name="csrfmiddlewaretoken" value="x">"#);

        assert_eq!(FormKind::detect(&transaction), Some(FormKind::Transaction));
        assert_eq!(FormKind::detect(&category), Some(FormKind::Category));
        assert_eq!(FormKind::detect(&profile), Some(FormKind::Profile));
        assert_eq!(FormKind::detect(&account), Some(FormKind::Generic));
        assert_eq!(FormKind::detect(&delete), None);

        for form in [transaction, category, profile, account, delete] {
            form.remove();
        }
    }

    #[wasm_bindgen_test]
    fn test_failed_submit_is_cancelled_and_reported() {
        let form = form(r#"<div class="relative"><input id="only" value=""></div>"#);
        let input = field(&form, "only").unwrap();
        let rule = Rule::new(input.clone(), |field| {
            if trimmed_value(field).is_empty() {
                Err(FieldError::Required)
            } else {
                Ok(())
            }
        })
        .validate_on(&["blur"])
        .clear_on(&["input"]);
        let notifier = Notifier::with_container_id(ToastConfig::default(), "toast-container-validation");
        bind_form(&form, vec![rule], SuccessMarker::Clear, &notifier);

        let init = web_sys::EventInit::new();
        init.set_cancelable(true);
        let submit = Event::new_with_event_init_dict("submit", &init).unwrap();
        form.dispatch_event(&submit).unwrap();

        assert!(submit.default_prevented());
        assert!(dom::query_in(&form, ".field-error").is_some());
        assert_eq!(notifier.snapshot()[0].message, INVALID_FORM_MESSAGE);

        input.dispatch_event(&Event::new("input").unwrap()).unwrap();
        assert!(dom::query_in(&form, ".field-error").is_none());

        input.dyn_ref::<HtmlInputElement>().unwrap().set_value("ok");
        let again = Event::new_with_event_init_dict("submit", &init).unwrap();
        form.dispatch_event(&again).unwrap();
        assert!(!again.default_prevented());
        form.remove();
    }
}
