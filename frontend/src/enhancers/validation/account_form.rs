//! Generic rules for forms built from `required` fields (accounts).

use gloo::events::EventListener;
use shared::validation::{required_fields_filled, validate_field};
use shared::{FieldKind, FieldSnapshot};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

use super::{is_masked, is_select, Rule};
use crate::services::dom;

const DISABLED_LOOK: [&str; 2] = ["opacity-50", "cursor-not-allowed"];

pub fn rules(form: &Element) -> Vec<Rule> {
    dom::query_all_in(form, "[required]")
        .unwrap_or_default()
        .into_iter()
        .map(|field| {
            Rule::new(field, |field| {
                let value = dom::field_value(field);
                validate_field(&describe(field, &value))
            })
            .validate_on(&["blur"])
            .clear_on(&["input"])
        })
        .collect()
}

/// Read the attributes the generic validator cares about
fn describe<'a>(field: &Element, value: &'a str) -> FieldSnapshot<'a> {
    let kind = if is_select(field) {
        FieldKind::Select
    } else if is_masked(field) {
        FieldKind::Currency
    } else if field.dyn_ref::<HtmlInputElement>().map(|input| input.type_()) == Some("number".to_string()) {
        FieldKind::Number
    } else {
        FieldKind::Text
    };
    let length = |name: &str| field.get_attribute(name).and_then(|raw| raw.trim().parse::<usize>().ok());

    let mut snapshot = FieldSnapshot::text(value).kind(kind).lengths(length("minlength"), length("maxlength"));
    if field.has_attribute("required") {
        snapshot = snapshot.required();
    }
    snapshot
}

/// Keep the submit button disabled while a required field is blank
pub fn track_submit_button(form: &Element, rules: &[Rule]) {
    let Some(button) = dom::query_in(form, r#"button[type="submit"]"#).and_then(|b| b.dyn_into::<HtmlButtonElement>().ok()) else {
        return;
    };
    let fields: Vec<Element> = rules.iter().map(|rule| rule.field.clone()).collect();

    let update = {
        let fields = fields.clone();
        move || {
            let values: Vec<String> = fields.iter().map(dom::field_value).collect();
            let ready = required_fields_filled(values.iter().map(String::as_str));
            button.set_disabled(!ready);
            dom::set_classes(&button, &DISABLED_LOOK, !ready);
        }
    };
    update();

    let update = Rc::new(update);
    for field in &fields {
        for event in ["input", "change"] {
            let update = update.clone();
            EventListener::new(field, event, move |_| update()).forget();
        }
    }
}
