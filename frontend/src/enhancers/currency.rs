//! BRL mask on amount inputs and formatting of `data-currency` values.

use gloo::events::EventListener;
use shared::currency::{caret_after_mask, display_brl, format_initial, format_on_blur, mask_input, parse_brl, parse_leading_float};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;

pub const MASKED_INPUT_IDS: [&str; 2] = ["id_amount", "id_initial_balance"];
pub const MASK_CLASS: &str = "currency-input";
/// Marks the hidden input that carries the numeric value on submit
const SHADOW_ATTRIBUTE: &str = "data-currency-value";

pub fn install() -> Result<usize, DomError> {
    let mut masked = 0;
    for id in MASKED_INPUT_IDS {
        if let Some(input) = dom::element_by_id::<HtmlInputElement>(id)? {
            apply_mask(&input)?;
            masked += 1;
        }
    }
    let displayed = format_displays()?;
    Logger::debug_with_component("currency", &format!("{} masked inputs, {} displays", masked, displayed));
    Ok(masked)
}

pub fn apply_mask(input: &HtmlInputElement) -> Result<(), DomError> {
    // number inputs reject the comma
    input.set_type("text");
    input.remove_attribute("step")?;
    input.remove_attribute("min")?;
    if input.placeholder().is_empty() {
        input.set_placeholder("0,00");
    }
    dom::set_class(input, MASK_CLASS, true);

    if let Some(formatted) = format_initial(&input.value()) {
        input.set_value(&formatted);
    }

    let target = input.clone();
    EventListener::new(input, "input", move |_| {
        let old_value = target.value();
        let caret = target
            .selection_start()
            .ok()
            .flatten()
            .unwrap_or(old_value.chars().count() as u32);
        let new_value = mask_input(&old_value);
        if new_value == old_value {
            return;
        }
        target.set_value(&new_value);
        let caret = caret_after_mask(caret, &old_value, &new_value);
        if target.set_selection_range(caret, caret).is_err() {
            Logger::debug_with_component("currency", "caret not restored");
        }
    })
    .forget();

    let target = input.clone();
    EventListener::new(input, "blur", move |_| {
        if let Some(formatted) = format_on_blur(&target.value()) {
            target.set_value(&formatted);
        }
    })
    .forget();

    if let Some(form) = dom::closest(input, "form") {
        let target = input.clone();
        let owner = form.clone();
        EventListener::new(&form, "submit", move |event| {
            // validation cancelled the submit: keep the field editable
            if event.default_prevented() {
                return;
            }
            if let Err(err) = submit_numeric_value(&owner, &target) {
                Logger::error_with_component("currency", &format!("cannot submit numeric value: {}", err));
            }
        })
        .forget();
    }

    let target = input.clone();
    EventListener::new(&*dom::window()?, "pageshow", move |_| restore_after_back_navigation(&target)).forget();
    Ok(())
}

/// Swap the masked field for a hidden one carrying the plain number
fn submit_numeric_value(form: &Element, input: &HtmlInputElement) -> Result<(), DomError> {
    let hidden: HtmlInputElement = dom::document()?
        .create_element("input")?
        .dyn_into()
        .map_err(|_| DomError::WrongType("input".to_string()))?;
    hidden.set_type("hidden");
    hidden.set_name(&input.name());
    hidden.set_value(&parse_brl(&input.value()).to_string());
    hidden.set_attribute(SHADOW_ATTRIBUTE, "")?;
    input.set_disabled(true);
    form.append_child(&hidden)?;
    Ok(())
}

/// A page restored from the back/forward cache still has the submit-time swap
fn restore_after_back_navigation(input: &HtmlInputElement) {
    if !input.disabled() {
        return;
    }
    input.set_disabled(false);
    if let Some(form) = dom::closest(input, "form") {
        let selector = format!(r#"input[{}][name="{}"]"#, SHADOW_ATTRIBUTE, input.name());
        for shadow in dom::query_all_in(&form, &selector).unwrap_or_default() {
            shadow.remove();
        }
    }
}

/// Render every `[data-currency]` element as `R$ 1.234,56`
pub fn format_displays() -> Result<usize, DomError> {
    let mut count = 0;
    for element in dom::query_all("[data-currency]")? {
        let raw = element.get_attribute("data-currency").unwrap_or_default();
        let Some(value) = parse_leading_float(&raw) else {
            continue;
        };
        let prefix = element.get_attribute("data-currency-prefix").unwrap_or_default();
        element.set_text_content(Some(&display_brl(value, &prefix)));
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    fn masked_form() -> (Element, HtmlInputElement) {
        let doc = dom::document().unwrap();
        let form = doc.create_element("form").unwrap();
        form.set_inner_html(r#"<input id="amount-under-test" name="amount" type="number" step="0.01" value="1234.5">"#);
        dom::body().unwrap().append_child(&form).unwrap();
        let input: HtmlInputElement = dom::query_in(&form, "input").unwrap().dyn_into().unwrap();
        apply_mask(&input).unwrap();
        (form, input)
    }

    #[wasm_bindgen_test]
    fn test_mask_formats_initial_and_typed_values() {
        let (form, input) = masked_form();
        assert_eq!(input.type_(), "text");
        assert_eq!(input.value(), "1.234,50");
        assert!(input.class_list().contains(MASK_CLASS));

        input.set_value("98765,432");
        input.dispatch_event(&Event::new("input").unwrap()).unwrap();
        assert_eq!(input.value(), "98.765,43");

        input.set_value("12");
        input.dispatch_event(&Event::new("blur").unwrap()).unwrap();
        assert_eq!(input.value(), "12,00");
        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_submit_sends_plain_number() {
        let (form, input) = masked_form();
        input.set_value("1.234,56");
        form.dispatch_event(&Event::new("submit").unwrap()).unwrap();

        assert!(input.disabled());
        let hidden: HtmlInputElement = dom::query_in(&form, r#"input[type="hidden"]"#).unwrap().dyn_into().unwrap();
        assert_eq!(hidden.name(), "amount");
        assert_eq!(hidden.value(), "1234.56");

        restore_after_back_navigation(&input);
        assert!(!input.disabled());
        assert!(dom::query_in(&form, r#"input[type="hidden"]"#).is_none());
        form.remove();
    }

    #[wasm_bindgen_test]
    fn test_currency_display() {
        let doc = dom::document().unwrap();
        let root = doc.create_element("div").unwrap();
        root.set_inner_html(r#"<span id="disp-a" data-currency="1500.5" data-currency-prefix="- "></span><span id="disp-b" data-currency="n/a">?</span>"#);
        dom::body().unwrap().append_child(&root).unwrap();

        format_displays().unwrap();
        assert_eq!(doc.get_element_by_id("disp-a").unwrap().text_content().unwrap(), "- R$ 1.500,50");
        assert_eq!(doc.get_element_by_id("disp-b").unwrap().text_content().unwrap(), "?");
        root.remove();
    }
}
