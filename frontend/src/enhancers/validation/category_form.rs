use shared::validation::{validate_category_name, validate_choice, validate_hex_color};
use shared::{Choice, ValidationConfig};
use web_sys::Element;

use super::{field, trimmed_value, Rule};
use crate::services::dom;

pub fn rules(form: &Element, config: &ValidationConfig) -> Vec<Rule> {
    let mut rules = Vec::new();

    if let Some(name) = field(form, "id_name") {
        let config = config.clone();
        rules.push(
            Rule::new(name, move |name| validate_category_name(&dom::field_value(name), &config))
                .validate_on(&["blur"])
                .clear_on(&["input"]),
        );
    }

    if let Some(kind) = field(form, "id_category_type") {
        rules.push(Rule::new(kind, |kind| validate_choice(&trimmed_value(kind), Choice::CategoryType)).clear_on(&["change"]));
    }

    // palette clicks dispatch `change`
    if let Some(color) = field(form, "id_color") {
        rules.push(Rule::new(color, |color| validate_hex_color(&dom::field_value(color))).validate_on(&["change"]));
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FieldError;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_category_rules() {
        let doc = dom::document().unwrap();
        let form = doc.create_element("form").unwrap();
        form.set_inner_html(
            r##"<input id="id_name" value=" ">
               <select id="id_category_type"><option value="income" selected>Receita</option></select>
               <input id="id_color" value="#12ab3">"##,
        );

        let rules = rules(&form, &ValidationConfig::default());
        let results: Vec<_> = rules.iter().map(|rule| (rule.check)(&rule.field)).collect();
        assert_eq!(results, vec![Err(FieldError::CategoryNameRequired), Ok(()), Err(FieldError::ColorInvalid)]);
    }
}
