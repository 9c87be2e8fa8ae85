use shared::validation::{validate_amount, validate_choice, validate_transaction_date};
use shared::{Choice, ValidationConfig};
use web_sys::Element;

use super::{field, is_masked, trimmed_value, Rule};
use crate::services::dom;

/// Type, account and category must be chosen; amount and date are checked
/// as the user leaves them.
pub fn rules(form: &Element, config: &ValidationConfig) -> Vec<Rule> {
    let mut rules = Vec::new();

    for (id, choice) in [
        ("id_transaction_type", Choice::TransactionType),
        ("id_account", Choice::Account),
        ("id_category", Choice::Category),
    ] {
        if let Some(select) = field(form, id) {
            rules.push(Rule::new(select, move |select| validate_choice(&trimmed_value(select), choice)).clear_on(&["change"]));
        }
    }

    if let Some(amount) = field(form, "id_amount") {
        let config = config.clone();
        rules.push(
            Rule::new(amount, move |amount| validate_amount(&dom::field_value(amount), is_masked(amount), &config))
                .validate_on(&["blur"])
                .clear_on(&["input"]),
        );
    }

    if let Some(date) = field(form, "id_date") {
        rules.push(
            Rule::new(date, |date| match dom::today() {
                Some(today) => validate_transaction_date(&dom::field_value(date), today),
                None => Ok(()),
            })
            .validate_on(&["blur"])
            .clear_on(&["change"]),
        );
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FieldError;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlInputElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_transaction_rules() {
        let doc = dom::document().unwrap();
        let form = doc.create_element("form").unwrap();
        form.set_inner_html(
            r#"<select id="id_transaction_type"><option value="">--</option><option value="expense" selected>Despesa</option></select>
               <select id="id_account"><option value="" selected>--</option></select>
               <input id="id_amount" class="currency-input" value="1.234,56">
               <input id="id_date" type="date" value="2999-01-01">"#,
        );

        let rules = rules(&form, &ValidationConfig::default());
        assert_eq!(rules.len(), 4);
        let results: Vec<_> = rules.iter().map(|rule| (rule.check)(&rule.field)).collect();
        assert_eq!(results[0], Ok(()));
        assert_eq!(results[1], Err(FieldError::MissingChoice(Choice::Account)));
        assert_eq!(results[2], Ok(()));
        assert_eq!(results[3], Err(FieldError::DateInFuture));

        let amount: HtmlInputElement = rules[2].field.clone().dyn_into().unwrap();
        amount.set_value("0,00");
        assert_eq!((rules[2].check)(&rules[2].field), Err(FieldError::AmountNotPositive));
    }
}
