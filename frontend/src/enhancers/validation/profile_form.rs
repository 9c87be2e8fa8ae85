use shared::validation::{validate_birth_date, validate_person_name, validate_phone};
use shared::{NameField, ValidationConfig};
use web_sys::Element;

use super::{field, Rule};
use crate::services::dom;

/// Every profile field is optional; filled ones must be plausible
pub fn rules(form: &Element, config: &ValidationConfig) -> Vec<Rule> {
    let mut rules = Vec::new();

    for (id, name) in [("id_first_name", NameField::FirstName), ("id_last_name", NameField::LastName)] {
        if let Some(input) = field(form, id) {
            let config = config.clone();
            rules.push(Rule::new(input, move |input| validate_person_name(&dom::field_value(input), name, &config)));
        }
    }

    if let Some(phone) = field(form, "id_phone") {
        rules.push(Rule::new(phone, |phone| validate_phone(&dom::field_value(phone))));
    }

    if let Some(birth_date) = field(form, "id_birth_date") {
        let config = config.clone();
        rules.push(Rule::new(birth_date, move |birth_date| match dom::today() {
            Some(today) => validate_birth_date(&dom::field_value(birth_date), today, &config),
            None => Ok(()),
        }));
    }

    rules
        .into_iter()
        .map(|rule| rule.validate_on(&["blur"]).clear_on(&["input"]))
        .collect()
}
