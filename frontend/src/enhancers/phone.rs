use gloo::events::EventListener;
use shared::phone::mask_phone;
use web_sys::HtmlInputElement;

use crate::services::dom::{self, DomError};

pub const PHONE_INPUT_ID: &str = "id_phone";

pub fn install() -> Result<bool, DomError> {
    match dom::element_by_id::<HtmlInputElement>(PHONE_INPUT_ID)? {
        Some(input) => {
            apply_mask(&input);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// `(DD) NNNNN-NNNN` as the user types
pub fn apply_mask(input: &HtmlInputElement) {
    let target = input.clone();
    EventListener::new(input, "input", move |_| {
        let masked = mask_phone(&target.value());
        target.set_value(&masked);
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_phone_mask_on_input() {
        let input: HtmlInputElement = dom::document().unwrap().create_element("input").unwrap().dyn_into().unwrap();
        apply_mask(&input);
        input.set_value("11987654321999");
        input.dispatch_event(&Event::new("input").unwrap()).unwrap();
        assert_eq!(input.value(), "(11) 98765-4321");
    }
}
