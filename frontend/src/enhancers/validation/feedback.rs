//! Per-field error and success markup.

use web_sys::Element;

use crate::services::dom::{self, DomError};

pub const FIELD_ERROR_CLASS: &str = "field-error";
pub const SUCCESS_MARKER_CLASS: &str = "success-icon";

const ERROR_BORDER: [&str; 2] = ["border-red-500", "focus:ring-red-500"];
const SUCCESS_BORDER: &str = "border-green-500";

const ERROR_ICON: &str = r#"<svg class="w-4 h-4 mr-1" fill="none" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" d="M12 9v3.75m9-.75a9 9 0 11-18 0 9 9 0 0118 0zm-9 3.75h.008v.008H12v-.008z" /></svg>"#;
const SUCCESS_ICON: &str = r#"<svg class="w-4 h-4 mr-1" fill="none" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" d="M9 12.75L11.25 15 15 9.75M21 12a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>"#;

/// How a field that passed validation is marked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessMarker {
    /// Only the error is removed
    Clear,
    Border,
    /// Green border plus a "Válido" line under the field
    BorderAndLabel,
}

pub fn show_error(field: &Element, message: &str) -> Result<(), DomError> {
    clear(field);
    dom::set_classes(field, &ERROR_BORDER, true);
    append_note(field, FIELD_ERROR_CLASS, "text-red-400", ERROR_ICON, message)
}

pub fn show_success(field: &Element, marker: SuccessMarker) -> Result<(), DomError> {
    clear(field);
    match marker {
        SuccessMarker::Clear => Ok(()),
        SuccessMarker::Border => {
            dom::set_class(field, SUCCESS_BORDER, true);
            Ok(())
        }
        SuccessMarker::BorderAndLabel => {
            dom::set_class(field, SUCCESS_BORDER, true);
            append_note(field, SUCCESS_MARKER_CLASS, "text-green-400", SUCCESS_ICON, "Válido")
        }
    }
}

/// Remove error and success styling and notes
pub fn clear(field: &Element) {
    dom::set_classes(field, &ERROR_BORDER, false);
    dom::set_class(field, SUCCESS_BORDER, false);
    if let Some(container) = dom::field_container(field) {
        for class in [FIELD_ERROR_CLASS, SUCCESS_MARKER_CLASS] {
            if let Some(note) = dom::query_in(&container, &format!(".{}", class)) {
                note.remove();
            }
        }
    }
}

fn append_note(field: &Element, class: &str, color: &str, icon: &str, text: &str) -> Result<(), DomError> {
    let Some(container) = dom::field_container(field) else {
        return Ok(());
    };
    let document = dom::document()?;
    let note = document.create_element("div")?;
    note.set_class_name(&format!("{} mt-2", class));
    let line = document.create_element("p")?;
    line.set_class_name(&format!("text-sm {} flex items-center", color));
    line.set_inner_html(icon);
    // text node: messages never become markup
    line.append_with_str_1(text)?;
    note.append_child(&line)?;
    container.append_child(&note)?;
    Ok(())
}
