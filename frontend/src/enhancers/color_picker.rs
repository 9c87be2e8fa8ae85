//! Swatch preview and suggested palette next to the category colour input.

use gloo::events::EventListener;
use shared::color::{display_code, is_active_swatch, preview_color};
use shared::embedded::parse_suggested_colors;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventInit, HtmlElement, HtmlInputElement};

use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;

pub const COLOR_INPUT_ID: &str = "id_color";

const ACTIVE_RING: [&str; 4] = ["ring-2", "ring-primary-500", "ring-offset-2", "ring-offset-slate-800"];
const SWATCH_CLASSES: &str = "w-8 h-8 rounded-lg border-2 border-slate-600 hover:border-slate-400 transition-all duration-200 hover:scale-110 focus:outline-none focus:ring-2 focus:ring-primary-500 focus:ring-offset-2 focus:ring-offset-slate-800";

struct ColorPicker {
    input: HtmlInputElement,
    preview: HtmlElement,
    code: Element,
    swatches: Vec<(String, Element)>,
}

impl ColorPicker {
    fn refresh(&self) {
        let value = self.input.value();
        if let Err(err) = self.preview.style().set_property("background-color", preview_color(&value)) {
            Logger::debug_with_component("color-picker", &format!("{:?}", err));
        }
        self.code.set_text_content(Some(&display_code(&value)));
        for (color, swatch) in &self.swatches {
            dom::set_classes(swatch, &ACTIVE_RING, is_active_swatch(color, &value));
        }
    }

    fn select(&self, color: &str) {
        self.input.set_value(color);
        self.refresh();
        // lets the category form validate the new colour
        let init = EventInit::new();
        init.set_bubbles(true);
        let dispatched = Event::new_with_event_init_dict("change", &init).and_then(|event| self.input.dispatch_event(&event));
        if let Err(err) = dispatched {
            Logger::warn_with_component("color-picker", &format!("change not dispatched: {:?}", err));
        }
    }
}

pub fn install() -> Result<bool, DomError> {
    match dom::element_by_id::<HtmlInputElement>(COLOR_INPUT_ID)? {
        Some(input) => {
            attach(input)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn attach(input: HtmlInputElement) -> Result<(), DomError> {
    let suggested = parse_suggested_colors(input.get_attribute("data-suggested-colors").as_deref()).unwrap_or_else(|err| {
        Logger::warn_with_component("color-picker", &err.to_string());
        Vec::new()
    });
    let document = dom::document()?;
    let parent = input.parent_element().ok_or_else(|| DomError::WrongType("#id_color without parent".to_string()))?;
    let wrapper = dom::closest(&input, ".color-picker-wrapper").unwrap_or_else(|| parent.clone());

    let preview_row = document.create_element("div")?;
    preview_row.set_class_name("flex items-center gap-3 mt-2");
    let preview: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| DomError::WrongType("div".to_string()))?;
    preview.set_class_name("w-10 h-10 rounded-lg border-2 border-slate-600 shadow-inner");
    let code = document.create_element("span")?;
    code.set_class_name("color-code text-slate-300 font-mono text-sm");
    preview_row.append_child(&preview)?;
    preview_row.append_child(&code)?;
    parent.append_child(&preview_row)?;

    let mut swatches = Vec::new();
    if !suggested.is_empty() {
        let palette = document.create_element("div")?;
        palette.set_class_name("mt-3");
        let label = document.create_element("p")?;
        label.set_class_name("text-sm text-slate-400 mb-2");
        label.set_text_content(Some("Cores sugeridas:"));
        let grid = document.create_element("div")?;
        grid.set_class_name("flex flex-wrap gap-2");

        for color in suggested {
            let swatch = document.create_element("button")?;
            swatch.set_attribute("type", "button")?;
            swatch.set_class_name(SWATCH_CLASSES);
            swatch.set_attribute("style", &format!("background-color: {}", color))?;
            swatch.set_attribute("title", &color)?;
            swatch.set_attribute("data-color", &color)?;
            grid.append_child(&swatch)?;
            swatches.push((color, swatch));
        }
        palette.append_child(&label)?;
        palette.append_child(&grid)?;
        wrapper.append_child(&palette)?;
    }

    let picker = Rc::new(ColorPicker {
        input,
        preview,
        code,
        swatches,
    });
    picker.refresh();

    for (color, swatch) in &picker.swatches {
        let picker = picker.clone();
        let color = color.clone();
        EventListener::new(swatch, "click", move |_| picker.select(&color)).forget();
    }
    for event in ["input", "change"] {
        let listener_picker = picker.clone();
        EventListener::new(&picker.input, event, move |_| listener_picker.refresh()).forget();
    }
    Ok(())
}
