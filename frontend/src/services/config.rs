use shared::UiConfig;

use crate::services::dom;
use crate::services::logging::Logger;

/// Id of the optional `<script type="application/json">` override block
pub const CONFIG_ELEMENT_ID: &str = "ui-config";

/// Page configuration: defaults, overridden by the page's JSON block if any.
/// A broken block is reported and ignored.
pub fn load_ui_config() -> UiConfig {
    let raw = match dom::document() {
        Ok(document) => document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content()),
        Err(err) => {
            Logger::warn_with_component("config", &format!("cannot read page config: {}", err));
            None
        }
    };

    match raw {
        Some(raw) => UiConfig::from_json(&raw).unwrap_or_else(|err| {
            Logger::warn_with_component("config", &format!("{}, using defaults", err));
            UiConfig::default()
        }),
        None => UiConfig::default(),
    }
}
