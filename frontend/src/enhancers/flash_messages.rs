use gloo::timers::callback::Timeout;
use shared::flash::{self, FlashMessage};
use shared::{Severity, ToastConfig};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;
use crate::services::notifier::Notifier;

pub const FLASH_DATA_SELECTOR: &str = "#django-messages-data [data-message]";

/// A kind of server-rendered alert block and the toast it becomes
struct LegacyAlert {
    selector: &'static str,
    severity: Severity,
    /// Errors inside a form describe a field and stay in place
    keep_in_forms: bool,
}

const LEGACY_ALERTS: [LegacyAlert; 2] = [
    LegacyAlert {
        selector: r".alert-success, .bg-green-900\/30",
        severity: Severity::Success,
        keep_in_forms: false,
    },
    LegacyAlert {
        selector: r".alert-error, .bg-red-900\/30",
        severity: Severity::Error,
        keep_in_forms: true,
    },
];

/// Queue the server's flash messages, then fold legacy alert blocks into toasts
pub fn install(notifier: &Notifier, config: &ToastConfig) -> Result<usize, DomError> {
    let messages = read_messages()?;
    for scheduled in flash::schedule(&messages, config) {
        let notifier = notifier.clone();
        Timeout::new(scheduled.delay_ms, move || {
            notifier.notify(scheduled.severity, &scheduled.message, None);
        })
        .forget();
    }

    let converted = convert_legacy_alerts(notifier)?;
    Logger::debug_with_component(
        "flash",
        &format!("{} flash messages, {} legacy alerts", messages.len(), converted),
    );
    Ok(messages.len() + converted)
}

pub fn read_messages() -> Result<Vec<FlashMessage>, DomError> {
    Ok(dom::query_all(FLASH_DATA_SELECTOR)?
        .iter()
        .filter_map(|element| {
            let message = element.get_attribute("data-message")?;
            Some(FlashMessage::new(message, element.get_attribute("data-level").as_deref()))
        })
        .collect())
}

fn convert_legacy_alerts(notifier: &Notifier) -> Result<usize, DomError> {
    let mut converted = 0;
    for kind in &LEGACY_ALERTS {
        for alert in dom::query_all(kind.selector)? {
            let text = alert.text_content().unwrap_or_default();
            let text = text.trim();
            if text.is_empty() || (kind.keep_in_forms && dom::closest(&alert, "form").is_some()) {
                continue;
            }
            notifier.notify(kind.severity, text, None);
            if let Some(alert) = alert.dyn_ref::<HtmlElement>() {
                alert.style().set_property("display", "none")?;
            }
            converted += 1;
        }
    }
    Ok(converted)
}
