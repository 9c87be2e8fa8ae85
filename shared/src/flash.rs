use crate::config::ToastConfig;
use crate::notification::Severity;

/// A server flash message embedded in the rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct FlashMessage {
    pub message: String,
    pub level: Option<String>,
}

impl FlashMessage {
    pub fn new(message: impl Into<String>, level: Option<&str>) -> Self {
        Self {
            message: message.into(),
            level: level.map(str::to_string),
        }
    }

    pub fn severity(&self) -> Severity {
        severity_for_level(self.level.as_deref().unwrap_or("info"))
    }
}

/// Map a server message level onto a toast severity
pub fn severity_for_level(level: &str) -> Severity {
    match level.trim().to_ascii_lowercase().as_str() {
        "success" => Severity::Success,
        "warning" => Severity::Warning,
        "error" => Severity::Error,
        // debug, info and anything unknown
        _ => Severity::Info,
    }
}

/// A flash message ready to be queued after `delay_ms`
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledFlash {
    pub message: String,
    pub severity: Severity,
    pub delay_ms: u32,
}

/// Stagger consecutive messages so they slide in one after another.
/// Blank messages are skipped without leaving a gap.
pub fn schedule(messages: &[FlashMessage], config: &ToastConfig) -> Vec<ScheduledFlash> {
    messages
        .iter()
        .filter(|flash| !flash.message.trim().is_empty())
        .enumerate()
        .map(|(index, flash)| ScheduledFlash {
            message: flash.message.trim().to_string(),
            severity: flash.severity(),
            delay_ms: config.flash_stagger_ms.saturating_mul(index as u32),
        })
        .collect()
}
