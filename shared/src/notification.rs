use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ToastConfig;

/// Severity of a toast notification, drives styling and default duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Lenient parse used for free-form input. Anything unknown becomes `Info`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Default on-screen time for the convenience wrappers
    pub fn default_duration_ms(&self, config: &ToastConfig) -> u32 {
        match self {
            Severity::Success => config.success_duration_ms,
            Severity::Error => config.error_duration_ms,
            Severity::Warning => config.warning_duration_ms,
            Severity::Info => config.info_duration_ms,
        }
    }

    pub fn style(&self) -> SeverityStyle {
        match self {
            Severity::Success => SeverityStyle {
                background: "bg-green-900/95",
                border: "border-green-700",
                text: "text-green-100",
                icon: "text-green-400",
                icon_path: "M9 12.75L11.25 15 15 9.75M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            },
            Severity::Error => SeverityStyle {
                background: "bg-red-900/95",
                border: "border-red-700",
                text: "text-red-100",
                icon: "text-red-400",
                icon_path: "M9.75 9.75l4.5 4.5m0-4.5l-4.5 4.5M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            },
            Severity::Warning => SeverityStyle {
                background: "bg-yellow-900/95",
                border: "border-yellow-700",
                text: "text-yellow-100",
                icon: "text-yellow-400",
                icon_path: "M12 9v3.75m-9.303 3.376c-.866 1.5.217 3.374 1.948 3.374h14.71c1.73 0 2.813-1.874 1.948-3.374L13.949 3.378c-.866-1.5-3.032-1.5-3.898 0L2.697 16.126zM12 15.75h.007v.008H12v-.008z",
            },
            Severity::Info => SeverityStyle {
                background: "bg-blue-900/95",
                border: "border-blue-700",
                text: "text-blue-100",
                icon: "text-blue-400",
                icon_path: "M11.25 11.25l.041-.02a.75.75 0 011.063.852l-.708 2.836a.75.75 0 001.063.853l.041-.021M21 12a9 9 0 11-18 0 9 9 0 0118 0zm-9-3.75h.008v.008H12V8.25z",
            },
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS classes and icon used to render one severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
    pub icon_path: &'static str,
}

/// Handle returned by `show`. Never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Visual phase of a notification while it is in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Rendered off-screen, waiting for the slide-in
    Entering,
    Visible,
    /// Exit transition running, node removed once it ends
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// 0 keeps the notification until it is dismissed
    pub duration_ms: u32,
    pub phase: ToastPhase,
    pub hovered: bool,
    /// Absolute time (ms) at which the notification auto-dismisses
    deadline_ms: Option<f64>,
}

impl Notification {
    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    pub fn is_persistent(&self) -> bool {
        self.duration_ms == 0
    }

    /// Space separated class list for the toast element
    pub fn class_list(&self) -> String {
        let style = self.severity.style();
        let motion = match self.phase {
            ToastPhase::Visible => "translate-x-0 opacity-100",
            ToastPhase::Entering | ToastPhase::Leaving => "translate-x-full opacity-0",
        };
        format!(
            "{} border {} rounded-lg shadow-2xl p-4 flex items-start transform transition-all duration-300 ease-out {}",
            style.background, style.border, motion
        )
    }
}

/// Ordered set of on-screen notifications and their dismissal deadlines.
///
/// Time is passed in explicitly (milliseconds, any monotonic origin) so the
/// queue has no clock of its own; the DOM layer feeds it `Date.now()` and
/// schedules timers for the deadlines it reports.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    config: ToastConfig,
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Append a notification. `severity` is parsed leniently.
    pub fn show(&mut self, message: &str, severity: &str, duration_ms: u32, now_ms: f64) -> NotificationId {
        self.push(message, Severity::parse_lenient(severity), duration_ms, now_ms)
    }

    pub fn push(&mut self, message: &str, severity: Severity, duration_ms: u32, now_ms: f64) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let deadline_ms = (duration_ms > 0).then(|| now_ms + f64::from(duration_ms));
        self.items.push(Notification {
            id,
            message: message.to_string(),
            severity,
            duration_ms,
            phase: ToastPhase::Entering,
            hovered: false,
            deadline_ms,
        });
        id
    }

    pub fn success(&mut self, message: &str, duration_ms: Option<u32>, now_ms: f64) -> NotificationId {
        self.push_with_default(message, Severity::Success, duration_ms, now_ms)
    }

    pub fn error(&mut self, message: &str, duration_ms: Option<u32>, now_ms: f64) -> NotificationId {
        self.push_with_default(message, Severity::Error, duration_ms, now_ms)
    }

    pub fn warning(&mut self, message: &str, duration_ms: Option<u32>, now_ms: f64) -> NotificationId {
        self.push_with_default(message, Severity::Warning, duration_ms, now_ms)
    }

    pub fn info(&mut self, message: &str, duration_ms: Option<u32>, now_ms: f64) -> NotificationId {
        self.push_with_default(message, Severity::Info, duration_ms, now_ms)
    }

    fn push_with_default(
        &mut self,
        message: &str,
        severity: Severity,
        duration_ms: Option<u32>,
        now_ms: f64,
    ) -> NotificationId {
        let duration_ms = duration_ms.unwrap_or_else(|| severity.default_duration_ms(&self.config));
        self.push(message, severity, duration_ms, now_ms)
    }

    /// Entry transition may start; called one frame after the node was inserted.
    pub fn mark_visible(&mut self, id: NotificationId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.phase == ToastPhase::Entering => {
                item.phase = ToastPhase::Visible;
                true
            }
            _ => false,
        }
    }

    /// Start the exit transition. Returns false when the notification is
    /// already leaving or gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.phase != ToastPhase::Leaving => {
                item.phase = ToastPhase::Leaving;
                item.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the notification once its exit transition has ended.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Pointer entered the notification: clear its deadline.
    pub fn pause(&mut self, id: NotificationId) {
        if let Some(item) = self.get_mut(id) {
            item.hovered = true;
            item.deadline_ms = None;
        }
    }

    /// Pointer left: reschedule with the fixed hover grace period, not the
    /// remaining part of the original duration. Returns the new deadline.
    pub fn resume(&mut self, id: NotificationId, now_ms: f64) -> Option<f64> {
        let grace = f64::from(self.config.hover_grace_ms);
        let item = self.get_mut(id)?;
        item.hovered = false;
        if item.is_persistent() || item.phase == ToastPhase::Leaving {
            return None;
        }
        let deadline = now_ms + grace;
        item.deadline_ms = Some(deadline);
        Some(deadline)
    }

    /// Timer callback for `id`. Dismisses only when the stored deadline has
    /// really passed, so stale timers (after hover or dismiss) are ignored.
    pub fn expire(&mut self, id: NotificationId, now_ms: f64) -> bool {
        let due = self
            .get(id)
            .and_then(|item| item.deadline_ms)
            .is_some_and(|deadline| deadline <= now_ms);
        due && self.dismiss(id)
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: NotificationId) -> Option<&mut Notification> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> NotificationQueue {
        NotificationQueue::default()
    }

    #[test]
    fn test_unknown_severity_falls_back_to_info() {
        let mut q = queue();
        for raw in ["critical", "", "SUCCESSFUL", "debug"] {
            let id = q.show("hello", raw, 5000, 0.0);
            let item = q.get(id).unwrap();
            assert_eq!(item.severity, Severity::Info);
            assert_eq!(item.severity.style(), Severity::Info.style());
        }
        assert_eq!(Severity::parse_lenient(" Warning "), Severity::Warning);
    }

    #[test]
    fn test_insertion_order_and_unique_handles() {
        let mut q = queue();
        let a = q.info("first", None, 0.0);
        let b = q.error("second", None, 1.0);
        q.remove(a);
        let c = q.success("third", None, 2.0);

        assert_ne!(a, c);
        let order: Vec<_> = q.iter().map(|n| n.id).collect();
        assert_eq!(order, vec![b, c]);
    }

    #[test]
    fn test_default_durations() {
        let mut q = queue();
        let s = q.success("s", None, 0.0);
        let i = q.info("i", None, 0.0);
        let w = q.warning("w", None, 0.0);
        let e = q.error("e", None, 0.0);
        assert_eq!(q.get(s).unwrap().duration_ms, 5000);
        assert_eq!(q.get(i).unwrap().duration_ms, 5000);
        assert_eq!(q.get(w).unwrap().duration_ms, 6000);
        assert_eq!(q.get(e).unwrap().duration_ms, 7000);

        let custom = q.error("e", Some(1000), 0.0);
        assert_eq!(q.get(custom).unwrap().deadline_ms(), Some(1000.0));
    }

    #[test]
    fn test_zero_duration_never_expires() {
        let mut q = queue();
        let id = q.show("sticky", "warning", 0, 0.0);
        assert!(q.get(id).unwrap().deadline_ms().is_none());
        assert!(!q.expire(id, 1.0e12));

        // leaving the hover does not arm a timer either
        q.pause(id);
        assert_eq!(q.resume(id, 10.0), None);
        assert!(!q.expire(id, 1.0e12));
        assert_eq!(q.get(id).unwrap().phase, ToastPhase::Entering);
    }

    #[test]
    fn test_expires_at_deadline() {
        let mut q = queue();
        let id = q.show("bye", "success", 5000, 1000.0);
        assert!(!q.expire(id, 5999.0));
        assert!(q.expire(id, 6000.0));
        assert_eq!(q.get(id).unwrap().phase, ToastPhase::Leaving);
        assert!(q.remove(id));
        assert!(q.is_empty());
    }

    #[test]
    fn test_hover_prevents_removal_at_original_deadline() {
        let mut q = queue();
        let id = q.show("hover me", "info", 5000, 0.0);
        q.pause(id);
        assert!(!q.expire(id, 5000.0));

        // leaving resets to the grace period, not the remaining 5000
        let deadline = q.resume(id, 8000.0).unwrap();
        assert_eq!(deadline, 10_000.0);
        assert!(!q.expire(id, 9999.0));
        assert!(q.expire(id, 10_000.0));
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut q = queue();
        let id = q.info("x", None, 0.0);
        assert!(q.dismiss(id));
        assert!(!q.dismiss(id));
        assert!(q.remove(id));
        assert!(!q.dismiss(id));
        assert!(!q.remove(id));
    }

    #[test]
    fn test_mark_visible_only_from_entering() {
        let mut q = queue();
        let id = q.info("x", None, 0.0);
        assert!(q.get(id).unwrap().class_list().contains("translate-x-full"));
        assert!(q.mark_visible(id));
        assert!(!q.mark_visible(id));
        assert!(q.get(id).unwrap().class_list().contains("opacity-100"));
        q.dismiss(id);
        assert!(!q.mark_visible(id));
        assert!(q.get(id).unwrap().class_list().contains("opacity-0"));
    }
}
