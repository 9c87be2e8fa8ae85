//! # Notifier
//!
//! Page-wide handle on the toast queue. Constructed once during boot and
//! cloned into every enhancer that reports something to the user.
//!
//! The queue itself lives in `shared`; this side owns the timers and the
//! container. Auto-dismiss timers are `gloo` timeouts kept per notification,
//! so pausing on hover or dismissing early is just dropping the timeout.

use gloo::timers::callback::Timeout;
use shared::{Notification, NotificationId, NotificationQueue, Severity, ToastConfig};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use yew::Callback;

use crate::components::toast_region::{ToastRegion, ToastRegionProps};
use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;

pub const TOAST_CONTAINER_ID: &str = "toast-container";

/// Delay between inserting a toast and starting its slide-in
const ENTRY_FRAME_MS: u32 = 16;
/// Extra time granted to a transition before the fallback timer completes it
const TRANSITION_SLACK_MS: u32 = 50;
/// `setTimeout` takes a signed 32-bit delay; longer ones fire at once
const MAX_TIMER_DELAY_MS: u32 = i32::MAX as u32;

#[derive(Clone)]
pub struct Notifier {
    inner: Rc<NotifierInner>,
}

struct NotifierInner {
    container_id: String,
    queue: RefCell<NotificationQueue>,
    dismiss_timers: RefCell<HashMap<NotificationId, Timeout>>,
    exit_timers: RefCell<HashMap<NotificationId, Timeout>>,
    redraw: RefCell<Option<Callback<()>>>,
    mounted: Cell<bool>,
}

impl PartialEq for Notifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Notifier {
    pub fn new(config: ToastConfig) -> Self {
        Self::with_container_id(config, TOAST_CONTAINER_ID)
    }

    pub fn with_container_id(config: ToastConfig, container_id: &str) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                container_id: container_id.to_string(),
                queue: RefCell::new(NotificationQueue::new(config)),
                dismiss_timers: RefCell::new(HashMap::new()),
                exit_timers: RefCell::new(HashMap::new()),
                redraw: RefCell::new(None),
                mounted: Cell::new(false),
            }),
        }
    }

    fn from_weak(weak: &Weak<NotifierInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Queue a toast. Unknown severities are shown as info.
    pub fn show(&self, message: &str, severity: &str, duration_ms: u32) -> NotificationId {
        self.notify(Severity::parse_lenient(severity), message, Some(duration_ms))
    }

    pub fn success(&self, message: &str) -> NotificationId {
        self.notify(Severity::Success, message, None)
    }

    pub fn error(&self, message: &str) -> NotificationId {
        self.notify(Severity::Error, message, None)
    }

    pub fn warning(&self, message: &str) -> NotificationId {
        self.notify(Severity::Warning, message, None)
    }

    pub fn info(&self, message: &str) -> NotificationId {
        self.notify(Severity::Info, message, None)
    }

    /// Queue a toast; `None` uses the severity's default duration
    pub fn notify(&self, severity: Severity, message: &str, duration_ms: Option<u32>) -> NotificationId {
        if let Err(err) = self.ensure_mounted() {
            Logger::error_with_component("notifier", &format!("toast container unavailable: {}", err));
        }

        let now = dom::now_ms();
        let (id, deadline) = {
            let mut queue = self.inner.queue.borrow_mut();
            let id = match severity {
                Severity::Success => queue.success(message, duration_ms, now),
                Severity::Error => queue.error(message, duration_ms, now),
                Severity::Warning => queue.warning(message, duration_ms, now),
                Severity::Info => queue.info(message, duration_ms, now),
            };
            (id, queue.get(id).and_then(Notification::deadline_ms))
        };
        Logger::debug_with_component("notifier", &format!("{} {} queued", severity, id));

        if let Some(deadline) = deadline {
            self.arm_dismiss_timer(id, deadline);
        }

        let weak = Rc::downgrade(&self.inner);
        Timeout::new(ENTRY_FRAME_MS, move || {
            if let Some(notifier) = Notifier::from_weak(&weak) {
                let changed = notifier.inner.queue.borrow_mut().mark_visible(id);
                if changed {
                    notifier.redraw();
                }
            }
        })
        .forget();

        self.redraw();
        id
    }

    /// Start removing `id`. No-op when it is already leaving or gone.
    pub fn dismiss(&self, id: NotificationId) {
        let dismissed = self.inner.queue.borrow_mut().dismiss(id);
        if dismissed {
            self.begin_exit(id);
        }
    }

    /// Exit transition of `id` ended
    pub fn finish_exit(&self, id: NotificationId) {
        self.inner.exit_timers.borrow_mut().remove(&id);
        let removed = self.inner.queue.borrow_mut().remove(id);
        if removed {
            self.redraw();
        }
    }

    /// Pointer entered a toast
    pub fn pause(&self, id: NotificationId) {
        self.inner.queue.borrow_mut().pause(id);
        self.inner.dismiss_timers.borrow_mut().remove(&id);
    }

    /// Pointer left a toast: rearm with the hover grace period
    pub fn resume(&self, id: NotificationId) {
        let deadline = self.inner.queue.borrow_mut().resume(id, dom::now_ms());
        if let Some(deadline) = deadline {
            self.arm_dismiss_timer(id, deadline);
        }
    }

    /// Notifications in display order
    pub fn snapshot(&self) -> Vec<Notification> {
        self.inner.queue.borrow().iter().cloned().collect()
    }

    /// Register the region's re-render callback
    pub fn subscribe(&self, redraw: Callback<()>) {
        *self.inner.redraw.borrow_mut() = Some(redraw);
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    fn arm_dismiss_timer(&self, id: NotificationId, deadline: f64) {
        let (delay, capped) = timer_delay(deadline - dom::now_ms());
        let weak = Rc::downgrade(&self.inner);
        let timer = Timeout::new(delay, move || {
            let Some(notifier) = Notifier::from_weak(&weak) else {
                return;
            };
            if capped {
                // still short of the deadline: wait for the rest
                let current = notifier.inner.queue.borrow().get(id).and_then(Notification::deadline_ms);
                if current == Some(deadline) {
                    notifier.arm_dismiss_timer(id, deadline);
                }
                return;
            }
            notifier.inner.dismiss_timers.borrow_mut().remove(&id);
            // timers may fire a little early; a moved deadline still wins
            let now = dom::now_ms().max(deadline);
            let expired = notifier.inner.queue.borrow_mut().expire(id, now);
            if expired {
                notifier.begin_exit(id);
            }
        });
        // replacing drops, and so cancels, any earlier timer for this toast
        self.inner.dismiss_timers.borrow_mut().insert(id, timer);
    }

    fn begin_exit(&self, id: NotificationId) {
        self.inner.dismiss_timers.borrow_mut().remove(&id);

        // `transitionend` normally completes the exit; this covers reduced motion
        let exit_ms = self.inner.queue.borrow().config().exit_transition_ms + TRANSITION_SLACK_MS;
        let weak = Rc::downgrade(&self.inner);
        let fallback = Timeout::new(exit_ms, move || {
            if let Some(notifier) = Notifier::from_weak(&weak) {
                notifier.finish_exit(id);
            }
        });
        self.inner.exit_timers.borrow_mut().insert(id, fallback);
        self.redraw();
    }

    fn redraw(&self) {
        let redraw = self.inner.redraw.borrow().clone();
        if let Some(redraw) = redraw {
            redraw.emit(());
        }
    }

    /// Create the single toast container on first use
    fn ensure_mounted(&self) -> Result<(), DomError> {
        if self.inner.mounted.get() {
            return Ok(());
        }
        let document = dom::document()?;
        let container = document.create_element("div")?;
        container.set_id(&self.inner.container_id);
        container.set_class_name("fixed top-4 right-4 z-[9999] space-y-3 max-w-sm");
        container.set_attribute("role", "alert")?;
        container.set_attribute("aria-live", "polite")?;
        dom::body()?.append_child(&container)?;

        yew::Renderer::<ToastRegion>::with_root_and_props(container, ToastRegionProps { notifier: self.clone() }).render();
        self.inner.mounted.set(true);
        Logger::debug_with_component("notifier", "toast container mounted");
        Ok(())
    }
}

/// Timer delay for `remaining_ms`, and whether it was capped short of it
fn timer_delay(remaining_ms: f64) -> (u32, bool) {
    let remaining = remaining_ms.max(0.0).ceil();
    if remaining > f64::from(MAX_TIMER_DELAY_MS) {
        (MAX_TIMER_DELAY_MS, true)
    } else {
        (remaining as u32, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_container_created_lazily_once() {
        let notifier = Notifier::with_container_id(ToastConfig::default(), "toast-container-lazy");
        let document = dom::document().unwrap();
        assert!(document.get_element_by_id("toast-container-lazy").is_none());
        assert!(!notifier.is_mounted());

        notifier.info("Conta criada");
        notifier.show("Sem categoria", "unknown", 0);
        assert!(notifier.is_mounted());
        assert_eq!(dom::query_all("#toast-container-lazy").unwrap().len(), 1);

        let items = notifier.snapshot();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].severity, Severity::Info);
        assert_eq!(items[1].duration_ms, 0);
    }

    #[wasm_bindgen_test]
    fn test_dismiss_then_finish_exit_removes() {
        let notifier = Notifier::with_container_id(ToastConfig::default(), "toast-container-dismiss");
        let id = notifier.error("Falhou");
        notifier.dismiss(id);
        notifier.dismiss(id);
        assert_eq!(notifier.snapshot().len(), 1);
        notifier.finish_exit(id);
        assert!(notifier.snapshot().is_empty());
        // unknown handle
        notifier.dismiss(id);
    }

    #[wasm_bindgen_test]
    fn test_pause_cancels_auto_dismiss_timer() {
        let notifier = Notifier::with_container_id(ToastConfig::default(), "toast-container-pause");
        let id = notifier.success("Salvo");
        assert!(notifier.inner.dismiss_timers.borrow().contains_key(&id));
        notifier.pause(id);
        assert!(!notifier.inner.dismiss_timers.borrow().contains_key(&id));
        notifier.resume(id);
        assert!(notifier.inner.dismiss_timers.borrow().contains_key(&id));
    }

    #[wasm_bindgen_test]
    fn test_timer_delay_is_capped() {
        assert_eq!(timer_delay(-5.0), (0, false));
        assert_eq!(timer_delay(1000.2), (1001, false));
        assert_eq!(timer_delay(f64::from(u32::MAX)), (MAX_TIMER_DELAY_MS, true));
    }

    #[wasm_bindgen_test]
    async fn test_very_long_toast_stays_up() {
        let notifier = Notifier::with_container_id(ToastConfig::default(), "toast-container-long");
        let id = notifier.show("Sincronizando", "info", u32::MAX);
        gloo::timers::future::TimeoutFuture::new(40).await;
        let items = notifier.snapshot();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].phase, shared::ToastPhase::Visible);
        assert!(notifier.inner.dismiss_timers.borrow().contains_key(&id));
    }
}
