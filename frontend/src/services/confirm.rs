use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use shared::{ConfirmAction, ConfirmModal, DeleteTarget, ModalConfig, ModalPhase, Navigator, TransitionToken};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::Callback;

use crate::components::confirm_dialog::{ConfirmDialog, ConfirmDialogProps};
use crate::services::dom::{self, BrowserNavigator, DomError};
use crate::services::logging::Logger;

pub const MODAL_MOUNT_ID: &str = "shared-delete-modal-root";

const TRANSITION_SLACK_MS: u32 = 50;

/// Page-wide handle on the confirmation dialog.
///
/// One dialog element serves every request. `show` stores the action in the
/// shared state and the dialog's confirm button always dispatches to the
/// action stored at click time.
#[derive(Clone)]
pub struct ConfirmController {
    inner: Rc<ConfirmInner>,
}

struct ConfirmInner {
    config: ModalConfig,
    modal: RefCell<ConfirmModal<ConfirmAction>>,
    navigator: Rc<dyn Navigator>,
    /// Entry classes applied; set one tick after the dialog is displayed
    entering: Cell<bool>,
    /// Bumped by every request so the dialog refocuses its confirm button
    focus_requests: Cell<u64>,
    redraw: RefCell<Option<Callback<()>>>,
    fallback: RefCell<Option<Timeout>>,
    key_listener: RefCell<Option<EventListener>>,
    mount_id: String,
    mounted: Cell<bool>,
}

impl PartialEq for ConfirmController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// What the dialog component renders
#[derive(Debug, Clone, PartialEq)]
pub struct DialogView {
    pub phase: ModalPhase,
    pub prompt: String,
    pub entered: bool,
    /// `false` only while Closed
    pub displayed: bool,
    pub focus_request: u64,
}

impl ConfirmController {
    pub fn new(config: ModalConfig) -> Self {
        Self::with_navigator(config, Rc::new(BrowserNavigator), MODAL_MOUNT_ID)
    }

    pub fn with_navigator(config: ModalConfig, navigator: Rc<dyn Navigator>, mount_id: &str) -> Self {
        Self {
            inner: Rc::new(ConfirmInner {
                config,
                modal: RefCell::new(ConfirmModal::new()),
                navigator,
                entering: Cell::new(false),
                focus_requests: Cell::new(0),
                redraw: RefCell::new(None),
                fallback: RefCell::new(None),
                key_listener: RefCell::new(None),
                mount_id: mount_id.to_string(),
                mounted: Cell::new(false),
            }),
        }
    }

    fn from_weak(weak: &Weak<ConfirmInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Ask for confirmation; `on_confirm` runs at most once
    pub fn show(&self, prompt: &str, on_confirm: impl FnOnce() + 'static) {
        let prompt = prompt.to_string();
        self.open_with(move |modal| modal.show(prompt, Box::new(on_confirm)));
    }

    /// Confirmation for a destructive link; navigates to its href on confirm
    pub fn request_deletion(&self, target: &DeleteTarget) {
        let navigator = self.inner.navigator.clone();
        self.open_with(|modal| shared::request_deletion(modal, target, navigator));
    }

    /// Hide the dialog without running the pending action
    pub fn close(&self) {
        let token = self.inner.modal.borrow_mut().close();
        if let Some(token) = token {
            self.begin_exit(token);
        }
    }

    /// Run the pending action once and hide the dialog
    pub fn confirm(&self) {
        let (action, token) = {
            let mut modal = self.inner.modal.borrow_mut();
            let action = modal.confirm();
            (action, modal.token())
        };
        if let Some(action) = action {
            self.begin_exit(token);
            action();
        }
    }

    /// Keyboard handling while the dialog is up
    pub fn handle_key(&self, key: &str) {
        let token = self.inner.modal.borrow_mut().handle_key(key);
        if let Some(token) = token {
            Logger::debug_with_component("confirm-modal", "closed with Escape");
            self.begin_exit(token);
        }
    }

    /// `transitionend` on the dialog content
    pub fn transition_ended(&self) {
        let (phase, token) = {
            let modal = self.inner.modal.borrow();
            (modal.phase(), modal.token())
        };
        match phase {
            ModalPhase::Opening if self.inner.entering.get() => self.finish_entry(token),
            ModalPhase::Closing => self.finish_exit(token),
            _ => {}
        }
    }

    pub fn view(&self) -> DialogView {
        let modal = self.inner.modal.borrow();
        DialogView {
            phase: modal.phase(),
            prompt: modal.prompt().to_string(),
            entered: modal.phase() == ModalPhase::Open
                || (modal.phase() == ModalPhase::Opening && self.inner.entering.get()),
            displayed: modal.is_displayed(),
            focus_request: self.inner.focus_requests.get(),
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.inner.modal.borrow().phase()
    }

    pub fn subscribe(&self, redraw: Callback<()>) {
        *self.inner.redraw.borrow_mut() = Some(redraw);
    }

    fn open_with(&self, bind: impl FnOnce(&mut ConfirmModal<ConfirmAction>) -> TransitionToken) {
        if let Err(err) = self.ensure_mounted() {
            Logger::error_with_component("confirm-modal", &format!("dialog unavailable: {}", err));
        }

        let (token, reopened) = {
            let mut modal = self.inner.modal.borrow_mut();
            let before = modal.token();
            let token = bind(&mut modal);
            (token, token != before)
        };
        self.inner.focus_requests.set(self.inner.focus_requests.get() + 1);
        if !reopened {
            // already up: only the prompt and action changed
            self.redraw();
            return;
        }

        self.inner.entering.set(false);
        self.redraw();

        let config = &self.inner.config;
        let weak = Rc::downgrade(&self.inner);
        Timeout::new(config.entry_delay_ms, move || {
            if let Some(controller) = ConfirmController::from_weak(&weak) {
                if controller.inner.modal.borrow().token() == token {
                    controller.inner.entering.set(true);
                    controller.redraw();
                }
            }
        })
        .forget();

        let weak = Rc::downgrade(&self.inner);
        let fallback_ms = config.entry_delay_ms + config.entry_transition_ms + TRANSITION_SLACK_MS;
        self.set_fallback(Timeout::new(fallback_ms, move || {
            if let Some(controller) = ConfirmController::from_weak(&weak) {
                controller.inner.entering.set(true);
                controller.finish_entry(token);
            }
        }));
    }

    fn finish_entry(&self, token: TransitionToken) {
        let changed = self.inner.modal.borrow_mut().entry_finished(token);
        if changed {
            self.redraw();
        }
    }

    fn begin_exit(&self, token: TransitionToken) {
        self.inner.entering.set(false);
        self.redraw();

        let weak = Rc::downgrade(&self.inner);
        self.set_fallback(Timeout::new(
            self.inner.config.exit_transition_ms + TRANSITION_SLACK_MS,
            move || {
                if let Some(controller) = ConfirmController::from_weak(&weak) {
                    controller.finish_exit(token);
                }
            },
        ));
    }

    fn finish_exit(&self, token: TransitionToken) {
        let changed = self.inner.modal.borrow_mut().exit_finished(token);
        if changed {
            self.redraw();
        }
    }

    fn set_fallback(&self, timer: Timeout) {
        // dropping the previous timer cancels it
        *self.inner.fallback.borrow_mut() = Some(timer);
    }

    fn redraw(&self) {
        let redraw = self.inner.redraw.borrow().clone();
        if let Some(redraw) = redraw {
            redraw.emit(());
        }
    }

    /// Create the dialog and its Escape listener on first use
    fn ensure_mounted(&self) -> Result<(), DomError> {
        if self.inner.mounted.get() {
            return Ok(());
        }
        let document = dom::document()?;
        let root = document.create_element("div")?;
        root.set_id(&self.inner.mount_id);
        dom::body()?.append_child(&root)?;
        yew::Renderer::<ConfirmDialog>::with_root_and_props(root, ConfirmDialogProps { controller: self.clone() }).render();

        let weak = Rc::downgrade(&self.inner);
        let listener = EventListener::new(&document, "keydown", move |event| {
            let Some(controller) = ConfirmController::from_weak(&weak) else {
                return;
            };
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                controller.handle_key(&event.key());
            }
        });
        *self.inner.key_listener.borrow_mut() = Some(listener);
        self.inner.mounted.set(true);
        Ok(())
    }
}
