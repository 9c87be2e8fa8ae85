//! Browser-independent state and rules behind the finance UI enhancements.
//!
//! Nothing here touches the DOM, so every module is tested natively. The
//! `frontend` crate binds these types to page elements.

pub mod category_filter;
pub mod color;
pub mod config;
pub mod confirm;
pub mod currency;
pub mod deletion;
pub mod embedded;
pub mod flash;
pub mod forms;
pub mod notification;
pub mod phone;
pub mod validation;

pub use category_filter::{CategoryFilter, FilterOutcome};
pub use config::{ConfigError, LogConfig, LogLevel, ModalConfig, ToastConfig, UiConfig, ValidationConfig};
pub use confirm::{ConfirmModal, ModalPhase, TransitionToken};
pub use deletion::{request_deletion, ConfirmAction, DeleteTarget, Navigator};
pub use embedded::{CategoryOption, EmbeddedDataError};
pub use flash::{FlashMessage, ScheduledFlash};
pub use forms::DirtyTracker;
pub use notification::{Notification, NotificationId, NotificationQueue, Severity, SeverityStyle, ToastPhase};
pub use validation::{Choice, FieldError, FieldKind, FieldResult, FieldSnapshot, NameField};
