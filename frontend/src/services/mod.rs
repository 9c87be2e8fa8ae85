pub mod config;
pub mod confirm;
pub mod dom;
pub mod logging;
pub mod notifier;

pub use confirm::ConfirmController;
pub use logging::Logger;
pub use notifier::Notifier;
