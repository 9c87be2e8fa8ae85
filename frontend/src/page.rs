//! Page boot: one notifier and one confirmation dialog per page, shared by
//! every enhancer.

use anyhow::{Context, Result};
use shared::UiConfig;

use crate::enhancers::{
    category_filter, color_picker, currency, delete_links, flash_messages, loading_state, phone, unsaved_changes, validation,
};
use crate::services::config::load_ui_config;
use crate::services::{ConfirmController, Logger, Notifier};

pub struct Page {
    pub config: UiConfig,
    pub notifier: Notifier,
    pub confirm: ConfirmController,
}

impl Page {
    pub fn new(config: UiConfig) -> Self {
        Self {
            notifier: Notifier::new(config.toast.clone()),
            confirm: ConfirmController::new(config.modal.clone()),
            config,
        }
    }

    /// Attach every enhancer. A failing enhancer is logged and the rest still run.
    pub fn enhance(&self) {
        run("flash messages", || {
            flash_messages::install(&self.notifier, &self.config.toast).context("reading flash messages")?;
            Ok(())
        });
        run("delete links", || {
            delete_links::install(&self.confirm).context("intercepting delete links")?;
            Ok(())
        });
        // validators first: the submit handlers below skip cancelled submits
        run("validation", || {
            validation::install(&self.notifier, &self.config.validation).context("binding form validators")?;
            Ok(())
        });
        run("currency", || {
            currency::install().context("masking currency inputs")?;
            Ok(())
        });
        run("phone", || {
            phone::install().context("masking phone input")?;
            Ok(())
        });
        run("category filter", || {
            category_filter::install().context("filtering categories")?;
            Ok(())
        });
        run("color picker", || {
            color_picker::install().context("building colour picker")?;
            Ok(())
        });
        run("unsaved changes", || {
            unsaved_changes::install().context("tracking form edits")?;
            Ok(())
        });
        run("loading state", || {
            loading_state::install().context("binding submit buttons")?;
            Ok(())
        });
    }
}

fn run(name: &str, enhancer: impl FnOnce() -> Result<()>) {
    if let Err(err) = enhancer() {
        Logger::error_with_component("boot", &format!("{} failed: {:#}", name, err));
    }
}

pub fn boot() {
    let config = load_ui_config();
    Logger::init(&config.log);
    let page = Page::new(config);
    page.enhance();
    Logger::info_with_component("boot", "page enhanced");
}
