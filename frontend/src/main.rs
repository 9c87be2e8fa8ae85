mod components;
mod enhancers;
mod page;
mod services;

use gloo::events::EventListener;

fn main() {
    let document = match services::dom::document() {
        Ok(document) => document,
        Err(err) => {
            services::Logger::error_with_component("boot", &err.to_string());
            return;
        }
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| page::boot()).forget();
    } else {
        page::boot();
    }
}
