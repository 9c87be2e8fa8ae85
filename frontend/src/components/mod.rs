pub mod confirm_dialog;
pub mod toast_region;

pub use confirm_dialog::ConfirmDialog;
pub use toast_region::ToastRegion;

use wasm_bindgen::JsCast;
use web_sys::{Event, Node};
use yew::NodeRef;

/// Whether `event` was dispatched on `node` itself rather than a descendant.
///
/// Yew delegates listeners to the app root, so `current_target` is the root
/// and cannot be compared against `target`.
pub(crate) fn dispatched_on(event: &Event, node: &NodeRef) -> bool {
    match (event.target(), node.get()) {
        (Some(target), Some(node)) => target
            .dyn_ref::<Node>()
            .is_some_and(|target| target.is_same_node(Some(&node))),
        _ => false,
    }
}
