use gloo::events::{EventListener, EventListenerOptions};
use shared::DeleteTarget;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlAnchorElement};

use crate::services::confirm::ConfirmController;
use crate::services::dom::{self, DomError};
use crate::services::logging::Logger;

pub const DELETE_LINK_SELECTOR: &str = r#"a[href*="/excluir/"], a[href*="/delete/"]"#;

const CARD_SELECTORS: [&str; 2] = [r#"[class*="bg-slate-800"]"#, r#"[class*="border-slate"]"#];
const CARD_TITLE_SELECTOR: &str = "h3, .text-xl, .font-bold:not(.text-3xl)";

/// Route every destructive link on the page through the confirmation dialog
pub fn install(confirm: &ConfirmController) -> Result<usize, DomError> {
    let links = dom::query_all(DELETE_LINK_SELECTOR)?;
    for link in &links {
        bind_link(link, confirm);
    }
    Logger::debug_with_component("delete-links", &format!("{} links intercepted", links.len()));
    Ok(links.len())
}

pub fn bind_link(link: &Element, confirm: &ConfirmController) {
    let confirm = confirm.clone();
    let anchor = link.clone();
    EventListener::new_with_options(link, "click", EventListenerOptions::enable_prevent_default(), move |event| {
        event.prevent_default();
        let target = DeleteTarget::new(link_href(&anchor), item_name(&anchor).as_deref());
        confirm.request_deletion(&target);
    })
    .forget();
}

/// Resolved href, so navigation does not depend on the current path
fn link_href(link: &Element) -> String {
    match link.dyn_ref::<HtmlAnchorElement>() {
        Some(anchor) => anchor.href(),
        None => link.get_attribute("href").unwrap_or_default(),
    }
}

/// Name of the item the link deletes, from the surrounding markup
pub fn item_name(link: &Element) -> Option<String> {
    let non_blank = |text: Option<String>| text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());

    let category = dom::closest(link, "[data-category-name]").and_then(|card| non_blank(card.get_attribute("data-category-name")));
    if category.is_some() {
        return category;
    }

    let row = dom::closest(link, "tr").or_else(|| dom::closest(link, "[data-transaction]"));
    let description = row
        .and_then(|row| dom::query_in(&row, ".transaction-description"))
        .and_then(|cell| non_blank(cell.text_content()));
    if description.is_some() {
        return description;
    }

    CARD_SELECTORS
        .iter()
        .find_map(|selector| dom::closest(link, selector))
        .and_then(|card| dom::query_in(&card, CARD_TITLE_SELECTOR))
        .and_then(|title| non_blank(title.text_content()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ModalConfig, ModalPhase, Navigator};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, href: &str) {
            self.visited.borrow_mut().push(href.to_string());
        }
    }

    fn fragment(html: &str) -> Element {
        let doc = dom::document().unwrap();
        let root = doc.create_element("div").unwrap();
        root.set_inner_html(html);
        dom::body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    fn test_item_name_sources() {
        let root = fragment(
            r#"<div data-category-name="Mercado"><a id="c" href="/categorias/1/excluir/">x</a></div>
               <table><tr><td class="transaction-description"> Aluguel </td><td><a id="t" href="/transacoes/2/excluir/">x</a></td></tr></table>
               <div class="bg-slate-800 p-4"><span class="font-bold text-3xl">R$ 10</span><h3>Conta X</h3><a id="a" href="/contas/3/delete/">x</a></div>
               <a id="bare" href="/contas/4/excluir/">x</a>"#,
        );
        let link = |id: &str| dom::query_in(&root, &format!("#{}", id)).unwrap();

        assert_eq!(item_name(&link("c")).as_deref(), Some("Mercado"));
        assert_eq!(item_name(&link("t")).as_deref(), Some("Aluguel"));
        assert_eq!(item_name(&link("a")).as_deref(), Some("Conta X"));
        assert_eq!(item_name(&link("bare")), None);
    }

    #[wasm_bindgen_test]
    fn test_click_opens_dialog_and_navigates_only_on_confirm() {
        let root = fragment(r#"<div class="bg-slate-800"><h3>Conta X</h3><a id="del" href="/contas/9/excluir/">Excluir</a></div>"#);
        let navigator = Rc::new(RecordingNavigator::default());
        let confirm = ConfirmController::with_navigator(ModalConfig::default(), navigator.clone(), "modal-root-links");
        let link = dom::query_in(&root, "#del").unwrap();
        bind_link(&link, &confirm);

        link.dyn_ref::<HtmlElement>().unwrap().click();
        assert_eq!(confirm.phase(), ModalPhase::Opening);
        assert!(confirm.view().prompt.contains("Conta X"));
        assert!(navigator.visited.borrow().is_empty());

        confirm.confirm();
        let visited = navigator.visited.borrow();
        assert_eq!(visited.len(), 1);
        assert!(visited[0].ends_with("/contas/9/excluir/"));
    }
}
