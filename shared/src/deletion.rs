use std::rc::Rc;

use crate::confirm::{ConfirmModal, TransitionToken};

/// Action bound to the confirm control
pub type ConfirmAction = Box<dyn FnOnce()>;

/// Label used when the link context names no item
pub const FALLBACK_ITEM_LABEL: &str = "este item";

/// Performs the full-page navigation once a deletion is confirmed
pub trait Navigator {
    fn navigate(&self, href: &str);
}

/// A destructive link intercepted on the page
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTarget {
    pub href: String,
    pub item_name: Option<String>,
}

impl DeleteTarget {
    pub fn new(href: impl Into<String>, item_name: Option<&str>) -> Self {
        let item_name = item_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Self {
            href: href.into(),
            item_name,
        }
    }

    pub fn item_label(&self) -> &str {
        self.item_name.as_deref().unwrap_or(FALLBACK_ITEM_LABEL)
    }

    pub fn prompt(&self) -> String {
        format!("Tem certeza que deseja excluir \"{}\"?", self.item_label())
    }
}

/// Whether `href` points at a deletion endpoint
pub fn is_delete_href(href: &str) -> bool {
    href.contains("/excluir/") || href.contains("/delete/")
}

/// Open the confirmation for `target`; navigation happens only on confirm.
pub fn request_deletion<N>(
    modal: &mut ConfirmModal<ConfirmAction>,
    target: &DeleteTarget,
    navigator: Rc<N>,
) -> TransitionToken
where
    N: Navigator + ?Sized + 'static,
{
    let href = target.href.clone();
    modal.show(target.prompt(), Box::new(move || navigator.navigate(&href)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, href: &str) {
            self.visited.borrow_mut().push(href.to_string());
        }
    }

    #[test]
    fn test_delete_link_navigates_only_after_confirmation() {
        let navigator = Rc::new(RecordingNavigator::default());
        let mut modal: ConfirmModal<ConfirmAction> = ConfirmModal::new();
        let target = DeleteTarget::new("/contas/7/excluir/", Some("  Conta X "));

        let entry = request_deletion(&mut modal, &target, navigator.clone());
        assert!(modal.prompt().contains("Conta X"));
        assert!(modal.is_displayed());
        assert!(navigator.visited.borrow().is_empty());

        modal.entry_finished(entry);
        let action = modal.confirm().unwrap();
        assert!(navigator.visited.borrow().is_empty());
        action();
        assert_eq!(*navigator.visited.borrow(), vec!["/contas/7/excluir/".to_string()]);
    }

    #[test]
    fn test_cancel_never_navigates() {
        let navigator = Rc::new(RecordingNavigator::default());
        let mut modal: ConfirmModal<ConfirmAction> = ConfirmModal::new();
        request_deletion(&mut modal, &DeleteTarget::new("/categorias/3/excluir/", Some("Mercado")), navigator.clone());

        modal.close();
        assert!(modal.confirm().is_none());
        assert!(navigator.visited.borrow().is_empty());
    }

    #[test]
    fn test_prompt_fallback_label() {
        assert_eq!(
            DeleteTarget::new("/x/excluir/", None).prompt(),
            "Tem certeza que deseja excluir \"este item\"?"
        );
        assert_eq!(DeleteTarget::new("/x/excluir/", Some("   ")).item_label(), FALLBACK_ITEM_LABEL);
    }

    #[test]
    fn test_is_delete_href() {
        assert!(is_delete_href("/transacoes/12/excluir/"));
        assert!(is_delete_href("https://app.example/accounts/3/delete/"));
        assert!(!is_delete_href("/transacoes/12/editar/"));
    }
}
