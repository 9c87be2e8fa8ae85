use web_sys::{HtmlElement, MouseEvent, TransitionEvent};
use yew::prelude::*;

use super::dispatched_on;
use crate::services::confirm::ConfirmController;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub controller: ConfirmController,
}

/// The page's single destructive-action confirmation dialog
#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let force_update = use_force_update();
    let confirm_button = use_node_ref();
    let backdrop = use_node_ref();
    let panel = use_node_ref();

    {
        let controller = props.controller.clone();
        use_effect_with((), move |_| {
            controller.subscribe(Callback::from(move |_| force_update.force_update()));
            || ()
        });
    }

    let view = props.controller.view();

    {
        // every request focuses the confirm button, not only the first one
        let confirm_button = confirm_button.clone();
        let displayed = view.displayed;
        use_effect_with(view.focus_request, move |_| {
            if displayed {
                if let Some(button) = confirm_button.cast::<HtmlElement>() {
                    let _ = button.focus();
                }
            }
            || ()
        });
    }

    let on_backdrop_click = {
        let controller = props.controller.clone();
        let backdrop = backdrop.clone();
        Callback::from(move |e: MouseEvent| {
            // clicks inside the panel bubble up here too
            if dispatched_on(&e, &backdrop) {
                controller.close();
            }
        })
    };

    let on_cancel_click = {
        let controller = props.controller.clone();
        Callback::from(move |_: MouseEvent| controller.close())
    };

    let on_confirm_click = {
        let controller = props.controller.clone();
        Callback::from(move |_: MouseEvent| controller.confirm())
    };

    let on_transition_end = {
        let controller = props.controller.clone();
        let panel = panel.clone();
        Callback::from(move |e: TransitionEvent| {
            if dispatched_on(&e, &panel) {
                controller.transition_ended();
            }
        })
    };

    let root_class = classes!(
        "fixed",
        "inset-0",
        "z-[9998]",
        (!view.displayed).then_some("hidden")
    );
    let panel_class = if view.entered {
        classes!("scale-100", "opacity-100")
    } else {
        classes!("scale-95", "opacity-0")
    };
    let backdrop_class = if view.entered { "opacity-100" } else { "opacity-0" };

    html! {
        <div
            id="shared-delete-modal"
            class={root_class}
            role="dialog"
            aria-modal="true"
            aria-labelledby="delete-modal-title"
        >
            <div class={classes!("absolute", "inset-0", "bg-black/60", "backdrop-blur-sm", "transition-opacity", "duration-200", backdrop_class)}></div>
            <div
                id="delete-modal-backdrop"
                ref={backdrop}
                class="relative flex min-h-full items-center justify-center p-4"
                onclick={on_backdrop_click}
            >
                <div
                    id="delete-modal-panel"
                    ref={panel}
                    class={classes!("w-full", "max-w-md", "rounded-xl", "bg-slate-800", "border", "border-slate-700", "shadow-2xl", "transform", "transition-all", "duration-200", panel_class)}
                    ontransitionend={on_transition_end}
                >
                    <div class="p-6">
                        <div class="flex items-center gap-3 mb-4">
                            <div class="flex h-10 w-10 items-center justify-center rounded-full bg-red-500/20">
                                <svg class="w-6 h-6 text-red-400" fill="none" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor">
                                    <path stroke-linecap="round" stroke-linejoin="round" d="M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z" />
                                </svg>
                            </div>
                            <h3 id="delete-modal-title" class="text-lg font-semibold text-white">{"Confirmar Exclusão"}</h3>
                        </div>
                        <p id="delete-modal-message" class="text-slate-300 mb-2">{view.prompt.clone()}</p>
                        <p class="text-sm text-slate-500">{"Esta ação não pode ser desfeita."}</p>
                    </div>
                    <div class="flex justify-end gap-3 px-6 pb-6">
                        <button
                            id="delete-modal-cancel"
                            type="button"
                            class="px-4 py-2 rounded-lg bg-slate-700 text-slate-200 hover:bg-slate-600 transition-colors"
                            onclick={on_cancel_click}
                        >
                            {"Cancelar"}
                        </button>
                        <button
                            id="delete-modal-confirm"
                            type="button"
                            ref={confirm_button}
                            class="px-4 py-2 rounded-lg bg-red-600 text-white hover:bg-red-700 transition-colors"
                            onclick={on_confirm_click}
                        >
                            {"Confirmar Exclusão"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
