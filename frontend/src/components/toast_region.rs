use shared::{Notification, ToastPhase};
use web_sys::{MouseEvent, TransitionEvent};
use yew::prelude::*;

use super::dispatched_on;
use crate::services::notifier::Notifier;

#[derive(Properties, PartialEq)]
pub struct ToastRegionProps {
    pub notifier: Notifier,
}

/// Contents of the toast container, re-rendered whenever the queue changes
#[function_component(ToastRegion)]
pub fn toast_region(props: &ToastRegionProps) -> Html {
    let force_update = use_force_update();

    {
        let notifier = props.notifier.clone();
        use_effect_with((), move |_| {
            notifier.subscribe(Callback::from(move |_| force_update.force_update()));
            || ()
        });
    }

    let notifications = props.notifier.snapshot();

    html! {
        <>
            {for notifications.into_iter().map(|notification| html! {
                <ToastItem
                    key={notification.id.value()}
                    notification={notification.clone()}
                    notifier={props.notifier.clone()}
                />
            })}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub notification: Notification,
    pub notifier: Notifier,
}

#[function_component(ToastItem)]
pub fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.notification.id;
    let style = props.notification.severity.style();
    let node = use_node_ref();

    let on_mouse_enter = {
        let notifier = props.notifier.clone();
        let persistent = props.notification.is_persistent();
        Callback::from(move |_: MouseEvent| {
            if !persistent {
                notifier.pause(id);
            }
        })
    };

    let on_mouse_leave = {
        let notifier = props.notifier.clone();
        let persistent = props.notification.is_persistent();
        Callback::from(move |_: MouseEvent| {
            if !persistent {
                notifier.resume(id);
            }
        })
    };

    let on_close_click = {
        let notifier = props.notifier.clone();
        Callback::from(move |_: MouseEvent| notifier.dismiss(id))
    };

    let on_transition_end = {
        let notifier = props.notifier.clone();
        let leaving = props.notification.phase == ToastPhase::Leaving;
        let node = node.clone();
        Callback::from(move |e: TransitionEvent| {
            // ignore transitions bubbling up from the close button
            if leaving && dispatched_on(&e, &node) {
                notifier.finish_exit(id);
            }
        })
    };

    html! {
        <div
            id={id.to_string()}
            ref={node}
            class={props.notification.class_list()}
            onmouseenter={on_mouse_enter}
            onmouseleave={on_mouse_leave}
            ontransitionend={on_transition_end}
        >
            <svg class={classes!("w-6", "h-6", style.icon, "mr-3", "flex-shrink-0")} fill="none" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor">
                <path stroke-linecap="round" stroke-linejoin="round" d={style.icon_path} />
            </svg>
            <p class={classes!(style.text, "flex-1", "text-sm", "font-medium")}>{&props.notification.message}</p>
            <button
                type="button"
                class={classes!("ml-3", style.text, "hover:opacity-75", "transition-opacity")}
                aria-label="Fechar"
                onclick={on_close_click}
            >
                <svg class="w-5 h-5" fill="none" viewBox="0 0 24 24" stroke-width="2" stroke="currentColor">
                    <path stroke-linecap="round" stroke-linejoin="round" d="M6 18L18 6M6 6l12 12" />
                </svg>
            </button>
        </div>
    }
}
