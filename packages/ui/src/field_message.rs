use dioxus::prelude::*;

/// Inline error under a field. Renders nothing without a message.
#[component]
pub fn FieldMessage(#[props(!optional)] message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            span { class: "field-error", "{message}" }
        },
        None => rsx! {},
    }
}
