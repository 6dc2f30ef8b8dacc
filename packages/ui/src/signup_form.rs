//! Signup page: avatar, name, email, password, and the tech list, with the
//! last accepted record echoed below the form.

use std::rc::Rc;

use dioxus::prelude::*;
use signup::{
    FieldPath, FileRef, FormState, LogSink, PrettyJsonSink, Schema, SchemaConfig, SubmitOutcome,
};

use crate::{edit_form, FieldMessage, TechList};

/// Signup form component.
///
/// The schema is built once from `config`; later prop changes are ignored.
#[component]
pub fn SignupForm(#[props(default)] config: SchemaConfig) -> Element {
    let schema = use_hook(move || Rc::new(Schema::new(&config)));
    use_context_provider(|| schema.clone());
    let mut form = use_signal(FormState::new);
    let mut output = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let mut sink = (PrettyJsonSink::default(), LogSink);
        let outcome = form.write().submit(&schema, &mut sink);
        if outcome == SubmitOutcome::Accepted {
            output.set(sink.0.into_output());
        }
    };

    let handle_avatar = move |evt: FormEvent| {
        let files: Vec<FileRef> = evt
            .files()
            .into_iter()
            .map(|file| {
                FileRef::new(file.name(), file.size(), file.content_type().unwrap_or_default())
            })
            .collect();
        tracing::debug!(count = files.len(), "avatar selected");
        edit_form(form, |state| state.avatar = files);
    };

    let field_error = move |path: FieldPath| form.read().field_error(path).map(|e| e.message.clone());

    rsx! {
        main {
            class: "signup-page",

            form {
                class: "signup-form",
                onsubmit: handle_submit,

                div {
                    class: "field",
                    label { r#for: "avatar", "Avatar" }
                    input {
                        id: "avatar",
                        r#type: "file",
                        accept: "image/*",
                        onchange: handle_avatar,
                    }
                    FieldMessage { message: field_error(FieldPath::Avatar) }
                }

                div {
                    class: "field",
                    label { r#for: "name", "Nome" }
                    input {
                        id: "name",
                        class: "text-input",
                        r#type: "text",
                        value: form.read().name.clone(),
                        oninput: move |evt: FormEvent| edit_form(form, |state| state.name = evt.value()),
                    }
                    FieldMessage { message: field_error(FieldPath::Name) }
                }

                div {
                    class: "field",
                    label { r#for: "email", "E-mail" }
                    input {
                        id: "email",
                        class: "text-input",
                        r#type: "email",
                        value: form.read().email.clone(),
                        oninput: move |evt: FormEvent| edit_form(form, |state| state.email = evt.value()),
                    }
                    FieldMessage { message: field_error(FieldPath::Email) }
                }

                div {
                    class: "field",
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        class: "text-input",
                        r#type: "password",
                        value: form.read().password.clone(),
                        oninput: move |evt: FormEvent| edit_form(form, |state| state.password = evt.value()),
                    }
                    FieldMessage { message: field_error(FieldPath::Password) }
                }

                TechList { form: form }

                button {
                    r#type: "submit",
                    class: "submit-button",
                    "Save"
                }
            }

            pre {
                code { "{output}" }
            }
        }
    }
}
