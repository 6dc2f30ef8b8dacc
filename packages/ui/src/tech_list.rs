//! The dynamic tech list of the signup form.
//!
//! Rows are keyed by [`signup::RowId`], so removing a row never moves another
//! row's input values or error message.

use dioxus::prelude::*;
use signup::{FieldPath, FormState, Knowledge, TechField, TechRow};

use crate::{edit_form, FieldMessage};

/// Header with the add button, the list-level error, and one line per row.
#[component]
pub fn TechList(form: Signal<FormState>) -> Element {
    let rows = form.read().techs().to_vec();
    let list_error = form
        .read()
        .field_error(FieldPath::Techs)
        .map(|e| e.message.clone());

    rsx! {
        div {
            class: "techs",
            label {
                class: "techs-header",
                "Techs:"
                button {
                    r#type: "button",
                    class: "add-button",
                    onclick: move |_| {
                        edit_form(form, |state| {
                            state.append_tech();
                        });
                    },
                    "Adicionar"
                }
            }

            FieldMessage { message: list_error }

            for row in rows {
                TechRowView {
                    key: "{row.id()}",
                    form: form,
                    row: row,
                }
            }
        }
    }
}

#[component]
fn TechRowView(form: Signal<FormState>, row: TechRow) -> Element {
    let id = row.id();
    let name_error = form
        .read()
        .row_error(id, TechField::Name)
        .map(|e| e.message.clone());
    let knowledge_error = form
        .read()
        .row_error(id, TechField::Knowledge)
        .map(|e| e.message.clone());

    rsx! {
        div {
            class: "tech-row",
            input {
                r#type: "text",
                class: "text-input",
                value: row.name.clone(),
                oninput: move |evt: FormEvent| {
                    edit_form(form, |state| {
                        state.set_tech_name(id, evt.value());
                    });
                },
            }
            select {
                class: "tech-select",
                value: row.knowledge.clone(),
                onchange: move |evt: FormEvent| {
                    edit_form(form, |state| {
                        state.set_tech_knowledge(id, evt.value());
                    });
                },
                for level in Knowledge::ALL {
                    option {
                        key: "{level.as_str()}",
                        value: level.as_str(),
                        selected: row.knowledge == level.as_str(),
                        "{level.label()}"
                    }
                }
            }
            button {
                r#type: "button",
                class: "remove-button",
                onclick: move |_| {
                    edit_form(form, |state| {
                        state.remove_tech_by_id(id);
                    });
                },
                "Remover"
            }
            FieldMessage { message: name_error }
            FieldMessage { message: knowledge_error }
        }
    }
}
