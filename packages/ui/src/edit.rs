use std::rc::Rc;

use dioxus::prelude::*;
use signup::{FormState, Schema};

/// Apply a user edit, then refresh errors left by a rejected submission.
///
/// Needs the `Rc<Schema>` context provided by [`crate::SignupForm`].
pub(crate) fn edit_form(form: Signal<FormState>, edit: impl FnOnce(&mut FormState)) {
    let mut form = form;
    let schema = consume_context::<Rc<Schema>>();
    let mut state = form.write();
    edit(&mut state);
    state.revalidate(&schema);
}
