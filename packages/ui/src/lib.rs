//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod edit;
use edit::edit_form;

mod field_message;
pub use field_message::FieldMessage;

mod tech_list;
pub use tech_list::TechList;

mod signup_form;
pub use signup_form::SignupForm;
