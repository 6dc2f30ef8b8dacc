use dioxus::prelude::*;

mod settings;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let schema = use_hook(settings::schema_config);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::SignupForm { config: schema }
    }
}
