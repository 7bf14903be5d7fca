use dioxus::prelude::*;

use crate::domain::entities::form::EditForm;
use crate::ui::state::app_state::AppContext;
use crate::usecase::services::category_resolver::{
    triple_state, CategoryResolver, CategoryTriple, Level, TripleState,
};

const SELECT_STYLE: &str =
    "width: 100%; padding: 4px 6px; border: 1px solid #bbb; border-radius: 6px; background: #fff;";
const STALE_SELECT_STYLE: &str =
    "width: 100%; padding: 4px 6px; border: 1px solid #d9822b; border-radius: 6px; background: #fff8ef;";

/// One root cause triple: three dropdowns where each level narrows the next.
#[component]
pub fn CategoryBlock(triple: CategoryTriple, mut form: Signal<Option<EditForm>>) -> Element {
    let ctx = use_context::<AppContext>();
    let Some(current_form) = form() else {
        return rsx! {};
    };
    let resolver = CategoryResolver::new(&ctx.taxonomy);
    let progress = match triple_state(&current_form, triple) {
        TripleState::Unset => "",
        TripleState::Level1 => " (1/3)",
        TripleState::Level2 => " (2/3)",
        TripleState::Full => " ✓",
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 6px;",
            label { style: "font-weight: 600;", "{triple.label()}{progress}" }
            for level in Level::ALL {
                {
                    let view = resolver.level_view(&current_form, triple, level);
                    let style = if view.stale { STALE_SELECT_STYLE } else { SELECT_STYLE };
                    let title = if view.stale { "Value is not in the current option list" } else { "" };
                    let current = view.current.clone();
                    let taxonomy = ctx.taxonomy.clone();
                    rsx! {
                        select {
                            style: "{style}",
                            title: "{title}",
                            value: "{current}",
                            onchange: move |event| {
                                let value = event.value();
                                if let Some(editing) = &mut *form.write() {
                                    CategoryResolver::new(&taxonomy)
                                        .on_level_change(editing, triple, level, &value);
                                }
                            },
                            option { value: "", selected: current.is_empty(), "" }
                            if view.stale {
                                option { value: "{current}", selected: true, "{current}" }
                            }
                            for opt in view.options.iter().filter(|opt| !opt.is_empty()) {
                                option {
                                    value: "{opt}",
                                    selected: *opt == current,
                                    "{opt}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
