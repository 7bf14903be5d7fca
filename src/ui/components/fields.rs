use dioxus::prelude::*;

use crate::domain::entities::form::EditForm;
use crate::domain::entities::schema::{FieldDef, FieldKind};

const INPUT_STYLE: &str =
    "width: 100%; box-sizing: border-box; padding: 6px 8px; border: 1px solid #bbb; border-radius: 6px;";

/// Free-text field bound to the open form; textareas for long comments.
#[component]
pub fn TextField(field: FieldDef, placeholder: String, mut form: Signal<Option<EditForm>>) -> Element {
    let value = form()
        .map(|f| f.text(field.name).to_string())
        .unwrap_or_default();
    let name = field.name;
    let required = if field.required { " *" } else { "" };
    let input_type = if field.kind == Some(FieldKind::Email) { "email" } else { "text" };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            label { style: "font-weight: 600;", "{field.label}{required}" }
            if field.kind == Some(FieldKind::Textarea) {
                textarea {
                    style: "{INPUT_STYLE} min-height: 80px;",
                    value: "{value}",
                    oninput: move |event| {
                        if let Some(editing) = &mut *form.write() {
                            editing.set(name, event.value());
                        }
                    },
                }
            } else {
                input {
                    style: "{INPUT_STYLE}",
                    r#type: "{input_type}",
                    value: "{value}",
                    placeholder: "{placeholder}",
                    oninput: move |event| {
                        if let Some(editing) = &mut *form.write() {
                            editing.set(name, event.value());
                        }
                    },
                }
            }
        }
    }
}

/// Two-state button; an unset field shows `off`.
#[component]
pub fn ToggleField(
    label: String,
    name: &'static str,
    on: &'static str,
    off: &'static str,
    mut form: Signal<Option<EditForm>>,
) -> Element {
    let value = form()
        .map(|f| f.text(name).to_string())
        .unwrap_or_default();
    let active = value == on;
    let shown = if value.is_empty() { off.to_string() } else { value };
    let background = if active { "#48c78e" } else { "#f14668" };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            label { style: "font-weight: 600;", "{label}" }
            button {
                r#type: "button",
                style: "align-self: flex-start; border: none; color: #fff; background: {background}; padding: 4px 12px; border-radius: 6px; cursor: pointer;",
                onclick: move |_| {
                    if let Some(editing) = &mut *form.write() {
                        editing.toggle(name, on, off);
                    }
                },
                "{shown}"
            }
        }
    }
}
