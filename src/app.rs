use anyhow::anyhow;
use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::config::default_export_file_name;
use crate::domain::entities::dataset::{FilterKind, ALL_REVIEWERS};
use crate::domain::entities::record::CHAT_LINK;
use crate::domain::entities::schema::{FieldDef, NOT_REVIEWED, NO, REVIEWED, YES};
use crate::ui::components::category_block::CategoryBlock;
use crate::ui::components::fields::{TextField, ToggleField};
use crate::ui::state::app_state::{AppContext, AppState};
use crate::usecase::services::category_resolver::CategoryTriple;
use crate::usecase::services::review_store::{ActionOutcome, ReviewAction};
use crate::usecase::services::transfer_service::{TransferService, WORKBOOK_EXTENSIONS};

const PANEL_STYLE: &str = "display: flex; flex-direction: column; gap: 10px;";
const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
const PRIMARY_BUTTON_STYLE: &str =
    "border: none; background: #00d1b2; color: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;";

fn field_def(fields: &[FieldDef], name: &str) -> Option<FieldDef> {
    fields.iter().find(|field| field.name == name).cloned()
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let AppState {
        mut store,
        mut form,
        mut source_name,
        mut busy,
        mut status,
    } = AppState::new();

    let export_dir = ctx.config.export_dir.clone();
    let loaded = store.read().is_loaded();
    let reviewer_options = store.read().reviewer_options();
    let quality_options = store.read().quality_reviewer_options();
    let reviewer_filter = store
        .read()
        .filter(FilterKind::Reviewer)
        .unwrap_or(ALL_REVIEWERS)
        .to_string();
    let quality_filter = store
        .read()
        .filter(FilterKind::QualityReviewer)
        .unwrap_or(ALL_REVIEWERS)
        .to_string();
    let updated_count = store.read().updated_count();
    let uploaded_count = store.read().original().map(|dataset| dataset.len()).unwrap_or(0);
    let fields = store.read().fields().to_vec();
    let tickets: Vec<(String, bool, bool, bool)> = {
        let current = store.read();
        let list = current
            .visible_records()
            .map(|record| {
                let badge = current.record_badge(record);
                (
                    record.ticket_id().to_string(),
                    badge.reviewed,
                    badge.quality_reviewed,
                    badge.selected,
                )
            })
            .collect();
        list
    };
    let selected = store.read().selected_record().cloned();
    let details = selected
        .as_ref()
        .map(|record| store.read().detail_fields(record))
        .unwrap_or_default();

    rsx! {
        div {
            style: "display: flex; gap: 24px; padding: 16px; font-family: sans-serif; font-size: 14px;",

            div {
                style: "{PANEL_STYLE} width: 280px; flex-shrink: 0;",
                label { style: "font-weight: 600;", "Upload CSV" }
                div {
                    style: "display: flex; gap: 8px; align-items: center;",
                    button {
                        style: "{BUTTON_STYLE}",
                        disabled: busy(),
                        onclick: move |_| {
                            if busy() {
                                return;
                            }

                            let mut extensions = vec!["csv"];
                            extensions.extend_from_slice(WORKBOOK_EXTENSIONS);
                            let Some(file_path) = FileDialog::new()
                                .add_filter("Review data", &extensions)
                                .pick_file() else {
                                *status.write() = "Upload cancelled".to_string();
                                return;
                            };

                            *busy.write() = true;
                            *status.write() = format!("Reading {}", file_path.display());

                            let result = TransferService::default()
                                .import(&file_path)
                                .map_err(|err| anyhow!(err))
                                .and_then(|data| store.write().dispatch(ReviewAction::Load(data)).map_err(|err| anyhow!(err)));

                            match result {
                                Ok(ActionOutcome::Loaded { rows }) => {
                                    *form.write() = None;
                                    *source_name.write() = file_path
                                        .file_name()
                                        .and_then(|name| name.to_str())
                                        .map(|name| name.to_string());
                                    *status.write() = format!("Loaded {rows} tickets");
                                }
                                Ok(_) => {}
                                Err(err) => {
                                    *status.write() = format!("Upload failed: {err:#}");
                                }
                            }

                            *busy.write() = false;
                        },
                        "Choose file"
                    }
                    if let Some(name) = source_name() {
                        span { "{name}" }
                        button {
                            style: "{BUTTON_STYLE}",
                            disabled: busy(),
                            onclick: move |_| {
                                if let Err(err) = store.write().dispatch(ReviewAction::Clear) {
                                    *status.write() = err.to_string();
                                    return;
                                }
                                *form.write() = None;
                                *source_name.write() = None;
                                *status.write() = "Upload removed".to_string();
                            },
                            "Remove"
                        }
                    }
                }

                if loaded {
                    label { style: "font-weight: 600;", "Reviewer Selection" }
                    select {
                        onchange: move |event| {
                            let action = ReviewAction::SetFilter { kind: FilterKind::Reviewer, value: event.value() };
                            if let Err(err) = store.write().dispatch(action) {
                                *status.write() = err.to_string();
                            }
                        },
                        for reviewer in reviewer_options.iter() {
                            option { value: "{reviewer}", selected: *reviewer == reviewer_filter, "{reviewer}" }
                        }
                    }

                    label { style: "font-weight: 600;", "QC Reviewer Selection" }
                    select {
                        onchange: move |event| {
                            let action = ReviewAction::SetFilter { kind: FilterKind::QualityReviewer, value: event.value() };
                            if let Err(err) = store.write().dispatch(action) {
                                *status.write() = err.to_string();
                            }
                        },
                        for reviewer in quality_options.iter() {
                            option { value: "{reviewer}", selected: *reviewer == quality_filter, "{reviewer}" }
                        }
                    }

                    button {
                        style: "{PRIMARY_BUTTON_STYLE}",
                        disabled: busy(),
                        onclick: move |_| {
                            let Some(dataset) = store.read().working().cloned() else {
                                *status.write() = "Nothing to export".to_string();
                                return;
                            };

                            let mut dialog = FileDialog::new()
                                .add_filter("CSV", &["csv"])
                                .set_file_name(default_export_file_name());
                            if let Some(dir) = &export_dir {
                                dialog = dialog.set_directory(dir);
                            }
                            let Some(target) = dialog.save_file() else {
                                *status.write() = "Export cancelled".to_string();
                                return;
                            };

                            *busy.write() = true;
                            match TransferService::default().export(&target, &dataset) {
                                Ok(rows) => {
                                    *status.write() = format!("Exported {rows} tickets to {}", target.display());
                                }
                                Err(err) => {
                                    *status.write() = format!("Export failed: {err}");
                                }
                            }
                            *busy.write() = false;
                        },
                        "Download Updated Version"
                    }
                    span { style: "color: #666;", "{updated_count} of {uploaded_count} updated this session" }
                }

                span { style: "color: #666;", "{status}" }

                ul {
                    style: "list-style: none; padding: 0; margin: 0; display: flex; flex-direction: column; gap: 4px;",
                    for (ticket_id, reviewed, quality_reviewed, is_selected) in tickets {
                        {
                            let color = if reviewed { "#48c78e" } else { "#f14668" };
                            let (background, text) = if is_selected { (color, "#fff") } else { ("#fff", color) };
                            let ticket_for_select = ticket_id.clone();
                            rsx! {
                                li {
                                    style: "border: 1px solid {color}; background: {background}; color: {text}; padding: 4px 8px; border-radius: 6px; cursor: pointer; text-align: center;",
                                    onclick: move |_| {
                                        let action = ReviewAction::Select(ticket_for_select.clone());
                                        match store.write().dispatch(action) {
                                            Ok(ActionOutcome::Selected(opened)) => {
                                                *form.write() = Some(opened);
                                            }
                                            Ok(_) => {}
                                            Err(err) => {
                                                *status.write() = err.to_string();
                                            }
                                        }
                                    },
                                    "{ticket_id}"
                                    if quality_reviewed {
                                        span { style: "margin-left: 8px;", "✓" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(record) = selected {
                div {
                    style: "{PANEL_STYLE} flex: 1;",
                    a {
                        style: "{PRIMARY_BUTTON_STYLE} align-self: flex-start; text-decoration: none;",
                        href: "{record.text(CHAT_LINK)}",
                        target: "_blank",
                        "{record.ticket_id()}"
                    }

                    div {
                        style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px;",
                        for triple in CategoryTriple::ALL {
                            CategoryBlock { triple, form }
                        }
                    }

                    div {
                        style: "display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px;",
                        if let Some(field) = field_def(&fields, "agent_for_feedback") {
                            TextField { field, placeholder: "example-agent@company.com".to_string(), form }
                        }
                        if let Some(field) = field_def(&fields, "lm_agent_for_feedback") {
                            TextField { field, placeholder: "example-lm@company.com".to_string(), form }
                        }
                        ToggleField { label: "Feedback Needed".to_string(), name: "feedback_needed", on: YES, off: NO, form }
                        ToggleField { label: "Feedback Delivered".to_string(), name: "feedback_delivered", on: YES, off: NO, form }
                        if let Some(field) = field_def(&fields, "reviewer_comment") {
                            TextField { field, placeholder: String::new(), form }
                        }
                        if let Some(field) = field_def(&fields, "quality_check") {
                            TextField { field, placeholder: String::new(), form }
                        }
                        ToggleField { label: "Review Status".to_string(), name: "reviewed", on: REVIEWED, off: NOT_REVIEWED, form }
                        ToggleField { label: "Quality Check Status".to_string(), name: "quality_reviewed", on: REVIEWED, off: NOT_REVIEWED, form }
                    }

                    button {
                        r#type: "button",
                        style: "{PRIMARY_BUTTON_STYLE} width: 100%;",
                        onclick: move |_| {
                            let Some(editing) = form() else {
                                return;
                            };
                            if store.read().selected_ticket_id() != Some(editing.ticket_id()) {
                                *status.write() = "Form is out of date; reopen the ticket".to_string();
                                return;
                            }
                            let result = store.write().dispatch(ReviewAction::Save(editing.into_fields()));
                            match result {
                                Ok(ActionOutcome::Saved { ticket_id }) => {
                                    let message = format!("Saved review for ticket {ticket_id}");
                                    *status.write() = message.clone();
                                    MessageDialog::new()
                                        .set_level(MessageLevel::Info)
                                        .set_title("Review saved")
                                        .set_description(message)
                                        .set_buttons(MessageButtons::Ok)
                                        .show();
                                }
                                Ok(_) => {}
                                Err(err) => {
                                    *status.write() = format!("Save failed: {err}");
                                }
                            }
                        },
                        "Save Review"
                    }

                    div {
                        style: "display: grid; grid-template-columns: repeat(4, 1fr); gap: 8px;",
                        for (label, value) in details {
                            div {
                                style: "border: 1px solid #ddd; border-radius: 6px; padding: 6px; font-size: 12px;",
                                div { style: "font-weight: 600; color: #555;", "{label}" }
                                div { style: "margin-top: 4px;", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
