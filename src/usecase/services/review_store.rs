use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::entities::dataset::{Dataset, FilterKind, Filters, ALL_REVIEWERS};
use crate::domain::entities::form::EditForm;
use crate::domain::entities::record::{FieldMap, Record, TICKET_ID, UPDATED};
use crate::domain::entities::schema::{form_fields, FieldDef, DETAIL_COLUMNS, REVIEWED};
use crate::domain::errors::StoreError;
use crate::usecase::ports::tabular::TabularData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    Load(TabularData),
    Clear,
    SetFilter { kind: FilterKind, value: String },
    Select(String),
    Save(FieldMap),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Loaded { rows: usize },
    Cleared,
    FilterSet,
    Selected(EditForm),
    Saved { ticket_id: String },
}

/// List decoration for one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordBadge {
    pub reviewed: bool,
    pub quality_reviewed: bool,
    pub selected: bool,
}

/// Session state of the review desk: the uploaded snapshot, the working
/// copy that collects saved reviews, the open ticket and the list filters.
///
/// `original` and `working` are separate deep copies; only `save_selected`
/// mutates `working` and nothing mutates `original` after a load.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    fields: Vec<FieldDef>,
    original: Option<Dataset>,
    working: Option<Dataset>,
    selected: Option<String>,
    filters: Filters,
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new(form_fields())
    }
}

impl ReviewStore {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self {
            fields,
            original: None,
            working: None,
            selected: None,
            filters: Filters::default(),
        }
    }

    pub fn dispatch(&mut self, action: ReviewAction) -> Result<ActionOutcome, StoreError> {
        match action {
            ReviewAction::Load(data) => {
                let rows = self.load_dataset(data)?;
                Ok(ActionOutcome::Loaded { rows })
            }
            ReviewAction::Clear => {
                self.clear_dataset();
                Ok(ActionOutcome::Cleared)
            }
            ReviewAction::SetFilter { kind, value } => {
                self.set_filter(kind, &value);
                Ok(ActionOutcome::FilterSet)
            }
            ReviewAction::Select(ticket_id) => {
                self.select_record(&ticket_id).map(ActionOutcome::Selected)
            }
            ReviewAction::Save(edited) => {
                let ticket_id = self.save_selected(&edited)?;
                Ok(ActionOutcome::Saved { ticket_id })
            }
        }
    }

    pub fn load_dataset(&mut self, data: TabularData) -> Result<usize, StoreError> {
        let dataset = build_dataset(data).inspect_err(|err| warn!(error = %err, "upload rejected"))?;
        let rows = dataset.len();
        if dataset.is_empty() {
            warn!("upload has a header but no ticket rows");
        }

        self.working = Some(dataset.clone());
        self.original = Some(dataset);
        self.selected = None;
        self.filters = Filters::default();

        info!(rows, "dataset loaded");
        Ok(rows)
    }

    pub fn clear_dataset(&mut self) {
        self.original = None;
        self.working = None;
        self.selected = None;
        self.filters = Filters::default();
        info!("dataset cleared");
    }

    pub fn set_filter(&mut self, kind: FilterKind, value: &str) {
        self.filters.set(kind, value);
        debug!(?kind, value = ?self.filters.get(kind), "filter changed");
    }

    pub fn filter(&self, kind: FilterKind) -> Option<&str> {
        self.filters.get(kind)
    }

    pub fn select_record(&mut self, ticket_id: &str) -> Result<EditForm, StoreError> {
        let record = self
            .working
            .as_ref()
            .and_then(|dataset| dataset.find(ticket_id))
            .ok_or_else(|| StoreError::NotFound(ticket_id.to_string()))?;

        let form = EditForm::from_record(record, &self.fields);
        self.selected = Some(ticket_id.to_string());
        debug!(ticket_id, "ticket selected");
        Ok(form)
    }

    /// Commits `edited` onto the selected ticket and returns its id.
    pub fn save_selected(&mut self, edited: &FieldMap) -> Result<String, StoreError> {
        let ticket_id = self.selected.clone().ok_or(StoreError::NoSelection)?;
        let working = self.working.as_mut().ok_or(StoreError::NoSelection)?;
        let index = working
            .position_of(&ticket_id)
            .ok_or_else(|| StoreError::NotFound(ticket_id.clone()))?;

        let record = &mut working.records[index];
        record.merge(edited);
        record.set(UPDATED, true);

        let added: Vec<String> = self
            .fields
            .iter()
            .map(|field| field.name.to_string())
            .chain(edited.keys().cloned())
            .chain(std::iter::once(UPDATED.to_string()))
            .collect();
        for name in added {
            if working.records[index].get(&name).is_some() && !working.columns.contains(&name) {
                working.columns.push(name);
            }
        }

        info!(ticket_id = %ticket_id, fields = edited.len(), "review saved");
        Ok(ticket_id)
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &Record> + Clone + '_ {
        let filters = &self.filters;
        self.working
            .as_ref()
            .map(|dataset| dataset.records.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(move |record| filters.matches(record))
    }

    pub fn reviewer_options(&self) -> Vec<String> {
        self.filter_options(FilterKind::Reviewer)
    }

    pub fn quality_reviewer_options(&self) -> Vec<String> {
        self.filter_options(FilterKind::QualityReviewer)
    }

    fn filter_options(&self, kind: FilterKind) -> Vec<String> {
        let mut options = vec![ALL_REVIEWERS.to_string()];
        if let Some(original) = &self.original {
            options.extend(
                original
                    .distinct_values(kind.column())
                    .into_iter()
                    .filter(|value| value != ALL_REVIEWERS),
            );
        }
        options
    }

    pub fn is_loaded(&self) -> bool {
        self.working.is_some()
    }

    pub fn original(&self) -> Option<&Dataset> {
        self.original.as_ref()
    }

    pub fn working(&self) -> Option<&Dataset> {
        self.working.as_ref()
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn selected_ticket_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        let ticket_id = self.selected.as_deref()?;
        self.working.as_ref()?.find(ticket_id)
    }

    pub fn updated_count(&self) -> usize {
        self.working
            .as_ref()
            .map(|dataset| {
                dataset
                    .records
                    .iter()
                    .filter(|record| record.get(UPDATED).is_some_and(|v| v.is_truthy()))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn record_badge(&self, record: &Record) -> RecordBadge {
        RecordBadge {
            reviewed: record.text("reviewed") == REVIEWED,
            quality_reviewed: record.text("quality_reviewed") == REVIEWED,
            selected: self.selected.as_deref() == Some(record.ticket_id()),
        }
    }

    /// Labelled detail columns that carry a value on `record`.
    pub fn detail_fields(&self, record: &Record) -> Vec<(&'static str, String)> {
        DETAIL_COLUMNS
            .iter()
            .filter_map(|(name, label)| {
                record
                    .get(name)
                    .filter(|value| value.is_truthy())
                    .map(|value| (*label, value.to_string()))
            })
            .collect()
    }
}

fn build_dataset(data: TabularData) -> Result<Dataset, StoreError> {
    let TabularData { columns, rows } = data;

    if columns.is_empty() {
        return Err(StoreError::InvalidInput("header row is required".to_string()));
    }
    let mut seen_columns = HashSet::new();
    for column in &columns {
        if !seen_columns.insert(column.as_str()) {
            return Err(StoreError::InvalidInput(format!(
                "duplicate column: {column}"
            )));
        }
    }
    if !columns.iter().any(|column| column == TICKET_ID) {
        return Err(StoreError::InvalidInput(format!(
            "missing required column: {TICKET_ID}"
        )));
    }

    let mut seen_tickets = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.into_iter().enumerate() {
        if row.len() > columns.len() {
            return Err(StoreError::InvalidInput(format!(
                "row {} has {} fields but the header has {}",
                row_idx + 1,
                row.len(),
                columns.len()
            )));
        }

        let mut cells = row.into_iter();
        let record: Record = columns
            .iter()
            .map(|column| (column.clone(), cells.next().unwrap_or_default()))
            .collect();

        let ticket_id = record.ticket_id();
        if ticket_id.is_empty() {
            return Err(StoreError::InvalidInput(format!(
                "row {} has an empty {TICKET_ID}",
                row_idx + 1
            )));
        }
        if !seen_tickets.insert(ticket_id.to_string()) {
            return Err(StoreError::InvalidInput(format!(
                "duplicate {TICKET_ID}: {ticket_id}"
            )));
        }
        records.push(record);
    }

    Ok(Dataset { columns, records })
}
