use crate::domain::entities::record::{FieldMap, FieldValue, Record, CONTEXT_KEY};
use crate::domain::entities::schema::FieldDef;

/// Editable copy of the selected record's annotation fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditForm {
    ticket_id: String,
    context_key: Option<String>,
    values: FieldMap,
    defaults: FieldMap,
}

impl EditForm {
    pub fn from_record(record: &Record, fields: &[FieldDef]) -> Self {
        let defaults: FieldMap = fields
            .iter()
            .map(|field| (field.name.to_string(), field.default.clone()))
            .collect();
        let values = fields
            .iter()
            .map(|field| {
                let value = record
                    .get(field.name)
                    .cloned()
                    .unwrap_or_else(|| field.default.clone());
                (field.name.to_string(), value)
            })
            .collect();

        Self {
            ticket_id: record.ticket_id().to_string(),
            context_key: record
                .get(CONTEXT_KEY)
                .and_then(FieldValue::as_str)
                .map(str::to_string),
            values,
            defaults,
        }
    }

    pub fn ticket_id(&self) -> &str {
        &self.ticket_id
    }

    /// `None` when the upload has no `last_specialised_queue` column.
    pub fn context_key(&self) -> Option<&str> {
        self.context_key.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name)
            .and_then(FieldValue::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Restores `name` to its schema default, or empty text for unknown names.
    pub fn reset(&mut self, name: &str) {
        let value = self.defaults.get(name).cloned().unwrap_or_default();
        self.values.insert(name.to_string(), value);
    }

    /// Flips a two-state text field: `on` when it currently is not `on`.
    pub fn toggle(&mut self, name: &str, on: &str, off: &str) {
        let next = if self.text(name) == on { off } else { on };
        self.set(name, next);
    }

    pub fn into_fields(self) -> FieldMap {
        self.values
    }
}
