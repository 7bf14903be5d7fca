use crate::domain::entities::record::FieldValue;

pub const REVIEWED: &str = "Reviewed";
pub const NOT_REVIEWED: &str = "Not Reviewed";
pub const YES: &str = "YES";
pub const NO: &str = "NO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    String,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub default: FieldValue,
    pub required: bool,
    pub kind: Option<FieldKind>,
}

impl FieldDef {
    fn new(name: &'static str, label: &'static str, required: bool) -> Self {
        Self {
            name,
            label,
            default: FieldValue::default(),
            required,
            kind: None,
        }
    }

    fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = value.into();
        self
    }
}

/// Annotation fields edited through the review form, one entry per name.
pub fn form_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::new("rca1", "RCA 1", true),
        FieldDef::new("rca2", "RCA 2", true),
        FieldDef::new("rca3", "RCA 3", true),
        FieldDef::new("sec_rca1", "Secondary RCA 1", true),
        FieldDef::new("sec_rca2", "Secondary RCA 2", true),
        FieldDef::new("sec_rca3", "Secondary RCA 3", true),
        FieldDef::new("ter_rca1", "Tertiary RCA 1", true),
        FieldDef::new("ter_rca2", "Tertiary RCA 2", true),
        FieldDef::new("ter_rca3", "Tertiary RCA 3", true),
        FieldDef::new("agent_for_feedback", "Agent for Feedback", false).kind(FieldKind::Email),
        FieldDef::new("feedback_needed", "Feedback Needed", false).kind(FieldKind::String),
        FieldDef::new("feedback_delivered", "Feedback Delivered", false).kind(FieldKind::String),
        FieldDef::new(
            "lm_agent_for_feedback",
            "Line Manager (Agent for Feedback)",
            false,
        )
        .kind(FieldKind::Email),
        FieldDef::new("reviewer_comment", "Reviewer Comment", false).kind(FieldKind::Textarea),
        FieldDef::new("quality_check", "Quality Check Comment", false).kind(FieldKind::Textarea),
        FieldDef::new("reviewed", "Is Reviewed?", false).default_value(NOT_REVIEWED),
        FieldDef::new("quality_reviewed", "Is Quality Reviewed?", false)
            .default_value(NOT_REVIEWED),
        FieldDef::new("updated", "Was updated on this session?", true).default_value(false),
    ]
}

/// Passthrough columns shown read-only next to the form.
pub const DETAIL_COLUMNS: &[(&str, &str)] = &[
    ("rated_date", "Rated Date"),
    ("last_specialised_queue", "Last Specialised Queue"),
    ("ticket_id", "Ticket ID"),
    ("fqt_minutes", "FQT (Minutes)"),
    ("crt", "CRT"),
    ("is_first_contact_resolution", "FCR"),
    ("has_mass_message", "Has Mass Message"),
    ("number_of_interactions", "Number of Interactions"),
    ("agent_count_distinct", "Agent Count"),
    ("last_assigned_agent_email", "Last Assigned Agent Email"),
    ("last_assigned_agent_lm_id", "Last Assigned LM ID"),
    ("last_assigned_agent_agency", "Last Assigned Agency"),
    ("is_accurately_routed", "Is Accurately Routed"),
    ("queue_name", "Queue Name"),
    ("cx_vertical", "Allocation Vertical"),
    ("reviewer", "Allocated POM"),
    ("feedback", "Feedback"),
];
