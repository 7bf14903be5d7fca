use crate::domain::entities::form::EditForm;
use crate::domain::entities::taxonomy::Taxonomy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryTriple {
    Primary,
    Secondary,
    Tertiary,
}

impl CategoryTriple {
    pub const ALL: [CategoryTriple; 3] = [
        CategoryTriple::Primary,
        CategoryTriple::Secondary,
        CategoryTriple::Tertiary,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            CategoryTriple::Primary => "",
            CategoryTriple::Secondary => "sec_",
            CategoryTriple::Tertiary => "ter_",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryTriple::Primary => "Main RCA",
            CategoryTriple::Secondary => "Secondary RCA",
            CategoryTriple::Tertiary => "Tertiary RCA",
        }
    }

    pub fn field_name(self, level: Level) -> String {
        format!("{}rca{}", self.prefix(), level.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::One, Level::Two, Level::Three];

    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }

    /// Levels strictly below `self` in the cascade.
    pub fn downstream(self) -> &'static [Level] {
        match self {
            Level::One => &[Level::Two, Level::Three],
            Level::Two => &[Level::Three],
            Level::Three => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleState {
    Unset,
    Level1,
    Level2,
    Full,
}

/// What a dropdown shows for one level: the selectable options, the stored
/// value, and whether that value is missing from the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelView<'a> {
    pub options: &'a [String],
    pub current: String,
    pub stale: bool,
}

pub struct CategoryResolver<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn level1_options(&self) -> &'a [String] {
        &self.taxonomy.level1
    }

    pub fn level2_options(&self, level1: Option<&str>) -> &'a [String] {
        level1
            .filter(|value| !value.is_empty())
            .and_then(|value| self.taxonomy.level2.get(value))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn level3_options(&self, level2: Option<&str>, context_key: Option<&str>) -> &'a [String] {
        let context_key = match context_key {
            Some(key) => key,
            None => return &[],
        };
        level2
            .filter(|value| !value.is_empty())
            .and_then(|value| self.taxonomy.level3.get(value))
            .and_then(|by_queue| by_queue.get(context_key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn options(&self, form: &EditForm, triple: CategoryTriple, level: Level) -> &'a [String] {
        match level {
            Level::One => self.level1_options(),
            Level::Two => self.level2_options(Some(form.text(&triple.field_name(Level::One)))),
            Level::Three => self.level3_options(
                Some(form.text(&triple.field_name(Level::Two))),
                form.context_key(),
            ),
        }
    }

    /// Stored values are shown as-is even when the options no longer contain them.
    pub fn level_view(&self, form: &EditForm, triple: CategoryTriple, level: Level) -> LevelView<'a> {
        let options = self.options(form, triple, level);
        let current = form.text(&triple.field_name(level)).to_string();
        let stale = !current.is_empty() && !options.iter().any(|option| *option == current);
        LevelView {
            options,
            current,
            stale,
        }
    }

    /// Stores `value` at `level` and clears every lower level of the triple,
    /// whether or not the old lower values would still be valid.
    pub fn on_level_change(
        &self,
        form: &mut EditForm,
        triple: CategoryTriple,
        level: Level,
        value: &str,
    ) {
        form.set(&triple.field_name(level), value);
        for lower in level.downstream() {
            form.reset(&triple.field_name(*lower));
        }
    }
}

pub fn triple_state(form: &EditForm, triple: CategoryTriple) -> TripleState {
    let is_set = |level| !form.text(&triple.field_name(level)).is_empty();
    match (is_set(Level::One), is_set(Level::Two), is_set(Level::Three)) {
        (false, _, _) => TripleState::Unset,
        (true, false, _) => TripleState::Level1,
        (true, true, false) => TripleState::Level2,
        (true, true, true) => TripleState::Full,
    }
}
