use crate::entry::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundTone {
    Light,
    #[default]
    Dark,
}

impl BackgroundTone {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Light => (0xF7, 0xF7, 0xF7),
            Self::Dark => (0xFA, 0xFA, 0xFA),
        }
    }

    /// Alternating row stripes: even rows light, odd rows dark.
    pub fn for_row(index: usize) -> Self {
        if index % 2 == 0 { Self::Light } else { Self::Dark }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: BackgroundTone,
}

impl Cell {
    pub fn new(text: impl Into<String>, tone: BackgroundTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// What the groups row offers next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    Merge,
    Unmerge,
}

impl MergeAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Merge => "Merge Groups",
            Self::Unmerge => "Unmerge Groups",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNameCell {
    pub field: Field,
    pub cell: Cell,
    /// Only set on the groups row: the action offered and whether it can run.
    pub merge_action: Option<(MergeAction, bool)>,
}

impl FieldNameCell {
    pub fn new(field: Field, index: usize) -> Self {
        let cell = Cell::new(field.display_name(), BackgroundTone::for_row(index));
        Self {
            field,
            cell,
            merge_action: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.cell.text
    }
}
