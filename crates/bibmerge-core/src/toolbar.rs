use std::str::FromStr;

use crate::error::{MergeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlainTextOrDiff {
    #[default]
    PlainText,
    Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffView {
    #[default]
    Unified,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffHighlightMode {
    #[default]
    Words,
    Chars,
}

impl PlainTextOrDiff {
    pub const ALL: [Self; 2] = [Self::PlainText, Self::Diff];

    pub fn label(self) -> &'static str {
        match self {
            Self::PlainText => "Plain Text",
            Self::Diff => "Show Diff",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        find_by_label(&Self::ALL, label, Self::label, "plain text/diff")
    }
}

impl DiffView {
    pub const ALL: [Self; 2] = [Self::Unified, Self::Split];

    pub fn label(self) -> &'static str {
        match self {
            Self::Unified => "Unified View",
            Self::Split => "Split View",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        find_by_label(&Self::ALL, label, Self::label, "diff view")
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Unified => Self::Split,
            Self::Split => Self::Unified,
        }
    }
}

impl DiffHighlightMode {
    pub const ALL: [Self; 2] = [Self::Words, Self::Chars];

    pub fn label(self) -> &'static str {
        match self {
            Self::Words => "Words",
            Self::Chars => "Characters",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        find_by_label(&Self::ALL, label, Self::label, "highlight mode")
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Words => Self::Chars,
            Self::Chars => Self::Words,
        }
    }
}

fn find_by_label<T: Copy>(
    all: &[T],
    label: &str,
    label_of: fn(T) -> &'static str,
    kind: &'static str,
) -> Result<T> {
    all.iter()
        .copied()
        .find(|option| label_of(*option) == label)
        .ok_or_else(|| MergeError::UnrecognizedOption {
            kind,
            label: label.to_string(),
        })
}

impl FromStr for PlainTextOrDiff {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

impl FromStr for DiffView {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

impl FromStr for DiffHighlightMode {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowDiffConfig {
    pub diff_view: DiffView,
    pub highlight_mode: DiffHighlightMode,
}

impl ShowDiffConfig {
    pub fn new(diff_view: DiffView, highlight_mode: DiffHighlightMode) -> Self {
        Self {
            diff_view,
            highlight_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    SetPlainTextOrDiff(PlainTextOrDiff),
    ToggleShowDiff,
    SetDiffView(DiffView),
    ToggleDiffView,
    SetHighlightMode(DiffHighlightMode),
    ToggleHighlightMode,
    SelectAllLeft,
    SelectAllRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarEvent {
    ConfigChanged,
    SelectAllLeft,
    SelectAllRight,
}

/// Diff display settings shown above the merge grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeToolbar {
    plain_text_or_diff: PlainTextOrDiff,
    diff_view: DiffView,
    highlight_mode: DiffHighlightMode,
}

impl MergeToolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain_text_or_diff(&self) -> PlainTextOrDiff {
        self.plain_text_or_diff
    }

    pub fn is_show_diff_enabled(&self) -> bool {
        self.plain_text_or_diff == PlainTextOrDiff::Diff
    }

    pub fn diff_view(&self) -> DiffView {
        self.diff_view
    }

    pub fn highlight_mode(&self) -> DiffHighlightMode {
        self.highlight_mode
    }

    pub fn diff_config(&self) -> ShowDiffConfig {
        ShowDiffConfig::new(self.diff_view, self.highlight_mode)
    }

    /// Diff view and highlight controls only take effect while diff is shown.
    pub fn diff_controls_enabled(&self) -> bool {
        self.is_show_diff_enabled()
    }

    /// Applies `action`; setting changes report `ConfigChanged` only when a
    /// value actually changed.
    pub fn apply(&mut self, action: ToolbarAction) -> Option<ToolbarEvent> {
        let before = *self;
        match action {
            ToolbarAction::SetPlainTextOrDiff(mode) => self.plain_text_or_diff = mode,
            ToolbarAction::ToggleShowDiff => {
                self.plain_text_or_diff = match self.plain_text_or_diff {
                    PlainTextOrDiff::PlainText => PlainTextOrDiff::Diff,
                    PlainTextOrDiff::Diff => PlainTextOrDiff::PlainText,
                };
            }
            ToolbarAction::SetDiffView(view) => self.diff_view = view,
            ToolbarAction::ToggleDiffView => self.diff_view = self.diff_view.toggled(),
            ToolbarAction::SetHighlightMode(mode) => self.highlight_mode = mode,
            ToolbarAction::ToggleHighlightMode => {
                self.highlight_mode = self.highlight_mode.toggled();
            }
            ToolbarAction::SelectAllLeft => return Some(ToolbarEvent::SelectAllLeft),
            ToolbarAction::SelectAllRight => return Some(ToolbarEvent::SelectAllRight),
        }

        (*self != before).then_some(ToolbarEvent::ConfigChanged)
    }
}
