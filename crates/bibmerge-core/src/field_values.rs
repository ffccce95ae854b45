use crate::cell::{BackgroundTone, Cell};
use crate::observable::{ListenerId, Observable};
use crate::text_diff::{FieldDiff, diff_field};
use crate::toolbar::ShowDiffConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Left,
    Right,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Plain,
    Diff(ShowDiffConfig),
}

/// Merge state of a single row: the two source values and the value picked
/// for the merged entry.
#[derive(Debug)]
pub struct ThreeFieldValues {
    index: usize,
    left_value: String,
    right_value: String,
    merged_value: Observable<String>,
    has_equal_left_and_right_values: bool,
    rendering: Rendering,
    diff: Option<FieldDiff>,
}

impl ThreeFieldValues {
    /// The merged value starts out as the left value, or as the right value
    /// when the left side is empty.
    pub fn new(left_value: impl Into<String>, right_value: impl Into<String>, index: usize) -> Self {
        let left_value = left_value.into();
        let right_value = right_value.into();
        let initial = if left_value.is_empty() {
            right_value.clone()
        } else {
            left_value.clone()
        };

        Self {
            index,
            has_equal_left_and_right_values: left_value == right_value,
            left_value,
            right_value,
            merged_value: Observable::new(initial),
            rendering: Rendering::Plain,
            diff: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn left_value(&self) -> &str {
        &self.left_value
    }

    pub fn right_value(&self) -> &str {
        &self.right_value
    }

    pub fn merged_value(&self) -> &str {
        self.merged_value.get()
    }

    pub fn has_equal_left_and_right_values(&self) -> bool {
        self.has_equal_left_and_right_values
    }

    /// Which side the merged value came from. Equal sides report `Left`.
    pub fn selection(&self) -> Selection {
        let merged = self.merged_value();
        if merged == self.left_value {
            Selection::Left
        } else if merged == self.right_value {
            Selection::Right
        } else {
            Selection::Custom
        }
    }

    pub fn select_left_value(&mut self) {
        let value = self.left_value.clone();
        self.set_merged_value(value);
    }

    pub fn select_right_value(&mut self) {
        let value = self.right_value.clone();
        self.set_merged_value(value);
    }

    /// Free-text edit path. Returns whether the merged value changed.
    pub fn set_merged_value(&mut self, value: impl Into<String>) -> bool {
        self.merged_value.set(value.into())
    }

    pub fn on_merged_value_changed(&mut self, listener: impl FnMut(&String) + 'static) -> ListenerId {
        self.merged_value.subscribe(listener)
    }

    /// Computes the highlighted cells once per config; the row's values
    /// never change after construction.
    pub fn show_diff(&mut self, config: ShowDiffConfig) {
        if self.rendering == Rendering::Diff(config) && self.diff.is_some() {
            return;
        }
        self.rendering = Rendering::Diff(config);
        self.diff = Some(diff_field(&self.left_value, &self.right_value, config));
    }

    pub fn hide_diff(&mut self) {
        self.rendering = Rendering::Plain;
        self.diff = None;
    }

    pub fn rendering(&self) -> Rendering {
        self.rendering
    }

    /// Highlighted left and right cells, or `None` while rendering plain text.
    pub fn diff(&self) -> Option<&FieldDiff> {
        self.diff.as_ref()
    }

    pub fn left_value_cell(&self) -> Cell {
        Cell::new(self.left_value.as_str(), self.tone())
    }

    pub fn right_value_cell(&self) -> Cell {
        Cell::new(self.right_value.as_str(), self.tone())
    }

    pub fn merged_value_cell(&self) -> Cell {
        Cell::new(self.merged_value(), self.tone())
    }

    fn tone(&self) -> BackgroundTone {
        BackgroundTone::for_row(self.index)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::toolbar::{DiffHighlightMode, DiffView, ShowDiffConfig};

    use super::{Rendering, Selection, ThreeFieldValues};

    #[test]
    fn defaults_to_left_value() {
        let values = ThreeFieldValues::new("Knuth", "D. Knuth", 2);
        assert_eq!(values.merged_value(), "Knuth");
        assert_eq!(values.selection(), Selection::Left);
        assert!(!values.has_equal_left_and_right_values());
        assert_eq!(values.index(), 2);
    }

    #[test]
    fn right_only_value_is_kept() {
        let values = ThreeFieldValues::new("", "10.1000/xyz", 0);
        assert_eq!(values.merged_value(), "10.1000/xyz");
        assert_eq!(values.selection(), Selection::Right);
    }

    #[test]
    fn both_empty_are_equal() {
        let values = ThreeFieldValues::new("", "", 0);
        assert!(values.has_equal_left_and_right_values());
        assert_eq!(values.merged_value(), "");
    }

    #[test]
    fn each_change_notifies_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut values = ThreeFieldValues::new("a", "b", 0);
        let sink = Rc::clone(&seen);
        values.on_merged_value_changed(move |v| sink.borrow_mut().push(v.clone()));

        values.select_right_value();
        values.select_right_value();
        values.set_merged_value("custom");
        values.select_left_value();

        assert_eq!(
            *seen.borrow(),
            vec!["b".to_string(), "custom".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn custom_selection_when_edited() {
        let mut values = ThreeFieldValues::new("a", "b", 0);
        values.set_merged_value("c");
        assert_eq!(values.selection(), Selection::Custom);
    }

    #[test]
    fn diff_rendering_leaves_merged_value_alone() {
        let mut values = ThreeFieldValues::new("one two", "one three", 1);
        assert!(values.diff().is_none());

        let config = ShowDiffConfig::new(DiffView::Split, DiffHighlightMode::Words);
        values.show_diff(config);
        assert_eq!(values.rendering(), Rendering::Diff(config));
        assert!(values.diff().is_some());
        assert_eq!(values.merged_value(), "one two");

        values.hide_diff();
        assert_eq!(values.rendering(), Rendering::Plain);
        assert!(values.diff().is_none());
    }

    #[test]
    fn diff_is_computed_once_per_config() {
        let mut values = ThreeFieldValues::new("alpha beta", "alpha gamma", 0);
        let words = ShowDiffConfig::new(DiffView::Split, DiffHighlightMode::Words);
        values.show_diff(words);

        let first = values.diff().expect("diff").left.as_ptr();
        assert_eq!(values.diff().expect("diff").left.as_ptr(), first);
        values.show_diff(words);
        assert_eq!(values.diff().expect("diff").left.as_ptr(), first);

        let chars = ShowDiffConfig::new(DiffView::Split, DiffHighlightMode::Chars);
        values.show_diff(chars);
        assert_eq!(values.rendering(), Rendering::Diff(chars));
        let right = &values.diff().expect("diff").right;
        assert!(right.len() > 2);
        assert_eq!(right.iter().map(|s| s.text.as_str()).collect::<String>(), "alpha gamma");
    }

    #[test]
    fn cells_share_row_tone() {
        let values = ThreeFieldValues::new("a", "b", 3);
        assert_eq!(values.left_value_cell().tone, values.merged_value_cell().tone);
        assert_eq!(values.right_value_cell().text, "b");
    }
}
