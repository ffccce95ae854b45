use crate::entry::{BibEntry, Field};

pub const GROUPS_SEPARATOR: &str = ", ";

/// Union of two group lists: left groups in first-seen order, then groups
/// only the right list names, in their order. A blank side yields the other
/// side unchanged.
pub fn merge_groups(left: &str, right: &str) -> String {
    if left.trim().is_empty() {
        return right.to_string();
    }
    if right.trim().is_empty() {
        return left.to_string();
    }

    let mut merged: Vec<&str> = Vec::new();
    for group in split_groups(left).chain(split_groups(right)) {
        if !merged.contains(&group) {
            merged.push(group);
        }
    }
    merged.join(GROUPS_SEPARATOR)
}

pub fn split_groups(groups: &str) -> impl Iterator<Item = &str> {
    groups
        .split(GROUPS_SEPARATOR)
        .filter(|group| !group.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One field rewrite on one of the two source entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub side: Side,
    pub field: Field,
    pub old_value: String,
    pub new_value: String,
}

impl FieldChange {
    pub fn new(
        side: Side,
        field: Field,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            side,
            field,
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }

    fn target<'a>(&self, left: &'a mut BibEntry, right: &'a mut BibEntry) -> &'a mut BibEntry {
        match self.side {
            Side::Left => left,
            Side::Right => right,
        }
    }

    pub fn undo(&self, left: &mut BibEntry, right: &mut BibEntry) {
        self.target(left, right)
            .set_field(self.field.clone(), self.old_value.as_str());
    }

    pub fn redo(&self, left: &mut BibEntry, right: &mut BibEntry) {
        self.target(left, right)
            .set_field(self.field.clone(), self.new_value.as_str());
    }
}

/// A group of field changes undone and redone as one unit.
///
/// Edits can only be appended while in progress; `end` closes the edit and
/// enables undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundEdit {
    edits: Vec<FieldChange>,
    ended: bool,
    undone: bool,
}

impl CompoundEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` once the edit has been ended.
    pub fn add_edit(&mut self, edit: FieldChange) -> bool {
        if self.ended {
            return false;
        }
        self.edits.push(edit);
        true
    }

    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn is_in_progress(&self) -> bool {
        !self.ended
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn edits(&self) -> &[FieldChange] {
        &self.edits
    }

    pub fn can_undo(&self) -> bool {
        self.ended && !self.undone && !self.edits.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.ended && self.undone && !self.edits.is_empty()
    }

    /// Reverts every change, last first. No-op unless `can_undo`.
    pub fn undo(&mut self, left: &mut BibEntry, right: &mut BibEntry) -> bool {
        if !self.can_undo() {
            return false;
        }
        for edit in self.edits.iter().rev() {
            edit.undo(left, right);
        }
        self.undone = true;
        true
    }

    /// Reapplies every change in order. No-op unless `can_redo`.
    pub fn redo(&mut self, left: &mut BibEntry, right: &mut BibEntry) -> bool {
        if !self.can_redo() {
            return false;
        }
        for edit in &self.edits {
            edit.redo(left, right);
        }
        self.undone = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::entry::{BibEntry, Field};

    use super::{CompoundEdit, FieldChange, Side, merge_groups, split_groups};

    fn set_of(groups: &str) -> BTreeSet<&str> {
        split_groups(groups).collect()
    }

    #[test]
    fn union_keeps_left_then_right_only() {
        assert_eq!(
            merge_groups("reading, todo", "todo, archived"),
            "reading, todo, archived"
        );
    }

    #[test]
    fn blank_side_returns_other_side() {
        assert_eq!(merge_groups("", "todo"), "todo");
        assert_eq!(merge_groups("todo", "  "), "todo");
        assert_eq!(merge_groups("", ""), "");
    }

    #[test]
    fn union_is_commutative_as_a_set() {
        let a = "x, y, z";
        let b = "w, y";
        assert_eq!(set_of(&merge_groups(a, b)), set_of(&merge_groups(b, a)));
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(merge_groups("a, a, b", "b, c, c"), "a, b, c");
        let a = "p, q";
        assert_eq!(set_of(&merge_groups(a, a)), set_of(a));
    }

    #[test]
    fn compound_edit_undo_redo_cycle() {
        let mut left = BibEntry::default().with_field("groups", "a");
        let mut right = BibEntry::default().with_field("groups", "b");
        left.set_field(Field::GROUPS, "a, b");
        right.set_field(Field::GROUPS, "a, b");

        let mut edit = CompoundEdit::new();
        assert!(edit.add_edit(FieldChange::new(Side::Left, Field::GROUPS, "a", "a, b")));
        assert!(!edit.can_undo());
        assert!(edit.add_edit(FieldChange::new(Side::Right, Field::GROUPS, "b", "a, b")));
        edit.end();
        assert!(!edit.add_edit(FieldChange::new(Side::Left, Field::GROUPS, "x", "y")));
        assert_eq!(edit.edits().len(), 2);

        assert!(edit.undo(&mut left, &mut right));
        assert_eq!(left.field(&Field::GROUPS), Some("a"));
        assert_eq!(right.field(&Field::GROUPS), Some("b"));
        assert!(!edit.undo(&mut left, &mut right));

        assert!(edit.redo(&mut left, &mut right));
        assert_eq!(left.field(&Field::GROUPS), Some("a, b"));
        assert!(edit.can_undo());
    }

    #[test]
    fn undo_restores_absent_field() {
        let mut left = BibEntry::default();
        let mut right = BibEntry::default().with_field("groups", "todo");
        left.set_field(Field::GROUPS, "todo");

        let mut edit = CompoundEdit::new();
        edit.add_edit(FieldChange::new(Side::Left, Field::GROUPS, "", "todo"));
        edit.end();
        edit.undo(&mut left, &mut right);

        assert!(!left.has_field(&Field::GROUPS));
        assert_eq!(right.field(&Field::GROUPS), Some("todo"));
    }

    #[test]
    fn empty_edit_cannot_undo() {
        let mut edit = CompoundEdit::new();
        edit.end();
        assert!(edit.is_empty());
        assert!(!edit.can_undo());
        assert!(!edit.can_redo());
    }
}
