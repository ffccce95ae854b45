use std::cell::Ref;

use tracing::{debug, trace};

use crate::cell::{FieldNameCell, MergeAction};
use crate::entry::{BibEntry, EntryType, Field};
use crate::error::{MergeError, Result};
use crate::field_values::ThreeFieldValues;
use crate::groups::{CompoundEdit, FieldChange, Side, merge_groups};
use crate::toolbar::{MergeToolbar, PlainTextOrDiff, ShowDiffConfig, ToolbarAction, ToolbarEvent};
use crate::view_model::{LEFT_DEFAULT_HEADER, MergeViewModel, RIGHT_DEFAULT_HEADER};

/// How the left and right cells of a row are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// Equal values: one cell spanning the left and right columns.
    Spanning,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupsMergeState {
    Unmerged,
    Merged,
}

/// Three-way merge of two entries, one row per field.
///
/// Picking a value on a row writes it straight into the merged entry. The
/// groups row can additionally union both sides' groups back into the two
/// source entries, reversibly.
#[derive(Debug)]
pub struct ThreeWayMergeView {
    view_model: MergeViewModel,
    toolbar: MergeToolbar,
    rows: Vec<ThreeFieldValues>,
    field_name_cells: Vec<FieldNameCell>,
    groups_state: GroupsMergeState,
    merge_groups_edit: CompoundEdit,
}

impl ThreeWayMergeView {
    pub fn new(left_entry: &BibEntry, right_entry: &BibEntry) -> Self {
        Self::with_headers(left_entry, right_entry, LEFT_DEFAULT_HEADER, RIGHT_DEFAULT_HEADER)
    }

    pub fn with_headers(
        left_entry: &BibEntry,
        right_entry: &BibEntry,
        left_header: impl Into<String>,
        right_header: impl Into<String>,
    ) -> Self {
        let view_model = MergeViewModel::new(left_entry, right_entry, left_header, right_header);
        let mut view = Self {
            view_model,
            toolbar: MergeToolbar::new(),
            rows: Vec::new(),
            field_name_cells: Vec::new(),
            groups_state: GroupsMergeState::Unmerged,
            merge_groups_edit: CompoundEdit::new(),
        };

        for index in 0..view.view_model.all_fields_size() {
            let field = view.view_model.all_fields()[index].clone();
            view.field_name_cells.push(FieldNameCell::new(field, index));
            let row = view.build_field_values(index);
            view.rows.push(row);
        }
        view.refresh_groups_affordance();
        view
    }

    fn build_field_values(&self, index: usize) -> ThreeFieldValues {
        let field = self.view_model.all_fields()[index].clone();
        let left = self.view_model.left_entry();
        let right = self.view_model.right_entry();

        let (left_value, right_value) = if field == Field::TYPE_HEADER {
            (
                left.entry_type().display_name(),
                right.entry_type().display_name(),
            )
        } else {
            (
                left.field_or_empty(&field).to_string(),
                right.field_or_empty(&field).to_string(),
            )
        };

        let mut row = ThreeFieldValues::new(left_value, right_value, index);
        let merged = self.view_model.merged_entry_handle();
        write_merged_value(&mut merged.borrow_mut(), &field, row.merged_value());
        row.on_merged_value_changed(move |value| {
            trace!(field = %field, value = %value, "merged value changed");
            write_merged_value(&mut merged.borrow_mut(), &field, value);
        });
        row
    }

    /// Tears down the row at `index` and builds it again from the current
    /// source entries, then reapplies the diff display.
    pub fn update_field_values(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let row = self.build_field_values(index);
        self.rows[index] = row;
        self.update_diff();
        Ok(())
    }

    pub fn merged_entry(&self) -> Ref<'_, BibEntry> {
        self.view_model.merged_entry()
    }

    pub fn left_entry(&self) -> &BibEntry {
        self.view_model.left_entry()
    }

    pub fn right_entry(&self) -> &BibEntry {
        self.view_model.right_entry()
    }

    pub fn left_header(&self) -> &str {
        self.view_model.left_header()
    }

    pub fn right_header(&self) -> &str {
        self.view_model.right_header()
    }

    pub fn set_left_header(&mut self, header: impl Into<String>) {
        self.view_model.set_left_header(header);
    }

    pub fn set_right_header(&mut self, header: impl Into<String>) {
        self.view_model.set_right_header(header);
    }

    pub fn all_fields(&self) -> &[Field] {
        self.view_model.all_fields()
    }

    pub fn rows(&self) -> &[ThreeFieldValues] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&ThreeFieldValues> {
        self.rows.get(index)
    }

    pub fn field_name_cells(&self) -> &[FieldNameCell] {
        &self.field_name_cells
    }

    pub fn row_layout(&self, index: usize) -> Option<RowLayout> {
        self.rows.get(index).map(|row| {
            if row.has_equal_left_and_right_values() {
                RowLayout::Spanning
            } else {
                RowLayout::Split
            }
        })
    }

    pub fn toolbar(&self) -> &MergeToolbar {
        &self.toolbar
    }

    pub fn select_left_entry_values(&mut self) {
        debug!(rows = self.rows.len(), "selecting all left values");
        self.rows.iter_mut().for_each(ThreeFieldValues::select_left_value);
    }

    pub fn select_right_entry_values(&mut self) {
        debug!(rows = self.rows.len(), "selecting all right values");
        self.rows.iter_mut().for_each(ThreeFieldValues::select_right_value);
    }

    pub fn select_left_value(&mut self, index: usize) -> Result<()> {
        self.row_mut(index)?.select_left_value();
        Ok(())
    }

    pub fn select_right_value(&mut self, index: usize) -> Result<()> {
        self.row_mut(index)?.select_right_value();
        Ok(())
    }

    pub fn set_merged_value(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.row_mut(index)?.set_merged_value(value);
        Ok(())
    }

    /// Switches the toolbar to `config` and turns diff display on.
    pub fn show_diff(&mut self, config: ShowDiffConfig) {
        let mut changed = false;
        for action in [
            ToolbarAction::SetDiffView(config.diff_view),
            ToolbarAction::SetHighlightMode(config.highlight_mode),
            ToolbarAction::SetPlainTextOrDiff(PlainTextOrDiff::Diff),
        ] {
            changed |= self.toolbar.apply(action).is_some();
        }
        if changed {
            self.update_diff();
        }
    }

    pub fn hide_diff(&mut self) {
        if self
            .toolbar
            .apply(ToolbarAction::SetPlainTextOrDiff(PlainTextOrDiff::PlainText))
            .is_some()
        {
            self.update_diff();
        }
    }

    pub fn apply_toolbar(&mut self, action: ToolbarAction) {
        match self.toolbar.apply(action) {
            Some(ToolbarEvent::ConfigChanged) => self.update_diff(),
            Some(ToolbarEvent::SelectAllLeft) => self.select_left_entry_values(),
            Some(ToolbarEvent::SelectAllRight) => self.select_right_entry_values(),
            None => {}
        }
    }

    fn update_diff(&mut self) {
        if self.toolbar.is_show_diff_enabled() {
            let config = self.toolbar.diff_config();
            self.rows.iter_mut().for_each(|row| row.show_diff(config));
        } else {
            self.rows.iter_mut().for_each(ThreeFieldValues::hide_diff);
        }
    }

    pub fn groups_row(&self) -> Option<usize> {
        self.view_model.index_of(&Field::GROUPS)
    }

    pub fn groups_merge_state(&self) -> GroupsMergeState {
        self.groups_state
    }

    /// The action the groups row offers, or `None` without a groups row.
    pub fn groups_merge_action(&self) -> Option<MergeAction> {
        self.groups_row().map(|_| match self.groups_state {
            GroupsMergeState::Unmerged => MergeAction::Merge,
            GroupsMergeState::Merged => MergeAction::Unmerge,
        })
    }

    pub fn can_merge_groups(&self) -> bool {
        self.groups_row().is_some()
            && self.groups_state == GroupsMergeState::Unmerged
            && self.left_groups() != self.right_groups()
    }

    pub fn can_unmerge_groups(&self) -> bool {
        self.groups_state == GroupsMergeState::Merged && self.merge_groups_edit.can_undo()
    }

    /// Writes the union of both entries' groups into both entries. Returns
    /// `false` and changes nothing when the merge is not available.
    pub fn merge_groups(&mut self) -> bool {
        if !self.can_merge_groups() {
            debug!("group merge not available, ignoring");
            return false;
        }

        let (left, right) = self.view_model.source_entries_mut();
        if self.merge_groups_edit.can_redo() {
            debug!("redoing previous group merge");
            self.merge_groups_edit.redo(left, right);
        } else {
            let left_groups = left.field_or_empty(&Field::GROUPS).to_string();
            let right_groups = right.field_or_empty(&Field::GROUPS).to_string();
            let merged = merge_groups(&left_groups, &right_groups);
            debug!(left = %left_groups, right = %right_groups, merged = %merged, "merging groups");

            left.set_field(Field::GROUPS, merged.as_str());
            right.set_field(Field::GROUPS, merged.as_str());
            self.merge_groups_edit.add_edit(FieldChange::new(
                Side::Left,
                Field::GROUPS,
                left_groups,
                merged.as_str(),
            ));
            self.merge_groups_edit.add_edit(FieldChange::new(
                Side::Right,
                Field::GROUPS,
                right_groups,
                merged,
            ));
            self.merge_groups_edit.end();
        }

        self.groups_state = GroupsMergeState::Merged;
        self.refresh_groups_row();
        true
    }

    /// Restores both entries' original groups. Returns `false` when there is
    /// no merge to undo.
    pub fn unmerge_groups(&mut self) -> bool {
        if !self.undo_groups_merge() {
            return false;
        }
        debug!("unmerged groups");
        self.refresh_groups_row();
        true
    }

    /// Undoes a pending group merge, if any, so the source entries end up as
    /// they were handed in.
    pub fn cancel_groups_merge(&mut self) {
        if self.undo_groups_merge() {
            debug!("cancelled group merge");
            self.refresh_groups_row();
        }
    }

    fn undo_groups_merge(&mut self) -> bool {
        let (left, right) = self.view_model.source_entries_mut();
        if !self.merge_groups_edit.undo(left, right) {
            return false;
        }
        self.groups_state = GroupsMergeState::Unmerged;
        true
    }

    fn refresh_groups_row(&mut self) {
        if let Some(index) = self.groups_row() {
            let row = self.build_field_values(index);
            self.rows[index] = row;
            self.update_diff();
        }
        self.refresh_groups_affordance();
    }

    fn refresh_groups_affordance(&mut self) {
        let Some(index) = self.groups_row() else {
            return;
        };
        let action = self.groups_merge_action().unwrap_or(MergeAction::Merge);
        let enabled = match action {
            MergeAction::Merge => self.can_merge_groups(),
            MergeAction::Unmerge => self.can_unmerge_groups(),
        };
        self.field_name_cells[index].merge_action = Some((action, enabled));
    }

    fn left_groups(&self) -> &str {
        self.view_model.left_entry().field_or_empty(&Field::GROUPS)
    }

    fn right_groups(&self) -> &str {
        self.view_model.right_entry().field_or_empty(&Field::GROUPS)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(MergeError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut ThreeFieldValues> {
        self.check_index(index)?;
        Ok(&mut self.rows[index])
    }
}

fn write_merged_value(merged: &mut BibEntry, field: &Field, value: &str) {
    if *field == Field::TYPE_HEADER {
        merged.set_entry_type(EntryType::parse(value));
    } else {
        merged.set_field(field.clone(), value);
    }
}
