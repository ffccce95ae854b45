use bibmerge_core::{MergeAction, Result, ThreeWayMergeView};

use super::action::Action;
use super::state::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Accept,
    Cancel,
}

pub fn apply_action(ui: &mut UiState, view: &mut ThreeWayMergeView, action: Action) -> Result<Flow> {
    let last_row = view.rows().len().saturating_sub(1);
    match action {
        Action::MoveUp => ui.selected_row = ui.selected_row.saturating_sub(1),
        Action::MoveDown => ui.selected_row = (ui.selected_row + 1).min(last_row),
        Action::PickLeft => view.select_left_value(ui.selected_row)?,
        Action::PickRight => view.select_right_value(ui.selected_row)?,
        Action::Toolbar(toolbar_action) => view.apply_toolbar(toolbar_action),
        Action::ToggleGroupsMerge => {
            match view.groups_merge_action() {
                Some(MergeAction::Merge) => view.merge_groups(),
                Some(MergeAction::Unmerge) => view.unmerge_groups(),
                None => false,
            };
        }
        Action::StartEdit => {
            ui.edit_buffer = view
                .row(ui.selected_row)
                .map(|row| row.merged_value().to_string());
        }
        Action::ToggleHelp => ui.help_open = !ui.help_open,
        Action::Accept => return Ok(Flow::Accept),
        Action::Cancel => {
            view.cancel_groups_merge();
            return Ok(Flow::Cancel);
        }
    }
    Ok(Flow::Continue)
}

/// Commits the edit buffer into the selected row's merged value.
pub fn commit_edit(ui: &mut UiState, view: &mut ThreeWayMergeView) -> Result<()> {
    if let Some(buffer) = ui.edit_buffer.take() {
        view.set_merged_value(ui.selected_row, buffer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bibmerge_core::{
        BibEntry, EntryType, Field, GroupsMergeState, Rendering, ThreeWayMergeView, ToolbarAction,
    };

    use crate::app::action::Action;
    use crate::app::state::UiState;

    use super::{Flow, apply_action, commit_edit};

    fn view() -> ThreeWayMergeView {
        let left = BibEntry::new(EntryType::parse("article"))
            .with_field("title", "Left title")
            .with_field("groups", "a");
        let right = BibEntry::new(EntryType::parse("article"))
            .with_field("title", "Right title")
            .with_field("groups", "b");
        ThreeWayMergeView::new(&left, &right)
    }

    #[test]
    fn navigation_is_clamped() {
        let mut ui = UiState::default();
        let mut view = view();
        apply_action(&mut ui, &mut view, Action::MoveUp).expect("up");
        assert_eq!(ui.selected_row, 0);
        for _ in 0..10 {
            apply_action(&mut ui, &mut view, Action::MoveDown).expect("down");
        }
        assert_eq!(ui.selected_row, view.rows().len() - 1);
    }

    #[test]
    fn pick_right_updates_merged_entry() {
        let mut ui = UiState {
            selected_row: 1,
            ..UiState::default()
        };
        let mut view = view();
        apply_action(&mut ui, &mut view, Action::PickRight).expect("pick");
        assert_eq!(
            view.merged_entry().field(&Field::new("title")),
            Some("Right title")
        );
    }

    #[test]
    fn toggle_groups_merges_then_unmerges() {
        let mut ui = UiState::default();
        let mut view = view();
        apply_action(&mut ui, &mut view, Action::ToggleGroupsMerge).expect("merge");
        assert_eq!(view.groups_merge_state(), GroupsMergeState::Merged);
        apply_action(&mut ui, &mut view, Action::ToggleGroupsMerge).expect("unmerge");
        assert_eq!(view.groups_merge_state(), GroupsMergeState::Unmerged);
    }

    #[test]
    fn edit_round_trip_sets_custom_value() {
        let mut ui = UiState {
            selected_row: 1,
            ..UiState::default()
        };
        let mut view = view();
        apply_action(&mut ui, &mut view, Action::StartEdit).expect("edit");
        assert_eq!(ui.edit_buffer.as_deref(), Some("Left title"));

        if let Some(buffer) = ui.edit_buffer.as_mut() {
            buffer.push_str(" (2nd ed.)");
        }
        commit_edit(&mut ui, &mut view).expect("commit");
        assert!(!ui.is_editing());
        assert_eq!(
            view.merged_entry().field(&Field::new("title")),
            Some("Left title (2nd ed.)")
        );
    }

    #[test]
    fn cancel_reverts_group_merge() {
        let mut ui = UiState::default();
        let mut view = view();
        apply_action(&mut ui, &mut view, Action::ToggleGroupsMerge).expect("merge");
        let flow = apply_action(&mut ui, &mut view, Action::Cancel).expect("cancel");
        assert_eq!(flow, Flow::Cancel);
        assert_eq!(view.left_entry().field(&Field::GROUPS), Some("a"));
        assert_eq!(view.right_entry().field(&Field::GROUPS), Some("b"));
    }

    #[test]
    fn toolbar_and_help_toggles() {
        let mut ui = UiState::default();
        let mut view = view();
        apply_action(
            &mut ui,
            &mut view,
            Action::Toolbar(ToolbarAction::ToggleShowDiff),
        )
        .expect("diff");
        assert!(matches!(view.rows()[1].rendering(), Rendering::Diff(_)));

        apply_action(&mut ui, &mut view, Action::ToggleHelp).expect("help");
        assert!(ui.help_open);
        assert_eq!(
            apply_action(&mut ui, &mut view, Action::Accept).expect("accept"),
            Flow::Accept
        );
    }
}
