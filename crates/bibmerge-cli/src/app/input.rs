use bibmerge_core::ToolbarAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action::Action;

pub fn map_browse_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Some(Action::Accept),
            KeyCode::Char('q') => Some(Action::Cancel),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PickLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::PickRight),
        KeyCode::Char('L') => Some(Action::Toolbar(ToolbarAction::SelectAllLeft)),
        KeyCode::Char('R') => Some(Action::Toolbar(ToolbarAction::SelectAllRight)),
        KeyCode::Char('d') => Some(Action::Toolbar(ToolbarAction::ToggleShowDiff)),
        KeyCode::Char('v') => Some(Action::Toolbar(ToolbarAction::ToggleDiffView)),
        KeyCode::Char('c') => Some(Action::Toolbar(ToolbarAction::ToggleHighlightMode)),
        KeyCode::Char('g') => Some(Action::ToggleGroupsMerge),
        KeyCode::Char('e') | KeyCode::Enter => Some(Action::StartEdit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Cancel),
        _ => None,
    }
}
