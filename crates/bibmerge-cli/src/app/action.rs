use bibmerge_core::ToolbarAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    PickLeft,
    PickRight,
    Toolbar(ToolbarAction),
    ToggleGroupsMerge,
    StartEdit,
    ToggleHelp,
    Accept,
    Cancel,
}
