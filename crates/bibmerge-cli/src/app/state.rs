#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Auto,
    Default,
    HighContrast,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub selected_row: usize,
    pub scroll: usize,
    pub help_open: bool,
    /// Text being typed into the selected row's merged cell.
    pub edit_buffer: Option<String>,
    pub theme: ThemeChoice,
    pub no_color: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_row: 0,
            scroll: 0,
            help_open: false,
            edit_buffer: None,
            theme: ThemeChoice::Auto,
            no_color: false,
        }
    }
}

impl UiState {
    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }
}

/// Keeps `selected` inside a window of `height` rows starting at `scroll`.
pub fn scroll_to_selection(scroll: usize, selected: usize, height: usize) -> usize {
    let height = height.max(1);
    if selected < scroll {
        selected
    } else if selected >= scroll + height {
        selected + 1 - height
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use super::{UiState, scroll_to_selection};

    #[test]
    fn scroll_follows_selection() {
        assert_eq!(scroll_to_selection(0, 2, 5), 0);
        assert_eq!(scroll_to_selection(0, 7, 5), 3);
        assert_eq!(scroll_to_selection(4, 1, 5), 1);
        assert_eq!(scroll_to_selection(3, 3, 0), 3);
    }

    #[test]
    fn editing_tracks_buffer() {
        let mut ui = UiState::default();
        assert!(!ui.is_editing());
        ui.edit_buffer = Some(String::new());
        assert!(ui.is_editing());
    }
}
