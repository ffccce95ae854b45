pub mod action;
pub mod input;
pub mod state;
pub mod update;

use std::io;
use std::time::Duration;

use anyhow::Result;
use bibmerge_core::{
    DiffSegment, FieldNameCell, MergeAction, RowLayout, ThreeFieldValues, ThreeWayMergeView,
};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use crate::ui::help;
use crate::ui::layout::{GridColumns, compute_grid_columns};
use crate::ui::render::{compose_status, single_line, truncate_middle};
use crate::ui::theme::{ThemeTokens, build_theme, style_for_segment, style_for_tone};
use action::Action;
use state::{UiState, scroll_to_selection};
use update::Flow;

pub use state::ThemeChoice;

/// How the user left the merge screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Cancelled,
}

pub struct App {
    view: ThreeWayMergeView,
    ui: UiState,
    status: String,
    interactive_input: bool,
    grid_height: usize,
    #[cfg(test)]
    test_keys: std::collections::VecDeque<KeyEvent>,
}

impl App {
    pub fn new(view: ThreeWayMergeView) -> Self {
        Self {
            view,
            ui: UiState::default(),
            status: "? help | Ctrl+S accept | Esc cancel".into(),
            interactive_input: true,
            grid_height: 1,
            #[cfg(test)]
            test_keys: std::collections::VecDeque::new(),
        }
    }

    pub fn set_theme(&mut self, theme: ThemeChoice) {
        self.ui.theme = theme;
    }

    pub fn set_no_color(&mut self, no_color: bool) {
        self.ui.no_color = no_color;
    }

    pub fn into_view(self) -> ThreeWayMergeView {
        self.view
    }

    pub fn run(&mut self) -> Result<Outcome> {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        enable_raw_mode()?;
        let loop_result = self.run_loop(&mut terminal);
        disable_raw_mode()?;

        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        loop_result
    }

    fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<Outcome> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if !self.interactive_input {
                return Ok(Outcome::Accepted);
            }

            if let Some(key) = self.next_key()? {
                match self.handle_key(key)? {
                    Flow::Continue => {}
                    Flow::Accept => return Ok(Outcome::Accepted),
                    Flow::Cancel => return Ok(Outcome::Cancelled),
                }
            }
        }
    }

    #[cfg(not(test))]
    fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        next_pressed_key(event::poll, event::read)
    }

    #[cfg(test)]
    fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        match self.test_keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => Ok(Some(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        if self.ui.is_editing() {
            self.handle_edit_key(key)?;
            return Ok(Flow::Continue);
        }

        if self.ui.help_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.ui.help_open = false;
            }
            return Ok(Flow::Continue);
        }

        let Some(action) = input::map_browse_key(key) else {
            return Ok(Flow::Continue);
        };
        let flow = update::apply_action(&mut self.ui, &mut self.view, action)?;
        self.status = status_after(action, &self.view, &self.ui);
        Ok(flow)
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(buffer) = self.ui.edit_buffer.as_mut() else {
            return Ok(());
        };
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                update::commit_edit(&mut self.ui, &mut self.view)?;
                self.status = "Merged value updated".into();
            }
            (KeyCode::Esc, _) => {
                self.ui.edit_buffer = None;
                self.status = "Edit discarded".into();
            }
            (KeyCode::Backspace, _) => {
                buffer.pop();
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => buffer.clear(),
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let theme = build_theme(self.ui.theme, self.ui.no_color);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(Paragraph::new(self.toolbar_line(&theme)), vertical[0]);
        self.draw_header(frame, vertical[1], &theme);
        self.draw_grid(frame, vertical[2], &theme);

        let status_text = compose_status(
            &self.status,
            &self.status_hint(),
            vertical[3].width as usize,
        );
        frame.render_widget(
            Paragraph::new(status_text).style(status_style(&theme, &self.status)),
            vertical[3],
        );

        if self.ui.help_open {
            let popup = centered_popup(70, help::help_lines().len() as u16 + 2, area);
            frame.render_widget(Clear, popup);
            let help_widget = Paragraph::new(help::help_text()).style(theme.help).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help")
                    .border_style(theme.help_border),
            );
            frame.render_widget(help_widget, popup);
        }
    }

    fn toolbar_line(&self, theme: &ThemeTokens) -> Line<'static> {
        let toolbar = self.view.toolbar();
        let controls = if toolbar.diff_controls_enabled() {
            theme.toolbar
        } else {
            theme.toolbar_disabled
        };
        Line::from(vec![
            Span::styled(format!("[d] {}", toolbar.plain_text_or_diff().label()), theme.toolbar),
            Span::raw("  "),
            Span::styled(format!("[v] {}", toolbar.diff_view().label()), controls),
            Span::raw("  "),
            Span::styled(format!("[c] {}", toolbar.highlight_mode().label()), controls),
            Span::raw("  "),
            Span::styled("[L] Select Left  [R] Select Right", theme.toolbar),
        ])
    }

    fn draw_header(&self, frame: &mut Frame<'_>, area: Rect, theme: &ThemeTokens) {
        let columns = compute_grid_columns(area);
        for (rect, title) in [
            (columns.name, "Field"),
            (columns.left, self.view.left_header()),
            (columns.right, self.view.right_header()),
            (columns.merged, "Merged"),
        ] {
            let text = truncate_middle(title, rect.width as usize).into_owned();
            frame.render_widget(Paragraph::new(text).style(theme.header), rect);
        }
    }

    fn draw_grid(&mut self, frame: &mut Frame<'_>, area: Rect, theme: &ThemeTokens) {
        self.grid_height = area.height.max(1) as usize;
        self.ui.scroll = scroll_to_selection(self.ui.scroll, self.ui.selected_row, self.grid_height);
        let columns = compute_grid_columns(area);

        let visible = self
            .view
            .rows()
            .iter()
            .zip(self.view.field_name_cells())
            .enumerate()
            .skip(self.ui.scroll)
            .take(self.grid_height);

        for (offset, (index, (row, name_cell))) in visible.enumerate() {
            let cols = columns.at_row(area.y + offset as u16);
            let base = style_for_tone(theme, row.merged_value_cell().tone);
            let selected = index == self.ui.selected_row;
            let layout = self.view.row_layout(index).unwrap_or(RowLayout::Split);

            let name_style = if selected {
                base.patch(theme.selected_row)
            } else {
                base.patch(theme.field_name)
            };
            frame.render_widget(
                Paragraph::new(name_cell_text(name_cell, cols.name.width as usize)).style(name_style),
                cols.name,
            );

            self.draw_value_cells(frame, &cols, row, layout, base, theme);

            let merged_text = match (&self.ui.edit_buffer, selected) {
                (Some(buffer), true) => format!("{buffer}▏"),
                _ => single_line(row.merged_value()).into_owned(),
            };
            let merged_text = truncate_middle(&merged_text, cols.merged.width as usize).into_owned();
            frame.render_widget(
                Paragraph::new(merged_text).style(base.patch(theme.merged)),
                cols.merged,
            );
        }
    }

    fn draw_value_cells(
        &self,
        frame: &mut Frame<'_>,
        cols: &GridColumns,
        row: &ThreeFieldValues,
        layout: RowLayout,
        base: Style,
        theme: &ThemeTokens,
    ) {
        let diff = row.diff();
        match layout {
            RowLayout::Spanning => {
                let rect = cols.left_and_right();
                let text = single_line(row.left_value());
                let text = truncate_middle(&text, rect.width as usize).into_owned();
                frame.render_widget(Paragraph::new(text).style(base.patch(theme.unchanged)), rect);
            }
            RowLayout::Split => {
                let (left, right) = match diff {
                    Some(diff) => (
                        segments_line(&diff.left, theme),
                        segments_line(&diff.right, theme),
                    ),
                    None => (
                        plain_line(row.left_value(), cols.left.width, theme),
                        plain_line(row.right_value(), cols.right.width, theme),
                    ),
                };
                frame.render_widget(Paragraph::new(left).style(base), cols.left);
                frame.render_widget(Paragraph::new(right).style(base), cols.right);
            }
        }
    }

    fn status_hint(&self) -> String {
        let total = self.view.rows().len();
        let mut hint = format!("row {}/{}", self.ui.selected_row + 1, total);
        if let Some(action) = self.view.groups_merge_action() {
            hint.push_str(&format!(" | [g] {}", action.label()));
        }
        hint
    }
}

fn status_after(action: Action, view: &ThreeWayMergeView, ui: &UiState) -> String {
    let field = view
        .all_fields()
        .get(ui.selected_row)
        .map(|f| f.display_name())
        .unwrap_or_default();
    match action {
        Action::PickLeft => format!("{field}: took {}", view.left_header()),
        Action::PickRight => format!("{field}: took {}", view.right_header()),
        Action::ToggleGroupsMerge => match view.groups_merge_action() {
            Some(MergeAction::Unmerge) => "Groups merged into both entries".into(),
            Some(MergeAction::Merge) if view.can_merge_groups() => "Groups unmerged".into(),
            Some(MergeAction::Merge) => "Groups are identical, nothing to merge".into(),
            None => "No groups field".into(),
        },
        Action::StartEdit => format!("Editing {field}: Enter keep | Esc discard"),
        Action::Toolbar(_) => {
            let toolbar = view.toolbar();
            if toolbar.is_show_diff_enabled() {
                format!(
                    "Diff: {} | {}",
                    toolbar.diff_view().label(),
                    toolbar.highlight_mode().label()
                )
            } else {
                "Plain text".into()
            }
        }
        Action::Accept => "Merge accepted".into(),
        Action::Cancel => "Merge cancelled".into(),
        Action::MoveUp | Action::MoveDown | Action::ToggleHelp => field,
    }
}

fn name_cell_text(cell: &FieldNameCell, width: usize) -> String {
    let text = match cell.merge_action {
        Some((_, true)) => format!("{} [g]", cell.text()),
        _ => cell.text().to_string(),
    };
    truncate_middle(&text, width).into_owned()
}

fn segments_line(segments: &[DiffSegment], theme: &ThemeTokens) -> Line<'static> {
    Line::from(
        segments
            .iter()
            .map(|segment| {
                Span::styled(
                    single_line(&segment.text).into_owned(),
                    style_for_segment(theme, segment.kind),
                )
            })
            .collect::<Vec<_>>(),
    )
}

fn plain_line(value: &str, width: u16, theme: &ThemeTokens) -> Line<'static> {
    let text = single_line(value);
    Line::from(Span::styled(
        truncate_middle(&text, width as usize).into_owned(),
        theme.unchanged,
    ))
}

fn status_style(theme: &ThemeTokens, status: &str) -> Style {
    if status.contains("error") || status.contains("cancelled") {
        return theme.status_error;
    }
    if status.contains("identical") || status.contains("Editing") {
        return theme.status_warn;
    }
    theme.status_ok
}

fn centered_popup(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width.saturating_mul(width_percent) / 100)
        .max(10)
        .min(area.width);
    let height = height.max(3).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg_attr(test, allow(dead_code))]
fn next_pressed_key<P, R>(mut poll: P, mut read: R) -> Result<Option<KeyEvent>>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    if !poll(Duration::from_millis(50))? {
        return Ok(None);
    }
    match read()? {
        Event::Key(key) if key.kind == event::KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}
