use bibmerge_core::{BackgroundTone, SegmentKind};
use ratatui::style::{Color, Modifier, Style};

use crate::app::state::ThemeChoice;

#[derive(Debug, Clone)]
pub struct ThemeTokens {
    pub toolbar: Style,
    pub toolbar_disabled: Style,
    pub header: Style,
    pub field_name: Style,
    pub status_ok: Style,
    pub status_warn: Style,
    pub status_error: Style,
    pub selected_row: Style,
    pub help: Style,
    pub help_border: Style,
    pub unchanged: Style,
    pub added: Style,
    pub removed: Style,
    pub merged: Style,
    pub row_light: Style,
    pub row_dark: Style,
}

pub fn build_theme(choice: ThemeChoice, no_color: bool) -> ThemeTokens {
    if no_color {
        return monochrome_theme();
    }

    match choice {
        ThemeChoice::Auto | ThemeChoice::Default => default_theme(),
        ThemeChoice::HighContrast => high_contrast_theme(),
        ThemeChoice::Light => light_theme(),
    }
}

pub fn style_for_segment(tokens: &ThemeTokens, kind: SegmentKind) -> Style {
    match kind {
        SegmentKind::Unchanged => tokens.unchanged,
        SegmentKind::Added => tokens.added,
        SegmentKind::Removed => tokens.removed,
    }
}

pub fn style_for_tone(tokens: &ThemeTokens, tone: BackgroundTone) -> Style {
    match tone {
        BackgroundTone::Light => tokens.row_light,
        BackgroundTone::Dark => tokens.row_dark,
    }
}

fn default_theme() -> ThemeTokens {
    ThemeTokens {
        toolbar: Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        toolbar_disabled: Style::default().fg(Color::DarkGray),
        header: Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
        field_name: Style::default().fg(Color::Magenta),
        status_ok: Style::default().fg(Color::Green),
        status_warn: Style::default().fg(Color::Yellow),
        status_error: Style::default().fg(Color::Red),
        selected_row: Style::default().add_modifier(Modifier::REVERSED),
        help: Style::default().fg(Color::White),
        help_border: Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
        unchanged: Style::default().fg(Color::White),
        added: Style::default().fg(Color::LightGreen),
        removed: Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::CROSSED_OUT),
        merged: Style::default().fg(Color::LightYellow),
        row_light: Style::default(),
        row_dark: Style::default().bg(Color::Rgb(28, 28, 28)),
    }
}

fn high_contrast_theme() -> ThemeTokens {
    ThemeTokens {
        toolbar: Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
        toolbar_disabled: Style::default().fg(Color::Gray).bg(Color::Black),
        header: Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        field_name: Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        status_ok: Style::default().fg(Color::Green).bg(Color::Black),
        status_warn: Style::default().fg(Color::Yellow).bg(Color::Black),
        status_error: Style::default().fg(Color::Red).bg(Color::Black),
        selected_row: Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow),
        help: Style::default().fg(Color::White).bg(Color::Black),
        help_border: Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        unchanged: Style::default().fg(Color::White),
        added: Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        removed: Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT),
        merged: Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        row_light: Style::default().bg(Color::Black),
        row_dark: Style::default().bg(Color::Black),
    }
}

/// Striped rows in the merge dialog's own background colours.
fn light_theme() -> ThemeTokens {
    let tone = |tone: BackgroundTone| {
        let (r, g, b) = tone.rgb();
        Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b))
    };
    ThemeTokens {
        toolbar: Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        toolbar_disabled: Style::default().fg(Color::Gray),
        header: Style::default()
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
        field_name: Style::default().fg(Color::Magenta),
        status_ok: Style::default().fg(Color::Green),
        status_warn: Style::default().fg(Color::Rgb(160, 110, 0)),
        status_error: Style::default().fg(Color::Red),
        selected_row: Style::default().add_modifier(Modifier::REVERSED),
        help: Style::default().fg(Color::Black).bg(Color::White),
        help_border: Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        unchanged: Style::default().fg(Color::Black),
        added: Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(198, 239, 206)),
        removed: Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(255, 199, 206)),
        merged: Style::default().fg(Color::Blue),
        row_light: tone(BackgroundTone::Light),
        row_dark: tone(BackgroundTone::Dark),
    }
}

fn monochrome_theme() -> ThemeTokens {
    let base = Style::default();
    ThemeTokens {
        toolbar: base.add_modifier(Modifier::BOLD),
        toolbar_disabled: base.add_modifier(Modifier::DIM),
        header: base.add_modifier(Modifier::BOLD),
        field_name: base,
        status_ok: base,
        status_warn: base,
        status_error: base,
        selected_row: base.add_modifier(Modifier::REVERSED),
        help: base,
        help_border: base.add_modifier(Modifier::BOLD),
        unchanged: base,
        added: base.add_modifier(Modifier::UNDERLINED),
        removed: base.add_modifier(Modifier::CROSSED_OUT),
        merged: base.add_modifier(Modifier::BOLD),
        row_light: base,
        row_dark: base,
    }
}
