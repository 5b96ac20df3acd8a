use ratatui::{prelude::*, widgets::Paragraph};

use crate::ui::theme::Theme;

/// Prev is unavailable on the first step and while an action is in flight.
pub fn prev_enabled(current: u16, loading: bool) -> bool {
    current > 1 && !loading
}

/// Next is unavailable on the final step (the terminal screen owns its own
/// call-to-action) and while an action is in flight.
pub fn next_enabled(current: u16, total: u16, loading: bool) -> bool {
    current < total && !loading
}

/// Numbered step indicator: completed steps marked done, the current one
/// highlighted, future steps neutral; plus the progress fraction.
pub fn draw_step_indicator(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    current: u16,
    total: u16,
    titles: &[&'static str],
) {
    let mut spans: Vec<Span> = Vec::new();
    for (idx, title) in titles.iter().enumerate() {
        let step = idx as u16 + 1;
        let (marker, style) = if step < current {
            ("✓".to_string(), theme.success_style())
        } else if step == current {
            (step.to_string(), theme.highlight_style())
        } else {
            (step.to_string(), theme.muted_style())
        };
        spans.push(Span::styled(format!(" {marker} "), style));
        if step == current {
            spans.push(Span::styled(format!("{title} "), theme.primary_style()));
        }
        if step < total {
            spans.push(Span::styled("─", theme.border_style()));
        }
    }
    spans.push(Span::styled(
        format!("  {current}/{total}"),
        theme.muted_style(),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The generic Prev/Next bar. Hidden entirely on terminal steps.
pub fn draw_nav_bar(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    current: u16,
    total: u16,
    loading: bool,
    next_label: &str,
) {
    let prev_style = if prev_enabled(current, loading) {
        theme.style()
    } else {
        theme.muted_style()
    };
    let next_style = if next_enabled(current, total, loading) {
        theme.primary_style().add_modifier(Modifier::BOLD)
    } else {
        theme.muted_style()
    };

    let line = Line::from(vec![
        Span::styled("[Ctrl+B] Back", prev_style),
        Span::raw("   "),
        Span::styled(format!("[Enter] {next_label}"), next_style),
        Span::raw("   "),
        Span::styled("[Esc] Home", theme.muted_style()),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}
