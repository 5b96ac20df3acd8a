pub mod form;
pub mod input;
mod layout;
pub mod progress;
mod steps;
pub mod theme;

pub use layout::Layout;
pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, Screen};
use crate::workflows::WorkflowKind;

pub fn draw(frame: &mut Frame, app: &App) {
    let layout = Layout::new(frame.area());

    frame.render_widget(
        Block::default().style(app.theme.style()),
        layout.full,
    );
    draw_header(frame, layout.header, app);

    match app.screen {
        Screen::Home => draw_home(frame, layout.content, app),
        Screen::Wizard => draw_wizard(frame, &layout, app),
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.config.general.title),
            app.theme.highlight_style(),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            app.theme.muted_style(),
        ),
    ];
    if app.is_mock() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[mock]", app.theme.secondary_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_home(frame: &mut Frame, area: Rect, app: &App) {
    let box_area = Layout::centered_box(area, 60, 14);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" New ")
        .title_style(app.theme.primary_style());
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let items: Vec<ListItem> = WorkflowKind::ALL
        .iter()
        .enumerate()
        .flat_map(|(idx, kind)| {
            let selected = idx == app.home_selected;
            let marker = if selected { "> " } else { "  " };
            let title_style = if selected {
                app.theme.highlight_style()
            } else {
                app.theme.style()
            };
            [
                ListItem::new(format!("{marker}{}", kind.title())).style(title_style),
                ListItem::new(format!("    {}", kind.description()))
                    .style(app.theme.muted_style()),
                ListItem::new(""),
            ]
        })
        .collect();
    frame.render_widget(List::new(items), inner);

    let hint_area = Rect::new(area.x, area.y + area.height.saturating_sub(1), area.width, 1);
    frame.render_widget(
        Paragraph::new("j/k: move   Enter: start   q: quit")
            .style(app.theme.muted_style())
            .alignment(Alignment::Center),
        hint_area,
    );
}

fn draw_wizard(frame: &mut Frame, layout: &Layout, app: &App) {
    let Some(ref active) = app.active else {
        return;
    };

    progress::draw_step_indicator(
        frame,
        layout.indicator,
        &app.theme,
        active.current_step(),
        active.total_steps(),
        &active.step_titles(),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(format!(" {} ", active.step_title()))
        .title_style(app.theme.primary_style());
    let body = block.inner(layout.content);
    frame.render_widget(block, layout.content);
    steps::draw_step_body(frame, body, &app.theme, &app.form, active);

    draw_message_panel(frame, layout.message, app);

    if !active.hide_navigation() {
        progress::draw_nav_bar(
            frame,
            layout.nav,
            &app.theme,
            active.current_step(),
            active.total_steps(),
            active.is_loading(),
            active.next_label(),
        );
    }
}

fn draw_message_panel(frame: &mut Frame, area: Rect, app: &App) {
    let Some(ref active) = app.active else {
        return;
    };

    let (text, is_error) = match active.message() {
        Some(m) => (m.text.clone(), m.is_error),
        None if active.is_loading() => (format!("{} Working...", app.spinner_char()), false),
        None => return,
    };

    let (title, border_style, text_style) = if is_error {
        (" Error ", app.theme.error_style(), app.theme.error_style())
    } else {
        (" Info ", app.theme.secondary_style(), app.theme.style())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(border_style.add_modifier(Modifier::BOLD));

    let mut spans = vec![Span::styled(text, text_style)];
    if !active.is_loading() {
        spans.push(Span::styled(
            " (press any key to dismiss)",
            app.theme.muted_style(),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
