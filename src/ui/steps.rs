use ratatui::{
    prelude::*,
    widgets::{List, ListItem, Paragraph, Wrap},
};

use crate::app::ActiveWizard;
use crate::model::Platform;
use crate::ui::form::{FormState, WEEKDAYS};
use crate::ui::input::InputBuffer;
use crate::ui::theme::Theme;
use crate::wizard::StepView;

pub fn draw_step_body(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    form: &FormState,
    active: &ActiveWizard,
) {
    match active.view() {
        StepView::Compose => draw_compose(frame, area, theme, form),
        StepView::Subject => draw_subject(frame, area, theme, form),
        StepView::Draft => draw_draft(frame, area, theme, form),
        StepView::Platforms => draw_platforms(frame, area, theme, form),
        StepView::Formatting => draw_formatting(frame, area, theme, form, active),
        StepView::Media => draw_media(frame, area, theme, form),
        StepView::Recurrence => draw_recurrence(frame, area, theme, form),
        StepView::Review => draw_review(frame, area, theme, active),
        StepView::Done => draw_done(frame, area, theme, active),
    }
}

/// Label + single-line input with a block cursor when focused.
fn draw_field(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    buffer: &InputBuffer,
    focused: bool,
) {
    let label_style = if focused {
        theme.primary_style()
    } else {
        theme.muted_style()
    };
    frame.render_widget(
        Paragraph::new(label).style(label_style),
        Rect::new(area.x, area.y, 12, 1),
    );

    let field_area = Rect::new(
        area.x + 12,
        area.y,
        area.width.saturating_sub(12),
        1,
    );
    if focused {
        let cursor = buffer.cursor();
        let chars: Vec<char> = buffer.content().chars().collect();
        let mut spans: Vec<Span> = chars
            .iter()
            .enumerate()
            .map(|(i, ch)| {
                let mut style = theme.style();
                if i == cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Span::styled(ch.to_string(), style)
            })
            .collect();
        if cursor >= chars.len() {
            spans.push(Span::styled(
                " ",
                theme.style().add_modifier(Modifier::REVERSED),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), field_area);
    } else {
        frame.render_widget(
            Paragraph::new(buffer.content()).style(theme.style()),
            field_area,
        );
    }
}

fn hint(frame: &mut Frame, area: Rect, theme: &Theme, text: &str) {
    frame.render_widget(Paragraph::new(text).style(theme.muted_style()), area);
}

fn draw_compose(frame: &mut Frame, area: Rect, theme: &Theme, form: &FormState) {
    if area.height < 5 {
        return;
    }
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 1, area.width - 4, 1),
        theme,
        "Title",
        &form.title,
        form.focus == 0,
    );
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 3, area.width - 4, 1),
        theme,
        "Content",
        &form.body,
        form.focus == 1,
    );
    hint(
        frame,
        Rect::new(area.x + 2, area.y + 5, area.width - 4, 1),
        theme,
        "Tab: next field",
    );
}

fn draw_subject(frame: &mut Frame, area: Rect, theme: &Theme, form: &FormState) {
    if area.height < 5 {
        return;
    }
    frame.render_widget(
        Paragraph::new("What should this content be about?").style(theme.style()),
        Rect::new(area.x + 2, area.y + 1, area.width - 4, 1),
    );
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 3, area.width - 4, 1),
        theme,
        "Subject",
        &form.subject,
        form.focus == 0,
    );
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 5, area.width - 4, 1),
        theme,
        "Tone",
        &form.tone,
        form.focus == 1,
    );
}

fn draw_draft(frame: &mut Frame, area: Rect, theme: &Theme, form: &FormState) {
    if area.height < 6 {
        return;
    }
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 1, area.width - 4, 1),
        theme,
        "Title",
        &form.title,
        form.focus == 0,
    );
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 3, area.width - 4, 1),
        theme,
        "Draft",
        &form.draft,
        form.focus == 1,
    );
    hint(
        frame,
        Rect::new(area.x + 2, area.y + 5, area.width - 4, 1),
        theme,
        "Edit the generated draft before publishing",
    );
}

fn draw_platforms(frame: &mut Frame, area: Rect, theme: &Theme, form: &FormState) {
    let items: Vec<ListItem> = Platform::ALL
        .iter()
        .enumerate()
        .map(|(idx, platform)| {
            let checked = if form.platform_checked[idx] { "[x]" } else { "[ ]" };
            let style = if idx == form.platform_cursor {
                theme.highlight_style()
            } else if form.platform_checked[idx] {
                theme.success_style()
            } else {
                theme.style()
            };
            ListItem::new(format!("{checked} {}", platform.display_name())).style(style)
        })
        .collect();

    frame.render_widget(
        List::new(items),
        Rect::new(area.x + 2, area.y + 1, area.width - 4, area.height - 2),
    );
    hint(
        frame,
        Rect::new(area.x + 2, area.y + area.height - 1, area.width - 4, 1),
        theme,
        "Space: toggle  j/k: move",
    );
}

fn draw_formatting(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    form: &FormState,
    active: &ActiveWizard,
) {
    let platforms = active.selected_platforms();
    if platforms.is_empty() {
        frame.render_widget(
            Paragraph::new("No platforms selected yet — nothing to format.")
                .style(theme.muted_style())
                .wrap(Wrap { trim: true }),
            Rect::new(area.x + 2, area.y + 1, area.width - 4, 2),
        );
        return;
    }

    let mut y = area.y + 1;
    for (idx, platform) in platforms.iter().enumerate() {
        if y + 1 >= area.y + area.height {
            break;
        }
        let focused = idx == form.format_cursor;
        let marker_style = if focused {
            theme.highlight_style()
        } else {
            theme.style()
        };
        let link = form.format_link.get(idx).copied().unwrap_or(false);
        frame.render_widget(
            Paragraph::new(format!(
                "{} {}",
                platform.display_name(),
                if link { "[link]" } else { "" }
            ))
            .style(marker_style),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        if let Some(tags) = form.format_hashtags.get(idx) {
            draw_field(
                frame,
                Rect::new(area.x + 4, y + 1, area.width - 6, 1),
                theme,
                "Hashtags",
                tags,
                focused,
            );
        }
        y += 3;
    }
    hint(
        frame,
        Rect::new(area.x + 2, area.y + area.height - 1, area.width - 4, 1),
        theme,
        "Up/Down: platform  Space: toggle link  type: hashtags",
    );
}

fn draw_media(frame: &mut Frame, area: Rect, theme: &Theme, form: &FormState) {
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 1, area.width - 4, 1),
        theme,
        "Media URL",
        &form.media_url,
        true,
    );

    let items: Vec<ListItem> = form
        .media
        .iter()
        .map(|url| ListItem::new(format!("• {url}")).style(theme.style()))
        .collect();
    frame.render_widget(
        List::new(items),
        Rect::new(
            area.x + 2,
            area.y + 3,
            area.width - 4,
            area.height.saturating_sub(4),
        ),
    );
    hint(
        frame,
        Rect::new(area.x + 2, area.y + area.height - 1, area.width - 4, 1),
        theme,
        "Enter: add URL (empty input continues)",
    );
}

fn draw_recurrence(frame: &mut Frame, area: Rect, theme: &Theme, form: &FormState) {
    if area.height < 10 {
        return;
    }
    let immediately = if form.schedule.post_immediately {
        Span::styled("[x] Post immediately", theme.success_style())
    } else {
        Span::styled("[ ] Post immediately", theme.style())
    };
    frame.render_widget(
        Paragraph::new(Line::from(immediately)),
        Rect::new(area.x + 2, area.y + 1, area.width - 4, 1),
    );

    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 3, area.width - 4, 1),
        theme,
        "Time",
        &form.time,
        form.focus == 0,
    );
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 4, area.width - 4, 1),
        theme,
        "Date",
        &form.date,
        form.focus == 1,
    );
    draw_field(
        frame,
        Rect::new(area.x + 2, area.y + 5, area.width - 4, 1),
        theme,
        "Day",
        &form.day,
        form.focus == 2,
    );
    frame.render_widget(
        Paragraph::new(format!(
            "Weekday: {:?}  (Left/Right to change)",
            WEEKDAYS[form.weekday_cursor % WEEKDAYS.len()]
        ))
        .style(theme.style()),
        Rect::new(area.x + 2, area.y + 6, area.width - 4, 1),
    );

    let mut rules: Vec<ListItem> = Vec::new();
    for rule in &form.schedule.daily {
        rules.push(ListItem::new(format!("daily at {}", rule.time.format("%H:%M"))));
    }
    for rule in &form.schedule.weekly {
        rules.push(ListItem::new(format!(
            "every {:?} at {}",
            rule.weekday,
            rule.time.format("%H:%M")
        )));
    }
    for rule in &form.schedule.monthly {
        rules.push(ListItem::new(format!(
            "monthly on day {} at {}",
            rule.day_of_month,
            rule.time.format("%H:%M")
        )));
    }
    for rule in &form.schedule.calendar {
        rules.push(ListItem::new(format!(
            "on {} at {}",
            rule.date,
            rule.time.format("%H:%M")
        )));
    }
    frame.render_widget(
        List::new(rules).style(theme.secondary_style()),
        Rect::new(
            area.x + 2,
            area.y + 8,
            area.width - 4,
            area.height.saturating_sub(9),
        ),
    );
    hint(
        frame,
        Rect::new(area.x + 2, area.y + area.height - 1, area.width - 4, 1),
        theme,
        "d/w/m/c: add rule  x: remove  i: post immediately",
    );
}

fn draw_review(frame: &mut Frame, area: Rect, theme: &Theme, active: &ActiveWizard) {
    let mut y = area.y + 1;
    for (label, value) in active.review_lines() {
        if y >= area.y + area.height {
            break;
        }
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{label:>10}: "), theme.muted_style()),
                Span::styled(value, theme.style()),
            ])),
            Rect::new(area.x + 2, y, area.width - 4, 1),
        );
        y += 1;
    }
    hint(
        frame,
        Rect::new(area.x + 2, area.y + area.height - 1, area.width - 4, 1),
        theme,
        "1-9: jump back to edit a step",
    );
}

fn draw_done(frame: &mut Frame, area: Rect, theme: &Theme, active: &ActiveWizard) {
    if area.height < 5 {
        return;
    }
    frame.render_widget(
        Paragraph::new("Success!")
            .style(theme.success_style().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        Rect::new(area.x, area.y + 1, area.width, 1),
    );
    if let Some(id) = active.receipt() {
        frame.render_widget(
            Paragraph::new(format!("Reference: {id}"))
                .style(theme.muted_style())
                .alignment(Alignment::Center),
            Rect::new(area.x, area.y + 3, area.width, 1),
        );
    }
    frame.render_widget(
        Paragraph::new(format!("[n] {}   [q] Home", active.done_cta()))
            .style(theme.primary_style())
            .alignment(Alignment::Center),
        Rect::new(area.x, area.y + 5, area.width, 1),
    );
}
