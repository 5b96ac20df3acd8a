use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

pub struct Layout {
    pub full: Rect,
    pub header: Rect,
    pub indicator: Rect,
    pub content: Rect,
    pub message: Rect,
    pub nav: Rect,
}

impl Layout {
    pub fn new(area: Rect) -> Self {
        // Message panel space is always reserved so the step body doesn't
        // jump when a message appears or disappears.
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Header
                Constraint::Length(2),  // Step indicator
                Constraint::Min(10),    // Step body
                Constraint::Length(3),  // Message panel (always reserved)
                Constraint::Length(1),  // Navigation bar
            ])
            .split(area);

        Self {
            full: area,
            header: chunks[0],
            indicator: chunks[1],
            content: chunks[2],
            message: chunks[3],
            nav: chunks[4],
        }
    }

    pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
        let horizontal = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(width),
                Constraint::Fill(1),
            ])
            .split(area);

        let vertical = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(height),
                Constraint::Fill(1),
            ])
            .split(horizontal[1]);

        vertical[1]
    }
}
