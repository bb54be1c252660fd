//! Diagnostics pane: every parse error recorded for the file

use crate::parser::parse::ParseError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

use super::{clamp_scroll, pane_block, visible_height};

/// Render the diagnostics pane
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    errors: &[ParseError],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Diagnostics ({}) ", errors.len()), is_focused);

    if errors.is_empty() {
        let paragraph = Paragraph::new("(no errors)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = visible_height(area);
    clamp_scroll(scroll_offset, errors.len(), visible_height);

    let items: Vec<ListItem> = errors
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|err| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4}:{:<3} ", err.location.line, err.location.column),
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.message(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
