//! Token stream pane

use crate::parser::token::TokenKind;
use crate::trace::TokenTrace;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::{clamp_scroll, follow, pane_block, visible_height};

/// Render the token pane, keeping the current token on screen
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &TokenTrace,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = match trace.illegal_count() {
        0 => format!(" Tokens ({}) ", trace.len()),
        n => format!(" Tokens ({}, {} illegal) ", trace.len(), n),
    };
    let block = pane_block(title, is_focused);

    let visible_height = visible_height(area);
    follow(scroll_offset, trace.position(), visible_height);
    clamp_scroll(scroll_offset, trace.len(), visible_height);

    let items: Vec<ListItem> = trace
        .tokens()
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let is_current = idx == trace.position();
            let kind_style = if token.is(TokenKind::Illegal) {
                Style::default().fg(DEFAULT_THEME.error)
            } else {
                Style::default().fg(DEFAULT_THEME.kind_name)
            };

            let mut line = Line::from(vec![
                Span::styled(
                    format!("{:>4} ", idx),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<8}", token.location.to_string()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<16}", token.kind.to_string()), kind_style),
                Span::styled(token.literal.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ]);

            if is_current {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_token_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }

            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
