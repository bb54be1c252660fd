//! Syntax tree pane: canonical rendering of each top-level statement

use crate::parser::ast::{Program, Statement};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{clamp_scroll, follow, pane_block, visible_height};

/// Short label naming the statement variant
fn statement_label(stmt: &Statement) -> &'static str {
    match stmt {
        Statement::Let(_) => "let",
        Statement::Return(_) => "ret",
        Statement::Expression(_) => "expr",
        Statement::Block(_) => "block",
    }
}

/// Render the syntax tree pane.
///
/// `current_statement` is the index of the statement holding the current
/// token; it is highlighted and kept on screen.
pub fn render_syntax_pane(
    frame: &mut Frame,
    area: Rect,
    program: &Program,
    current_statement: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(
        format!(" Syntax Tree ({} statements) ", program.statements.len()),
        is_focused,
    );

    if program.statements.is_empty() {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_height(area);
    if let Some(index) = current_statement {
        follow(scroll_offset, index, visible_height);
    }
    clamp_scroll(scroll_offset, program.statements.len(), visible_height);

    let items: Vec<ListItem> = program
        .statements
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, stmt)| {
            let is_current = current_statement == Some(idx);
            let marker = if is_current { "▶" } else { " " };

            let mut line = Line::from(vec![
                Span::styled(
                    format!("{} {:<5} ", marker, statement_label(stmt)),
                    Style::default().fg(DEFAULT_THEME.kind_name),
                ),
                Span::styled(stmt.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ]);

            if is_current {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }

            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
