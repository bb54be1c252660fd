//! Source code pane rendering with syntax highlighting
//!
//! Highlighting is driven by the real token stream rather than an ad-hoc
//! scanner, so what is colored is exactly what the lexer produced:
//! keywords, integers, operators, delimiters and illegal characters each get
//! their own style. The line holding the current token gets the current-line
//! background and the token itself is underlined on a stronger background.

use crate::parser::token::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{pane_block, visible_height};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to (None = center on first render)
    pub target_line_row: Option<usize>,
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Function => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        k if k.is_keyword() => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Integer => Style::default().fg(DEFAULT_THEME.number),
        k if k.is_operator() => Style::default().fg(DEFAULT_THEME.operator),
        TokenKind::LParen | TokenKind::RParen | TokenKind::LBrace | TokenKind::RBrace => {
            Style::default().fg(DEFAULT_THEME.primary) // Brackets
        }
        TokenKind::Illegal => Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Highlight one source line using the tokens that start on it.
///
/// `tokens` must be the tokens starting on this line, in source order.
fn highlight_line(line: &str, tokens: &[Token], current: Option<&Token>) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut col = 1; // 1-based column of chars[col - 1]

    for token in tokens {
        let start = token.location.column;
        if start > col {
            let gap_end = (start - 1).min(chars.len());
            let gap: String = chars[(col - 1).min(gap_end)..gap_end].iter().collect();
            spans.push(Span::raw(gap));
            col = start;
        }

        let mut style = token_style(token.kind);
        if current.is_some_and(|c| c.location == token.location) {
            style = style
                .bg(DEFAULT_THEME.current_token_bg)
                .add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(token.literal.clone(), style));
        col += token.width();
    }

    if col - 1 < chars.len() {
        let rest: String = chars[col - 1..].iter().collect();
        spans.push(Span::raw(rest));
    }

    Line::from(spans)
}

/// Tokens starting on `line_num`, excluding end of input
fn tokens_on_line(tokens: &[Token], line_num: usize) -> &[Token] {
    let start = tokens.partition_point(|t| t.location.line < line_num);
    let end = tokens.partition_point(|t| t.location.line <= line_num);
    let line_tokens = &tokens[start..end];
    match line_tokens.last() {
        Some(last) if last.is(TokenKind::EndOfInput) => &line_tokens[..line_tokens.len() - 1],
        _ => line_tokens,
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: &[Token],
    current: Option<&Token>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Source Code ".to_string(), is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = current.map(|t| t.location.line).unwrap_or(0);

    let visible_height = visible_height(area);

    // Initialize target_line_row to center if not set
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Calculate scroll offset to keep current line at target visual row
    if current_line > 0 && current_line <= total_lines {
        let target_line_idx = current_line - 1;
        scroll_state.offset = target_line_idx.saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line =
                highlight_line(line, tokens_on_line(tokens, line_num), current);

            if is_current {
                for span in &mut content_line.spans {
                    if span.style.bg.is_none() {
                        span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                    }
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
