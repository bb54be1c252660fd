//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with lexer-driven highlighting and the
//!   current token marked
//! - [`tokens`]: The token stream with kind, literal and location columns
//! - [`syntax`]: Canonical rendering of each top-level statement
//! - [`diagnostics`]: Parse errors collected for the file
//! - [`status`]: Status bar with keybindings and stepping state
//!
//! Each pane module exports a primary `render_*` function; scrolling state
//! lives in [`crate::ui::App`] and is passed in by mutable reference.

pub mod diagnostics;
pub mod source;
pub mod status;
pub mod syntax;
pub mod tokens;

// Re-export render functions for convenience
pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use syntax::render_syntax_pane;
pub use tokens::render_tokens_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border style shared by all panes
pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least 1
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp a scroll offset so the last page stays full
pub(crate) fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}

/// Adjust `offset` so that `index` is on screen
pub(crate) fn follow(offset: &mut usize, index: usize, visible_height: usize) {
    if index < *offset {
        *offset = index;
    } else if index >= *offset + visible_height {
        *offset = index + 1 - visible_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut offset = 50;
        clamp_scroll(&mut offset, 20, 5);
        assert_eq!(offset, 15);

        clamp_scroll(&mut offset, 3, 5);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_follow_keeps_index_visible() {
        let mut offset = 0;
        follow(&mut offset, 12, 5);
        assert_eq!(offset, 8);

        follow(&mut offset, 3, 5);
        assert_eq!(offset, 3);

        follow(&mut offset, 5, 5);
        assert_eq!(offset, 3);
    }
}
