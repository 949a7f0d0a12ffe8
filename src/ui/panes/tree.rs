//! Syntax tree pane rendering
//!
//! Shows the flattened tree one node per line: indentation for depth, a fold
//! marker, the field label, the node kind and the leaf text. When the parse
//! failed, the pane shows the error instead.

use crate::parser::errors::SyntaxError;
use crate::ui::app::TreeRow;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rustc_hash::FxHashSet;

/// Data needed to render the tree pane
pub struct TreeRenderData<'a> {
    pub rows: &'a [TreeRow],
    /// Indices into `rows`, in display order
    pub visible: &'a [usize],
    pub selected: usize,
    pub collapsed: &'a FxHashSet<usize>,
    pub error: Option<&'a SyntaxError>,
}

fn fold_marker(row: &TreeRow, index: usize, collapsed: &FxHashSet<usize>) -> &'static str {
    if !row.has_children(index) {
        "  "
    } else if collapsed.contains(&index) {
        "▸ "
    } else {
        "▾ "
    }
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    data: &TreeRenderData,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if let Some(err) = data.error {
        let lines = vec![
            Line::from(Span::styled(
                "Syntax error",
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the selected row on screen
    if let Some(position) = data.visible.iter().position(|&i| i == data.selected) {
        if position < *scroll {
            *scroll = position;
        } else if position >= *scroll + visible_height {
            *scroll = position + 1 - visible_height;
        }
    }
    *scroll = (*scroll).min(data.visible.len().saturating_sub(visible_height));

    let lines: Vec<Line> = data
        .visible
        .iter()
        .skip(*scroll)
        .take(visible_height)
        .filter_map(|&index| data.rows.get(index).map(|row| (index, row)))
        .map(|(index, row)| {
            let mut spans = vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(
                    fold_marker(row, index, data.collapsed),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];
            if let Some(field) = row.field {
                spans.push(Span::styled(
                    format!("{}: ", field),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ));
            }
            spans.push(Span::styled(
                row.kind,
                Style::default().fg(DEFAULT_THEME.keyword),
            ));
            if let Some(text) = &row.text {
                spans.push(Span::styled(
                    format!(" {}", text),
                    Style::default().fg(DEFAULT_THEME.string),
                ));
            }
            spans.push(Span::styled(
                format!(" [{}..{}]", row.span.start, row.span.end),
                Style::default().fg(DEFAULT_THEME.comment),
            ));

            let line = Line::from(spans);
            if index == data.selected {
                line.style(Style::default().bg(DEFAULT_THEME.selection_bg))
            } else {
                line
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
