//! Source pane rendering with syntax highlighting
//!
//! This module renders the definition text with token coloring, the span of
//! the selected tree node, and the position of a syntax error.
//!
//! # Features
//!
//! - Highlighting driven by the real [`Lexer`], so colors match what the
//!   parser sees
//! - Selected node span drawn with a background band
//! - Error offset marked in red
//! - Line numbering and scrolling

use crate::parser::ast::Span as SourceSpan;
use crate::parser::lexer::{Keyword, Lexer, Token};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub highlight: Option<SourceSpan>,
    pub error_offset: Option<usize>,
}

fn token_style(token: &Token) -> Style {
    match token {
        Token::Primitive(..) => Style::default().fg(DEFAULT_THEME.type_name),
        Token::Keyword(Keyword::Definition(_), _) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        Token::Keyword(..) | Token::Number(..) => Style::default().fg(DEFAULT_THEME.number),
        Token::SingleQuote(_) | Token::DoubleQuote(_) => Style::default().fg(DEFAULT_THEME.string),
        Token::Lt(_)
        | Token::Gt(_)
        | Token::Eq(_)
        | Token::Percent(_)
        | Token::Amp(_)
        | Token::Pipe(_)
        | Token::Plus(_)
        | Token::Minus(_)
        | Token::Question(_) => Style::default().fg(DEFAULT_THEME.operator),
        Token::LParen(_)
        | Token::RParen(_)
        | Token::LBrace(_)
        | Token::RBrace(_)
        | Token::LBracket(_)
        | Token::RBracket(_) => Style::default().fg(DEFAULT_THEME.primary), // Brackets
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Style for every byte of the source, from its token class
pub fn highlight_styles(source: &str) -> Vec<Style> {
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); source.len()];
    let mut lexer = Lexer::new(source);

    loop {
        match lexer.next_token() {
            Ok(Token::Eof(_)) => break,
            Ok(token) => {
                let span = token.span();
                let style = token_style(&token);
                for slot in &mut styles[span.start..span.end] {
                    *slot = style;
                }
            }
            // Leave the offending character plain and carry on after it
            Err(err) => {
                let offset = err.offset().max(lexer.position());
                let Some(ch) = source.get(offset..).and_then(|rest| rest.chars().next()) else {
                    break;
                };
                lexer.reset(offset + ch.len_utf8());
            }
        }
    }

    styles
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData,
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
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let source = data.source_code;
    let styles = highlight_styles(source);

    // Byte offset where each line starts
    let mut line_starts = vec![0];
    line_starts.extend(source.match_indices('\n').map(|(idx, _)| idx + 1));
    let total_lines = line_starts.len();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1
    let max_scroll = total_lines.saturating_sub(visible_height);
    *scroll = (*scroll).min(max_scroll);

    let visible_lines: Vec<Line> = line_starts
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, &start)| {
            let end = line_starts
                .get(idx + 1)
                .map_or(source.len(), |next| next - 1);
            let line_num_str = format!("{:4} ", idx + 1);
            let mut spans = vec![Span::styled(
                line_num_str,
                Style::default().fg(DEFAULT_THEME.comment), // Line numbers
            )];

            let mut run = String::new();
            let mut run_style = Style::default();
            for (offset, ch) in source[start..end].char_indices() {
                let offset = start + offset;
                let mut style = styles[offset];
                if data.highlight.is_some_and(|span| span.contains(offset)) {
                    style = style.bg(DEFAULT_THEME.selection_bg);
                }
                if data.error_offset == Some(offset) {
                    style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD);
                }
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(ch);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }

            // An error at the end of the line (or input) gets a visible cell
            if data.error_offset == Some(end) {
                spans.push(Span::styled(
                    " ",
                    Style::default().bg(DEFAULT_THEME.error),
                ));
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
