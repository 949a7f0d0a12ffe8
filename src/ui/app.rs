//! Main TUI application state and logic

use crate::parser::ast::{SourceFile, SourceLocation, Span};
use crate::parser::errors::SyntaxError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// One node of the syntax tree, flattened in preorder for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub field: Option<&'static str>,
    pub kind: &'static str,
    pub text: Option<String>,
    pub span: Span,
    /// Index one past the last row of this node's subtree
    pub subtree_end: usize,
}

impl TreeRow {
    pub fn has_children(&self, index: usize) -> bool {
        self.subtree_end > index + 1
    }
}

/// Flatten a parsed source into preorder rows
pub fn build_rows(file: &SourceFile) -> Vec<TreeRow> {
    let visits = file.syntax().descendants();
    let mut rows: Vec<TreeRow> = visits
        .iter()
        .map(|visit| TreeRow {
            depth: visit.depth,
            field: visit.field,
            kind: visit.node.kind(),
            text: visit.node.text(),
            span: visit.node.span(),
            subtree_end: 0,
        })
        .collect();

    // A subtree ends at the next row that is not deeper than its root
    let mut open: Vec<usize> = Vec::new();
    for index in 0..rows.len() {
        while let Some(&top) = open.last() {
            if rows[top].depth < rows[index].depth {
                break;
            }
            rows[top].subtree_end = index;
            open.pop();
        }
        open.push(index);
    }
    let total = rows.len();
    for index in open {
        rows[index].subtree_end = total;
    }

    rows
}

/// The main application state
pub struct App {
    /// The definition text being inspected
    pub source_code: String,

    /// Every node in preorder; empty when the parse failed
    pub rows: Vec<TreeRow>,

    /// Parse failure, if any
    pub error: Option<SyntaxError>,

    /// Row indices whose subtrees are folded
    pub collapsed: FxHashSet<usize>,

    /// Selected row, as an index into `rows`
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app from the source text and its parse result
    pub fn new(source_code: String, parsed: Result<SourceFile, SyntaxError>) -> Self {
        let (rows, error, status_message) = match parsed {
            Ok(file) => {
                let rows = build_rows(&file);
                let message = format!("Parsed {} node(s)", rows.len());
                (rows, None, message)
            }
            Err(err) => {
                let location = SourceLocation::from_offset(&source_code, err.offset());
                let message = format!("Syntax error at {}:{}", location.line, location.column);
                (Vec::new(), Some(err), message)
            }
        };

        App {
            source_code,
            rows,
            error,
            collapsed: FxHashSet::default(),
            // Row 0 is the source_file wrapper; start on the definition
            selected: 1,
            focused_pane: FocusedPane::Tree,
            source_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
        .clamped()
    }

    fn clamped(mut self) -> Self {
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Indices of the rows not hidden inside a folded subtree
    pub fn visible_rows(&self) -> Vec<usize> {
        let mut visible = Vec::new();
        let mut index = 0;
        while index < self.rows.len() {
            visible.push(index);
            index = if self.collapsed.contains(&index) {
                self.rows[index].subtree_end
            } else {
                index + 1
            };
        }
        visible
    }

    /// Span of the selected node, if there is one
    pub fn selected_span(&self) -> Option<Span> {
        self.rows.get(self.selected).map(|row| row.span)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Two panes side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &super::panes::SourceRenderData {
                source_code: &self.source_code,
                highlight: self.selected_span(),
                error_offset: self.error.as_ref().map(SyntaxError::offset),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let visible = self.visible_rows();
        super::panes::render_tree_pane(
            frame,
            columns[1],
            &super::panes::TreeRenderData {
                rows: &self.rows,
                visible: &visible,
                selected: self.selected,
                collapsed: &self.collapsed,
                error: self.error.as_ref(),
            },
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &super::panes::StatusRenderData {
                message: &self.status_message,
                node_count: self.rows.len(),
                height: self.rows.iter().map(|row| row.depth + 1).max().unwrap_or(0),
                is_error: self.error.is_some(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Tree => self.move_selection(-1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Tree => self.move_selection(1),
            },
            KeyCode::Left => self.collapse_selected(),
            KeyCode::Right => self.expand_selected(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.collapsed.contains(&self.selected) {
                    self.expand_selected();
                } else {
                    self.collapse_selected();
                }
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let visible = self.visible_rows();
        let Some(position) = visible.iter().position(|&index| index == self.selected) else {
            return;
        };
        let target = position
            .saturating_add_signed(delta)
            .min(visible.len().saturating_sub(1));
        self.selected = visible[target];
        self.describe_selection();
    }

    /// Fold the selected subtree, or jump to the parent of a leaf or folded node
    fn collapse_selected(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        if row.has_children(self.selected) && !self.collapsed.contains(&self.selected) {
            self.collapsed.insert(self.selected);
            self.status_message = format!("Folded {}", row.kind);
            return;
        }

        let depth = row.depth;
        if let Some(parent) = (0..self.selected).rev().find(|&i| self.rows[i].depth < depth) {
            self.selected = parent;
            self.describe_selection();
        }
    }

    fn expand_selected(&mut self) {
        if self.collapsed.remove(&self.selected) {
            if let Some(row) = self.rows.get(self.selected) {
                self.status_message = format!("Unfolded {}", row.kind);
            }
        }
    }

    fn describe_selection(&mut self) {
        if let Some(row) = self.rows.get(self.selected) {
            let location = SourceLocation::from_offset(&self.source_code, row.span.start);
            self.status_message = format!(
                "{} at {}:{} ({} byte(s))",
                row.kind,
                location.line,
                location.column,
                row.span.len()
            );
        }
    }
}
