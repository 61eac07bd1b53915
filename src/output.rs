//! Terminal output for catalog trees and search results

use crate::catalog::{Node, NodeStore};
use crate::search::Resolution;
use crate::view::ViewState;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// How tree lines are laid out
#[derive(Debug, Clone, Copy)]
pub struct TreeStyle {
    pub indent_width: usize,
    pub show_descriptions: bool,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_descriptions: true,
        }
    }
}

/// Print visible nodes to stdout
pub fn print_tree(
    nodes: &[&Node],
    store: &NodeStore,
    state: &ViewState,
    style: TreeStyle,
    color: bool,
) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_tree(&mut stdout, nodes, store, state, style)
}

/// Write one line per node:
///
/// ```text
/// >   - ServiceHeader [1.1]  Header of the service.
/// ```
///
/// The leading `>` marks highlighted nodes; `+`/`-` mark collapsed and
/// expanded nodes with children.
pub fn write_tree<W: WriteColor>(
    out: &mut W,
    nodes: &[&Node],
    store: &NodeStore,
    state: &ViewState,
    style: TreeStyle,
) -> io::Result<()> {
    for node in nodes {
        let highlighted = state.is_highlighted(node.id);
        let marker = expand_marker(store, state, node);

        write!(out, "{}", if highlighted { "> " } else { "  " })?;
        write!(out, "{:width$}", "", width = node.level * style.indent_width)?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, "{} ", marker)?;
        out.reset()?;

        if highlighted {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        } else {
            out.set_color(ColorSpec::new().set_bold(store.has_children(node.id)))?;
        }
        write!(out, "{}", node.name)?;
        out.reset()?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, " [{}]", node.field_no)?;
        out.reset()?;

        if style.show_descriptions && !node.description.is_empty() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_dimmed(true))?;
            write!(out, "  {}", node.description)?;
            out.reset()?;
        }

        writeln!(out)?;
    }

    Ok(())
}

fn expand_marker(store: &NodeStore, state: &ViewState, node: &Node) -> char {
    if !store.has_children(node.id) {
        ' '
    } else if state.is_expanded(node.id) {
        '-'
    } else {
        '+'
    }
}

/// One-line summary of a search, written to stderr so stdout stays the tree
pub fn print_search_summary(resolution: &Resolution, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    write_search_summary(&mut stderr, resolution)
}

pub fn write_search_summary<W: WriteColor>(out: &mut W, resolution: &Resolution) -> io::Result<()> {
    match resolution {
        Resolution::Cleared => writeln!(out, "empty query")?,
        Resolution::Keyword(k) => {
            let spec = ColorSpec::new()
                .set_fg(Some(if k.matches.is_empty() { Color::Yellow } else { Color::Green }))
                .clone();
            out.set_color(&spec)?;
            write!(out, "{} matches", k.matches.len())?;
            out.reset()?;
            writeln!(out, " for '{}'", k.term)?;
        }
        Resolution::Path(p) => {
            let (label, color) = if p.is_complete() {
                ("resolved", Color::Green)
            } else if p.is_partial() {
                ("partial", Color::Yellow)
            } else {
                ("no match", Color::Red)
            };
            out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            write!(out, "{}", label)?;
            out.reset()?;
            writeln!(
                out,
                ": {}/{} segments ({})",
                p.consumed,
                p.query.segments.len(),
                p.query.segments.join("/")
            )?;
        }
    }

    Ok(())
}
