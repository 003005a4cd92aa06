//! Markdown rendering with comrak.
//!
//! The document is parsed with GFM extensions and walked block by block.
//! Inline styles are carried down as a [`ContentStyle`] and applied to each
//! text leaf, so nested emphasis never resets its parent's color.

use anyhow::Result;
use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use crossterm::style::{Attribute, ContentStyle, Stylize};
use unicode_width::UnicodeWidthStr;

use super::code::join_lines;
use super::{RenderOptions, render_plain};
use crate::highlight;
use crate::pager::strip_ansi;
use crate::ui::style;

const RULE_WIDTH: usize = 40;

/// Render markdown bytes to ANSI-styled text.
pub(super) fn render(data: &[u8], options: &RenderOptions) -> Result<String> {
    let source = render_plain(data);
    if !options.color {
        return Ok(source);
    }

    let arena = Arena::new();
    let root = parse_document(&arena, &source, &create_options());
    let lines = render_blocks(root, true, options.truecolor)?;
    Ok(join_lines(&lines))
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options
}

/// Render every block child of `parent`, blank-separated when `loose`.
fn render_blocks<'a>(parent: &'a AstNode<'a>, loose: bool, truecolor: bool) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for child in parent.children() {
        let block = render_block(child, truecolor)?;
        if block.is_empty() {
            continue;
        }
        if loose && !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(block);
    }
    Ok(lines)
}

fn render_block<'a>(node: &'a AstNode<'a>, truecolor: bool) -> Result<Vec<String>> {
    let lines = match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let mut text = String::new();
            render_inline_children(node, style::heading(heading.level), &mut text);
            text.lines().map(ToString::to_string).collect()
        }

        NodeValue::Paragraph => {
            let mut text = String::new();
            render_inline_children(node, ContentStyle::new(), &mut text);
            text.lines().map(ToString::to_string).collect()
        }

        NodeValue::CodeBlock(code_block) => {
            let language = code_block.info.split_whitespace().next().unwrap_or_default();
            render_code_block(language, &code_block.literal, truecolor)?
        }

        NodeValue::List(list) => {
            let mut lines = Vec::new();
            for (index, item) in node.children().enumerate() {
                let marker = match list.list_type {
                    ListType::Bullet => "•".to_string(),
                    ListType::Ordered => {
                        let delimiter = match list.delimiter {
                            ListDelimType::Period => '.',
                            ListDelimType::Paren => ')',
                        };
                        format!("{}{delimiter}", list.start + index)
                    }
                };
                if !list.tight && !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.extend(render_item(item, &marker, !list.tight, truecolor)?);
            }
            lines
        }

        NodeValue::BlockQuote => {
            let bar = style::muted("│ ");
            render_blocks(node, true, truecolor)?
                .into_iter()
                .map(|line| format!("{bar}{line}"))
                .collect()
        }

        NodeValue::ThematicBreak => vec![style::muted(&"─".repeat(RULE_WIDTH))],

        NodeValue::Table(_) => render_table(node),

        NodeValue::HtmlBlock(html) => html.literal.lines().map(style::muted).collect(),

        NodeValue::FootnoteDefinition(definition) => {
            let label = format!("[^{}]: ", definition.name);
            let indent = " ".repeat(label.width());
            let mut lines = render_blocks(node, false, truecolor)?;
            prefix_lines(&mut lines, &style::muted(&label), &indent);
            lines
        }

        _ => render_blocks(node, true, truecolor)?,
    };
    Ok(lines)
}

/// Render a list item: the marker hangs in front of the first line and the
/// rest is indented to line up with the item text.
fn render_item<'a>(
    item: &'a AstNode<'a>,
    marker: &str,
    loose: bool,
    truecolor: bool,
) -> Result<Vec<String>> {
    let task = match &item.data.borrow().value {
        NodeValue::TaskItem(symbol) => Some(if symbol.is_some() { "✓ " } else { "□ " }),
        _ => None,
    };

    let mut lines = render_blocks(item, loose, truecolor)?;
    if lines.is_empty() {
        lines.push(String::new());
    }
    if let Some(task) = task {
        lines[0].insert_str(0, task);
    }

    let indent = " ".repeat(marker.width() + 1);
    prefix_lines(&mut lines, &format!("{} ", style::accent(marker)), &indent);
    Ok(lines)
}

fn prefix_lines(lines: &mut [String], first: &str, rest: &str) {
    for (index, line) in lines.iter_mut().enumerate() {
        let prefix = if index == 0 { first } else { rest };
        if index > 0 && line.is_empty() {
            continue;
        }
        line.insert_str(0, prefix);
    }
}

fn render_code_block(language: &str, literal: &str, truecolor: bool) -> Result<Vec<String>> {
    let highlighted = if language.is_empty() {
        None
    } else {
        highlight::highlight_code(language, literal, truecolor)?
    };
    let body = highlighted.unwrap_or_else(|| {
        literal
            .lines()
            .map(|line| style::paint(line, style::fg(style::CODE)))
            .collect()
    });

    let title = if language.is_empty() { "code" } else { language };
    let bar = style::muted("│ ");
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(style::muted(&format!("┌ {title}")));
    lines.extend(body.into_iter().map(|line| format!("{bar}{line}")));
    lines.push(style::muted("└"));
    Ok(lines)
}

fn render_table<'a>(table: &'a AstNode<'a>) -> Vec<String> {
    let mut rows: Vec<(bool, Vec<String>)> = Vec::new();
    for row in table.children() {
        let NodeValue::TableRow(is_header) = row.data.borrow().value else {
            continue;
        };
        let base = if is_header {
            ContentStyle::new().attribute(Attribute::Bold)
        } else {
            ContentStyle::new()
        };
        let cells = row
            .children()
            .map(|cell| {
                let mut text = String::new();
                render_inline_children(cell, base, &mut text);
                text.replace('\n', " ")
            })
            .collect();
        rows.push((is_header, cells));
    }

    let columns = rows.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
    let mut widths = vec![0_usize; columns];
    for (_, cells) in &rows {
        for (index, cell) in cells.iter().enumerate() {
            widths[index] = widths[index].max(visible_width(cell));
        }
    }

    let pipe = style::muted("│");
    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (is_header, cells) in &rows {
        let mut line = pipe.clone();
        for (index, width) in widths.iter().enumerate() {
            let cell = cells.get(index).map_or("", String::as_str);
            let padding = " ".repeat(width.saturating_sub(visible_width(cell)));
            line.push_str(&format!(" {cell}{padding} {pipe}"));
        }
        lines.push(line);

        if *is_header {
            let rule = widths
                .iter()
                .map(|width| "─".repeat(width + 2))
                .collect::<Vec<_>>()
                .join("┼");
            lines.push(style::muted(&format!("├{rule}┤")));
        }
    }
    lines
}

fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

fn render_inline_children<'a>(node: &'a AstNode<'a>, current: ContentStyle, out: &mut String) {
    for child in node.children() {
        render_inline(child, current, out);
    }
}

fn render_inline<'a>(node: &'a AstNode<'a>, current: ContentStyle, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => push_styled(out, text, current),
        NodeValue::Code(code) => out.push_str(&style::paint(&code.literal, style::fg(style::CODE))),
        NodeValue::Emph => render_inline_children(node, current.italic(), out),
        NodeValue::Strong => render_inline_children(node, current.bold(), out),
        NodeValue::Strikethrough => render_inline_children(node, current.crossed_out(), out),
        NodeValue::Link(link) => {
            let mut text = String::new();
            render_inline_children(node, current.underlined(), &mut text);
            if strip_ansi(&text) == link.url.trim_start_matches("mailto:") {
                push_styled(out, &link.url, current.with(style::LINK));
            } else {
                out.push_str(&text);
                out.push_str(&style::muted(&format!(" ({})", link.url)));
            }
        }
        NodeValue::Image(image) => {
            let mut alt = String::new();
            render_inline_children(node, ContentStyle::new(), &mut alt);
            let alt = strip_ansi(&alt);
            out.push_str(&style::muted(&format!("[image: {alt}] ({})", image.url)));
        }
        NodeValue::HtmlInline(html) => out.push_str(&style::muted(html)),
        NodeValue::FootnoteReference(reference) => {
            push_styled(out, &format!("[^{}]", reference.name), current);
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push('\n'),
        _ => render_inline_children(node, current, out),
    }
}

fn push_styled(out: &mut String, text: &str, current: ContentStyle) {
    if current == ContentStyle::new() {
        out.push_str(text);
    } else {
        out.push_str(&style::paint(text, current));
    }
}
