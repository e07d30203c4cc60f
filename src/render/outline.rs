//! Flat block outline of a parsed document, used for paged export.

use comrak::nodes::{AstNode, ListType, NodeValue};

/// Kind of a top-level text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    /// Code block, carrying no highlighting
    Code,
    /// List item with its nesting depth (0 = top level)
    ListItem(usize),
    Quote,
    Rule,
}

/// A block of plain text in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Marker printed before list items (`-`, `3.`, `[x]`)
    pub marker: Option<String>,
    pub text: String,
}

impl Block {
    fn new(kind: BlockKind, text: String) -> Self {
        Self {
            kind,
            marker: None,
            text,
        }
    }
}

pub(super) fn collect<'a>(root: &'a AstNode<'a>) -> Vec<Block> {
    let mut blocks = Vec::new();
    for child in root.children() {
        process_node(child, &mut blocks, 0, false);
    }
    blocks
}

fn process_node<'a>(node: &'a AstNode<'a>, blocks: &mut Vec<Block>, depth: usize, quoted: bool) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            blocks.push(Block::new(
                BlockKind::Heading(heading.level),
                inline_text(node),
            ));
        }
        NodeValue::Paragraph => {
            let kind = if quoted {
                BlockKind::Quote
            } else {
                BlockKind::Paragraph
            };
            blocks.push(Block::new(kind, inline_text(node)));
        }
        NodeValue::CodeBlock(code_block) => {
            let text = code_block.literal.trim_end_matches('\n').to_string();
            blocks.push(Block::new(BlockKind::Code, text));
        }
        NodeValue::HtmlBlock(html) => {
            let text = html.literal.trim().to_string();
            if !text.is_empty() {
                blocks.push(Block::new(BlockKind::Code, text));
            }
        }
        NodeValue::ThematicBreak => blocks.push(Block::new(BlockKind::Rule, String::new())),
        NodeValue::BlockQuote => {
            for child in node.children() {
                process_node(child, blocks, depth, true);
            }
        }
        NodeValue::List(list) => {
            let mut number = list.start;
            for item in node.children() {
                let marker = match list.list_type {
                    ListType::Bullet => "-".to_string(),
                    ListType::Ordered => format!("{number}."),
                };
                number += 1;
                process_item(item, blocks, depth, marker);
            }
        }
        NodeValue::Table(_) => {
            for row in node.children() {
                let cells: Vec<String> = row.children().map(inline_text).collect();
                blocks.push(Block::new(BlockKind::Code, cells.join(" | ")));
            }
        }
        NodeValue::FootnoteDefinition(def) => {
            let text = node
                .children()
                .map(inline_text)
                .collect::<Vec<_>>()
                .join(" ");
            blocks.push(Block::new(
                BlockKind::Paragraph,
                format!("[{}] {text}", def.name),
            ));
        }
        _ => {
            for child in node.children() {
                process_node(child, blocks, depth, quoted);
            }
        }
    }
}

fn process_item<'a>(item: &'a AstNode<'a>, blocks: &mut Vec<Block>, depth: usize, marker: String) {
    let mut marker = match &item.data.borrow().value {
        NodeValue::TaskItem(symbol) => {
            Some(if symbol.is_some() { "[x]" } else { "[ ]" }.to_string())
        }
        _ => Some(marker),
    };
    for child in item.children() {
        if matches!(child.data.borrow().value, NodeValue::List(_)) {
            process_node(child, blocks, depth + 1, false);
            continue;
        }
        blocks.push(Block {
            kind: BlockKind::ListItem(depth),
            marker: marker.take(),
            text: inline_text(child),
        });
    }
}

/// Concatenate the text content of an inline subtree.
fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak => text.push(' '),
            NodeValue::LineBreak => text.push('\n'),
            NodeValue::FootnoteReference(reference) => {
                text.push_str(&format!("[{}]", reference.name));
            }
            _ => {}
        }
    }
    text
}
