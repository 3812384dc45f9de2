use crate::error::Result;
use crate::ir::BlockNode;
use crate::normalize;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, Options};

fn comrak_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}

fn language_of(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

fn to_block(value: &NodeValue) -> BlockNode {
    match value {
        NodeValue::CodeBlock(code) => BlockNode::code(language_of(&code.info), &code.literal),
        NodeValue::HtmlBlock(html) => BlockNode::markup(&html.literal),
        _ => BlockNode::other(),
    }
}

/// Flattens the block-level tree under `root` in depth-first pre-order.
/// The root itself is not emitted.
fn flatten<'a>(root: &'a AstNode<'a>) -> Vec<BlockNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&'a AstNode<'a>> = Vec::new();
    push_children(root, &mut stack);

    while let Some(node) = stack.pop() {
        out.push(to_block(&node.data.borrow().value));
        push_children(node, &mut stack);
    }
    out
}

// Pushed in reverse so the first child is popped first. Paragraphs,
// headings and table cells hold only inline content, which is not walked.
fn push_children<'a>(node: &'a AstNode<'a>, stack: &mut Vec<&'a AstNode<'a>>) {
    if node.data.borrow().value.contains_inlines() {
        return;
    }
    let children: Vec<&'a AstNode<'a>> = node.children().collect();
    stack.extend(children.into_iter().rev());
}

pub fn walk(source: &str) -> Vec<BlockNode> {
    let arena = Arena::new();
    let options = comrak_options();
    let root = parse_document(&arena, source, &options);
    flatten(root)
}

/// Decodes and walks a raw document.
pub fn parse(bytes: &[u8]) -> Result<Vec<BlockNode>> {
    let text = normalize::stage0(bytes)?;
    Ok(walk(&text))
}
