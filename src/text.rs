use serde::{Deserialize, Serialize};

use crate::block::{Block, Span};
use crate::parser::Content;

/// Separator placed between rendered blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Joined text plus the local image paths found in a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContent {
    pub text: String,
    pub image_paths: Vec<String>,
}

/// Concatenate inline spans with no separator
pub fn spans_to_text(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        out.push_str(span.text());
    }
    out
}

/// Render a single block. Images and unrecognized kinds render as `""`.
pub fn block_to_text(block: &Block) -> String {
    match block {
        Block::Paragraph { content } | Block::NumberedListItem { content } => {
            spans_to_text(content)
        }
        Block::BulletedListItem { content } => prefixed("•", content),
        Block::Heading { level, content } => prefixed(level.marker(), content),
        Block::Quote { content } => prefixed(">", content),
        Block::Code { content, .. } => {
            let code = spans_to_text(content);
            if code.is_empty() {
                code
            } else {
                format!("```\n{code}\n```")
            }
        }
        Block::Image(_) | Block::Unrecognized { .. } => String::new(),
    }
}

fn prefixed(marker: &str, content: &[Span]) -> String {
    let text = spans_to_text(content);
    if text.is_empty() {
        text
    } else {
        format!("{marker} {text}")
    }
}

/// Text-only rendering of parsed content
pub fn content_to_text(content: &Content) -> String {
    match content {
        Content::Empty => String::new(),
        Content::Legacy(raw) => raw.clone(),
        Content::Blocks(blocks) => join_blocks(blocks.iter()),
        Content::Single(block) => block_to_text(block),
    }
}

/// Rendering that also partitions out image blocks
pub fn content_to_parsed(content: &Content) -> ParsedContent {
    match content {
        Content::Empty => ParsedContent::default(),
        Content::Legacy(raw) => ParsedContent {
            text: raw.clone(),
            image_paths: Vec::new(),
        },
        Content::Blocks(blocks) => {
            let mut image_paths = Vec::new();
            let mut text_blocks = Vec::new();
            for block in blocks {
                match block {
                    Block::Image(image) => image_paths.extend(image.local_path.clone()),
                    other => text_blocks.push(other),
                }
            }
            ParsedContent {
                text: join_blocks(text_blocks.into_iter()),
                image_paths,
            }
        }
        Content::Single(Block::Image(image)) if image.local_path.is_some() => ParsedContent {
            text: String::new(),
            image_paths: image.local_path.iter().cloned().collect(),
        },
        Content::Single(block) => ParsedContent {
            text: block_to_text(block),
            image_paths: Vec::new(),
        },
    }
}

fn join_blocks<'a>(blocks: impl Iterator<Item = &'a Block>) -> String {
    blocks
        .map(block_to_text)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
