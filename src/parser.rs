use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::block::{Block, HeadingLevel, Image, ImageSource, Span, SpanKind};

/// Stored note content after the top-level shape has been decided
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Absent input, or JSON that is neither an array nor an object
    Empty,
    /// Input that is not JSON at all, kept verbatim
    Legacy(String),
    Blocks(Vec<Block>),
    Single(Block),
}

impl Content {
    /// Number of blocks per upstream `type` tag.
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        let blocks: &[Block] = match self {
            Content::Blocks(blocks) => blocks,
            Content::Single(block) => std::slice::from_ref(block),
            Content::Empty | Content::Legacy(_) => &[],
        };
        for block in blocks {
            *counts.entry(block.kind().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Parse raw stored content into blocks
pub fn parse(raw: Option<&str>) -> Content {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Content::Empty,
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "content is not JSON, treating as legacy text");
            return Content::Legacy(raw.to_string());
        }
    };

    match &value {
        Value::Array(items) => Content::Blocks(items.iter().map(decode_block).collect()),
        Value::Object(_) => Content::Single(decode_block(&value)),
        other => {
            tracing::debug!(value = %other, "content is a JSON scalar, treating as empty");
            Content::Empty
        }
    }
}

/// Decode one block object. Missing or mistyped fields decode as empty.
pub(crate) fn decode_block(value: &Value) -> Block {
    let Some(object) = value.as_object() else {
        tracing::trace!("skipping non-object block");
        return Block::Unrecognized { kind: None };
    };
    let Some(kind) = object.get("type").and_then(Value::as_str) else {
        tracing::trace!("skipping block without a type tag");
        return Block::Unrecognized { kind: None };
    };

    match kind {
        "paragraph" => Block::Paragraph {
            content: rich_text(object, kind),
        },
        "bulleted_list_item" => Block::BulletedListItem {
            content: rich_text(object, kind),
        },
        "numbered_list_item" => Block::NumberedListItem {
            content: rich_text(object, kind),
        },
        "heading_1" => heading(object, kind, HeadingLevel::H1),
        "heading_2" => heading(object, kind, HeadingLevel::H2),
        "heading_3" => heading(object, kind, HeadingLevel::H3),
        "quote" => Block::Quote {
            content: rich_text(object, kind),
        },
        "code" => Block::Code {
            language: object
                .get(kind)
                .and_then(|payload| payload.get("language"))
                .and_then(Value::as_str)
                .map(str::to_string),
            content: rich_text(object, kind),
        },
        "image" => Block::Image(decode_image(object)),
        other => {
            tracing::trace!(kind = other, "unrecognized block kind");
            Block::Unrecognized {
                kind: Some(other.to_string()),
            }
        }
    }
}

fn heading(object: &Map<String, Value>, kind: &str, level: HeadingLevel) -> Block {
    Block::Heading {
        level,
        content: rich_text(object, kind),
    }
}

/// The `rich_text` spans under the block's kind-specific payload
fn rich_text(object: &Map<String, Value>, kind: &str) -> Vec<Span> {
    object
        .get(kind)
        .and_then(|payload| payload.get("rich_text"))
        .map(decode_spans)
        .unwrap_or_default()
}

pub(crate) fn decode_spans(value: &Value) -> Vec<Span> {
    match value.as_array() {
        Some(items) => items.iter().map(decode_span).collect(),
        None => Vec::new(),
    }
}

fn decode_span(value: &Value) -> Span {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .map_or(SpanKind::Other, SpanKind::from_tag);
    let plain_text = value
        .get("plain_text")
        .and_then(Value::as_str)
        .map(str::to_string);
    let content = value
        .get("text")
        .and_then(|text| text.get("content"))
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .map(str::to_string);

    Span {
        kind,
        plain_text,
        content,
    }
}

fn decode_image(object: &Map<String, Value>) -> Image {
    let local_path = object
        .get("local_image_path")
        .and_then(Value::as_str)
        .filter(|path| !path.is_empty())
        .map(str::to_string);
    if local_path.is_none() {
        tracing::debug!("image block has no local path");
    }

    let payload = object.get("image");
    let caption = payload
        .and_then(|image| image.get("caption"))
        .map(decode_spans)
        .unwrap_or_default();
    let source = payload.and_then(decode_image_source);

    Image {
        local_path,
        caption,
        source,
    }
}

fn decode_image_source(image: &Value) -> Option<ImageSource> {
    let tag = image.get("type").and_then(Value::as_str)?;
    let url = image
        .get(tag)
        .and_then(|hosted| hosted.get("url"))
        .and_then(Value::as_str)?
        .to_string();
    match tag {
        "file" => Some(ImageSource::File { url }),
        "external" => Some(ImageSource::External { url }),
        _ => None,
    }
}
