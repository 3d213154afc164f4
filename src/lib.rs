//! Flattens exported content blocks (paragraphs, headings, list items,
//! quotes, code and images) into readable text and a list of local image
//! paths.
//!
//! Every entry point is total: absent input yields an empty result, input
//! that is not JSON is passed through as legacy text, and unknown or
//! malformed blocks contribute nothing.

mod block;
mod config;
mod parser;
mod plain;
mod text;

pub use block::{Block, HeadingLevel, Image, ImageSource, Span, SpanKind};
pub use config::{Config, ConfigError, ImagesConfig, OutputConfig, OutputFormat};
pub use parser::Content;
pub use plain::to_plain_text;
pub use text::{
    BLOCK_SEPARATOR, ParsedContent, block_to_text, content_to_parsed, content_to_text,
    spans_to_text,
};

/// Parse raw stored content into blocks.
pub fn parse(raw: Option<&str>) -> Content {
    parser::parse(raw)
}

/// Extract the joined text of stored content.
pub fn parse_content(raw: Option<&str>) -> String {
    content_to_text(&parse(raw))
}

/// Extract the joined text and the local image paths of stored content.
pub fn parse_content_with_images(raw: Option<&str>) -> ParsedContent {
    content_to_parsed(&parse(raw))
}
