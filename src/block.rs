/// The run type reported by the upstream API for an inline span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Text,
    Mention,
    Equation,
    Other,
}

impl SpanKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => SpanKind::Text,
            "mention" => SpanKind::Mention,
            "equation" => SpanKind::Equation,
            _ => SpanKind::Other,
        }
    }
}

/// A styled run of text inside a block
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub kind: SpanKind,
    /// Pre-flattened text, preferred when non-empty
    pub plain_text: Option<String>,
    /// Nested `text.content`
    pub content: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Text,
            plain_text: Some(text.into()),
            content: None,
        }
    }

    /// The text this span contributes, or `""` when it carries none.
    pub fn text(&self) -> &str {
        match (&self.plain_text, &self.content) {
            (Some(plain), _) if !plain.is_empty() => plain,
            (_, Some(content)) => content,
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "#",
            HeadingLevel::H2 => "##",
            HeadingLevel::H3 => "###",
        }
    }
}

/// Where the upstream API hosted an image before it was downloaded
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    File { url: String },
    External { url: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    /// Filesystem path of the downloaded copy, if it was ever materialized
    pub local_path: Option<String>,
    pub caption: Vec<Span>,
    pub source: Option<ImageSource>,
}

/// Block-level elements decoded from exported content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        content: Vec<Span>,
    },
    BulletedListItem {
        content: Vec<Span>,
    },
    NumberedListItem {
        content: Vec<Span>,
    },
    Heading {
        level: HeadingLevel,
        content: Vec<Span>,
    },
    Quote {
        content: Vec<Span>,
    },
    Code {
        language: Option<String>,
        content: Vec<Span>,
    },
    Image(Image),
    /// Any `type` outside the known set, or an element that is not an object
    Unrecognized {
        kind: Option<String>,
    },
}

impl Block {
    /// The upstream `type` tag this block was decoded from.
    pub fn kind(&self) -> &str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::BulletedListItem { .. } => "bulleted_list_item",
            Block::NumberedListItem { .. } => "numbered_list_item",
            Block::Heading {
                level: HeadingLevel::H1,
                ..
            } => "heading_1",
            Block::Heading {
                level: HeadingLevel::H2,
                ..
            } => "heading_2",
            Block::Heading {
                level: HeadingLevel::H3,
                ..
            } => "heading_3",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::Image(_) => "image",
            Block::Unrecognized { kind: Some(kind) } => kind,
            Block::Unrecognized { kind: None } => "unknown",
        }
    }
}
