use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::text::BLOCK_SEPARATOR;

/// Blocks whose source is copied out untouched
#[derive(Clone, Copy)]
enum Verbatim {
    None,
    /// Nesting depth of the list being skipped
    List(usize),
    SetextHeading,
}

/// Strip the block markers the renderer adds, leaving only the words.
///
/// Heading and quote markers and code fences are removed. Everything
/// inside a paragraph or heading is copied from the source as written, so
/// escapes, emphasis markers and entities survive. Lists, thematic breaks
/// and setext headings are kept verbatim, since in stored text they are
/// the user's own characters.
pub fn to_plain_text(markdown: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut code = String::new();
    let mut in_code = false;
    let mut leaf: Option<Option<Range<usize>>> = None;
    let mut verbatim = Verbatim::None;

    for (event, range) in Parser::new_ext(markdown, Options::empty()).into_offset_iter() {
        match verbatim {
            Verbatim::List(depth) => {
                verbatim = match event {
                    Event::Start(Tag::List(_)) => Verbatim::List(depth + 1),
                    Event::End(TagEnd::List(_)) if depth == 1 => Verbatim::None,
                    Event::End(TagEnd::List(_)) => Verbatim::List(depth - 1),
                    _ => Verbatim::List(depth),
                };
                continue;
            }
            Verbatim::SetextHeading => {
                if let Event::End(TagEnd::Heading(_)) = event {
                    verbatim = Verbatim::None;
                }
                continue;
            }
            Verbatim::None => {}
        }

        match event {
            Event::Start(Tag::List(_)) => {
                verbatim = Verbatim::List(1);
                out.push(markdown[range].trim_end().to_string());
            }
            Event::Start(Tag::Heading { .. })
                if !markdown[range.clone()].trim_start().starts_with('#') =>
            {
                verbatim = Verbatim::SetextHeading;
                out.push(markdown[range].trim_end().to_string());
            }
            Event::Start(Tag::Paragraph | Tag::Heading { .. }) => leaf = Some(None),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_)) => {
                if let Some(Some(extent)) = leaf.take() {
                    out.push(markdown[with_leading_escape(markdown, extent)].to_string());
                }
            }
            Event::Start(Tag::CodeBlock(_) | Tag::HtmlBlock) => {
                in_code = true;
                code.clear();
            }
            Event::End(TagEnd::CodeBlock | TagEnd::HtmlBlock) => {
                in_code = false;
                out.push(code.trim_end_matches('\n').to_string());
            }
            Event::Text(text) | Event::Html(text) if in_code => code.push_str(&text),
            Event::Rule => out.push(markdown[range].trim().to_string()),
            _ => {
                // inline content of the open paragraph or heading
                if let Some(extent) = leaf.as_mut() {
                    *extent = Some(match extent.take() {
                        Some(seen) => seen.start.min(range.start)..seen.end.max(range.end),
                        None => range,
                    });
                }
            }
        }
    }

    out.retain(|block| !block.trim().is_empty());
    out.join(BLOCK_SEPARATOR)
}

/// Text events start after an escaping backslash; pull it back in.
fn with_leading_escape(markdown: &str, extent: Range<usize>) -> Range<usize> {
    if extent.start > 0 && markdown.as_bytes()[extent.start - 1] == b'\\' {
        extent.start - 1..extent.end
    } else {
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_heading_and_quote_markers() {
        assert_eq!(to_plain_text("# Intro\n\nHello"), "Intro\n\nHello");
        assert_eq!(to_plain_text("### Deep"), "Deep");
        assert_eq!(to_plain_text("> wise words"), "wise words");
    }

    #[test]
    fn strips_code_fences() {
        assert_eq!(to_plain_text("```\nlet x = 1;\n```"), "let x = 1;");
        assert_eq!(
            to_plain_text("intro\n\n```\na\n  b\n```\n\noutro"),
            "intro\n\na\n  b\n\noutro"
        );
    }

    #[test]
    fn keeps_inline_markup_literally() {
        assert_eq!(to_plain_text("**bold** and *soft*"), "**bold** and *soft*");
        assert_eq!(to_plain_text("a_b_c and C:\\Temp\\*"), "a_b_c and C:\\Temp\\*");
        assert_eq!(to_plain_text("fish &amp; chips"), "fish &amp; chips");
        assert_eq!(to_plain_text("\\# not a heading"), "\\# not a heading");
    }

    #[test]
    fn keeps_thematic_breaks() {
        assert_eq!(
            to_plain_text("before\n\n---\n\na_b_c and C:\\Temp\\*\n\nafter"),
            "before\n\n---\n\na_b_c and C:\\Temp\\*\n\nafter"
        );
        assert_eq!(to_plain_text("***"), "***");
    }

    #[test]
    fn keeps_lists_and_setext_headings_verbatim() {
        assert_eq!(to_plain_text("- one\n- two"), "- one\n- two");
        assert_eq!(to_plain_text("1. first\n   - nested"), "1. first\n   - nested");
        assert_eq!(to_plain_text("Title\n---"), "Title\n---");
    }

    #[test]
    fn keeps_bullet_glyph_text() {
        assert_eq!(to_plain_text("• one\n\n• two"), "• one\n\n• two");
    }

    #[test]
    fn soft_breaks_become_newlines() {
        assert_eq!(to_plain_text("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn empty_input() {
        assert_eq!(to_plain_text(""), "");
    }
}
