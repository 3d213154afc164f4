use blocktext::{ParsedContent, parse_content, parse_content_with_images, to_plain_text};
use pretty_assertions::assert_eq;
use serde_json::json;

fn paragraph(text: &str) -> serde_json::Value {
    json!({"type": "paragraph", "paragraph": {"rich_text": [{"plain_text": text}]}})
}

fn image(path: Option<&str>) -> serde_json::Value {
    match path {
        Some(path) => json!({"type": "image", "local_image_path": path}),
        None => json!({"type": "image", "image": {"type": "file", "file": {"url": "https://x/y.png"}}}),
    }
}

#[test]
fn heading_paragraph_and_image() {
    let raw = r#"[{"type":"heading_1","heading_1":{"rich_text":[{"plain_text":"Intro"}]}},{"type":"paragraph","paragraph":{"rich_text":[{"plain_text":"Hello"}]}},{"type":"image","type_":"image","local_image_path":"/tmp/a.png"}]"#;
    assert_eq!(
        parse_content_with_images(Some(raw)),
        ParsedContent {
            text: "# Intro\n\nHello".to_string(),
            image_paths: vec!["/tmp/a.png".to_string()],
        }
    );
    assert_eq!(parse_content(Some(raw)), "# Intro\n\nHello");
}

#[test]
fn legacy_plain_text_passes_through() {
    assert_eq!(parse_content(Some("plain legacy note")), "plain legacy note");
    assert_eq!(
        parse_content_with_images(Some("plain legacy note")),
        ParsedContent {
            text: "plain legacy note".to_string(),
            image_paths: vec![],
        }
    );
}

#[test]
fn absent_input_is_empty() {
    assert_eq!(parse_content(None), "");
    assert_eq!(parse_content(Some("")), "");
    assert_eq!(parse_content_with_images(None), ParsedContent::default());
    assert_eq!(parse_content_with_images(Some("null")), ParsedContent::default());
}

// A bare JSON scalar has no defined meaning as stored content; it is
// treated the same as absent input in both modes.
#[test]
fn json_scalars_are_treated_as_absent() {
    for raw in ["null", "0", "12.5", "false", "\"a string\""] {
        assert_eq!(parse_content(Some(raw)), "", "input {raw}");
        assert_eq!(
            parse_content_with_images(Some(raw)),
            ParsedContent::default(),
            "input {raw}"
        );
    }
}

#[test]
fn image_is_excluded_from_text() {
    let mut captioned = image(Some("/cache/whiteboard.png"));
    captioned["image"] = json!({"caption": [{"plain_text": "SECRET CAPTION"}]});
    let raw = json!([paragraph("before"), captioned, paragraph("after")]).to_string();

    let parsed = parse_content_with_images(Some(&raw));
    assert_eq!(parsed.text, "before\n\nafter");
    assert!(!parsed.text.contains("SECRET"));
    assert!(!parsed.text.contains("whiteboard"));
    assert_eq!(parsed.image_paths, vec!["/cache/whiteboard.png"]);
}

#[test]
fn image_without_local_path_is_omitted() {
    let raw = json!([paragraph("only text"), image(None)]).to_string();
    assert_eq!(
        parse_content_with_images(Some(&raw)),
        ParsedContent {
            text: "only text".to_string(),
            image_paths: vec![],
        }
    );

    let single = image(None).to_string();
    assert_eq!(parse_content_with_images(Some(&single)), ParsedContent::default());
}

#[test]
fn order_is_preserved() {
    let raw = json!([
        paragraph("one"),
        image(Some("/img/1.png")),
        paragraph("two"),
        image(Some("/img/2.png")),
        paragraph("three"),
        image(Some("/img/3.png")),
    ])
    .to_string();

    let parsed = parse_content_with_images(Some(&raw));
    assert_eq!(parsed.text, "one\n\ntwo\n\nthree");
    assert_eq!(parsed.image_paths, vec!["/img/1.png", "/img/2.png", "/img/3.png"]);
}

#[test]
fn empty_middle_block_leaves_one_separator() {
    let raw = json!([
        paragraph("first"),
        {"type": "bulleted_list_item", "bulleted_list_item": {"rich_text": [{"plain_text": " \t "}]}},
        paragraph("last"),
    ])
    .to_string();
    assert_eq!(parse_content(Some(&raw)), "first\n\nlast");
}

#[test]
fn unrecognized_kinds_do_not_block_others() {
    let raw = json!([
        {"type": "callout", "callout": {"rich_text": [{"plain_text": "hidden"}]}},
        42,
        null,
        {"no_type": true},
        {"type": "quote", "quote": {"rich_text": [{"text": {"content": "kept"}}]}},
    ])
    .to_string();
    assert_eq!(parse_content(Some(&raw)), "> kept");
}

#[test]
fn single_object_block() {
    let raw = json!({"type": "code", "code": {"rich_text": [{"plain_text": "ls -la"}]}}).to_string();
    assert_eq!(parse_content(Some(&raw)), "```\nls -la\n```");

    let single_image = image(Some("/tmp/only.png")).to_string();
    assert_eq!(parse_content(Some(&single_image)), "");
    assert_eq!(
        parse_content_with_images(Some(&single_image)),
        ParsedContent {
            text: String::new(),
            image_paths: vec!["/tmp/only.png".to_string()],
        }
    );
}

#[test]
fn mixed_span_sources_concatenate() {
    let raw = json!([{
        "type": "numbered_list_item",
        "numbered_list_item": {"rich_text": [
            {"type": "text", "plain_text": "Call ", "text": {"content": "Call "}},
            {"type": "mention", "plain_text": "@Dana"},
            {"type": "text", "text": {"content": " tomorrow"}},
            {"type": "text"}
        ]}
    }])
    .to_string();
    assert_eq!(parse_content(Some(&raw)), "Call @Dana tomorrow");
}

#[test]
fn malformed_input_never_panics() {
    let inputs = [
        "{",
        "[",
        "[{]",
        "{}",
        "[]",
        "[[]]",
        "[{\"type\": null}]",
        "{\"type\": \"paragraph\", \"paragraph\": null}",
        "{\"type\": \"paragraph\", \"paragraph\": {\"rich_text\": [null, 1, \"x\"]}}",
        "{\"type\": \"image\", \"local_image_path\": 5}",
    ];
    for raw in inputs {
        let _ = parse_content(Some(raw));
        let _ = parse_content_with_images(Some(raw));
    }
    assert_eq!(parse_content(Some("{")), "{");
    assert_eq!(parse_content(Some("[]")), "");
    assert_eq!(parse_content(Some("{}")), "");
}

#[test]
fn plain_text_for_search() {
    let raw = json!([
        {"type": "heading_2", "heading_2": {"rich_text": [{"plain_text": "Agenda"}]}},
        {"type": "quote", "quote": {"rich_text": [{"plain_text": "Ship it"}]}},
    ])
    .to_string();
    assert_eq!(to_plain_text(&parse_content(Some(&raw))), "Agenda\n\nShip it");
}

#[test]
fn parsed_content_serializes() {
    let parsed = ParsedContent {
        text: "hi".to_string(),
        image_paths: vec!["/a.png".to_string()],
    };
    let value = serde_json::to_value(&parsed).unwrap();
    assert_eq!(value, json!({"text": "hi", "image_paths": ["/a.png"]}));
}
