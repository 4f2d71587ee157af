// Structured (layout) input handling

use crate::common::layout_result;
use semsplit::core::splitter::SemanticSplitter;
use semsplit::core::types::{Diagnostic, ParseResult, Position, SplitInput};
use serde_json::json;

fn parse(value: serde_json::Value) -> ParseResult {
    serde_json::from_value(value).expect("valid parse result")
}

#[test]
fn test_layout_fields_carried_through() {
    let result = parse(layout_result(&[json!({
        "text": "  Revenue grew in every region.  ",
        "type": "text",
        "subType": "body",
        "pageNum": [3, 4],
        "uniqueId": "p-17",
        "markdownContent": "Revenue grew in **every** region.",
        "x": 10.5, "y": 20.0, "w": 300.0, "h": 40.25,
    })]));

    let chunks = SemanticSplitter::default().split_parse_result(&result).chunks;
    assert_eq!(chunks.len(), 1);

    let chunk = &chunks[0];
    assert_eq!(chunk.content, "Revenue grew in every region.");
    assert_eq!(chunk.subtype, "body");
    assert_eq!(chunk.page_number, 3);
    assert_eq!(chunk.unique_id, "p-17");
    assert!(chunk.has_markdown());
    assert_eq!(
        chunk.position,
        Some(Position {
            x: 10.5,
            y: 20.0,
            width: 300.0,
            height: 40.25
        })
    );
}

#[test]
fn test_missing_fields_default() {
    let result = parse(layout_result(&[
        json!({"text": "no metadata at all"}),
        json!({"text": "scalar page", "pageNum": 7}),
        json!({"text": "empty page list", "pageNum": []}),
    ]));

    let chunks = SemanticSplitter::default().split_parse_result(&result).chunks;
    assert_eq!(chunks.len(), 3);

    assert_eq!(chunks[0].chunk_type, "text");
    assert_eq!(chunks[0].page_number, 0);
    assert_eq!(chunks[0].unique_id, "chunk_0");
    assert_eq!(chunks[0].position, Some(Position::default()));
    assert!(!chunks[0].has_markdown());

    // Only a page list attributes a page
    assert_eq!(chunks[1].page_number, 0);
    assert_eq!(chunks[2].page_number, 0);
    assert_eq!(chunks[2].unique_id, "chunk_2");
}

#[test]
fn test_odd_side_field_types_keep_the_element() {
    let result = parse(layout_result(&[
        json!({"text": "numeric id", "uniqueId": 7}),
        json!({"text": "float pages", "pageNum": [2.0, 3.0], "uniqueId": "f"}),
        json!({"text": "string box", "x": "12", "y": 4, "w": null, "h": "tall", "uniqueId": "b"}),
        json!({"text": "odd tags", "type": 5, "subType": {"k": 1}, "markdownContent": [1]}),
    ]));

    let output = SemanticSplitter::default().split_parse_result(&result);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    assert_eq!(output.chunks.len(), 4);

    assert_eq!(output.chunks[0].unique_id, "7");
    assert_eq!(output.chunks[0].content, "numeric id");

    assert_eq!(output.chunks[1].page_number, 2);

    assert_eq!(
        output.chunks[2].position,
        Some(Position {
            x: 12.0,
            y: 4.0,
            width: 0.0,
            height: 0.0
        })
    );

    assert_eq!(output.chunks[3].chunk_type, "5");
    assert_eq!(output.chunks[3].subtype, "");
    assert!(!output.chunks[3].has_markdown());
    assert_eq!(output.chunks[3].unique_id, "chunk_3");
}

#[test]
fn test_title_rules_by_type() {
    let long_title = "Annual report ".repeat(12);
    let result = parse(layout_result(&[
        json!({"text": long_title, "type": "para_title"}),
        json!({"text": "Figure caption", "subType": "Table_Title"}),
        json!({"text": "一、概述"}),
        json!({"text": "Author: J. Smith"}),
        json!({"text": "Just an ordinary sentence without structure"}),
    ]));

    let chunks = SemanticSplitter::default().split_parse_result(&result).chunks;
    let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();

    assert_eq!(
        titles,
        vec![
            long_title.trim(),
            "Figure caption",
            "一、概述",
            "Author: J. Smith",
            ""
        ]
    );
}

#[test]
fn test_index_ids_count_skipped_elements() {
    let result = parse(layout_result(&[
        json!({"text": ""}),
        json!({"text": "second"}),
        json!({"text": ["not", "a", "string"]}),
        json!({"text": "fourth"}),
    ]));

    let output = SemanticSplitter::default().split_parse_result(&result);
    let ids: Vec<&str> = output.chunks.iter().map(|c| c.unique_id.as_str()).collect();
    assert_eq!(ids, vec!["chunk_1", "chunk_3"]);

    assert_eq!(output.diagnostics.len(), 2);
    assert_eq!(output.diagnostics[0], Diagnostic::EmptyElement { index: 0 });
    assert!(matches!(
        output.diagnostics[1],
        Diagnostic::SkippedElement { index: 2, .. }
    ));
}

#[test]
fn test_markdown_fallback_only_when_layouts_empty() {
    let splitter = SemanticSplitter::default();

    let empty = parse(json!({
        "layouts": [{"text": " "}],
        "markdown": "intro\n# One\nfirst\n## Two\nsecond",
    }));
    let output = splitter.split(&SplitInput::Structured(empty));
    let ids: Vec<&str> = output.chunks.iter().map(|c| c.unique_id.as_str()).collect();
    assert_eq!(ids, vec!["markdown_chunk_0", "markdown_chunk_1", "markdown_chunk_2"]);
    assert_eq!(output.chunks[0].subtype, "content");
    assert_eq!(output.chunks[0].title, "");
    assert!(output.diagnostics.contains(&Diagnostic::MarkdownFallback));

    let blank_markdown = parse(json!({"layouts": [], "markdown": "  \n "}));
    let output = splitter.split(&SplitInput::Structured(blank_markdown));
    assert!(output.chunks.is_empty());
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_degraded_overlap_reported() {
    let splitter = SemanticSplitter::new(8, 8).unwrap();
    let output = splitter.split(&SplitInput::Text("abcdefghijkl".to_string()));

    // One-character steps: every start position yields a window
    assert_eq!(output.chunks.len(), 12);
    assert_eq!(output.chunks[0].content, "abcdefgh");
    assert_eq!(output.chunks[11].content, "l");
    assert_eq!(
        output.diagnostics,
        vec![Diagnostic::DegradedOverlap {
            max_chunk_size: 8,
            overlap: 8
        }]
    );
}

#[test]
fn test_made_up_ids_never_take_supplied_ones() {
    let splitter = SemanticSplitter::default();
    let ids = |layouts: &[serde_json::Value]| -> Vec<String> {
        splitter
            .split_parse_result(&parse(layout_result(layouts)))
            .chunks
            .into_iter()
            .map(|c| c.unique_id)
            .collect()
    };

    assert_eq!(
        ids(&[
            json!({"text": "a", "uniqueId": "chunk_1"}),
            json!({"text": "b"}),
        ]),
        vec!["chunk_1", "chunk_1_1"]
    );

    // The supplied id keeps its value even when it comes later
    assert_eq!(
        ids(&[
            json!({"text": "b"}),
            json!({"text": "a", "uniqueId": "chunk_0"}),
        ]),
        vec!["chunk_0_1", "chunk_0"]
    );

    assert_eq!(
        ids(&[
            json!({"text": "x", "uniqueId": "d"}),
            json!({"text": "y", "uniqueId": "d"}),
        ]),
        vec!["d", "d_1"]
    );
}

#[test]
fn test_sub_chunk_ids_avoid_supplied_ids() {
    let splitter = SemanticSplitter::new(10, 0).unwrap();
    let result = parse(layout_result(&[
        json!({"text": "first para\n\nsecond one", "uniqueId": "p"}),
        json!({"text": "short", "uniqueId": "p_0"}),
    ]));

    let ids: Vec<String> = splitter
        .split_parse_result(&result)
        .chunks
        .into_iter()
        .map(|c| c.unique_id)
        .collect();
    assert_eq!(ids, vec!["p_0_1", "p_1", "p_0"]);
}
