// Worked examples for each stage of the fallback chain

use semsplit::core::splitter::paragraph::split_paragraphs;
use semsplit::core::splitter::title::extract_title;
use semsplit::core::splitter::window::hard_split;
use semsplit::core::splitter::SemanticSplitter;
use semsplit::core::types::{Metadata, ParseResult};
use serde_json::json;

fn alphabet_run(len: usize) -> String {
    (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect()
}

#[test]
fn test_hard_split_identical_characters() {
    let splitter = SemanticSplitter::new(1000, 100).unwrap();
    let chunks = splitter.split_text(&"a".repeat(2500));

    let lengths: Vec<usize> = chunks.iter().map(|c| c.char_len()).collect();
    assert_eq!(lengths, vec![1000, 1000, 700]);

    let ids: Vec<&str> = chunks.iter().map(|c| c.unique_id.as_str()).collect();
    assert_eq!(ids, vec!["text_chunk_0", "text_chunk_1", "text_chunk_2"]);
}

#[test]
fn test_hard_split_window_offsets() {
    let text = alphabet_run(2500);
    let chars: Vec<char> = text.chars().collect();

    let windows = hard_split(&text, 1000, 100);
    assert_eq!(windows.len(), 3);

    for (window, start) in windows.iter().zip([0usize, 900, 1800]) {
        let expected: String = chars[start..(start + 1000).min(chars.len())].iter().collect();
        assert_eq!(window, &expected);
    }
}

#[test]
fn test_markdown_sections_with_levels() {
    let splitter = SemanticSplitter::default();
    let chunks = splitter.split_markdown("# A\ncontent1\n## B\ncontent2");

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].title, "A");
    assert_eq!(chunks[0].subtype, "level_1");
    assert_eq!(chunks[1].title, "B");
    assert_eq!(chunks[1].subtype, "level_2");
    assert!(chunks.iter().all(|c| c.chunk_type == "markdown_section"));
}

#[test]
fn test_blank_element_produces_nothing() {
    let splitter = SemanticSplitter::default();
    let result = ParseResult {
        layouts: vec![json!({"text": "   "})],
        markdown: None,
    };

    let output = splitter.split_parse_result(&result);
    assert!(output.chunks.is_empty());
    assert!(splitter
        .to_documents(&output.chunks, &Metadata::new())
        .is_empty());
}

#[test]
fn test_numbered_heading_becomes_title() {
    assert_eq!(extract_title("text", "", "1. Overview"), "1. Overview");

    let splitter = SemanticSplitter::default();
    let result = ParseResult {
        layouts: vec![json!({"text": "1. Overview"})],
        markdown: None,
    };
    let output = splitter.split_parse_result(&result);
    assert_eq!(output.chunks[0].title, "1. Overview");
}

#[test]
fn test_paragraphs_packed_into_one_chunk() {
    let text = format!("{}\n\n{}", "a".repeat(600), "b".repeat(300));

    let pieces = split_paragraphs(&text, 1000, 100);
    assert_eq!(pieces.len(), 1);
    assert!(pieces[0].chars().count() <= 1000);
    assert_eq!(pieces[0], text);
}

#[test]
fn test_oversized_layout_packs_then_flushes() {
    let text = format!(
        "{}\n\n{}\n\n{}",
        "a".repeat(600),
        "b".repeat(300),
        "c".repeat(200)
    );
    let splitter = SemanticSplitter::default();
    let result = ParseResult {
        layouts: vec![json!({
            "text": text,
            "type": "table",
            "subType": "bordered",
            "pageNum": [4],
            "uniqueId": "tbl",
            "markdownContent": "| a |",
        })],
        markdown: None,
    };

    let chunks = splitter.split_parse_result(&result).chunks;
    assert_eq!(chunks.len(), 2);
    assert_eq!(
        chunks[0].content,
        format!("{}\n\n{}", "a".repeat(600), "b".repeat(300))
    );
    assert_eq!(chunks[1].content, "c".repeat(200));

    // Children inherit the parent's structural fields
    for (n, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.unique_id, format!("tbl_{n}"));
        assert_eq!(chunk.chunk_type, "table");
        assert_eq!(chunk.subtype, "bordered");
        assert_eq!(chunk.page_number, 4);
        assert_eq!(chunk.markdown_content.as_deref(), Some("| a |"));
    }
}

#[test]
fn test_sentence_fallback_for_long_paragraph() {
    let sentence = format!("{}.", "w".repeat(30));
    let paragraph = std::iter::repeat(sentence.as_str())
        .take(4)
        .collect::<Vec<_>>()
        .join(" ");

    let splitter = SemanticSplitter::new(70, 5).unwrap();
    let chunks = splitter.split_text(&paragraph);

    // Terminators are dropped and sentences concatenated directly
    let expected = "w".repeat(60);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, expected);
    assert_eq!(chunks[1].content, expected);
}

#[test]
fn test_document_metadata_derivation() {
    let splitter = SemanticSplitter::default();
    let result = ParseResult {
        layouts: vec![json!({"text": "第3章 总则", "type": "text", "pageNum": [2]})],
        markdown: None,
    };

    let mut base = Metadata::new();
    base.insert("Content-Type".into(), json!("application/pdf"));
    base.insert("page_number".into(), json!(99));

    let chunks = splitter.split_parse_result(&result).chunks;
    let docs = splitter.to_documents(&chunks, &base);

    assert_eq!(docs.len(), 1);
    let meta = &docs[0].metadata;
    assert_eq!(docs[0].body, "第3章 总则");
    assert_eq!(meta["Content-Type"], json!("application/pdf"));
    // Derived fields win over base keys
    assert_eq!(meta["page_number"], json!(2));
    assert_eq!(meta["element_type"], json!("text"));
    assert_eq!(meta["unique_id"], json!("chunk_0"));
    assert_eq!(meta["has_title"], json!(true));
    assert_eq!(meta["has_markdown"], json!(false));
    assert_eq!(meta["content_length"], json!(6));
}
