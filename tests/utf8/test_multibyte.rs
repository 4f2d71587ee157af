// UTF-8 safety tests: CJK and mixed scripts

use crate::common::assert_chunk_invariants;
use semsplit::core::splitter::sentence::split_sentences;
use semsplit::core::splitter::SemanticSplitter;
use semsplit::core::types::{Metadata, ParseResult};
use serde_json::json;

#[test]
fn test_cjk_sentence_terminators() {
    let text = "今天天气很好。我们去公园吧！你觉得怎么样？";

    let pieces = split_sentences(text, 8, 0);
    assert_eq!(pieces, vec!["今天天气很好", "我们去公园吧", "你觉得怎么样"]);
}

#[test]
fn test_mixed_script_terminators() {
    let text = "First sentence. 第二句。Third one! 第四句？";

    let pieces = split_sentences(text, 20, 0);
    assert_eq!(pieces, vec!["First sentence第二句", "Third one第四句"]);
}

#[test]
fn test_cjk_hard_split_lengths() {
    let text = "漢字".repeat(1250);
    let chunks = SemanticSplitter::new(1000, 100).unwrap().split_text(&text);

    let lengths: Vec<usize> = chunks.iter().map(|c| c.char_len()).collect();
    assert_eq!(lengths, vec![1000, 1000, 700]);
}

#[test]
fn test_mixed_content_layouts() {
    let paragraphs = [
        "Ünïcödé façade naïve résumé.",
        "Ελληνικά κείμενα εδώ.",
        "Русский текст тоже здесь.",
        "العربية نص هنا.",
        "日本語のテキストです。",
    ];
    let text = paragraphs.join("\n\n").repeat(6);
    let result = ParseResult {
        layouts: vec![json!({"text": text, "uniqueId": "mixed"})],
        markdown: None,
    };

    let splitter = SemanticSplitter::new(40, 5).unwrap();
    let chunks = splitter.split_parse_result(&result).chunks;
    assert_chunk_invariants(&chunks, 40);

    let docs = splitter.to_documents(&chunks, &Metadata::new());
    for (doc, chunk) in docs.iter().zip(&chunks) {
        assert_eq!(
            doc.metadata["content_length"],
            json!(chunk.content.chars().count())
        );
    }
}
