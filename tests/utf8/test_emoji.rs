// UTF-8 safety tests: Emoji handling
//
// Validates that windows never cut an emoji in half and that
// lengths are counted in characters, not bytes.

use crate::common::assert_chunk_invariants;
use semsplit::core::splitter::window::hard_split;
use semsplit::core::splitter::SemanticSplitter;

#[test]
fn test_emoji_run_windows() {
    let text = "🦀".repeat(25);

    let windows = hard_split(&text, 10, 2);
    let lengths: Vec<usize> = windows.iter().map(|w| w.chars().count()).collect();

    // Starts at 0, 8, 16, 24
    assert_eq!(lengths, vec![10, 10, 9, 1]);
    assert!(windows.iter().all(|w| w.chars().all(|c| c == '🦀')));
}

#[test]
fn test_various_emoji() {
    let emojis = vec![
        "👋",       // Waving hand
        "🦀",       // Crab (Rust mascot)
        "✅",       // Check mark
        "⚠️",       // Warning with variation selector
        "👨‍👩‍👧",     // ZWJ family sequence
        "🎉🎊🥳", // Multiple emojis
    ];

    for emoji in emojis {
        let text = format!("Release {} shipped", emoji).repeat(40);
        let splitter = SemanticSplitter::new(17, 3).unwrap();

        // Must not panic on any boundary
        let chunks = splitter.split_text(&text);
        assert!(!chunks.is_empty());
        assert_chunk_invariants(&chunks, 17);
    }
}

#[test]
fn test_emoji_counted_as_characters() {
    // 4 bytes each, but only 9 characters in total
    let text = "🙂🙂🙂🙂🙂🙂🙂🙂🙂";
    let chunks = SemanticSplitter::new(9, 0).unwrap().split_text(text);

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, text);
}
