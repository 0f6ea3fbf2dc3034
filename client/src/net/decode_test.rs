use super::*;

#[test]
fn ascii_chunks_pass_through() {
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"Hello, "), "Hello, ");
    assert_eq!(decoder.push(b"world"), "world");
    assert_eq!(decoder.finish(), "");
}

#[test]
fn split_multibyte_character_is_held_until_complete() {
    // "é" is 0xC3 0xA9.
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"caf\xC3"), "caf");
    assert!(decoder.has_pending());
    assert_eq!(decoder.push(b"\xA9!"), "é!");
    assert!(!decoder.has_pending());
}

#[test]
fn four_byte_character_split_across_three_chunks() {
    let bytes = "🦀".as_bytes();
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(&bytes[..1]), "");
    assert_eq!(decoder.push(&bytes[1..3]), "");
    assert_eq!(decoder.push(&bytes[3..]), "🦀");
}

#[test]
fn invalid_byte_is_replaced_and_decoding_continues() {
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"a\xFFb"), "a\u{FFFD}b");
}

#[test]
fn truncated_tail_flushes_as_replacement() {
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"ok\xE2\x82"), "ok");
    assert_eq!(decoder.finish(), "\u{FFFD}");
    assert!(!decoder.has_pending());
}

#[test]
fn concatenated_output_matches_source_for_every_split_point() {
    let source = "Grüße, 世界 🦀 done";
    let bytes = source.as_bytes();
    for split in 0..=bytes.len() {
        let mut decoder = Utf8StreamDecoder::new();
        let mut text = decoder.push(&bytes[..split]);
        text.push_str(&decoder.push(&bytes[split..]));
        text.push_str(&decoder.finish());
        assert_eq!(text, source, "split at {split}");
    }
}
