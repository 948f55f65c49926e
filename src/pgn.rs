//! Tag-pair extraction from PGN header blocks.
//!
//! chess.com PGNs open with a header block of `[TagName "TagValue"]`
//! lines, separated from the moves section by a blank line. This module
//! is deliberately not a general PGN parser: it tokenizes exactly that
//! constrained header-line grammar into a string map and rejects
//! anything else with a precise error. Tag values are extracted, never
//! interpreted; integer parsing of ratings and the like is the caller's
//! concern.

use std::collections::BTreeMap;

use crate::error::{PipelineError, Result};

/// Mapping from tag name to tag value, extracted from one header block.
pub type TagPairs = BTreeMap<String, String>;

/// Extracts all tag pairs from a PGN blob's header block.
///
/// The header block is everything before the first blank line; each of
/// its lines must match `[TagName "TagValue"]`.
///
/// # Errors
///
/// Returns [`PipelineError::Parse`] naming the offending line if any
/// header line does not match the grammar.
pub fn parse_tag_pairs(pgn: &str) -> Result<TagPairs> {
    let header = pgn.split("\n\n").next().unwrap_or_default();

    let mut pairs = TagPairs::new();
    for line in header.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (name, value) = parse_header_line(line)?;
        pairs.insert(name, value);
    }
    Ok(pairs)
}

/// Tokenizes one `[TagName "TagValue"]` line.
fn parse_header_line(line: &str) -> Result<(String, String)> {
    let malformed = || PipelineError::Parse {
        line: line.to_string(),
    };

    let rest = line.trim_end().strip_prefix('[').ok_or_else(malformed)?;
    let (name, rest) = rest.split_once(char::is_whitespace).ok_or_else(malformed)?;
    if name.is_empty() {
        return Err(malformed());
    }

    let rest = rest.trim_start().strip_prefix('"').ok_or_else(malformed)?;
    let (value, rest) = rest.split_once('"').ok_or_else(malformed)?;
    if rest.trim() != "]" {
        return Err(malformed());
    }

    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const PGN: &str = concat!(
        "[Event \"Live Chess\"]\n",
        "[Site \"Chess.com\"]\n",
        "[White \"alice\"]\n",
        "[Black \"bob\"]\n",
        "[Result \"1-0\"]\n",
        "[Termination \"alice won by checkmate\"]\n",
        "\n",
        "1. e4 e5 2. Nf3 1-0\n",
    );

    #[test]
    fn extracts_all_header_pairs() {
        let Ok(pairs) = parse_tag_pairs(PGN) else {
            panic!("expected header to parse");
        };
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs.get("Event").map(String::as_str), Some("Live Chess"));
        assert_eq!(
            pairs.get("Termination").map(String::as_str),
            Some("alice won by checkmate")
        );
    }

    #[test]
    fn moves_section_is_ignored() {
        let Ok(pairs) = parse_tag_pairs(PGN) else {
            panic!("expected header to parse");
        };
        assert!(!pairs.contains_key("1."));
    }

    #[test]
    fn empty_value_is_allowed() {
        let Ok(pairs) = parse_tag_pairs("[SetUp \"\"]\n\nmoves") else {
            panic!("expected header to parse");
        };
        assert_eq!(pairs.get("SetUp").map(String::as_str), Some(""));
    }

    #[test]
    fn line_without_bracket_is_rejected() {
        let err = parse_tag_pairs("Event \"Live Chess\"\n\nmoves");
        let Err(PipelineError::Parse { line }) = err else {
            panic!("expected parse error");
        };
        assert!(line.starts_with("Event"));
    }

    #[test]
    fn line_without_quotes_is_rejected() {
        let err = parse_tag_pairs("[Event Live Chess]\n\nmoves");
        assert!(matches!(err, Err(PipelineError::Parse { .. })));
    }

    #[test]
    fn unterminated_value_is_rejected() {
        let err = parse_tag_pairs("[Event \"Live Chess]\n\nmoves");
        assert!(matches!(err, Err(PipelineError::Parse { .. })));
    }

    #[test]
    fn missing_closing_bracket_is_rejected() {
        let err = parse_tag_pairs("[Event \"Live Chess\"\n\nmoves");
        assert!(matches!(err, Err(PipelineError::Parse { .. })));
    }

    #[test]
    fn header_only_pgn_parses() {
        // Games with no moves have no blank-line separator at all.
        let Ok(pairs) = parse_tag_pairs("[Event \"Live Chess\"]\n[Result \"1-0\"]\n") else {
            panic!("expected header to parse");
        };
        assert_eq!(pairs.len(), 2);
    }
}
