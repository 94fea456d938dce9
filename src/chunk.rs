//! Fixed-size sliding-window text chunker.
//!
//! Splits text into chunks of at most `chunk_size` characters, where
//! consecutive chunks re-include the trailing `chunk_overlap` characters
//! of their predecessor when a natural split point permits it.
//!
//! # Algorithm
//!
//! 1. Split the input on `separator` into atomic units.
//! 2. Greedily pack units into the current chunk, counting the separator
//!    re-inserted between units, until adding the next unit would exceed
//!    `chunk_size`.
//! 3. Flush the current chunk, then drop units from its front until the
//!    retained tail is no longer than `chunk_overlap` characters (and
//!    small enough to admit the pending unit). The tail seeds the next
//!    chunk.
//! 4. A single unit longer than `chunk_size` becomes its own oversized
//!    chunk — size is not strictly enforced.
//!
//! Chunks are never empty: whitespace-only output is dropped, and empty
//! input yields zero chunks. This exact behavior is load-bearing for
//! embedding batch sizing and must not be "improved".

/// Split `text` into overlapping chunks.
///
/// Lengths are measured in characters, not bytes. An empty `separator`
/// treats the whole input as one atomic unit.
pub fn split_text(
    text: &str,
    separator: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<String> {
    let units: Vec<&str> = if separator.is_empty() {
        vec![text]
    } else {
        text.split(separator).collect()
    };
    merge_units(&units, separator, chunk_size, chunk_overlap)
}

/// Greedily pack pre-split units into chunks with overlap carry-over.
fn merge_units(
    units: &[&str],
    separator: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<String> {
    let sep_len = separator.chars().count();
    let mut chunks: Vec<String> = Vec::new();
    let mut current: std::collections::VecDeque<&str> = std::collections::VecDeque::new();
    let mut total = 0usize;

    for &unit in units {
        let unit_len = unit.chars().count();
        let joiner = if current.is_empty() { 0 } else { sep_len };

        if total + unit_len + joiner > chunk_size {
            if total > chunk_size {
                tracing::warn!(
                    length = total,
                    chunk_size,
                    "produced a chunk longer than the target size"
                );
            }
            if !current.is_empty() {
                if let Some(chunk) = join_units(&current, separator) {
                    chunks.push(chunk);
                }
                // Step back: shed leading units until the retained tail
                // fits inside the overlap budget and leaves room for the
                // pending unit.
                while total > chunk_overlap
                    || (total + unit_len + if current.is_empty() { 0 } else { sep_len }
                        > chunk_size
                        && total > 0)
                {
                    let first_len = current
                        .front()
                        .map(|u| u.chars().count())
                        .unwrap_or_default();
                    total -= first_len + if current.len() > 1 { sep_len } else { 0 };
                    current.pop_front();
                }
            }
        }

        current.push_back(unit);
        total += unit_len + if current.len() > 1 { sep_len } else { 0 };
    }

    if let Some(chunk) = join_units(&current, separator) {
        chunks.push(chunk);
    }

    chunks
}

/// Join units with the separator, trimming surrounding whitespace.
/// Returns `None` when the result would be an empty chunk.
fn join_units(units: &std::collections::VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = units
        .iter()
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
        .trim()
        .to_string();
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_lines(n: usize) -> String {
        (0..n)
            .map(|i| format!("line{:02}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_input_yields_zero_chunks() {
        assert!(split_text("", "\n", 800, 200).is_empty());
        assert!(split_text("\n\n\n", "\n", 800, 200).is_empty());
    }

    #[test]
    fn short_input_is_a_single_chunk() {
        let chunks = split_text("hello world", "\n", 800, 200);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn zero_overlap_chunks_are_disjoint_and_cover_the_text() {
        let text = numbered_lines(20);
        let chunks = split_text(&text, "\n", 25, 0);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 25);
        }
        // With no overlap the separator-joined chunks reconstruct the
        // original text exactly.
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn consecutive_chunks_share_the_overlap_region() {
        let text = numbered_lines(30);
        // Three 6-char lines + separators per chunk, one line of overlap.
        let chunks = split_text(&text, "\n", 20, 7);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let first_unit = pair[1].split('\n').next().unwrap();
            assert!(
                pair[0].ends_with(first_unit),
                "chunk {:?} does not carry the tail of {:?}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn overlapping_chunks_reconstruct_the_original_text() {
        let text = numbered_lines(40);
        let chunks = split_text(&text, "\n", 30, 10);
        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            // Find the longest suffix of `rebuilt` that prefixes `chunk`.
            let mut matched = 0;
            for s in (1..=chunk.len().min(rebuilt.len())).rev() {
                if rebuilt.ends_with(&chunk[..s]) {
                    matched = s;
                    break;
                }
            }
            rebuilt.push('\n');
            rebuilt.push_str(&chunk[matched..].trim_start_matches('\n'));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn oversized_unit_becomes_its_own_chunk() {
        let long = "x".repeat(50);
        let text = format!("short\n{}\ntail", long);
        let chunks = split_text(&text, "\n", 20, 5);
        assert!(chunks.iter().any(|c| c == &long));
        for chunk in &chunks {
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn no_chunk_is_empty_and_sizes_are_bounded() {
        let text = numbered_lines(100);
        let chunks = split_text(&text, "\n", 800, 200);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 800);
        }
    }

    #[test]
    fn deterministic() {
        let text = numbered_lines(50);
        assert_eq!(
            split_text(&text, "\n", 33, 9),
            split_text(&text, "\n", 33, 9)
        );
    }

    #[test]
    fn multibyte_characters_are_counted_not_bytes() {
        let text = "αβγδε\nζηθικ\nλμνξο";
        let chunks = split_text(text, "\n", 11, 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "αβγδε\nζηθικ");
        assert_eq!(chunks[1], "λμνξο");
    }
}
