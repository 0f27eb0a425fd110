//! Word-level diff between a submitted sentence and its corrected form,
//! rendered as `<ins>`/`<del>` markup for the grading result.

/// One span of the diff. The span text covers whole tokens, including the
/// whitespace runs between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSegment {
    Unchanged(String),
    Inserted(String),
    Deleted(String),
}

impl DiffSegment {
    pub fn text(&self) -> &str {
        match self {
            Self::Unchanged(t) | Self::Inserted(t) | Self::Deleted(t) => t,
        }
    }
}

/// LCS alignment over word tokens. Adjacent spans of the same kind are
/// coalesced, so identical inputs collapse to a single unchanged span and
/// fully disjoint inputs become one deleted span followed by one inserted
/// span. Concatenating unchanged + inserted text in order reconstructs
/// `corrected` exactly.
pub fn diff_words(original: &str, corrected: &str) -> Vec<DiffSegment> {
    let a = tokenize(original);
    let b = tokenize(corrected);

    // LCS length table, (m+1) x (n+1).
    let (m, n) = (a.len(), b.len());
    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for i in (0..m).rev() {
        for j in (0..n).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut segments: Vec<DiffSegment> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        if a[i] == b[j] {
            push_coalesced(&mut segments, DiffSegment::Unchanged(a[i].to_string()));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            push_coalesced(&mut segments, DiffSegment::Deleted(a[i].to_string()));
            i += 1;
        } else {
            push_coalesced(&mut segments, DiffSegment::Inserted(b[j].to_string()));
            j += 1;
        }
    }
    while i < m {
        push_coalesced(&mut segments, DiffSegment::Deleted(a[i].to_string()));
        i += 1;
    }
    while j < n {
        push_coalesced(&mut segments, DiffSegment::Inserted(b[j].to_string()));
        j += 1;
    }

    segments
}

/// Renders the diff as inline markup: insertions in `<ins>`, deletions in
/// `<del>`, unchanged text bare. Markup-significant characters in the
/// source sentences are escaped before wrapping.
pub fn render_highlight(original: &str, corrected: &str) -> String {
    let mut out = String::new();
    for segment in diff_words(original, corrected) {
        match segment {
            DiffSegment::Unchanged(text) => out.push_str(&escape_html(&text)),
            DiffSegment::Inserted(text) => {
                out.push_str("<ins>");
                out.push_str(&escape_html(&text));
                out.push_str("</ins>");
            }
            DiffSegment::Deleted(text) => {
                out.push_str("<del>");
                out.push_str(&escape_html(&text));
                out.push_str("</del>");
            }
        }
    }
    out
}

/// Splits into word chunks, each a non-whitespace run together with the
/// whitespace that follows it (a leading whitespace run forms its own
/// chunk). Chunks partition the input, so the sequence concatenates back
/// to it byte-for-byte; gluing the separators to the words keeps two
/// sentences with no common word from aligning on bare spaces.
fn tokenize(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut prev_was_whitespace = false;

    for (idx, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        if idx > 0 && prev_was_whitespace && !ws {
            chunks.push(&text[start..idx]);
            start = idx;
        }
        prev_was_whitespace = ws;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

fn push_coalesced(segments: &mut Vec<DiffSegment>, segment: DiffSegment) {
    match (segments.last_mut(), &segment) {
        (Some(DiffSegment::Unchanged(acc)), DiffSegment::Unchanged(t))
        | (Some(DiffSegment::Inserted(acc)), DiffSegment::Inserted(t))
        | (Some(DiffSegment::Deleted(acc)), DiffSegment::Deleted(t)) => acc.push_str(t),
        _ => segments.push(segment),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct_corrected(segments: &[DiffSegment]) -> String {
        segments
            .iter()
            .filter_map(|s| match s {
                DiffSegment::Unchanged(t) | DiffSegment::Inserted(t) => Some(t.as_str()),
                DiffSegment::Deleted(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_identical_inputs_yield_single_unchanged_span() {
        let text = "I like to run in the park.";
        let segments = diff_words(text, text);
        assert_eq!(segments, vec![DiffSegment::Unchanged(text.to_string())]);
        assert_eq!(render_highlight(text, text), text);
    }

    #[test]
    fn test_disjoint_inputs_yield_deleted_then_inserted() {
        let segments = diff_words("alpha beta", "gamma delta epsilon");
        assert_eq!(
            segments,
            vec![
                DiffSegment::Deleted("alpha beta".to_string()),
                DiffSegment::Inserted("gamma delta epsilon".to_string()),
            ]
        );
    }

    #[test]
    fn test_word_level_replacement_inline() {
        let html = render_highlight("I like run.", "I like running.");
        assert_eq!(html, "I like <del>run.</del><ins>running.</ins>");
    }

    #[test]
    fn test_pure_insertion_keeps_context_bare() {
        let html = render_highlight("I like the park.", "I really like the park.");
        assert!(html.contains("<ins>"));
        assert!(!html.contains("<del>"));
        assert!(html.starts_with("I "));
    }

    #[test]
    fn test_reconstruction_law() {
        let original = "He go to school yesterday and play with friend.";
        let corrected = "He went to school yesterday and played with his friends.";
        let segments = diff_words(original, corrected);
        assert_eq!(reconstruct_corrected(&segments), corrected);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(diff_words("", "").is_empty());
        assert_eq!(render_highlight("", ""), "");
        assert_eq!(
            diff_words("", "new text"),
            vec![DiffSegment::Inserted("new text".to_string())]
        );
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        let html = render_highlight("a < b", "a > b");
        assert!(html.contains("&lt;"));
        assert!(html.contains("&gt;"));
        assert!(!html.contains("< b"));
    }

    #[test]
    fn test_deterministic_output() {
        let original = "the quick brown fox";
        let corrected = "the slow brown wolf";
        let first = diff_words(original, corrected);
        for _ in 0..5 {
            assert_eq!(diff_words(original, corrected), first);
        }
    }
}
