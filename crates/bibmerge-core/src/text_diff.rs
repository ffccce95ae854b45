use crate::toolbar::{DiffHighlightMode, DiffView, ShowDiffConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl DiffSegment {
    fn new(kind: SegmentKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Highlighted content of the left and right value cells of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub left: Vec<DiffSegment>,
    pub right: Vec<DiffSegment>,
}

/// Diffs `left` against `right` the way `config` asks for.
///
/// Unified: the left cell stays plain and the right cell carries both the
/// removed and the added tokens. Split: each side only shows its own
/// changes.
pub fn diff_field(left: &str, right: &str, config: ShowDiffConfig) -> FieldDiff {
    let segments = diff_segments(left, right, config.highlight_mode);
    match config.diff_view {
        DiffView::Unified => FieldDiff {
            left: plain(left),
            right: segments,
        },
        DiffView::Split => FieldDiff {
            left: keep(&segments, SegmentKind::Removed),
            right: keep(&segments, SegmentKind::Added),
        },
    }
}

/// Full edit script from `old` to `new`, adjacent segments of the same kind
/// coalesced.
pub fn diff_segments(old: &str, new: &str, mode: DiffHighlightMode) -> Vec<DiffSegment> {
    let old_tokens = tokenize(old, mode);
    let new_tokens = tokenize(new, mode);

    let prefix = old_tokens
        .iter()
        .zip(&new_tokens)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old_tokens[prefix..]
        .iter()
        .rev()
        .zip(new_tokens[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments = Segments::default();
    for token in &old_tokens[..prefix] {
        segments.push(SegmentKind::Unchanged, token);
    }
    emit_middle(
        &old_tokens[prefix..old_tokens.len() - suffix],
        &new_tokens[prefix..new_tokens.len() - suffix],
        &mut segments,
    );
    for token in &old_tokens[old_tokens.len() - suffix..] {
        segments.push(SegmentKind::Unchanged, token);
    }
    segments.0
}

#[derive(Default)]
struct Segments(Vec<DiffSegment>);

impl Segments {
    fn push(&mut self, kind: SegmentKind, token: &str) {
        match self.0.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(token),
            _ => self.0.push(DiffSegment::new(kind, token)),
        }
    }
}

/// LCS over the differing middle. `suffix_lcs[i * width + j]` is the LCS
/// length of `old[i..]` and `new[j..]`; deletions win ties.
fn emit_middle(old: &[&str], new: &[&str], out: &mut Segments) {
    let width = new.len() + 1;
    let mut suffix_lcs = vec![0u32; (old.len() + 1) * width];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            suffix_lcs[i * width + j] = if old[i] == new[j] {
                suffix_lcs[(i + 1) * width + j + 1] + 1
            } else {
                suffix_lcs[(i + 1) * width + j].max(suffix_lcs[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < old.len() || j < new.len() {
        if i < old.len() && j < new.len() && old[i] == new[j] {
            out.push(SegmentKind::Unchanged, old[i]);
            i += 1;
            j += 1;
        } else if j == new.len()
            || (i < old.len() && suffix_lcs[(i + 1) * width + j] >= suffix_lcs[i * width + j + 1])
        {
            out.push(SegmentKind::Removed, old[i]);
            i += 1;
        } else {
            out.push(SegmentKind::Added, new[j]);
            j += 1;
        }
    }
}

fn plain(text: &str) -> Vec<DiffSegment> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![DiffSegment::new(SegmentKind::Unchanged, text)]
}

fn keep(segments: &[DiffSegment], changed: SegmentKind) -> Vec<DiffSegment> {
    let mut out: Vec<DiffSegment> = Vec::new();
    for segment in segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Unchanged || s.kind == changed)
    {
        match out.last_mut() {
            Some(last) if last.kind == segment.kind => last.text.push_str(&segment.text),
            _ => out.push(segment.clone()),
        }
    }
    out
}

fn tokenize(text: &str, mode: DiffHighlightMode) -> Vec<&str> {
    match mode {
        DiffHighlightMode::Chars => text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect(),
        DiffHighlightMode::Words => {
            let mut tokens = Vec::new();
            let mut start = 0usize;
            let mut in_space: Option<bool> = None;
            for (i, c) in text.char_indices() {
                let space = c.is_whitespace();
                if in_space.is_some_and(|prev| prev != space) {
                    tokens.push(&text[start..i]);
                    start = i;
                }
                in_space = Some(space);
            }
            if start < text.len() {
                tokens.push(&text[start..]);
            }
            tokens
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::toolbar::{DiffHighlightMode, DiffView, ShowDiffConfig};

    use super::{DiffSegment, SegmentKind, diff_field, diff_segments, tokenize};

    fn seg(kind: SegmentKind, text: &str) -> DiffSegment {
        DiffSegment {
            kind,
            text: text.into(),
        }
    }

    #[test]
    fn word_tokens_keep_whitespace_runs() {
        assert_eq!(
            tokenize("a  bc d", DiffHighlightMode::Words),
            vec!["a", "  ", "bc", " ", "d"]
        );
        assert!(tokenize("", DiffHighlightMode::Words).is_empty());
    }

    #[test]
    fn word_diff_marks_replaced_word() {
        let segments = diff_segments("deep learning", "deep reading", DiffHighlightMode::Words);
        assert_eq!(
            segments,
            vec![
                seg(SegmentKind::Unchanged, "deep "),
                seg(SegmentKind::Removed, "learning"),
                seg(SegmentKind::Added, "reading"),
            ]
        );
    }

    #[test]
    fn char_diff_marks_single_character() {
        let segments = diff_segments("colour", "color", DiffHighlightMode::Chars);
        assert_eq!(
            segments,
            vec![
                seg(SegmentKind::Unchanged, "colo"),
                seg(SegmentKind::Removed, "u"),
                seg(SegmentKind::Unchanged, "r"),
            ]
        );
    }

    #[test]
    fn long_values_only_diff_their_changed_middle() {
        let body = "x".repeat(20_000);
        let old = format!("{body}a{body}");
        let new = format!("{body}bc{body}");
        let segments = diff_segments(&old, &new, DiffHighlightMode::Chars);
        assert_eq!(
            segments,
            vec![
                seg(SegmentKind::Unchanged, &body),
                seg(SegmentKind::Removed, "a"),
                seg(SegmentKind::Added, "bc"),
                seg(SegmentKind::Unchanged, &body),
            ]
        );
    }

    #[test]
    fn pure_insertions_and_deletions() {
        assert_eq!(
            diff_segments("", "new", DiffHighlightMode::Words),
            vec![seg(SegmentKind::Added, "new")]
        );
        assert_eq!(
            diff_segments("old", "", DiffHighlightMode::Words),
            vec![seg(SegmentKind::Removed, "old")]
        );
        assert!(diff_segments("", "", DiffHighlightMode::Chars).is_empty());
    }

    #[test]
    fn unified_keeps_left_plain() {
        let config = ShowDiffConfig::new(DiffView::Unified, DiffHighlightMode::Words);
        let diff = diff_field("a b", "a c", config);
        assert_eq!(diff.left, vec![seg(SegmentKind::Unchanged, "a b")]);
        assert!(diff.right.iter().any(|s| s.kind == SegmentKind::Removed));
        assert!(diff.right.iter().any(|s| s.kind == SegmentKind::Added));
    }

    #[test]
    fn split_shows_each_side_own_changes() {
        let config = ShowDiffConfig::new(DiffView::Split, DiffHighlightMode::Words);
        let diff = diff_field("a b", "a c", config);
        assert_eq!(
            diff.left,
            vec![
                seg(SegmentKind::Unchanged, "a "),
                seg(SegmentKind::Removed, "b")
            ]
        );
        assert_eq!(
            diff.right,
            vec![seg(SegmentKind::Unchanged, "a "), seg(SegmentKind::Added, "c")]
        );
    }

    #[test]
    fn equal_text_has_no_changes() {
        let config = ShowDiffConfig::new(DiffView::Split, DiffHighlightMode::Chars);
        let diff = diff_field("same", "same", config);
        assert_eq!(diff.left, vec![seg(SegmentKind::Unchanged, "same")]);
        assert_eq!(diff.right, diff.left);
    }
}
