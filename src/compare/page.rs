//! Page differ
//!
//! Decides, for one (before, after) page pair, whether the page changed and
//! which text blocks differ. Text alignment is content+order based (see
//! `diff`); the visual signature contributes an all-or-nothing appearance
//! check on top.

use super::diff::{diff_slices, DiffTag};
use super::types::{BlockDiff, PageAnalysis, PageDiffResult};

/// Compare one page pair.
///
/// `changed = text differs || visual signature differs`. A page whose text
/// is identical but whose rendering differs (e.g. a color change) is still
/// reported as changed via `visual_changed`, with an empty `text_diffs`.
pub fn diff_page(page_index: usize, before: &PageAnalysis, after: &PageAnalysis) -> PageDiffResult {
    let before_texts = before.block_texts();
    let after_texts = after.block_texts();

    let mut text_diffs = Vec::new();

    for op in diff_slices(&before_texts, &after_texts) {
        match op.tag {
            DiffTag::Equal => {}
            DiffTag::Replace => {
                // Pair replaced units index-wise; uneven tails fall through
                // to pure inserts/deletes.
                let a_len = op.a_end - op.a_start;
                let b_len = op.b_end - op.b_start;
                let paired = a_len.min(b_len);

                for k in 0..paired {
                    let b_idx = op.a_start + k;
                    let a_idx = op.b_start + k;
                    text_diffs.push(BlockDiff {
                        block_index: a_idx,
                        before_text: before.blocks[b_idx].text.clone(),
                        after_text: after.blocks[a_idx].text.clone(),
                        // Prefer the after bbox: it drives highlighting on
                        // the after-side view.
                        bbox: Some(after.blocks[a_idx].bbox),
                    });
                }
                for b_idx in (op.a_start + paired)..op.a_end {
                    text_diffs.push(deleted_block(before, b_idx));
                }
                for a_idx in (op.b_start + paired)..op.b_end {
                    text_diffs.push(inserted_block(after, a_idx));
                }
            }
            DiffTag::Delete => {
                for b_idx in op.a_start..op.a_end {
                    text_diffs.push(deleted_block(before, b_idx));
                }
            }
            DiffTag::Insert => {
                for a_idx in op.b_start..op.b_end {
                    text_diffs.push(inserted_block(after, a_idx));
                }
            }
        }
    }

    // A missing signature means rendering failed on that side; treat the
    // page as visually changed rather than failing the request.
    let visual_changed = match (&before.signature, &after.signature) {
        (Some(b), Some(a)) => b != a,
        _ => true,
    };

    PageDiffResult {
        page_index,
        changed: !text_diffs.is_empty() || visual_changed,
        text_diffs,
        visual_changed,
    }
}

fn deleted_block(before: &PageAnalysis, index: usize) -> BlockDiff {
    BlockDiff {
        block_index: index,
        before_text: before.blocks[index].text.clone(),
        after_text: String::new(),
        bbox: Some(before.blocks[index].bbox),
    }
}

fn inserted_block(after: &PageAnalysis, index: usize) -> BlockDiff {
    BlockDiff {
        block_index: index,
        before_text: String::new(),
        after_text: after.blocks[index].text.clone(),
        bbox: Some(after.blocks[index].bbox),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::types::{BoundingBox, PageSignature, TextBlock};

    fn block(text: &str, y: f32) -> TextBlock {
        TextBlock {
            text: text.to_string(),
            bbox: BoundingBox::new(50.0, y, 400.0, y + 14.0),
            page_index: 0,
        }
    }

    fn page(texts: &[&str], sig: u8) -> PageAnalysis {
        PageAnalysis {
            blocks: texts
                .iter()
                .enumerate()
                .map(|(i, t)| block(t, 700.0 - 20.0 * i as f32))
                .collect(),
            signature: Some(PageSignature::new([sig; 32])),
        }
    }

    #[test]
    fn test_identical_page_is_unchanged() {
        let p = page(&["Heading", "Body text"], 1);
        let result = diff_page(0, &p, &p.clone());
        assert!(!result.changed);
        assert!(!result.visual_changed);
        assert!(result.text_diffs.is_empty());
    }

    #[test]
    fn test_empty_vs_empty_is_unchanged() {
        let p = page(&[], 3);
        let result = diff_page(0, &p, &p.clone());
        assert!(!result.changed);
    }

    #[test]
    fn test_replaced_block_carries_both_texts_and_after_bbox() {
        let before = page(&["Total: $100"], 1);
        let after = page(&["Total: $150"], 2);
        let result = diff_page(0, &before, &after);

        assert!(result.changed);
        assert_eq!(result.text_diffs.len(), 1);
        let diff = &result.text_diffs[0];
        assert_eq!(diff.before_text, "Total: $100");
        assert_eq!(diff.after_text, "Total: $150");
        assert_eq!(diff.block_index, 0);
        assert_eq!(diff.bbox, Some(after.blocks[0].bbox));
    }

    #[test]
    fn test_inserted_block_has_empty_before_text() {
        let before = page(&["Intro"], 1);
        let after = page(&["Intro", "Appendix"], 2);
        let result = diff_page(0, &before, &after);

        assert_eq!(result.text_diffs.len(), 1);
        let diff = &result.text_diffs[0];
        assert!(diff.before_text.is_empty());
        assert_eq!(diff.after_text, "Appendix");
        assert_eq!(diff.block_index, 1);
    }

    #[test]
    fn test_deleted_block_keeps_before_bbox() {
        let before = page(&["Intro", "Removed"], 1);
        let after = page(&["Intro"], 1);
        let result = diff_page(0, &before, &after);

        assert_eq!(result.text_diffs.len(), 1);
        let diff = &result.text_diffs[0];
        assert_eq!(diff.before_text, "Removed");
        assert!(diff.after_text.is_empty());
        assert_eq!(diff.bbox, Some(before.blocks[1].bbox));
    }

    #[test]
    fn test_visual_only_change() {
        let before = page(&["Same text"], 1);
        let after = page(&["Same text"], 9);
        let result = diff_page(0, &before, &after);

        assert!(result.changed);
        assert!(result.visual_changed);
        assert!(result.text_diffs.is_empty());
    }

    #[test]
    fn test_missing_signature_counts_as_visual_change() {
        let before = page(&["Same text"], 1);
        let mut after = page(&["Same text"], 1);
        after.signature = None;
        let result = diff_page(0, &before, &after);

        assert!(result.changed);
        assert!(result.visual_changed);
    }

    #[test]
    fn test_uneven_replace_pairs_then_deletes() {
        let before = page(&["keep", "one", "two", "tail"], 1);
        let after = page(&["keep", "merged", "tail"], 1);
        let result = diff_page(0, &before, &after);

        assert_eq!(result.text_diffs.len(), 2);
        assert_eq!(result.text_diffs[0].before_text, "one");
        assert_eq!(result.text_diffs[0].after_text, "merged");
        assert_eq!(result.text_diffs[1].before_text, "two");
        assert!(result.text_diffs[1].after_text.is_empty());
    }
}
