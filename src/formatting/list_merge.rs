// src/formatting/list_merge.rs
//! Groups consecutive list items into runs.
//!
//! A run is a maximal sequence of items with the same list tag. Ordered runs
//! are numbered from 1; a run is followed by a blank item when the next item
//! is not a list item, so Markdown sees the list end.

use super::render_items::RenderItem;

/// Spacing policy between list runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergePolicy {
    /// Insert a blank item between two adjacent runs of different tags.
    pub separate_adjacent_lists: bool,
}

/// Numbers ordered runs and inserts blanks after runs.
///
/// The output preserves the relative order of the input and is never
/// shorter than it.
pub fn merge_lists(items: Vec<RenderItem>, policy: MergePolicy) -> Vec<RenderItem> {
    let mut merged = Vec::with_capacity(items.len() + items.len() / 4);
    let mut items = items.into_iter().peekable();

    while let Some(item) = items.next() {
        let Some(tag) = item.list_tag() else {
            merged.push(item);
            continue;
        };

        let mut ordinal = 1;
        merged.push(numbered(item, ordinal));
        while let Some(next) = items.next_if(|next| next.list_tag() == Some(tag)) {
            ordinal += 1;
            merged.push(numbered(next, ordinal));
        }

        match items.peek().map(RenderItem::list_tag) {
            Some(None) => merged.push(RenderItem::Blank),
            Some(Some(_)) if policy.separate_adjacent_lists => merged.push(RenderItem::Blank),
            _ => {}
        }
    }

    merged
}

fn numbered(item: RenderItem, ordinal: usize) -> RenderItem {
    match item {
        RenderItem::Ordered { text, .. } => RenderItem::Ordered {
            ordinal: Some(ordinal),
            text,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ordered(text: &str, ordinal: Option<usize>) -> RenderItem {
        RenderItem::Ordered {
            ordinal,
            text: text.to_string(),
        }
    }

    fn bullet(text: &str) -> RenderItem {
        RenderItem::Bullet(text.to_string())
    }

    #[test]
    fn test_ordered_run_is_numbered() {
        let items = vec![ordered("a", None), ordered("b", None), ordered("c", None)];
        assert_eq!(
            merge_lists(items, MergePolicy::default()),
            vec![
                ordered("a", Some(1)),
                ordered("b", Some(2)),
                ordered("c", Some(3))
            ]
        );
    }

    #[test]
    fn test_bullet_between_ordered_resets_numbering() {
        let items = vec![
            ordered("a", None),
            ordered("b", None),
            bullet("x"),
            ordered("c", None),
        ];
        assert_eq!(
            merge_lists(items, MergePolicy::default()),
            vec![
                ordered("a", Some(1)),
                ordered("b", Some(2)),
                bullet("x"),
                ordered("c", Some(1)),
            ]
        );
    }

    #[test]
    fn test_blank_after_run_before_non_list() {
        let items = vec![
            bullet("x"),
            bullet("y"),
            RenderItem::Paragraph("after".to_string()),
        ];
        assert_eq!(
            merge_lists(items, MergePolicy::default()),
            vec![
                bullet("x"),
                bullet("y"),
                RenderItem::Blank,
                RenderItem::Paragraph("after".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_blank_at_end_of_input() {
        let items = vec![bullet("x")];
        assert_eq!(merge_lists(items, MergePolicy::default()), vec![bullet("x")]);
    }

    #[test]
    fn test_adjacent_runs_separated_by_policy() {
        let items = vec![
            bullet("x"),
            RenderItem::Todo {
                checked: false,
                text: "t".to_string(),
            },
        ];
        let policy = MergePolicy {
            separate_adjacent_lists: true,
        };

        let merged = merge_lists(items, policy);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1], RenderItem::Blank);
    }

    #[test]
    fn test_non_list_items_pass_through() {
        let items = vec![
            RenderItem::Divider,
            RenderItem::Skip,
            RenderItem::Code("x".to_string()),
        ];
        assert_eq!(merge_lists(items.clone(), MergePolicy::default()), items);
    }
}
