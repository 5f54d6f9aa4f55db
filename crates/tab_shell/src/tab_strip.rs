//! One-line rendering of the open tabs.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabLabel<'a> {
    pub title: &'a str,
    pub active: bool,
}

/// Clips `label` to `max_width` terminal columns, ending clipped labels with an ellipsis.
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if label.width() <= max_width {
        return label.to_string();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.width());
    let mut truncated = String::new();
    let mut used = 0;
    for grapheme in label.graphemes(true) {
        let width = grapheme.width();
        if used + width > budget {
            break;
        }
        truncated.push_str(grapheme);
        used += width;
    }
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Renders tabs as ` a.txt |[Untitled*]| b.md `, bracketing the active one.
pub fn render_tab_strip(tabs: &[TabLabel<'_>], max_label_width: usize) -> String {
    tabs.iter()
        .map(|tab| {
            let title = truncate_label(tab.title, max_label_width);
            if tab.active {
                format!("[{title}]")
            } else {
                format!(" {title} ")
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::{render_tab_strip, truncate_label, TabLabel};

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(truncate_label("a.txt", 8), "a.txt");
        assert_eq!(truncate_label("a.txt", 5), "a.txt");
    }

    #[test]
    fn long_labels_end_with_ellipsis() {
        assert_eq!(truncate_label("meeting-notes.txt", 8), "meeting…");
        assert_eq!(truncate_label("abc", 1), "…");
        assert_eq!(truncate_label("abc", 0), "");
    }

    #[test]
    fn wide_graphemes_are_not_split() {
        assert_eq!(truncate_label("日本語メモ", 6), "日本…");
    }

    #[test]
    fn active_tab_is_bracketed() {
        let tabs = [
            TabLabel {
                title: "a.txt",
                active: false,
            },
            TabLabel {
                title: "Untitled*",
                active: true,
            },
        ];
        assert_eq!(render_tab_strip(&tabs, 24), " a.txt |[Untitled*]");
    }
}
