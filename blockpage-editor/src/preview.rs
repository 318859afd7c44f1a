//! Read-only projection of a page into renderable items.

use blockpage_model::{BlockKind, Page};
use std::fmt::Write;

/// One rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewItem<'a> {
    Text(&'a str),
    Image { src: &'a str },
}

/// Projects a page into preview items, in page order.
pub fn render(page: &Page) -> Vec<PreviewItem<'_>> {
    page.iter()
        .map(|block| match block.kind {
            BlockKind::Text => PreviewItem::Text(&block.content),
            BlockKind::Image => PreviewItem::Image { src: &block.content },
        })
        .collect()
}

/// Renders a page as plain text, one line per block.
///
/// An empty page renders as the empty string.
pub fn render_text(page: &Page) -> String {
    let mut out = String::new();
    for item in render(page) {
        match item {
            PreviewItem::Text(text) => {
                let _ = writeln!(out, "{text}");
            }
            PreviewItem::Image { src } => {
                let _ = writeln!(out, "[image] {src}");
            }
        }
    }
    out
}
