//! Markdown rendering of outlines.

use crate::model::OutlineResult;

/// Render an outline as a Markdown document.
///
/// The title becomes the top-level heading; outline entries are nested one
/// level below it and carry their page number.
pub fn outline_to_markdown(result: &OutlineResult) -> String {
    let mut output = format!("# {}\n", result.title.trim());

    if !result.outline.is_empty() {
        output.push('\n');
    }
    for entry in &result.outline {
        let hashes = "#".repeat(entry.level.depth() as usize + 1);
        output.push_str(&format!("{} {} (p. {})\n", hashes, entry.text, entry.page));
    }

    output
}
