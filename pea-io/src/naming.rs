//! Output file naming.
//!
//! Outputs are named after the input file, prefixed with its parent directory
//! name when there is one, so runs over `day1/1.fastqjoin` and
//! `day2/1.fastqjoin` do not collide.

use std::path::Path;

use pea_edit::NamedSeq;

/// `[<parent dir>.]<file name>` of an input path.
pub fn sample_name(input: &Path) -> String {
    let file = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string_lossy().into_owned());
    let parent = input
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned());
    match parent {
        Some(dir) if !dir.is_empty() && dir != "." => format!("{dir}.{file}"),
        _ => file,
    }
}

/// `<sample>.<amplicon>.<target>.align_mutations.<tag>`
pub fn align_mutations_prefix(input: &Path, amplicon: &NamedSeq, target: &NamedSeq, tag: &str) -> String {
    format!("{}.{}.{}.align_mutations.{}", sample_name(input), amplicon, target, tag)
}

/// `<sample>.<amplicon>.<target>.<mutation>.prime_editor.<tag>`
///
/// Without an intended mutation the mutation component is `none`.
pub fn prime_editor_prefix(
    input: &Path,
    amplicon: &NamedSeq,
    target: &NamedSeq,
    mutation: Option<&NamedSeq>,
    tag: &str,
) -> String {
    let mutation = mutation.map_or_else(|| "none".to_string(), |m| m.to_string());
    format!(
        "{}.{}.{}.{}.prime_editor.{}",
        sample_name(input),
        amplicon,
        target,
        mutation,
        tag
    )
}
