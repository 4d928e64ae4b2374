//! Filename derivation for downloaded documents.
//!
//! Every document is stored flat in the output directory under a name that is
//! computed deterministically from its URL, so a re-run maps the same URL to
//! the same path and can skip it.

use std::path::{Path, PathBuf};

/// Type markers stripped from the sanitized stem when they survive as word
/// fragments (`report_pdf_final`, `archive_zip`).
const TYPE_FRAGMENTS: &[&str] = &["_pdf", "_zip"];

/// Converts an arbitrary URL into a filesystem-safe filename.
///
/// The result is lowercase, uses only `[a-z0-9_]` in the stem, never has
/// repeated, leading, or trailing underscores, and ends with the extension
/// of the URL's final path segment when one exists.
///
/// This function is total: any input string produces some output, possibly
/// empty (see [`target_path`] for how callers treat that case).
///
/// # Examples
///
/// ```
/// use pdf_harvest::download::sanitize_url_filename;
///
/// assert_eq!(
///     sanitize_url_filename("https://example.com/Data-Sheets/SDS_2024.PDF"),
///     "sds_2024.pdf"
/// );
/// ```
#[must_use]
pub fn sanitize_url_filename(url: &str) -> String {
    let lower = url.to_lowercase();
    let segment = final_segment(&lower);
    let extension = recorded_extension(segment);

    let mut safe = collapse_to_stem(segment);
    for fragment in TYPE_FRAGMENTS {
        safe = safe.replace(fragment, "");
    }

    // The stem holds no '.', so the recorded extension is always re-attached.
    if !has_extension(&safe) {
        safe.push_str(&extension);
    }
    safe
}

/// Resolves where a URL's document lives inside `output_dir`.
///
/// Returns `None` when the sanitized filename is empty, since joining an empty
/// name would address the directory itself.
#[must_use]
pub fn target_path(output_dir: &Path, url: &str) -> Option<PathBuf> {
    let filename = sanitize_url_filename(url).to_lowercase();
    if filename.is_empty() {
        return None;
    }
    Some(output_dir.join(filename))
}

/// Text after the last `/`, ignoring trailing separators.
fn final_segment(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    trimmed
        .rfind('/')
        .map_or(trimmed, |index| &trimmed[index + 1..])
}

/// The `.`-prefixed extension of a path segment.
///
/// Only the run of `[a-z0-9]` right after the last dot counts, so a query
/// string glued to the extension (`a.pdf?x=1`) still yields `.pdf`.
fn recorded_extension(segment: &str) -> String {
    let Some(dot) = segment.rfind('.') else {
        return String::new();
    };
    let suffix: String = segment[dot + 1..]
        .chars()
        .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    if suffix.is_empty() {
        String::new()
    } else {
        format!(".{suffix}")
    }
}

/// Maps every non `[a-z0-9]` char to `_`, collapses runs, trims the ends.
fn collapse_to_stem(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut prev_sep = false;
    for ch in segment.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            prev_sep = false;
        } else if !prev_sep {
            out.push('_');
            prev_sep = true;
        }
    }
    out.trim_matches('_').to_string()
}

fn has_extension(name: &str) -> bool {
    name.rfind('.').is_some_and(|dot| dot + 1 < name.len())
}
