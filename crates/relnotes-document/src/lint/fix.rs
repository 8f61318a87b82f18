use tracing::debug;

use super::{Config, Rule, structure::expected_adornment_len};
use crate::{Document, Span};

/// Rewrite `source` so that the mechanically fixable findings go away: adornment lengths and the
/// stated number of contributors.
///
/// Returns `None` if there is nothing to fix.
#[must_use]
pub fn fix(document: &Document, source: &str, config: &Config) -> Option<String> {
    let mut edits: Vec<(Span, String)> = Vec::new();

    if config.is_enabled(Rule::UnderlineLength) {
        for heading in &document.headings {
            let expected = expected_adornment_len(heading, config.underline);
            for adornment in heading.overline.iter().chain([&heading.underline]) {
                if adornment.len != expected {
                    debug!(
                        "Resizing adornment of {:?} from {} to {expected}",
                        heading.text, adornment.len
                    );
                    edits.push((
                        adornment.span,
                        adornment.character.to_string().repeat(expected),
                    ));
                }
            }
        }
    }

    if config.is_enabled(Rule::ContributorCount) {
        let authors = &document.notes.authors;
        let distinct = authors.distinct_count();
        if let (Some(total), Some(span)) = (authors.stated_total, authors.total_span) {
            if total != distinct as u64 {
                debug!("Changing the number of contributors from {total} to {distinct}");
                edits.push((span, distinct.to_string()));
            }
        }
    }

    if edits.is_empty() {
        return None;
    }
    // Apply from the end so earlier spans stay valid
    edits.sort_by_key(|(span, _)| std::cmp::Reverse(span.offset));
    let mut fixed = source.to_string();
    for (span, replacement) in edits {
        if fixed.get(span.offset..span.end()).is_some() {
            fixed.replace_range(span.offset..span.end(), &replacement);
        }
    }
    Some(fixed)
}
