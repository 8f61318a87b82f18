//! The handful of reStructuredText block constructs release notes are made of: section headings,
//! bullet lists, and plain paragraphs.

use crate::Span;

/// Characters which may be repeated to underline (or overline) a heading.
const ADORNMENT_CHARACTERS: &str = "=-~^\"'*+#`_";

pub(crate) const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Line<'a> {
    pub(crate) text: &'a str,
    pub(crate) offset: usize,
}

impl<'a> Line<'a> {
    pub(crate) fn is_blank(self) -> bool {
        self.text.trim().is_empty()
    }

    pub(crate) fn indent(self) -> usize {
        self.text.len() - self.text.trim_start().len()
    }

    /// The line without surrounding white space.
    pub(crate) fn trimmed(self) -> &'a str {
        self.text.trim()
    }

    /// The span of the line's content, skipping indentation and trailing white space.
    pub(crate) fn content_span(self) -> Span {
        Span::new(self.offset + self.indent(), self.trimmed().len())
    }

    pub(crate) fn end(self) -> usize {
        self.offset + self.text.trim_end().len()
    }

    fn bullet_content(self) -> Option<&'a str> {
        let content = self.text.trim_start();
        ["* ", "- "]
            .into_iter()
            .find_map(|bullet| content.strip_prefix(bullet))
    }
}

/// Split `source` into lines, skipping a leading byte order mark.
pub(crate) fn lines(source: &str) -> Vec<Line<'_>> {
    let (mut offset, content) = source
        .strip_prefix(BYTE_ORDER_MARK)
        .map_or((0, source), |rest| (BYTE_ORDER_MARK.len_utf8(), rest));
    content
        .split_inclusive('\n')
        .map(|raw| {
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            let line = Line { text, offset };
            offset += raw.len();
            line
        })
        .collect()
}

/// A line of repeated punctuation above or below a heading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Adornment {
    pub character: char,
    /// Length in characters
    pub len: usize,
    pub span: Span,
}

impl Adornment {
    fn from_line(line: Line) -> Option<Self> {
        let text = line.text.trim_end();
        let mut chars = text.chars();
        let character = chars.next()?;
        if !ADORNMENT_CHARACTERS.contains(character) || !chars.all(|c| c == character) {
            return None;
        }
        let len = text.chars().count();
        (len >= 2).then_some(Self {
            character,
            len,
            span: Span::new(line.offset, text.len()),
        })
    }
}

/// A section heading as written, before deciding what it means.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RawHeading<'a> {
    pub(crate) text: &'a str,
    pub(crate) text_span: Span,
    /// Width in characters, including the inset of an overlined title
    pub(crate) width: usize,
    pub(crate) underline: Adornment,
    pub(crate) overline: Option<Adornment>,
    /// Index of the first line after the heading
    pub(crate) next_line: usize,
}

/// Find the heading starting at line `index`, if there is one.
pub(crate) fn heading_at<'a>(lines: &[Line<'a>], index: usize) -> Option<RawHeading<'a>> {
    let line = *lines.get(index)?;
    if let Some(overline) = Adornment::from_line(line) {
        let text = *lines.get(index + 1)?;
        let underline = lines.get(index + 2).copied().and_then(Adornment::from_line)?;
        if text.is_blank()
            || Adornment::from_line(text).is_some()
            || underline.character != overline.character
        {
            return None;
        }
        return Some(RawHeading {
            text: text.trimmed(),
            text_span: text.content_span(),
            width: text.text.trim_end().chars().count(),
            underline,
            overline: Some(overline),
            next_line: index + 3,
        });
    }

    let previous_is_blank = index
        .checked_sub(1)
        .and_then(|previous| lines.get(previous))
        .is_none_or(|previous| previous.is_blank());
    if line.is_blank() || line.indent() > 0 || !previous_is_blank {
        return None;
    }
    let underline = lines.get(index + 1).copied().and_then(Adornment::from_line)?;
    Some(RawHeading {
        text: line.trimmed(),
        text_span: line.content_span(),
        width: line.trimmed().chars().count(),
        underline,
        overline: None,
        next_line: index + 2,
    })
}

/// One entry of a bullet list, with continuation lines joined by single spaces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Item<'a> {
    pub(crate) first_line: Line<'a>,
    pub(crate) text: String,
    pub(crate) span: Span,
}

/// The body of a section split into its bullet items and the paragraphs of prose around them.
#[derive(Debug, Default)]
pub(crate) struct Body<'a> {
    pub(crate) items: Vec<Item<'a>>,
    pub(crate) prose: Vec<Vec<Line<'a>>>,
}

pub(crate) fn body<'a>(lines: &[Line<'a>]) -> Body<'a> {
    let mut body = Body::default();
    let mut paragraph = Vec::new();
    let mut index = 0;
    while let Some(&line) = lines.get(index) {
        index += 1;
        if line.is_blank() {
            if !paragraph.is_empty() {
                body.prose.push(std::mem::take(&mut paragraph));
            }
            continue;
        }
        let Some(content) = line.bullet_content() else {
            paragraph.push(line);
            continue;
        };
        if !paragraph.is_empty() {
            body.prose.push(std::mem::take(&mut paragraph));
        }

        let bullet_indent = line.indent();
        let mut text = content.trim().to_string();
        let mut end = line.end();
        loop {
            // Blank lines only end the item if the next content isn't indented under it
            let next_content = lines
                .iter()
                .skip(index)
                .position(|line| !line.is_blank())
                .map(|skipped| index + skipped);
            let Some(next_index) = next_content else {
                break;
            };
            let Some(&next) = lines.get(next_index) else {
                break;
            };
            if next.indent() <= bullet_indent || next.bullet_content().is_some() {
                break;
            }
            text.push(' ');
            text.push_str(next.trimmed());
            end = next.end();
            index = next_index + 1;
        }

        let start = line.offset + bullet_indent;
        body.items.push(Item {
            first_line: line,
            text,
            span: Span::new(start, end - start),
        });
    }
    if !paragraph.is_empty() {
        body.prose.push(paragraph);
    }
    body
}

/// Consecutive non-blank lines, joined with newlines.
pub(crate) fn paragraphs<'a>(lines: &[Line<'a>]) -> Vec<Vec<Line<'a>>> {
    let mut paragraphs: Vec<Vec<Line<'a>>> = Vec::new();
    let mut current = Vec::new();
    for &line in lines {
        if line.is_blank() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}
