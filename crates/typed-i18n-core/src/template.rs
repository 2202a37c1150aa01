use alloc::string::String;
use alloc::vec::Vec;

const DELIMITER: &str = "::";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Placeholder(String),
}

/// A format string split into literal text and `::name::` placeholders.
///
/// A placeholder is the text between a `::` and the next `::`. Names never
/// contain `:`, so in `Name:::name::` the leading colon is literal text. An
/// unterminated `::` stays literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = split_segments(&source);
        Self { source, segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }
}

fn split_segments(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some((start, name, next)) = next_placeholder(rest) {
        text.push_str(&rest[..start]);
        if !text.is_empty() {
            segments.push(Segment::Text(core::mem::take(&mut text)));
        }
        segments.push(Segment::Placeholder(String::from(name)));
        rest = &rest[next..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

/// Finds the first `::name::` whose name has no `:`. Returns the offset of
/// the opening delimiter, the name, and the offset just past the closing one.
fn next_placeholder(rest: &str) -> Option<(usize, &str, usize)> {
    let mut from = 0;
    while let Some(offset) = rest[from..].find(DELIMITER) {
        let start = from + offset;
        let name_start = start + DELIMITER.len();
        let end = name_start + rest[name_start..].find(DELIMITER)?;
        let name = &rest[name_start..end];
        if !name.contains(':') {
            return Some((start, name, end + DELIMITER.len()));
        }
        from = start + 1;
    }
    None
}
