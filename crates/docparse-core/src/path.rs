//! Field paths used to locate conversion failures.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step into a wire tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key (model wire name or map key).
    Key(String),
    /// Array index.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// An accumulated location such as `schemes[2].transactions[0].amount`.
///
/// The empty path renders as `$`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut out = self.clone();
        out.push(segment.into());
        out
    }
}

/// Serialized in its display form, e.g. `"b[2].c"`.
impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
                PathSegment::Key(key) if is_plain_key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_mixed_segments() {
        let path: FieldPath = [
            PathSegment::from("schemes"),
            PathSegment::from(2usize),
            PathSegment::from("transactions"),
            PathSegment::from(0usize),
            PathSegment::from("amount"),
        ]
        .into_iter()
        .collect();
        assert_eq!(path.to_string(), "schemes[2].transactions[0].amount");
    }

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(FieldPath::root().to_string(), "$");
    }

    #[test]
    fn odd_map_keys_are_quoted() {
        let path = FieldPath::root().child("metadata").child("x.y");
        assert_eq!(path.to_string(), "metadata[\"x.y\"]");
    }
}
