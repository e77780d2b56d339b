use crate::{Envelope, LineString};

/// A collection of [`LineString`]s.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiLineString(pub Vec<LineString>);

impl MultiLineString {
    pub fn new(line_strings: Vec<LineString>) -> Self {
        MultiLineString(line_strings)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(LineString::is_empty)
    }

    /// `true` iff every member line is closed.
    pub fn is_closed(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(LineString::is_closed)
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::null();
        for line_string in &self.0 {
            env.expand_to_include_envelope(&line_string.envelope());
        }
        env
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineString> {
        self.0.iter()
    }
}
