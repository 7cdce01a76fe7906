//! Cursor used by the statement matchers

/// Walks a statement left to right, consuming literals and names
pub struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Consumes `literal` if the input continues with it exactly
    pub fn literal(&mut self, literal: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(literal)?;
        Some(())
    }

    /// Consumes the longest run of lowercase ASCII letters, at least one
    pub fn name(&mut self) -> Option<&'a str> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (name, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(name)
    }

    /// Everything not consumed yet
    pub fn rest(&self) -> &'a str {
        self.rest
    }
}
