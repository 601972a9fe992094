//! Navigation history.

use std::fmt::Debug;

use tracing::debug;

use crate::table::{RouteMatch, RouteTable};

/// Web-history style navigator over a [`RouteTable`].
///
/// Keeps a list of visited locations and a cursor into it. `push` drops any
/// forward entries, `replace` overwrites the current one, and `back`/`forward`
/// move the cursor. Every navigation resolves the new location against the
/// table.
#[derive(Debug, Clone)]
pub struct History<P> {
    table: RouteTable<P>,
    entries: Vec<String>,
    index: usize,
}

impl<P: Debug> History<P> {
    /// Start at `initial` (usually `/`).
    pub fn new(table: RouteTable<P>, initial: &str) -> Self {
        Self {
            table,
            entries: vec![initial.to_string()],
            index: 0,
        }
    }

    /// The route table being navigated.
    pub fn table(&self) -> &RouteTable<P> {
        &self.table
    }

    /// The current location.
    pub fn location(&self) -> &str {
        &self.entries[self.index]
    }

    /// Resolve the current location.
    pub fn current(&self) -> Option<RouteMatch<'_, P>> {
        self.table.resolve(self.location())
    }

    /// Navigate to `path`, discarding forward history.
    pub fn push(&mut self, path: &str) -> Option<RouteMatch<'_, P>> {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index += 1;
        self.navigated("push")
    }

    /// Replace the current location with `path`.
    pub fn replace(&mut self, path: &str) -> Option<RouteMatch<'_, P>> {
        self.entries[self.index] = path.to_string();
        self.navigated("replace")
    }

    /// Move one entry back. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    /// Move one entry forward. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    /// Move `delta` entries. Out-of-range moves leave the cursor unchanged.
    pub fn go(&mut self, delta: isize) -> bool {
        match self.index.checked_add_signed(delta) {
            Some(target) if target < self.entries.len() => {
                self.index = target;
                self.navigated("go");
                true
            }
            _ => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries in history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn navigated(&self, kind: &'static str) -> Option<RouteMatch<'_, P>> {
        let resolved = self.current();
        debug!(
            kind,
            location = self.location(),
            page = ?resolved.as_ref().map(|m| m.page),
            "Navigated"
        );
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> History<&'static str> {
        let table = RouteTable::builder()
            .named("home", "/", "home")
            .named("list", "/tours", "list")
            .named("detail", "/tours/:slug", "detail")
            .build()
            .unwrap();
        History::new(table, "/")
    }

    #[test]
    fn push_resolves_each_navigation() {
        let mut history = history();
        assert_eq!(history.current().unwrap().page, &"home");

        let matched = history.push("/tours/abc").unwrap();
        assert_eq!(matched.page, &"detail");
        assert_eq!(matched.params.get("slug"), Some("abc"));

        assert!(history.push("/nowhere").is_none());
        assert_eq!(history.location(), "/nowhere");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn back_and_forward() {
        let mut history = history();
        history.push("/tours");
        history.push("/tours/abc");

        assert!(history.back());
        assert_eq!(history.location(), "/tours");
        assert!(history.back());
        assert_eq!(history.location(), "/");
        assert!(!history.back());
        assert!(!history.can_go_back());

        assert!(history.forward());
        assert_eq!(history.location(), "/tours");
        assert!(history.can_go_forward());
    }

    #[test]
    fn push_discards_forward_entries() {
        let mut history = history();
        history.push("/tours");
        history.push("/tours/abc");
        history.back();
        history.back();

        history.push("/tours/xyz");
        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.current().unwrap().params.get("slug"), Some("xyz"));
    }

    #[test]
    fn replace_keeps_length() {
        let mut history = history();
        history.push("/tours");
        let matched = history.replace("/tours/abc").unwrap();
        assert_eq!(matched.page, &"detail");
        assert_eq!(history.len(), 2);

        history.back();
        assert_eq!(history.location(), "/");
    }

    #[test]
    fn go_out_of_range_is_ignored() {
        let mut history = history();
        history.push("/tours");
        assert!(!history.go(5));
        assert!(!history.go(-5));
        assert_eq!(history.location(), "/tours");
        assert!(history.go(-1));
        assert_eq!(history.location(), "/");
    }
}
