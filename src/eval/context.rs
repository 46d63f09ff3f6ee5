//! Capture and slice-window state threaded through rule evaluation.

/// Regex-capture and slice-window context for one evaluation branch.
///
/// The state is passed down by value so that a `match` inside one
/// sub-rule can never leak its captures into a sibling.
#[derive(Debug, Clone)]
pub struct MatchState {
    captures: Vec<String>,
    explicit: bool,
    start: i32,
    stop: i32,
}

impl MatchState {
    /// Initial state at the rule root: the whole path as group 0, the
    /// full slice window.
    #[must_use]
    pub fn initial(path: &str) -> Self {
        Self {
            captures: vec![path.to_string()],
            explicit: false,
            start: 0,
            stop: 0,
        }
    }

    /// Derive the state for a rule node with effective window bounds.
    #[must_use]
    pub(crate) fn with_window(&self, start: i32, stop: i32) -> Self {
        let mut next = self.clone();
        next.start = start;
        next.stop = stop;
        next
    }

    /// Install the captures of a successful explicit match.
    pub(crate) fn set_captures(&mut self, captures: Vec<String>) {
        self.captures = captures;
        self.explicit = true;
    }

    /// Captures of the most recent active match; group 0 first.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Captures to use for rewriting the given slice: the active match,
    /// or an implicit `(.*)` over the slice when no match applied yet.
    #[must_use]
    pub(crate) fn rewrite_captures(&self, slice: &str) -> Vec<String> {
        if self.explicit {
            self.captures.clone()
        } else {
            vec![slice.to_string(), slice.to_string()]
        }
    }

    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    #[must_use]
    pub const fn stop(&self) -> i32 {
        self.stop
    }
}
