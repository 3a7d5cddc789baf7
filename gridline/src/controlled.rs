//! Controlled/uncontrolled state container.
//!
//! One container per piece of state, with its source of truth fixed at
//! construction. Changes go through [`Controlled::request_change`], which
//! commits immediately for internal state and only hands back the proposal
//! for external state; the caller commits external state with
//! [`Controlled::sync`] before the next render.

/// Who owns the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Owned by the grid.
    Internal,
    /// Owned by the caller.
    External,
}

/// A value with an explicit owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Controlled<S> {
    source: Source,
    committed: S,
}

impl<S: Default + Clone> Default for Controlled<S> {
    fn default() -> Self {
        Self::uncontrolled(S::default())
    }
}

impl<S: Clone> Controlled<S> {
    /// State owned by the grid, starting at `initial`.
    pub fn uncontrolled(initial: S) -> Self {
        Self {
            source: Source::Internal,
            committed: initial,
        }
    }

    /// State owned by the caller, currently `value`.
    pub fn controlled(value: S) -> Self {
        Self {
            source: Source::External,
            committed: value,
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn is_controlled(&self) -> bool {
        self.source == Source::External
    }

    /// The committed value.
    pub fn get(&self) -> &S {
        &self.committed
    }

    /// Propose `next` and return it for emission.
    ///
    /// Internal state commits the proposal; external state is left untouched.
    pub fn request_change(&mut self, next: S) -> S {
        if self.source == Source::Internal {
            self.committed = next.clone();
        }
        next
    }

    /// Commit a value supplied by the caller. Ignored (and logged) for
    /// internal state. Returns whether the value was taken.
    pub fn sync(&mut self, value: S) -> bool {
        match self.source {
            Source::External => {
                self.committed = value;
                true
            }
            Source::Internal => {
                log::warn!("Ignoring external value for uncontrolled state");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncontrolled_commits_on_request() {
        let mut state = Controlled::uncontrolled(1);
        assert_eq!(state.request_change(2), 2);
        assert_eq!(*state.get(), 2);
        assert!(!state.sync(5));
        assert_eq!(*state.get(), 2);
    }

    #[test]
    fn test_controlled_waits_for_sync() {
        let mut state = Controlled::controlled(1);
        assert_eq!(state.request_change(2), 2);
        assert_eq!(*state.get(), 1);
        assert!(state.sync(2));
        assert_eq!(*state.get(), 2);
    }
}
