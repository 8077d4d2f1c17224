//! Circular dependency detection infrastructure.

use crate::error::{DiError, DiResult};
use crate::key::Key;

/// Default nesting limit. Resolution recurses once per level, so this must
/// stay within what a 2 MiB thread stack survives in debug builds.
pub(crate) const MAX_DEPTH: usize = 256;

/// Keys currently under construction for one top-level resolution.
///
/// Each call to `Container::resolve` owns a fresh path, so concurrent
/// resolutions on other threads never see each other's entries.
pub(crate) struct ResolutionPath {
    stack: Vec<Key>,
    max_depth: usize,
}

impl ResolutionPath {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
        }
    }

    /// Pushes `key`, failing if it is already in progress.
    fn enter(&mut self, key: Key) -> DiResult<()> {
        // Circular detection BEFORE pushing the new key
        if self.stack.contains(&key) {
            let mut path = self.stack.clone();
            path.push(key);
            return Err(DiError::Circular(path));
        }

        if self.stack.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(self.stack.len()));
        }

        self.stack.push(key);
        Ok(())
    }

    fn leave(&mut self, key: Key) {
        let last = self.stack.pop();
        debug_assert_eq!(last, Some(key));
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Runs `f` with `key` marked as in progress on `path`.
pub(crate) fn with_circular_check<T, F>(path: &mut ResolutionPath, key: Key, f: F) -> DiResult<T>
where
    F: FnOnce(&mut ResolutionPath) -> DiResult<T>,
{
    path.enter(key)?;
    let result = f(path);
    path.leave(key);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn reentry_reports_full_path() {
        let mut path = ResolutionPath::new(MAX_DEPTH);
        let result: DiResult<()> = with_circular_check(&mut path, Key::of::<A>(), |path| {
            with_circular_check(path, Key::of::<B>(), |path| {
                with_circular_check(path, Key::of::<A>(), |_| Ok(()))
            })
        });

        match result {
            Err(DiError::Circular(keys)) => {
                assert_eq!(keys, vec![Key::of::<A>(), Key::of::<B>(), Key::of::<A>()]);
            }
            other => panic!("expected Circular, got {:?}", other),
        }
        assert_eq!(path.depth(), 0);
    }

    #[test]
    fn sibling_visits_are_not_cycles() {
        let mut path = ResolutionPath::new(MAX_DEPTH);
        let result = with_circular_check(&mut path, Key::of::<A>(), |path| {
            with_circular_check(path, Key::of::<B>(), |_| Ok(()))?;
            with_circular_check(path, Key::of::<B>(), |_| Ok(()))
        });
        assert!(result.is_ok());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut path = ResolutionPath::new(1);
        let result = with_circular_check(&mut path, Key::of::<A>(), |path| {
            with_circular_check(path, Key::of::<B>(), |_| Ok(()))
        });
        assert!(matches!(result, Err(DiError::DepthExceeded(1))));
    }
}
