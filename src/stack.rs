//! Shift-reduce parse stack.
//!
//! The stack holds the search frontier: fragments covering the factors shifted
//! so far, bottom to top. It grows on demand; an optional limit turns runaway
//! growth into a [`StackError::Overflow`] instead of unbounded allocation.

use crate::error::StackError;
use crate::fragment::Fragment;

#[derive(Debug, Clone, Default)]
pub struct ParseStack {
    items: Vec<Fragment>,
    limit: Option<usize>,
}

impl ParseStack {
    /// Unbounded stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack refusing to hold more than `limit` fragments.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn push(&mut self, node: Fragment) -> Result<(), StackError> {
        if let Some(limit) = self.limit {
            if self.items.len() >= limit {
                return Err(StackError::Overflow { limit });
            }
        }
        self.items.push(node);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Fragment, StackError> {
        self.items.pop().ok_or(StackError::Underflow)
    }

    /// Topmost fragment, if any.
    #[inline]
    pub fn top(&self) -> Option<&Fragment> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bottom-to-top view of the frontier.
    pub fn as_slice(&self) -> &[Fragment] {
        &self.items
    }

    /// True when the fragments partition factors `1..=shifted` without gaps
    /// or overlaps, in order.
    pub fn covers_prefix(&self, shifted: usize) -> bool {
        let mut next = 1;
        for frag in &self.items {
            if frag.first != next || frag.last < frag.first {
                return false;
            }
            next = frag.last + 1;
        }
        next == shifted + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::combine;

    fn leaf(i: usize) -> Fragment {
        Fragment::leaf(i, 2, 2)
    }

    #[test]
    fn push_pop_lifo() {
        let mut s = ParseStack::new();
        s.push(leaf(1)).unwrap();
        s.push(leaf(2)).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.top().map(|f| f.first), Some(2));
        assert_eq!(s.pop().unwrap().first, 2);
        assert_eq!(s.pop().unwrap().first, 1);
        assert!(s.is_empty());
    }

    #[test]
    fn pop_empty_underflows() {
        let mut s = ParseStack::new();
        assert_eq!(s.pop(), Err(StackError::Underflow));
    }

    #[test]
    fn limit_reports_overflow_and_keeps_contents() {
        let mut s = ParseStack::with_limit(2);
        s.push(leaf(1)).unwrap();
        s.push(leaf(2)).unwrap();
        assert_eq!(s.push(leaf(3)), Err(StackError::Overflow { limit: 2 }));
        assert_eq!(s.len(), 2);
        assert_eq!(s.limit(), Some(2));
    }

    #[test]
    fn prefix_coverage() {
        let mut s = ParseStack::new();
        assert!(s.covers_prefix(0));
        s.push(combine(&leaf(1), &leaf(2)).unwrap()).unwrap();
        s.push(leaf(3)).unwrap();
        assert!(s.covers_prefix(3));
        assert!(!s.covers_prefix(2));

        let mut gap = ParseStack::new();
        gap.push(leaf(1)).unwrap();
        gap.push(leaf(3)).unwrap();
        assert!(!gap.covers_prefix(3));
    }
}
