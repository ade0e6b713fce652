//! Matrix-chain instances.
//!
//! A chain of `n` factors is described by `n + 1` dimensions `d[0..=n]`;
//! factor `i` (1-based) has shape `d[i-1] x d[i]`.

use crate::error::InstanceError;
use crate::fragment::Fragment;

/// One matrix-chain problem. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainInstance {
    dims: Vec<u32>,
}

impl ChainInstance {
    /// Validate and wrap a dimension sequence.
    ///
    /// Requires at least two dimensions (one factor) and no zero dimension.
    pub fn new(dims: Vec<u32>) -> Result<Self, InstanceError> {
        if dims.len() < 2 {
            return Err(InstanceError::EmptyChain { dims: dims.len() });
        }
        if let Some(index) = dims.iter().position(|&d| d == 0) {
            return Err(InstanceError::ZeroDimension { index });
        }
        Ok(Self { dims })
    }

    /// Number of factors `n`.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.len() - 1
    }

    /// Always false: a valid chain has at least one factor.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    /// Leaf fragment for factor `i` (1-based).
    ///
    /// # Panics
    /// Panics if `i` is outside `1..=n`.
    pub fn leaf(&self, i: usize) -> Fragment {
        assert!(
            (1..=self.len()).contains(&i),
            "factor index {i} outside 1..={}",
            self.len()
        );
        Fragment::leaf(i, self.dims[i - 1], self.dims[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_and_zero_dims() {
        assert_eq!(
            ChainInstance::new(vec![]),
            Err(InstanceError::EmptyChain { dims: 0 })
        );
        assert_eq!(
            ChainInstance::new(vec![7]),
            Err(InstanceError::EmptyChain { dims: 1 })
        );
        assert_eq!(
            ChainInstance::new(vec![3, 0, 4]),
            Err(InstanceError::ZeroDimension { index: 1 })
        );
    }

    #[test]
    fn leaves_take_adjacent_dimensions() {
        let inst = ChainInstance::new(vec![10, 20, 30, 5]).unwrap();
        assert_eq!(inst.len(), 3);
        let l2 = inst.leaf(2);
        assert_eq!((l2.rows, l2.cols, l2.cost), (20, 30, 0));
        assert_eq!(l2.repr, "M2");
        assert_eq!((l2.first, l2.last), (2, 2));
    }

    #[test]
    #[should_panic]
    fn leaf_zero_is_out_of_range() {
        let inst = ChainInstance::new(vec![1, 2]).unwrap();
        let _ = inst.leaf(0);
    }
}
