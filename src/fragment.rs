//! Parse fragments and the multiplication cost model.

use std::fmt;

use crate::error::CostOverflow;

/// A fully parenthesized run of consecutive factors `first..=last`.
///
/// A leaf covers a single factor and costs nothing; larger fragments are built
/// only by [`combine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Rows of the product this fragment evaluates to.
    pub rows: u32,
    /// Columns of the product this fragment evaluates to.
    pub cols: u32,
    /// Scalar multiplications spent inside this fragment.
    pub cost: i64,
    /// Textual parenthesization, e.g. `(M1 (M2 M3))`.
    pub repr: String,
    /// First covered factor (1-based, inclusive).
    pub first: usize,
    /// Last covered factor (1-based, inclusive).
    pub last: usize,
}

impl Fragment {
    pub fn leaf(index: usize, rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cost: 0,
            repr: format!("M{index}"),
            first: index,
            last: index,
        }
    }

    /// Number of factors covered.
    #[inline]
    pub fn width(&self) -> usize {
        self.last + 1 - self.first
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// Scalar multiplications needed to multiply a `rows x inner` matrix by an
/// `inner x cols` one, or `None` if the count does not fit in an `i64`.
#[inline]
pub fn step_cost(rows: u32, inner: u32, cols: u32) -> Option<i64> {
    i64::from(rows)
        .checked_mul(i64::from(inner))?
        .checked_mul(i64::from(cols))
}

/// Multiply `left` by the fragment immediately to its right.
///
/// `left` and `right` are left untouched; the result owns a fresh
/// representation string. Fails without allocating when the accumulated
/// cost leaves the `i64` range.
pub fn combine(left: &Fragment, right: &Fragment) -> Result<Fragment, CostOverflow> {
    debug_assert_eq!(left.cols, right.rows, "incompatible shapes");
    debug_assert_eq!(left.last + 1, right.first, "fragments not adjacent");

    let overflow = CostOverflow {
        first: left.first,
        last: right.last,
    };
    let cost = step_cost(left.rows, left.cols, right.cols)
        .and_then(|step| left.cost.checked_add(right.cost)?.checked_add(step))
        .ok_or(overflow)?;

    let mut repr = String::with_capacity(left.repr.len() + right.repr.len() + 3);
    repr.push('(');
    repr.push_str(&left.repr);
    repr.push(' ');
    repr.push_str(&right.repr);
    repr.push(')');

    Ok(Fragment {
        rows: left.rows,
        cols: right.cols,
        cost,
        repr,
        first: left.first,
        last: right.last,
    })
}
