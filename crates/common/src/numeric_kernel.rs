use std::fmt::Debug;

/// Numeric type usable as an edge weight and path distance.
///
/// Every distance computation in the engine goes through [`Weight::saturating_sum`],
/// which treats the infinity sentinel as absorbing: `inf + x = inf` for any `x`.
/// Finite sums that would reach or pass the sentinel are clamped to it, and integer
/// sums saturate at `MIN` on the negative side instead of wrapping.
pub trait Weight: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Length of the empty path.
    const ZERO: Self;

    /// Default "unreachable" sentinel: `+inf` for floats, `MAX` for integers.
    const INFINITY: Self;

    /// Adds `self` and `rhs` under the sentinel `inf`.
    fn saturating_sum(self, rhs: Self, inf: Self) -> Self;
}

macro_rules! impl_weight_for_int {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0;
            const INFINITY: Self = <$t>::MAX;

            #[inline]
            fn saturating_sum(self, rhs: Self, inf: Self) -> Self {
                if self >= inf || rhs >= inf {
                    return inf;
                }
                let sum = self.saturating_add(rhs);
                if sum >= inf { inf } else { sum }
            }
        }
    )*};
}

macro_rules! impl_weight_for_float {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0.0;
            const INFINITY: Self = <$t>::INFINITY;

            #[inline]
            fn saturating_sum(self, rhs: Self, inf: Self) -> Self {
                if self >= inf || rhs >= inf {
                    return inf;
                }
                // Overflow lands on +inf, which the clamp folds back onto the sentinel.
                let sum = self + rhs;
                if sum >= inf { inf } else { sum }
            }
        }
    )*};
}

impl_weight_for_int!(i32, i64, i128, isize);
impl_weight_for_float!(f32, f64);

/// Lowers `cell` to `candidate` when the candidate is strictly smaller.
///
/// Returns `true` if the cell changed.
#[inline]
pub fn relax<W: Weight>(cell: &mut W, candidate: W) -> bool {
    if candidate < *cell {
        *cell = candidate;
        return true;
    }
    false
}
