use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T: fmt::Debug> fmt::Debug for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vec2")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

impl<T: Default> Default for Vec2<T> {
    fn default() -> Self {
        Self {
            x: T::default(),
            y: T::default(),
        }
    }
}

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Vec2<usize> {
    /// Number of pixels covered by a size, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.x.saturating_mul(self.y)
    }

    /// Checked area, `None` when `x * y` overflows.
    pub fn checked_area(&self) -> Option<usize> {
        self.x.checked_mul(self.y)
    }

    /// Size swapped on its diagonal, as after a quarter turn.
    pub fn transposed(&self) -> Self {
        Self::new(self.y, self.x)
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.x == 0 || self.y == 0
    }

    /// Size of a plane subsampled by two in both directions, rounding up.
    pub fn half_ceil(&self) -> Self {
        Self::new(self.x.div_ceil(2), self.y.div_ceil(2))
    }
}
