use crate::Vec3;

/// Axis-aligned bounding box in model space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| acc.grow(p)))
    }

    /// Returns the box extended to contain `p`.
    #[inline]
    pub fn grow(self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Midpoint, halved before summing so it stays finite for any finite box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.min * 0.5 + self.max * 0.5
    }

    /// Size along each axis.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half the size along each axis; finite whenever the corners are.
    #[inline]
    pub fn half_extent(&self) -> Vec3 {
        self.max * 0.5 - self.min * 0.5
    }

    /// Largest of the three axis extents.
    #[inline]
    pub fn max_extent(&self) -> f32 {
        self.extent().max_element()
    }

    /// `true` when the box collapses to a point (every extent is zero).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.half_extent().max_element() == 0.0
    }
}
