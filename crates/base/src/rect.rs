use {
    crate::Vec2,
    std::ops::{Add, Mul, Sub},
};

/// Axis-aligned rectangle given by its top-left `origin` and `size`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.size.x * self.size.y
    }

    pub fn max(&self) -> Vec2<T> {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    /// Overlapping region, or `None` when the rectangles only touch or are disjoint.
    pub fn intersection(self, other: Self) -> Option<Self> {
        let x0 = partial_max(self.origin.x, other.origin.x);
        let y0 = partial_max(self.origin.y, other.origin.y);
        let a = self.max();
        let b = other.max();
        let x1 = partial_min(a.x, b.x);
        let y1 = partial_min(a.y, b.y);
        if x1 > x0 && y1 > y0 {
            Some(Self::new(Vec2::new(x0, y0), Vec2::new(x1 - x0, y1 - y0)))
        } else {
            None
        }
    }
}

impl Rect<f32> {
    pub fn center(&self) -> Vec2<f32> {
        Vec2::new(
            self.origin.x + self.size.x * 0.5,
            self.origin.y + self.size.y * 0.5,
        )
    }

    /// Builds the smallest rectangle enclosing all `points`. Returns `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2<f32>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self::new(min, max - min))
    }
}

fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}
