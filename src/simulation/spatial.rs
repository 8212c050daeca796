//! Nearest-neighbor queries over the world's flat collections.
//!
//! Populations stay small (tens of entities, hundreds of pellets), so every
//! query is a plain linear scan. That also keeps tie-breaking deterministic:
//! the first item encountered in collection order wins.

/// Anything with a position in world space.
pub trait Positioned {
    /// X coordinate in world units.
    fn x(&self) -> f32;
    /// Y coordinate in world units.
    fn y(&self) -> f32;
}

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Index of the nearest item in the queried collection.
    pub index: usize,
    /// Euclidean distance from the query point to that item.
    pub distance: f32,
}

/// Finds the item nearest to `(x, y)`, optionally skipping one index.
///
/// Returns `None` for an empty collection (or one whose only item is
/// skipped). Ties resolve to the earliest item in iteration order.
pub fn nearest<T: Positioned>(x: f32, y: f32, items: &[T], skip: Option<usize>) -> Option<Nearest> {
    let mut best: Option<Nearest> = None;
    for (index, item) in items.iter().enumerate() {
        if skip == Some(index) {
            continue;
        }
        let distance = (item.x() - x).hypot(item.y() - y);
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Nearest { index, distance });
        }
    }
    best
}
