//! Color key to point slot mapping

use std::collections::HashMap;

use crate::color::CLEAR_COLOR;
use crate::error::{Result, StippleError};
use crate::point::{ColorKey, Point};

/// Bijective map from color key to the slot of the point holding it
///
/// Always rebuilt from a whole point list, never patched. A rebuilt map
/// invalidates any previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    slots: HashMap<ColorKey, usize>,
}

impl ColorMap {
    /// Build the map for `points`, slot `i` being `points[i]`
    ///
    /// # Errors
    ///
    /// Returns `ColorCollision` if two points share a color key or a point
    /// uses the clear color.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let mut slots = HashMap::with_capacity(points.len());
        for (slot, point) in points.iter().enumerate() {
            let key = point.color.key();
            if key == CLEAR_COLOR.key() || slots.insert(key, slot).is_some() {
                return Err(StippleError::ColorCollision { key, slot });
            }
        }
        Ok(Self { slots })
    }

    /// Slot of the point owning `key`
    #[inline]
    pub fn lookup(&self, key: ColorKey) -> Option<usize> {
        self.slots.get(&key).copied()
    }

    #[inline]
    pub fn contains(&self, key: ColorKey) -> bool {
        self.slots.contains_key(&key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All tracked keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = ColorKey> + '_ {
        self.slots.keys().copied()
    }

    /// True when this map is exactly the bijection for `points`
    pub fn is_consistent_with(&self, points: &[Point]) -> bool {
        self.slots.len() == points.len()
            && points
                .iter()
                .enumerate()
                .all(|(slot, p)| self.lookup(p.color.key()) == Some(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Color;

    fn point(r: u8) -> Point {
        Point::new(0.0, 0.0, Color::opaque(r, 0, 0))
    }

    #[test]
    fn test_lookup_returns_slot() {
        let points = vec![point(1), point(2), point(3)];
        let map = ColorMap::from_points(&points).unwrap();

        assert_eq!(map.lookup(Color::opaque(2, 0, 0).key()), Some(1));
        assert_eq!(map.lookup(Color::opaque(9, 0, 0).key()), None);
        assert!(map.is_consistent_with(&points));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let points = vec![point(1), point(2), point(1)];
        let err = ColorMap::from_points(&points).unwrap_err();
        assert_eq!(
            err,
            StippleError::ColorCollision {
                key: Color::opaque(1, 0, 0).key(),
                slot: 2,
            }
        );
    }

    #[test]
    fn test_clear_color_is_reserved() {
        let points = vec![Point::new(0.0, 0.0, CLEAR_COLOR)];
        assert!(ColorMap::from_points(&points).is_err());
    }

    #[test]
    fn test_consistency_detects_reordering() {
        let points = vec![point(1), point(2)];
        let map = ColorMap::from_points(&points).unwrap();

        let swapped = vec![point(2), point(1)];
        assert!(!map.is_consistent_with(&swapped));
        assert!(!map.is_consistent_with(&points[..1]));
    }

    #[test]
    fn test_keys_match_points() {
        let points = vec![point(4), point(5)];
        let map = ColorMap::from_points(&points).unwrap();
        let mut keys: Vec<_> = map.keys().collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![Color::opaque(4, 0, 0).key(), Color::opaque(5, 0, 0).key()]
        );
    }
}
