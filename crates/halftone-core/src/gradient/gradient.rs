//! Piecewise-linear color ramp defined by positioned color stops.
//!
//! Stops are kept in the order they were created. Editing operations
//! address stops by that insertion-order index, so an index handed out by
//! [`Gradient::add_stop`] keeps pointing at the same stop while other stops
//! are dragged past it. Evaluation always works on a position-sorted view.

use super::error::GradientError;
use crate::color::Rgb;

/// Lowest legal stop position.
pub const MIN_POSITION: f32 = 0.0;
/// Highest legal stop position.
pub const MAX_POSITION: f32 = 100.0;

/// A color at a position along the ramp (0.0..=100.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Rgb,
}

impl GradientStop {
    /// Create a stop, clamping the position into 0.0..=100.0.
    pub fn new(position: f32, color: Rgb) -> Self {
        Self {
            position: clamp_position(position),
            color,
        }
    }
}

#[inline]
fn clamp_position(position: f32) -> f32 {
    if position.is_nan() {
        MIN_POSITION
    } else {
        position.clamp(MIN_POSITION, MAX_POSITION)
    }
}

/// An ordered set of at least two color stops.
///
/// # Example
///
/// ```
/// use halftone_core::{Gradient, Rgb};
///
/// let mut gradient = Gradient::default(); // red -> blue
/// let green = gradient.add_stop(50.0, Rgb::new(0, 255, 0));
///
/// assert_eq!(gradient.color_at(0.5), Rgb::new(0, 255, 0));
/// gradient.move_stop(green, 25.0).unwrap();
/// assert_eq!(gradient.stops()[1].position, 25.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// Backing store in insertion order
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Build a gradient from stops given in any order.
    ///
    /// # Errors
    ///
    /// Returns [`GradientError::TooFewStops`] when fewer than two stops are
    /// supplied.
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, GradientError> {
        if stops.len() < 2 {
            return Err(GradientError::TooFewStops { count: stops.len() });
        }
        let stops = stops
            .into_iter()
            .map(|s| GradientStop::new(s.position, s.color))
            .collect();
        Ok(Self { stops })
    }

    /// Number of stops.
    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; a gradient never holds fewer than two stops.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stop at an insertion-order index.
    pub fn stop(&self, index: usize) -> Option<&GradientStop> {
        self.stops.get(index)
    }

    /// Stops sorted by ascending position.
    ///
    /// The sort is stable, so stops sharing a position keep their relative
    /// insertion order. The backing store is not reordered.
    pub fn stops(&self) -> Vec<GradientStop> {
        let mut sorted = self.stops.clone();
        sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
        sorted
    }

    /// Append a stop and return its insertion-order index.
    pub fn add_stop(&mut self, position: f32, color: Rgb) -> usize {
        self.stops.push(GradientStop::new(position, color));
        self.stops.len() - 1
    }

    /// Append a stop colored with the ramp's current color at `position`.
    ///
    /// The visible ramp is unchanged by the insertion; the new stop simply
    /// becomes an editable handle at that point.
    pub fn add_interpolated_stop(&mut self, position: f32) -> usize {
        let position = clamp_position(position);
        let color = self.color_at_position(position);
        self.add_stop(position, color)
    }

    /// Remove the stop at `index`, refusing to go below two stops.
    pub fn remove_stop(&mut self, index: usize) -> Result<GradientStop, GradientError> {
        self.check_index(index)?;
        if self.stops.len() <= 2 {
            return Err(GradientError::TooFewStops {
                count: self.stops.len() - 1,
            });
        }
        Ok(self.stops.remove(index))
    }

    /// Move the stop at `index` to `position` (clamped to 0.0..=100.0).
    pub fn move_stop(&mut self, index: usize, position: f32) -> Result<(), GradientError> {
        self.check_index(index)?;
        self.stops[index].position = clamp_position(position);
        Ok(())
    }

    /// Change the color of the stop at `index`.
    pub fn recolor_stop(&mut self, index: usize, color: Rgb) -> Result<(), GradientError> {
        self.check_index(index)?;
        self.stops[index].color = color;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), GradientError> {
        if index < self.stops.len() {
            Ok(())
        } else {
            Err(GradientError::IndexOutOfRange {
                index,
                len: self.stops.len(),
            })
        }
    }

    /// Color at `t` in 0.0..=1.0.
    ///
    /// Values outside the outermost stops take the nearest end stop's color
    /// (no extrapolation). Between two stops each channel is interpolated
    /// linearly. Two stops at the same position form a hard edge and never
    /// divide by zero.
    pub fn color_at(&self, t: f32) -> Rgb {
        self.color_at_position(t * MAX_POSITION)
    }

    fn color_at_position(&self, position: f32) -> Rgb {
        self.ramp().color_at_position(position)
    }

    /// Position-sorted snapshot for evaluating many samples.
    pub fn ramp(&self) -> Ramp {
        Ramp {
            stops: self.stops(),
        }
    }
}

/// A sorted, read-only view of a [`Gradient`].
///
/// Sorting once per frame instead of once per lookup keeps per-dot color
/// resolution allocation free.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    stops: Vec<GradientStop>,
}

impl Ramp {
    /// Sorted stops.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Same as [`Gradient::color_at`].
    pub fn color_at(&self, t: f32) -> Rgb {
        self.color_at_position(t * MAX_POSITION)
    }

    /// Color of the lowest stop.
    pub fn first_color(&self) -> Option<Rgb> {
        self.stops.first().map(|s| s.color)
    }

    /// Color of the highest stop.
    pub fn last_color(&self) -> Option<Rgb> {
        self.stops.last().map(|s| s.color)
    }

    fn color_at_position(&self, position: f32) -> Rgb {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Rgb::BLACK,
        };

        if position.is_nan() || position <= first.position {
            return first.color;
        }
        if position >= last.position {
            return last.color;
        }

        let (left, right) = self
            .stops
            .windows(2)
            .find(|pair| pair[0].position <= position && pair[1].position >= position)
            .map(|pair| (pair[0], pair[1]))
            .unwrap_or((first, last));

        let span = right.position - left.position;
        if span <= 0.0 {
            return left.color;
        }
        let local = (position - left.position) / span;
        left.color.lerp(right.color, local)
    }
}

impl Default for Gradient {
    /// Red at 0, blue at 100.
    fn default() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, Rgb::new(255, 0, 0)),
                GradientStop::new(100.0, Rgb::new(0, 0, 255)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_white() -> Gradient {
        Gradient::new(vec![
            GradientStop::new(0.0, Rgb::BLACK),
            GradientStop::new(100.0, Rgb::WHITE),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_single_stop() {
        let result = Gradient::new(vec![GradientStop::new(0.0, Rgb::BLACK)]);
        assert_eq!(result, Err(GradientError::TooFewStops { count: 1 }));
    }

    #[test]
    fn test_midpoint_red_blue() {
        let g = Gradient::default();
        assert_eq!(g.color_at(0.5), Rgb::new(128, 0, 128));
    }

    #[test]
    fn test_clamps_outside_outer_stops() {
        let g = Gradient::new(vec![
            GradientStop::new(20.0, Rgb::new(10, 10, 10)),
            GradientStop::new(80.0, Rgb::new(200, 200, 200)),
        ])
        .unwrap();
        assert_eq!(g.color_at(0.0), Rgb::new(10, 10, 10));
        assert_eq!(g.color_at(0.1), Rgb::new(10, 10, 10));
        assert_eq!(g.color_at(0.95), Rgb::new(200, 200, 200));
        assert_eq!(g.color_at(1.5), Rgb::new(200, 200, 200));
        assert_eq!(g.color_at(-3.0), Rgb::new(10, 10, 10));
    }

    #[test]
    fn test_duplicate_positions_make_hard_edge() {
        let mut g = black_white();
        g.add_stop(50.0, Rgb::new(255, 0, 0));
        g.add_stop(50.0, Rgb::new(0, 0, 255));

        // Just left of the edge blends black->red, just right blends blue->white
        let left = g.color_at(0.499);
        let right = g.color_at(0.501);
        assert!(left.r > 250 && left.b == 0, "left of edge: {left}");
        assert!(right.b > 250 && right.r < 5, "right of edge: {right}");
    }

    #[test]
    fn test_all_stops_at_one_position() {
        let g = Gradient::new(vec![
            GradientStop::new(40.0, Rgb::new(1, 2, 3)),
            GradientStop::new(40.0, Rgb::new(9, 9, 9)),
        ])
        .unwrap();
        assert_eq!(g.color_at(0.4), Rgb::new(1, 2, 3));
        assert_eq!(g.color_at(0.9), Rgb::new(9, 9, 9));
    }

    #[test]
    fn test_stops_sorted_without_touching_backing_order() {
        let mut g = black_white();
        let mid = g.add_stop(30.0, Rgb::new(0, 255, 0));
        g.move_stop(0, 90.0).unwrap();

        let sorted: Vec<f32> = g.stops().iter().map(|s| s.position).collect();
        assert_eq!(sorted, vec![30.0, 90.0, 100.0]);

        // Index-based lookups still resolve against insertion order
        assert_eq!(g.stop(0).unwrap().color, Rgb::BLACK);
        assert_eq!(g.stop(mid).unwrap().position, 30.0);
    }

    #[test]
    fn test_remove_refuses_below_two() {
        let mut g = black_white();
        assert_eq!(
            g.remove_stop(0),
            Err(GradientError::TooFewStops { count: 1 })
        );
        assert_eq!(g.len(), 2);

        g.add_stop(50.0, Rgb::new(0, 255, 0));
        let removed = g.remove_stop(0).unwrap();
        assert_eq!(removed.color, Rgb::BLACK);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut g = black_white();
        assert_eq!(
            g.recolor_stop(5, Rgb::BLACK),
            Err(GradientError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert!(g.move_stop(2, 10.0).is_err());
        assert!(g.remove_stop(9).is_err());
    }

    #[test]
    fn test_positions_are_clamped() {
        let mut g = black_white();
        let i = g.add_stop(150.0, Rgb::BLACK);
        assert_eq!(g.stop(i).unwrap().position, 100.0);
        g.move_stop(i, -20.0).unwrap();
        assert_eq!(g.stop(i).unwrap().position, 0.0);
    }

    #[test]
    fn test_interpolated_stop_keeps_ramp() {
        let mut g = Gradient::default();
        let before = g.color_at(0.25);
        let i = g.add_interpolated_stop(25.0);
        assert_eq!(g.stop(i).unwrap().color, before);
        assert_eq!(g.color_at(0.25), before);
    }

    #[test]
    fn test_recolor() {
        let mut g = black_white();
        g.recolor_stop(1, Rgb::new(0, 255, 0)).unwrap();
        assert_eq!(g.color_at(1.0), Rgb::new(0, 255, 0));
    }
}
