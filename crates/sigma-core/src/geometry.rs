//! Geometric primitives for canvas layout and positioning.
//!
//! This module provides the fundamental geometric types used throughout Sigma
//! for calculating positions, sizes, and bounding boxes of canvas elements.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Fully-specified spacing values for four sides
//! - [`Offset`] - A partial spacing record that resolves to [`Insets`]
//!
//! # Coordinate System
//!
//! Sigma uses a coordinate system consistent with screen space:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point representing a position in canvas coordinate space.
///
/// Points use `f32` coordinates. The coordinate system has origin at top-left
/// with Y increasing downward (see [module documentation](self) for details).
///
/// # Examples
///
/// ```
/// # use sigma_core::geometry::Point;
/// let position = Point::new(100.0, 50.0);
/// let delta = Point::new(10.0, -5.0);
///
/// let moved = position.add_point(delta);
/// assert_eq!(moved.x(), 110.0);
/// assert_eq!(moved.y(), 45.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns true when both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Converts a point and size into a bounds rectangle with the point
    /// as the top-left corner
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size grown by the given insets on all four sides
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width(),
            max_y: top_left.y + size.height(),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Returns true when the given point lies within the bounds (inclusive
    /// of the minimum edge, exclusive of the maximum edge).
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.min_x
            && point.x() < self.max_x
            && point.y() >= self.min_y
            && point.y() < self.max_y
    }

    /// Moves the bounds by the specified offset
    pub fn translate(self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }
}

/// Fully-specified spacing around an element (padding, margin, etc.)
/// with potentially different values for each side.
///
/// Use [`Offset`] for records where sides may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

/// A partial spacing record where any side may be omitted.
///
/// Layout descriptors carry `Offset` so callers only state the sides they
/// care about; [`Offset::resolve`] produces the fully-specified [`Insets`]
/// with absent sides defaulting to zero.
///
/// # Examples
///
/// ```
/// # use sigma_core::geometry::Offset;
/// let margin = Offset::top(10.0);
/// let insets = margin.resolve();
/// assert_eq!(insets.top(), 10.0);
/// assert_eq!(insets.left(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

impl Offset {
    /// An offset with no sides specified (resolves to all-zero insets)
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an offset with all four sides specified
    pub fn sides(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
        }
    }

    /// Creates an offset with only the top side specified
    pub fn top(value: f32) -> Self {
        Self {
            top: Some(value),
            ..Self::default()
        }
    }

    /// Creates a uniform offset with the same value on all sides
    pub fn uniform(value: f32) -> Self {
        Self::sides(value, value, value, value)
    }

    /// Resolves this partial record into fully-specified [`Insets`],
    /// with absent sides defaulting to zero.
    pub fn resolve(self) -> Insets {
        Insets::new(
            self.top.unwrap_or(0.0),
            self.right.unwrap_or(0.0),
            self.bottom.unwrap_or(0.0),
            self.left.unwrap_or(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default_is_zero() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        let sum = p1.add_point(p2);
        assert_eq!(sum.x(), 7.0);
        assert_eq!(sum.y(), 11.0);

        let diff = p1.sub_point(p2);
        assert_eq!(diff.x(), 3.0);
        assert_eq!(diff.y(), 5.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f32::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_size_max() {
        let size1 = Size::new(10.0, 20.0);
        let size2 = Size::new(15.0, 18.0);
        let max_size = size1.max(size2);

        assert_eq!(max_size.width(), 15.0);
        assert_eq!(max_size.height(), 20.0);
    }

    #[test]
    fn test_size_add_padding() {
        let size = Size::new(10.0, 20.0);
        let padded = size.add_padding(Insets::uniform(5.0));

        assert_eq!(padded.width(), 20.0); // 10 + 5*2
        assert_eq!(padded.height(), 30.0); // 20 + 5*2
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));

        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(20.0, 20.0));

        assert!(bounds.contains(Point::new(10.0, 10.0)));
        assert!(bounds.contains(Point::new(29.0, 29.0)));
        assert!(!bounds.contains(Point::new(30.0, 15.0)));
        assert!(!bounds.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_bounds_translate() {
        let bounds = Bounds::new_from_top_left(Point::new(1.0, 2.0), Size::new(4.0, 4.0));
        let translated = bounds.translate(Point::new(3.0, -1.0));

        assert_eq!(translated.min_x(), 4.0);
        assert_eq!(translated.min_y(), 1.0);
        assert_eq!(translated.max_x(), 8.0);
        assert_eq!(translated.max_y(), 5.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 6.0); // 2.0 + 4.0
        assert_eq!(insets.vertical_sum(), 4.0); // 1.0 + 3.0
    }

    #[test]
    fn test_offset_resolve_defaults_absent_sides() {
        let insets = Offset::none().resolve();
        assert_eq!(insets, Insets::default());

        let insets = Offset::top(10.0).resolve();
        assert_eq!(insets.top(), 10.0);
        assert_eq!(insets.right(), 0.0);
        assert_eq!(insets.bottom(), 0.0);
        assert_eq!(insets.left(), 0.0);
    }

    #[test]
    fn test_offset_resolve_full() {
        let insets = Offset::sides(10.0, 20.0, 10.0, 20.0).resolve();
        assert_eq!(insets, Insets::new(10.0, 20.0, 10.0, 20.0));
    }

    #[test]
    fn test_offset_uniform() {
        let insets = Offset::uniform(5.0).resolve();
        assert_eq!(insets, Insets::uniform(5.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..1000.0, 0.0f32..1000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn offset_strategy() -> impl Strategy<Value = Offset> {
        prop_oneof![
            Just(Offset::none()),
            (0.0f32..100.0).prop_map(Offset::top),
            (0.0f32..100.0).prop_map(Offset::uniform),
            (0.0f32..100.0, 0.0f32..100.0, 0.0f32..100.0, 0.0f32..100.0)
                .prop_map(|(t, r, b, l)| Offset::sides(t, r, b, l)),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Point addition should be commutative: p1 + p2 == p2 + p1.
    fn check_point_add_is_commutative(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let result1 = p1.add_point(p2);
        let result2 = p2.add_point(p1);

        prop_assert!(approx_eq!(f32, result1.x(), result2.x()));
        prop_assert!(approx_eq!(f32, result1.y(), result2.y()));
        Ok(())
    }

    /// Adding then subtracting a point should return the original.
    fn check_add_sub_inverse(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let result = p1.add_point(p2).sub_point(p2);

        prop_assert!(approx_eq!(f32, result.x(), p1.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, result.y(), p1.y(), epsilon = 0.001));
        Ok(())
    }

    /// Resolved offsets never produce negative sums for non-negative sides.
    fn check_offset_resolve_non_negative(offset: Offset) -> Result<(), TestCaseError> {
        let insets = offset.resolve();
        prop_assert!(insets.horizontal_sum() >= 0.0);
        prop_assert!(insets.vertical_sum() >= 0.0);
        Ok(())
    }

    /// Bounds built from a top-left point and size should contain the
    /// top-left corner and have matching dimensions.
    fn check_bounds_dimensions(top_left: Point, size: Size) -> Result<(), TestCaseError> {
        let bounds = Bounds::new_from_top_left(top_left, size);

        prop_assert!(approx_eq!(f32, bounds.width(), size.width(), epsilon = 0.01));
        prop_assert!(approx_eq!(
            f32,
            bounds.height(),
            size.height(),
            epsilon = 0.01
        ));
        if size.width() > 0.0 && size.height() > 0.0 {
            prop_assert!(bounds.contains(top_left));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn point_add_is_commutative(p1 in point_strategy(), p2 in point_strategy()) {
            check_point_add_is_commutative(p1, p2)?;
        }

        #[test]
        fn add_sub_inverse(p1 in point_strategy(), p2 in point_strategy()) {
            check_add_sub_inverse(p1, p2)?;
        }

        #[test]
        fn offset_resolve_non_negative(offset in offset_strategy()) {
            check_offset_resolve_non_negative(offset)?;
        }

        #[test]
        fn bounds_dimensions(top_left in point_strategy(), size in size_strategy()) {
            check_bounds_dimensions(top_left, size)?;
        }
    }
}
