// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: pixel points, corner slots, and the four-corner point set.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// A pixel location in image coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f64 {
        let dx = (self.x as f64) - (other.x as f64);
        let dy = (self.y as f64) - (other.y as f64);
        (dx * dx + dy * dy).sqrt()
    }

    /// Z component of `(a - self) x (b - self)`, widened to avoid overflow.
    pub fn cross(&self, a: Point, b: Point) -> i64 {
        let (ax, ay) = (a.x as i64 - self.x as i64, a.y as i64 - self.y as i64);
        let (bx, by) = (b.x as i64 - self.x as i64, b.y as i64 - self.y as i64);
        ax * by - ay * bx
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four canonical corner roles, in clockwise order from the
/// upper left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    UpperLeft,
    UpperRight,
    LowerRight,
    LowerLeft,
}

impl Slot {
    /// All slots in cyclic order.
    pub const ALL: [Slot; 4] = [
        Slot::UpperLeft,
        Slot::UpperRight,
        Slot::LowerRight,
        Slot::LowerLeft,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot at position `index` (taken modulo 4).
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The slot after this one, clockwise.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The slot before this one, clockwise.
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The two slots sharing an edge with this one.
    pub const fn neighbors(self) -> [Slot; 2] {
        [self.previous(), self.next()]
    }

    /// The diagonally opposite slot.
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::UpperLeft => "Upper left",
            Slot::UpperRight => "Upper right",
            Slot::LowerRight => "Lower right",
            Slot::LowerLeft => "Lower left",
        };
        f.write_str(name)
    }
}

/// Exactly four corners of one quadrilateral, indexed by [`Slot`].
///
/// Slot `i` and slot `(i + 1) % 4` are joined by an edge. Convexity is not
/// enforced here; a dragged corner may produce a self-intersecting shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointSet([Point; 4]);

impl PointSet {
    pub const fn new(
        upper_left: Point,
        upper_right: Point,
        lower_right: Point,
        lower_left: Point,
    ) -> Self {
        Self([upper_left, upper_right, lower_right, lower_left])
    }

    /// Points in slot order: upper left, upper right, lower right, lower left.
    pub const fn as_array(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, Point)> + '_ {
        Slot::ALL.iter().map(move |&slot| (slot, self[slot]))
    }

    /// The four edges in cyclic order, starting at the upper-left corner.
    pub fn edges(&self) -> [(Point, Point); 4] {
        Slot::ALL.map(|slot| (self[slot], self[slot.next()]))
    }

    /// True when every corner turns the same way. Collinear corners and
    /// self-intersecting shapes are not convex.
    pub fn is_convex(&self) -> bool {
        let turns = Slot::ALL.map(|slot| {
            let prev = self[slot.previous()];
            prev.cross(self[slot], self[slot.next()])
        });
        turns.iter().all(|&t| t > 0) || turns.iter().all(|&t| t < 0)
    }
}

impl Index<Slot> for PointSet {
    type Output = Point;

    fn index(&self, slot: Slot) -> &Point {
        &self.0[slot.index()]
    }
}

impl IndexMut<Slot> for PointSet {
    fn index_mut(&mut self, slot: Slot) -> &mut Point {
        &mut self.0[slot.index()]
    }
}

/// Coarse rotation of a detected document relative to the upright layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    NotSet,
    Upright,
    ToLeft,
    ToRight,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::NotSet => "Not set",
            Orientation::Upright => "Upright",
            Orientation::ToLeft => "To left",
            Orientation::ToRight => "To right",
        };
        f.write_str(name)
    }
}

/// Drag state of the interactive corner editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Slot),
}

/// Axis-aligned bounding rectangle (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingRect {
    /// Bounding rectangle of `points`, or `None` when empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.iter().skip(1).fold(init, |r, p| Self {
            min_x: r.min_x.min(p.x),
            min_y: r.min_y.min(p.y),
            max_x: r.max_x.max(p.x),
            max_y: r.max_y.max(p.y),
        }))
    }

    /// The rectangle's corners in slot order.
    pub fn corners(&self) -> PointSet {
        PointSet::new(
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        )
    }
}
