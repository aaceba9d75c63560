//! Integer grid coordinates shared by the puzzle solvers.

use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Mul};

/// A point (or direction) on the plane.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub fn new(x: i64, y: i64) -> Coord {
        Coord { x, y }
    }

    /// Quarter turn counter-clockwise about the origin.
    pub fn rotate_left(self) -> Coord {
        Coord::new(-self.y, self.x)
    }

    /// Quarter turn clockwise about the origin.
    pub fn rotate_right(self) -> Coord {
        Coord::new(self.y, -self.x)
    }

    pub fn up(self) -> Coord {
        Coord::new(self.x, self.y + 1)
    }

    pub fn down(self) -> Coord {
        Coord::new(self.x, self.y - 1)
    }

    pub fn left(self) -> Coord {
        Coord::new(self.x - 1, self.y)
    }

    pub fn right(self) -> Coord {
        Coord::new(self.x + 1, self.y)
    }

    /// Taxicab distance from the origin.
    pub fn manhattan(self) -> i64 {
        self.x.abs() + self.y.abs()
    }

    /// Taxicab distance from `start`.
    pub fn manhattan_from(self, start: Coord) -> i64 {
        (self.x - start.x).abs() + (self.y - start.y).abs()
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, other: Coord) -> Coord {
        Coord::new(self.x + other.x, self.y + other.y)
    }
}

impl Mul<i64> for Coord {
    type Output = Coord;

    fn mul(self, scale: i64) -> Coord {
        Coord::new(self.x * scale, self.y * scale)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point in space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Coord3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Coord3 {
    pub fn new(x: i64, y: i64, z: i64) -> Coord3 {
        Coord3 { x, y, z }
    }

    /// L1 norm from the origin.
    pub fn manhattan(self) -> i64 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }
}

impl Add for Coord3 {
    type Output = Coord3;

    fn add(self, other: Coord3) -> Coord3 {
        Coord3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Display for Coord3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
