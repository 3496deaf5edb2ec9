//! Cartesian state returned by a lookup.
//!
//! Units
//! -----------------
//! * position: kilometers (km)
//! * velocity: kilometers per second (km/s)
//!
//! [`Position::to_au`] converts to AU and AU/day. Addition and subtraction are
//! component-wise, which is how states relative to different centers are chained
//! (e.g. Earth wrt SSB = Earth-Moon barycenter wrt SSB + Earth wrt Earth-Moon
//! barycenter).
use std::ops::{Add, Sub};

use nalgebra::Vector3;

use crate::constants::{AU, SECONDS_PER_DAY};

/// Position and velocity of a target relative to a center.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub velocity_z: f64,
}

impl Position {
    /// Build from a position vector and a velocity vector.
    pub fn from_vectors(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Position {
            x: position.x,
            y: position.y,
            z: position.z,
            velocity_x: velocity.x,
            velocity_y: velocity.y,
            velocity_z: velocity.z,
        }
    }

    /// `(x, y, z)`.
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// `(velocity_x, velocity_y, velocity_z)`.
    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::new(self.velocity_x, self.velocity_y, self.velocity_z)
    }

    /// km → AU and km/s → AU/day.
    pub fn to_au(&self) -> Self {
        Position::from_vectors(
            self.position() / AU,
            self.velocity() * (SECONDS_PER_DAY / AU),
        )
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::from_vectors(
            self.position() + rhs.position(),
            self.velocity() + rhs.velocity(),
        )
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::from_vectors(
            self.position() - rhs.position(),
            self.velocity() - rhs.velocity(),
        )
    }
}

#[cfg(test)]
mod test_position {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_au() {
        let state = Position {
            x: AU,
            y: -2.0 * AU,
            z: 0.0,
            velocity_x: AU / SECONDS_PER_DAY,
            velocity_y: 0.0,
            velocity_z: 0.0,
        }
        .to_au();

        assert_relative_eq!(state.x, 1.0);
        assert_relative_eq!(state.y, -2.0);
        assert_relative_eq!(state.velocity_x, 1.0);
    }

    #[test]
    fn test_chaining() {
        let emb = Position::from_vectors(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.1, 0.2, 0.3));
        let earth_wrt_emb =
            Position::from_vectors(Vector3::new(-0.5, 0.0, 1.0), Vector3::new(0.0, -0.2, 0.0));

        let earth = emb + earth_wrt_emb;
        assert_eq!(earth.position(), Vector3::new(0.5, 2.0, 4.0));
        assert_eq!(earth.velocity(), Vector3::new(0.1, 0.0, 0.3));
        assert_eq!(earth - earth_wrt_emb, emb);
    }
}
