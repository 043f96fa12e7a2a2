//! Ball-vs-wall collision response
//!
//! The tricky part of the polar maze: arcs and spokes have different surface
//! normals. An arc is a surface of constant radius, so its normal is radial
//! and only the radial velocity component is reflected. A spoke is a surface
//! of constant angle, so its normal is tangential and only the tangential
//! component is reflected.
//!
//! Every resolver only looks at the walls of the cell containing the ball
//! centre. The stepper keeps per-step movement small enough for that to hold.

use glam::Vec2;

use super::ball::Ball;
use crate::cartesian_to_polar;
use crate::grid::{CartesianGeometry, CartesianGrid, PolarCell, PolarGeometry, PolarGrid, Side};

/// Anything that can push a ball out of its walls
pub trait CollisionResolver {
    /// Correct the ball's position and velocity against nearby walls.
    /// Returns whether any correction happened.
    fn resolve(&self, ball: &mut Ball) -> bool;
}

/// Orthonormal frame at an angle around the maze centre
#[derive(Debug, Clone, Copy)]
pub struct PolarBasis {
    /// Points away from the centre
    pub radial: Vec2,
    /// Points towards increasing angle
    pub tangent: Vec2,
}

impl PolarBasis {
    #[inline]
    pub fn at(theta: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            radial: Vec2::new(cos, sin),
            tangent: Vec2::new(-sin, cos),
        }
    }

    /// (radial, tangential) components of `v`
    #[inline]
    pub fn split(&self, v: Vec2) -> (f32, f32) {
        (v.dot(self.radial), v.dot(self.tangent))
    }

    #[inline]
    pub fn join(&self, radial: f32, tangential: f32) -> Vec2 {
        self.radial * radial + self.tangent * tangential
    }

    /// Damped reflection off an arc
    #[inline]
    pub fn reflect_radial(&self, v: Vec2, restitution: f32) -> Vec2 {
        let (vr, vt) = self.split(v);
        self.join(-restitution * vr, vt)
    }

    /// Damped reflection off a spoke
    #[inline]
    pub fn reflect_tangential(&self, v: Vec2, restitution: f32) -> Vec2 {
        let (vr, vt) = self.split(v);
        self.join(vr, -restitution * vt)
    }
}

/// Clamp the ball inside the walls of its rectangular cell.
///
/// The four sides are tested independently, so a ball wedged in a corner is
/// pushed out along both axes in one call.
pub fn resolve_cartesian(
    grid: &CartesianGrid,
    geometry: &CartesianGeometry,
    restitution: f32,
    ball: &mut Ball,
) -> bool {
    let br = ball.radius();
    let cell = geometry.cell_at(ball.pos);
    let top = geometry.line_y(cell.row);
    let bottom = geometry.line_y(cell.row + 1);
    let left = geometry.line_x(cell.col);
    let right = geometry.line_x(cell.col + 1);

    let mut collided = false;

    if grid.has_wall(cell, Side::North) && ball.pos.y - br < top {
        ball.pos.y = top + br;
        ball.vel.y *= -restitution;
        collided = true;
    }
    if grid.has_wall(cell, Side::South) && ball.pos.y + br > bottom {
        ball.pos.y = bottom - br;
        ball.vel.y *= -restitution;
        collided = true;
    }
    if grid.has_wall(cell, Side::West) && ball.pos.x - br < left {
        ball.pos.x = left + br;
        ball.vel.x *= -restitution;
        collided = true;
    }
    if grid.has_wall(cell, Side::East) && ball.pos.x + br > right {
        ball.pos.x = right - br;
        ball.vel.x *= -restitution;
        collided = true;
    }

    collided
}

/// Push the ball out of the arcs and spokes of its polar cell.
///
/// Inner arc, outer arc and both boundary spokes are checked in that order
/// and corrections compound. A ball sitting on the centre has no defined
/// angle and is left alone for this call.
pub fn resolve_polar(
    grid: &PolarGrid,
    geometry: &PolarGeometry,
    restitution: f32,
    ball: &mut Ball,
) -> bool {
    let Some(location) = geometry.locate(ball.pos) else {
        return false;
    };
    let PolarCell { ring, sector } = location.cell;
    let br = ball.radius();
    let center = geometry.center;

    let mut r = location.r;
    let mut theta = location.theta;
    let mut basis = PolarBasis::at(theta);
    let mut pos = ball.pos;
    let mut vel = ball.vel;
    let mut collided = false;

    // Inner arc. Ring 1's inner arc is the hub boundary, which is always open.
    if ring > 1 && grid.arc(ring - 1, sector) {
        let arc_r = geometry.inner_radius(ring);
        let penetration = (arc_r + br) - r;
        if penetration > 0.0 {
            r = arc_r + br;
            pos = center + basis.radial * r;
            vel = basis.reflect_radial(vel, restitution);
            collided = true;
        }
    }

    // Outer arc
    if ring >= 1 && grid.arc(ring, sector) {
        let arc_r = geometry.arc_radius(ring);
        let penetration = r + br - arc_r;
        if penetration > 0.0 {
            r = arc_r - br;
            pos = center + basis.radial * r;
            vel = basis.reflect_radial(vel, restitution);
            collided = true;
        }
    }

    // Spokes on both angular boundaries of the sector. Ring 1 keeps its
    // spoke storage but never collides with it.
    if ring > 1 {
        let r_inner = geometry.inner_radius(ring);
        let r_outer = geometry.arc_radius(ring);

        for spoke in [sector, (sector + 1) % geometry.sectors] {
            if !grid.spoke(ring, spoke) {
                continue;
            }
            if r < r_inner - br || r > r_outer + br {
                continue;
            }
            let d_theta = theta - geometry.spoke_angle(spoke);
            let (sin, cos) = d_theta.sin_cos();
            // The spoke is a ray from the centre, not a full line
            if r * cos <= 0.0 {
                continue;
            }
            let perp = (r * sin).abs();
            if perp > br {
                continue;
            }

            let side = if sin >= 0.0 { 1.0 } else { -1.0 };
            pos += basis.tangent * side * (br - perp);

            (r, theta) = cartesian_to_polar(center, pos);
            basis = PolarBasis::at(theta);
            vel = basis.reflect_tangential(vel, restitution);
            collided = true;
        }
    }

    if collided {
        ball.pos = pos;
        ball.vel = vel;
    }
    collided
}
