//! Arc segment geometry for curved walls and clock hands
//!
//! In polar coordinates around a maze centre, an arc segment is defined by:
//! - radius: distance from center
//! - thickness: radial extent (inner = radius - thickness/2, outer = radius + thickness/2)
//! - theta_start, span: angular extent, sweeping towards increasing angle

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{polar_to_cartesian, wrap_angle};

/// A (possibly thickened) arc segment in polar space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    /// Maze centre the arc is drawn around
    pub center: Vec2,
    /// Centerline radius
    pub radius: f32,
    /// Radial thickness (extends radius ± thickness/2); zero for wall lines
    pub thickness: f32,
    /// Start angle (radians, normalized to [0, 2π))
    pub theta_start: f32,
    /// Angular sweep (radians, in [0, 2π])
    pub span: f32,
}

impl ArcSegment {
    pub fn new(center: Vec2, radius: f32, thickness: f32, theta_start: f32, span: f32) -> Self {
        Self {
            center,
            radius,
            thickness,
            theta_start: wrap_angle(theta_start),
            span: span.clamp(0.0, TAU),
        }
    }

    /// Arc of angular `width` centred on `theta`
    pub fn centered(center: Vec2, radius: f32, thickness: f32, theta: f32, width: f32) -> Self {
        Self::new(center, radius, thickness, theta - width / 2.0, width)
    }

    /// Inner radius of the arc band
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.thickness / 2.0
    }

    /// Outer radius of the arc band
    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.radius + self.thickness / 2.0
    }

    /// Check if an angle is within the arc's angular extent (handles wraparound)
    pub fn contains_angle(&self, theta: f32) -> bool {
        wrap_angle(theta - self.theta_start) <= self.span
    }

    /// Point on the centerline at the mid-angle
    pub fn midpoint(&self) -> Vec2 {
        polar_to_cartesian(self.center, self.radius, self.theta_start + self.span / 2.0)
    }

    fn sample_at(&self, r: f32, num_points: usize) -> Vec<Vec2> {
        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                polar_to_cartesian(self.center, r, self.theta_start + t * self.span)
            })
            .collect()
    }

    /// Polyline along the centerline, endpoints included
    pub fn sample(&self, num_points: usize) -> Vec<Vec2> {
        self.sample_at(self.radius, num_points)
    }

    /// Sample points along the outer edge
    pub fn sample_outer_edge(&self, num_points: usize) -> Vec<Vec2> {
        self.sample_at(self.outer_radius(), num_points)
    }

    /// Sample points along the inner edge
    pub fn sample_inner_edge(&self, num_points: usize) -> Vec<Vec2> {
        self.sample_at(self.inner_radius(), num_points)
    }

    /// Closed outline of the band: outer edge forward, inner edge back
    pub fn outline(&self, points_per_edge: usize) -> Vec<Vec2> {
        let mut points = self.sample_outer_edge(points_per_edge);
        points.extend(self.sample_inner_edge(points_per_edge).into_iter().rev());
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const ORIGIN: Vec2 = Vec2::ZERO;

    #[test]
    fn test_arc_contains_angle_no_wrap() {
        let arc = ArcSegment::new(ORIGIN, 100.0, 10.0, 0.0, PI / 2.0);
        assert!(arc.contains_angle(0.1));
        assert!(arc.contains_angle(PI / 4.0));
        assert!(!arc.contains_angle(PI));
        assert!(!arc.contains_angle(-PI / 4.0));
    }

    #[test]
    fn test_arc_contains_angle_wraparound() {
        // Arc from 170° sweeping 20° (wraps past 180°)
        let arc = ArcSegment::new(
            ORIGIN,
            100.0,
            10.0,
            170.0_f32.to_radians(),
            20.0_f32.to_radians(),
        );
        assert!(arc.contains_angle(PI));
        assert!(arc.contains_angle(-PI + 0.01));
        assert!(!arc.contains_angle(0.0));

        // Arc straddling angle zero
        let arc = ArcSegment::centered(ORIGIN, 50.0, 0.0, 0.0, 0.4);
        assert!(arc.contains_angle(TAU - 0.1));
        assert!(arc.contains_angle(0.1));
        assert!(!arc.contains_angle(0.3));
    }

    #[test]
    fn test_sample_endpoints() {
        let center = Vec2::new(10.0, -5.0);
        let arc = ArcSegment::new(center, 20.0, 0.0, 0.0, PI / 2.0);
        let points = arc.sample(6);
        assert_eq!(points.len(), 6);
        assert!((points[0] - (center + Vec2::new(20.0, 0.0))).length() < 1e-4);
        assert!((points[5] - (center + Vec2::new(0.0, 20.0))).length() < 1e-4);
        for p in &points {
            assert!(((*p - center).length() - 20.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_outline_band() {
        let arc = ArcSegment::new(ORIGIN, 100.0, 10.0, 1.0, 0.5);
        assert_eq!(arc.inner_radius(), 95.0);
        assert_eq!(arc.outer_radius(), 105.0);
        let outline = arc.outline(4);
        assert_eq!(outline.len(), 8);
        assert!((outline[0].length() - 105.0).abs() < 1e-3);
        assert!((outline[7].length() - 95.0).abs() < 1e-3);

        // Offset centre: edges stay on their radii around it
        let center = Vec2::new(120.0, 120.0);
        let arc = ArcSegment::new(center, 100.0, 20.0, 0.0, PI / 2.0);
        for p in arc.outline(5) {
            let r = (p - center).length();
            assert!((r - 110.0).abs() < 1e-3 || (r - 90.0).abs() < 1e-3, "r = {}", r);
        }
        let mid = arc.midpoint() - center;
        assert!(arc.contains_angle(mid.y.atan2(mid.x)));
    }
}
