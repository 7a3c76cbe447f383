//! Geometry helpers shared by the constraint resolver, marquee and sessions.
//!
//! Horizontal footprints live in the XZ plane; `Vec2::x` is world X and
//! `Vec2::y` is world Z. Yaw is a rotation about +Y, right-handed.

use bevy::math::{EulerRot, Quat, Vec2, Vec3};

/// Tolerance used when comparing projected extents.
pub const EPSILON: f32 = 1e-5;

/// Returns true if the quaternion has finite components and non-zero length.
pub fn is_finite_quat(q: Quat) -> bool {
    q.is_finite() && q.length_squared() > EPSILON
}

/// Converts XYZ Euler angles (radians) to a quaternion.
pub fn euler_to_quat(euler: [f32; 3]) -> Quat {
    Quat::from_euler(EulerRot::XYZ, euler[0], euler[1], euler[2])
}

/// Converts a quaternion back to XYZ Euler angles (radians).
pub fn quat_to_euler(q: Quat) -> [f32; 3] {
    let (x, y, z) = q.normalize().to_euler(EulerRot::XYZ);
    [x, y, z]
}

/// Heading about +Y, read from where the rotation sends local +X.
///
/// Unlike the Euler Y angle this covers the full circle. A rotation that
/// stands local +X upright falls back to local +Z.
pub fn yaw_of(q: Quat) -> f32 {
    let q = q.normalize();
    let x = q * Vec3::X;
    if x.x.abs() + x.z.abs() > EPSILON {
        (-x.z).atan2(x.x)
    } else {
        let z = q * Vec3::Z;
        z.x.atan2(z.z)
    }
}

/// Horizontal projection of a world point.
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Rotates `point` about `pivot` by `rotation`.
pub fn rotate_about(point: Vec3, pivot: Vec3, rotation: Quat) -> Vec3 {
    pivot + rotation * (point - pivot)
}

/// Arithmetic mean of the given points, `None` when empty.
pub fn centroid(points: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let mut sum = Vec3::ZERO;
    let mut count = 0usize;
    for p in points {
        sum += p;
        count += 1;
    }
    (count > 0).then(|| sum / count as f32)
}

/// Axis-aligned clamp of `point` into `[min, max]` per component.
///
/// Components where `min > max` collapse to the midpoint.
pub fn clamp_to_box(point: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    let axis = |p: f32, lo: f32, hi: f32| {
        if lo > hi { (lo + hi) * 0.5 } else { p.clamp(lo, hi) }
    };
    Vec3::new(
        axis(point.x, min.x, max.x),
        axis(point.y, min.y, max.y),
        axis(point.z, min.z, max.z),
    )
}

/// A rectangle in the horizontal plane, rotated by `yaw` about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub yaw: f32,
}

impl OrientedRect {
    pub fn new(center: Vec2, size: Vec2, yaw: f32) -> Self {
        Self {
            center,
            half_extents: size.abs() * 0.5,
            yaw,
        }
    }

    /// Local X and Z axes expressed in world XZ coordinates.
    pub fn axes(&self) -> [Vec2; 2] {
        let (sin, cos) = self.yaw.sin_cos();
        // Quat::from_rotation_y(yaw) maps +X to (cos, -sin) and +Z to (sin, cos).
        [Vec2::new(cos, -sin), Vec2::new(sin, cos)]
    }

    /// Transforms a world XZ point into the rectangle's local frame.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        let [u, v] = self.axes();
        let d = point - self.center;
        Vec2::new(d.dot(u), d.dot(v))
    }

    /// Inverse of [`Self::to_local`].
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        let [u, v] = self.axes();
        self.center + u * local.x + v * local.y
    }

    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            self.to_world(Vec2::new(-h.x, -h.y)),
            self.to_world(Vec2::new(h.x, -h.y)),
            self.to_world(Vec2::new(h.x, h.y)),
            self.to_world(Vec2::new(-h.x, h.y)),
        ]
    }

    /// Point-in-oriented-box test, boundary inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        let local = self.to_local(point);
        local.x.abs() <= self.half_extents.x + EPSILON
            && local.y.abs() <= self.half_extents.y + EPSILON
    }

    /// Separating-axis overlap test against the four face normals of both
    /// rectangles. Touching edges count as overlapping.
    pub fn overlaps(&self, other: &OrientedRect) -> bool {
        let a = self.corners();
        let b = other.corners();
        self.axes()
            .into_iter()
            .chain(other.axes())
            .all(|axis| {
                let (a_min, a_max) = project(&a, axis);
                let (b_min, b_max) = project(&b, axis);
                a_max + EPSILON >= b_min && b_max + EPSILON >= a_min
            })
    }
}

fn project(corners: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    corners.iter().fold((f32::MAX, f32::MIN), |(lo, hi), c| {
        let d = c.dot(axis);
        (lo.min(d), hi.max(d))
    })
}
