//! Surface geometry and the 3D → 2D coordinate mapper.
//!
//! The display surface is a unit-sized plane in its own local space, centred
//! on the origin.  A pointer ray that hits it produces a world-space
//! [`IntersectionPoint`]; [`map_to_surface`] brings that point back into the
//! plane's local space and rescales it into the remote browser's normalized
//! viewport coordinates, where `(0, 0)` is the top-left corner and `(1, 1)`
//! the bottom-right.
//!
//! The plane's longer side always spans one local unit, so the aspect ratio
//! of the viewport decides which axis needs stretching.

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building surface geometry from untrusted input.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A texture dimension was zero; the aspect ratio would be undefined.
    #[error("surface dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
}

/// World-space point where a pointer ray met the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntersectionPoint(pub DVec3);

impl IntersectionPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }
}

impl From<[f64; 3]> for IntersectionPoint {
    fn from(xyz: [f64; 3]) -> Self {
        Self(DVec3::from_array(xyz))
    }
}

/// The display surface's world matrix at the moment of an event.
///
/// The surface may move between events, so this must be read from the
/// surface for every event and never stored across events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    world: DMat4,
}

impl SurfaceTransform {
    pub const IDENTITY: Self = Self {
        world: DMat4::IDENTITY,
    };

    /// Wraps the surface's local → world matrix.
    pub fn from_world(world: DMat4) -> Self {
        Self { world }
    }

    /// Builds a world matrix from a scale, rotation and translation.
    pub fn from_scale_rotation_translation(scale: DVec3, rotation: DQuat, translation: DVec3) -> Self {
        Self::from_world(DMat4::from_scale_rotation_translation(scale, rotation, translation))
    }

    pub fn world(&self) -> DMat4 {
        self.world
    }

    /// Converts a world-space point into surface-local space.
    pub fn world_to_local(&self, point: IntersectionPoint) -> DVec3 {
        self.world.inverse().transform_point3(point.0)
    }
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Texture-space size of the remote browser viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDimensions {
    pub width: u32,
    pub height: u32,
}

impl SurfaceDimensions {
    /// Builds dimensions after checking both sides are non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroDimension`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::ZeroDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// `height / width`.  Values `>= 1.0` are portrait or square.
    pub fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// A point on the surface in the remote viewport's normalized space.
///
/// Values are soft-bounded to `[0, 1]`: points just off the edge of the
/// surface are passed through unclamped and the remote side decides what to
/// do with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCoordinate {
    pub x: f64,
    pub y: f64,
}

impl NormalizedCoordinate {
    /// Returns `true` if the point lies inside the unit square (edges included).
    pub fn is_on_surface(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Maps a world-space intersection point to normalized surface coordinates.
///
/// The transform is inverted on every call.  Callers must pass positive
/// dimensions; see [`SurfaceDimensions::new`].
///
/// # Example
///
/// ```rust
/// use vbrowser_core::domain::geometry::{
///     map_to_surface, IntersectionPoint, SurfaceDimensions, SurfaceTransform,
/// };
///
/// let dims = SurfaceDimensions::new(1280, 720).unwrap();
/// let centre = map_to_surface(
///     IntersectionPoint::new(0.0, 0.0, 0.0),
///     &SurfaceTransform::IDENTITY,
///     dims,
/// );
/// assert_eq!((centre.x, centre.y), (0.5, 0.5));
/// ```
pub fn map_to_surface(
    intersection: IntersectionPoint,
    surface_transform: &SurfaceTransform,
    dims: SurfaceDimensions,
) -> NormalizedCoordinate {
    let local = surface_transform.world_to_local(intersection);
    let aspect = dims.aspect();

    // Screen y grows downwards while local y grows upwards.
    if aspect >= 1.0 {
        NormalizedCoordinate {
            x: local.x * aspect + 0.5,
            y: -local.y + 0.5,
        }
    } else {
        NormalizedCoordinate {
            x: local.x + 0.5,
            y: -local.y / aspect + 0.5,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: NormalizedCoordinate, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
            "expected ({x}, {y}), got ({}, {})",
            actual.x,
            actual.y
        );
    }

    fn dims(width: u32, height: u32) -> SurfaceDimensions {
        SurfaceDimensions::new(width, height).unwrap()
    }

    #[test]
    fn test_centre_maps_to_half_half_for_every_aspect() {
        for d in [dims(100, 100), dims(1280, 720), dims(720, 1280), dims(1, 3)] {
            let c = map_to_surface(IntersectionPoint::new(0.0, 0.0, 0.0), &SurfaceTransform::IDENTITY, d);
            assert_close(c, 0.5, 0.5);
        }
    }

    #[test]
    fn test_square_surface_uses_portrait_branch() {
        // aspect == 1 → x = 0.5 * 1 + 0.5
        let c = map_to_surface(IntersectionPoint::new(0.5, 0.0, 0.0), &SurfaceTransform::IDENTITY, dims(512, 512));
        assert_close(c, 1.0, 0.5);
    }

    #[test]
    fn test_landscape_surface_stretches_y() {
        // aspect = 0.5 → y = -0.25 / 0.5 + 0.5 = 0.0 (top edge)
        let c = map_to_surface(IntersectionPoint::new(0.0, 0.25, 0.0), &SurfaceTransform::IDENTITY, dims(200, 100));
        assert_close(c, 0.5, 0.0);
    }

    #[test]
    fn test_portrait_surface_stretches_x() {
        // aspect = 2 → x = 0.25 * 2 + 0.5 = 1.0
        let c = map_to_surface(IntersectionPoint::new(0.25, -0.5, 0.0), &SurfaceTransform::IDENTITY, dims(100, 200));
        assert_close(c, 1.0, 1.0);
    }

    #[test]
    fn test_translated_surface_centre_is_half_half() {
        let transform = SurfaceTransform::from_world(DMat4::from_translation(DVec3::new(10.0, 2.0, -3.0)));
        let c = map_to_surface(IntersectionPoint::new(10.0, 2.0, -3.0), &transform, dims(1280, 720));
        assert_close(c, 0.5, 0.5);
    }

    #[test]
    fn test_scaled_surface_is_undone_by_inverse() {
        // Surface scaled 2x: world x = 1.0 is local x = 0.5, the right edge.
        let transform = SurfaceTransform::from_scale_rotation_translation(
            DVec3::splat(2.0),
            DQuat::IDENTITY,
            DVec3::ZERO,
        );
        let c = map_to_surface(IntersectionPoint::new(1.0, 0.0, 0.0), &transform, dims(64, 64));
        assert_close(c, 1.0, 0.5);
    }

    #[test]
    fn test_rotated_surface_maps_through_local_axes() {
        // Rotated 90° about Y: local +x points along world -z.
        let transform = SurfaceTransform::from_scale_rotation_translation(
            DVec3::ONE,
            DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2),
            DVec3::ZERO,
        );
        let c = map_to_surface(IntersectionPoint::new(0.0, 0.0, -0.5), &transform, dims(64, 64));
        assert_close(c, 1.0, 0.5);
    }

    #[test]
    fn test_off_surface_points_are_not_clamped() {
        let c = map_to_surface(IntersectionPoint::new(1.0, -1.0, 0.0), &SurfaceTransform::IDENTITY, dims(10, 10));
        assert_close(c, 1.5, 1.5);
        assert!(!c.is_on_surface());
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert_eq!(
            SurfaceDimensions::new(0, 720),
            Err(GeometryError::ZeroDimension { width: 0, height: 720 })
        );
        assert!(SurfaceDimensions::new(1280, 0).is_err());
    }

    #[test]
    fn test_intersection_point_serializes_as_array() {
        let p = IntersectionPoint::new(1.0, 2.0, 3.0);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0]");
        let back: IntersectionPoint = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(back, p);
    }
}
