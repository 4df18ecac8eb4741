// Copyright 2025 the Raywand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray geometry and the hit-test provider contract.
//!
//! This crate provides small, reusable primitives for casting a pointer ray
//! against 3-D scene content, built on top of [`glam`]. It is intentionally
//! decoupled from any particular scene graph or event dispatcher.
//!
//! # Typical usage
//!
//! - Use your own broad-phase structure (a spatial index, a physics engine,
//!   a flat list) to cull candidate objects.
//! - Call [`RayTest::ray_test`] on each candidate's pick shape.
//! - Use the returned [`RayHitScore`] only for *scoring and ranking*; any
//!   rich metadata (triangle indices, UVs, surface normals) should be carried
//!   alongside the score in your own structures.
//! - Wrap the winning candidate in a [`RayHit`] — the per-frame answer an
//!   event dispatcher consumes through [`HitProvider`].
//!
//! # Key types
//!
//! - [`Ray`] — origin plus normalized direction, with [`Ray::point_at`] and a
//!   pose-based constructor for controller-style pointers.
//! - [`HitParams`] — per-query parameters: maximum distance and a pick
//!   tolerance that inflates shapes for forgiving pointer input.
//! - [`RayHitScore`] — a small scoring record `{ distance, kind }` used for
//!   ranking candidates. Lower distance is preferred; [`HitKind`] records
//!   whether the ray started inside the shape.
//! - [`RayTest`] — a trait implemented by shapes that can answer "does this
//!   ray hit me, and how far along?" queries.
//! - [`RayHit`] — the resolved `(object, world point, distance)` triple.
//! - [`HitProvider`] — the once-per-frame snapshot contract consumed by an
//!   event dispatcher.
//!
//! ## Shapes and scope
//!
//! This crate includes [`RayTest`] implementations for a few pick-shape
//! primitives sufficient for panels and handles in spatial UIs:
//!
//! - [`Sphere`] — center and radius.
//! - [`Aabb`] — axis-aligned box, slab-method intersection.
//! - [`Plane`] — infinite plane; bound the hit with [`HitParams::max_distance`].
//!
//! Engines with richer collision geometry (meshes, capsules) can implement
//! [`RayTest`] on their own wrappers and still use [`nearest_hit`] and the
//! provider contract unchanged.
//!
//! This crate is `no_std`; enable the `libm` feature for `no_std` float math.

#![no_std]

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("raywand_ray requires either the `std` feature (default) or the `libm` feature");

use core::cmp::Ordering;

use glam::{Affine3A, Vec3};

/// Scalar square root that works in both std and `libm` builds.
#[inline]
fn sqrtf(x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.sqrt()
    }
    #[cfg(all(not(feature = "std"), feature = "libm"))]
    {
        libm::sqrtf(x)
    }
}

/// A ray in world space: origin plus normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin in world space.
    pub origin: Vec3,
    /// Ray direction. Constructors normalize; if you build the struct
    /// directly, keep this unit-length or distances will be scaled.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray from an origin and a direction, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray from a pointer pose, following the -Z forward convention
    /// used by controller and hand poses.
    pub fn from_pose(pose: &Affine3A) -> Self {
        Self {
            origin: pose.translation.into(),
            direction: pose.transform_vector3(Vec3::NEG_Z).normalize(),
        }
    }

    /// The point `distance` units along the ray.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Kind of hit produced by a ray test.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HitKind {
    /// The ray entered the shape from outside; distance is to the surface.
    Surface,
    /// The ray origin was already inside the shape; distance is zero.
    Interior,
}

/// Parameters controlling ray tests.
#[derive(Clone, Copy, Debug)]
pub struct HitParams {
    /// Maximum distance along the ray at which a hit is accepted.
    pub max_distance: f32,
    /// Tolerance in world units that inflates shapes for a near-miss hit.
    ///
    /// Typically used to widen pick regions for imprecise pointer input.
    pub tolerance: f32,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            max_distance: f32::INFINITY,
            tolerance: 0.0,
        }
    }
}

/// Score returned from a ray test.
///
/// Lower distance is considered a better (nearer) hit for ranking.
#[derive(Clone, Copy, Debug)]
pub struct RayHitScore {
    /// Distance along the ray, in world units. Finite and non-negative.
    pub distance: f32,
    /// Classification of the hit.
    pub kind: HitKind,
}

impl RayHitScore {
    /// Convenience constructor for a hit at the ray origin.
    pub const fn interior() -> Self {
        Self {
            distance: 0.0,
            kind: HitKind::Interior,
        }
    }

    /// Compare two scores, preferring smaller distance; ties keep original order.
    pub fn cmp_distance(&self, other: &Self) -> Ordering {
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
    }
}

/// Trait for ray intersection tests against pick shapes in world space.
///
/// Implementors are free to use any strategy, but should treat
/// [`HitParams::tolerance`] as an inclusive inflation radius when appropriate
/// and must reject hits beyond [`HitParams::max_distance`].
pub trait RayTest {
    /// Intersect `ray` with this shape.
    ///
    /// Returns `Some(RayHitScore)` when the ray is considered a hit.
    fn ray_test(&self, ray: &Ray, params: &HitParams) -> Option<RayHitScore>;
}

/// A sphere pick shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    /// Center in world space.
    pub center: Vec3,
    /// Radius in world units.
    pub radius: f32,
}

impl RayTest for Sphere {
    fn ray_test(&self, ray: &Ray, params: &HitParams) -> Option<RayHitScore> {
        let radius = self.radius + params.tolerance;
        let to_center = self.center - ray.origin;
        if to_center.length_squared() <= radius * radius {
            return Some(RayHitScore::interior());
        }
        let along = to_center.dot(ray.direction);
        if along < 0.0 {
            return None;
        }
        let off_sq = to_center.length_squared() - along * along;
        if off_sq > radius * radius {
            return None;
        }
        let half_chord = sqrtf(radius * radius - off_sq);
        let distance = along - half_chord;
        (distance <= params.max_distance).then_some(RayHitScore {
            distance,
            kind: HitKind::Surface,
        })
    }
}

/// An axis-aligned box pick shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two opposite corners in any order.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

impl RayTest for Aabb {
    fn ray_test(&self, ray: &Ray, params: &HitParams) -> Option<RayHitScore> {
        let pad = Vec3::splat(params.tolerance);
        let min = self.min - pad;
        let max = self.max + pad;
        // Slab method. Division by a zero direction component yields an
        // infinity, which min/max handle correctly.
        let inv = ray.direction.recip();
        let t_lo = (min - ray.origin) * inv;
        let t_hi = (max - ray.origin) * inv;
        let t0 = t_lo.min(t_hi).max_element();
        let t1 = t_lo.max(t_hi).min_element();
        if t1 < t0 || t1 < 0.0 {
            return None;
        }
        if t0 < 0.0 {
            // Origin inside the box.
            return Some(RayHitScore::interior());
        }
        (t0 <= params.max_distance).then_some(RayHitScore {
            distance: t0,
            kind: HitKind::Surface,
        })
    }
}

/// An infinite plane pick shape.
///
/// Useful for floor grids and whiteboard-style panels; bound hits with
/// [`HitParams::max_distance`] since the plane itself is unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3,
    /// Plane normal. Need not be unit length; the test normalizes distances
    /// along the ray, not along the normal.
    pub normal: Vec3,
}

impl RayTest for Plane {
    fn ray_test(&self, ray: &Ray, params: &HitParams) -> Option<RayHitScore> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() <= f32::EPSILON {
            // Ray parallel to the plane.
            return None;
        }
        let distance = self.normal.dot(self.point - ray.origin) / denom;
        if distance < 0.0 || distance > params.max_distance {
            return None;
        }
        Some(RayHitScore {
            distance,
            kind: HitKind::Surface,
        })
    }
}

/// The resolved answer to "what is under the pointer this frame".
///
/// The generic `K` is the host's object identifier: any small, copyable
/// handle (an entity id, a slotmap key, a node id).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<K> {
    /// The object the ray struck.
    pub node: K,
    /// World-space hit point.
    pub point: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// Run ray tests over `(key, shape)` candidates and keep the nearest hit.
///
/// This helper is agnostic to any particular scene structure; it assumes the
/// caller has already performed broad-phase culling. Strictly smaller
/// distance wins; on exact ties the first candidate is kept.
pub fn nearest_hit<K, S, I>(candidates: I, ray: &Ray, params: &HitParams) -> Option<RayHit<K>>
where
    K: Copy,
    S: RayTest,
    I: IntoIterator<Item = (K, S)>,
{
    let mut best: Option<RayHit<K>> = None;
    for (key, shape) in candidates {
        if let Some(score) = shape.ray_test(ray, params) {
            let nearer = best.as_ref().is_none_or(|b| score.distance < b.distance);
            if nearer {
                best = Some(RayHit {
                    node: key,
                    point: ray.point_at(score.distance),
                    distance: score.distance,
                });
            }
        }
    }
    best
}

/// Once-per-frame hit-test snapshot contract.
///
/// An event dispatcher calls [`HitProvider::sample`] exactly once when it
/// refreshes its per-frame context and must not re-query mid-frame; button
/// handlers are expected to run against the last sampled state.
pub trait HitProvider<K> {
    /// Report the object currently under the pointer, or `None`.
    fn sample(&self) -> Option<RayHit<K>>;
}
