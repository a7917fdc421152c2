// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the broad phase.
//!
//! Determinism notes:
//! - Interval tests are closed on both ends so touching boxes pair up and
//!   contact boundaries do not churn between frames.
//! - Box extents are validated at construction; a live `Aabb` always has
//!   finite, non-negative width, height and depth.

#[doc = "Axis-aligned bounding boxes (min corner + extents)."]
pub mod aabb;
#[doc = "Three-component float vector."]
pub mod vec3;
