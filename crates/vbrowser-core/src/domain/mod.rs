//! Domain entities for the virtual browser bridge.
//!
//! This module contains pure logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of a clean architecture holds the rules that make the
//! system what it is.  Here that means three things:
//!
//! - How a point in 3D world space lands on the 2D browser viewport.
//! - How often continuous input (pointer motion, wheel scroll) may be
//!   forwarded to the remote session.
//! - How incoming video frames become a texture the renderer can draw.
//!
//! None of these need a network, a GPU or a clock of their own: time is passed
//! in as plain milliseconds, and the texture is reached through the
//! [`frame::FrameTarget`] trait.

/// Surface geometry and the 3D → 2D coordinate mapper.
pub mod geometry;

/// Per-class rate limiting of pointer motion and wheel events.
pub mod throttle;

/// Video frame presentation state machine.
pub mod frame;
