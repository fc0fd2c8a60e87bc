//! # ELYSIUM Core Types
//!
//! Value types shared between the protocol codec and the simulation layers:
//! vectors, rotations, and the 16-byte identifiers that name everything in
//! the world.
//!
//! ## Design Rules
//!
//! 1. **Plain data** - every type here is `Copy`, `Pod`, and `#[repr(C)]`
//! 2. **No behavior beyond math** - simulation logic lives elsewhere
//! 3. **Wire-friendly** - field layouts match what the protocol encodes

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod id;
pub mod math;

pub use id::WorldId;
pub use math::{Quaternion, Vec3, Vec3d};
