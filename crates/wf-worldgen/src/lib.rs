//! Seeded world generation and procedural exploration for Wayfarer.
//!
//! A run's seed string is hashed into an owned [`rand::rngs::StdRng`] that is
//! passed down explicitly; nothing here touches a process-wide random source.
//! The [`WorldGenerator`] turns a template catalog into a [`wf_core::Run`],
//! and the [`Explorer`] grows that run's scene graph when the player heads
//! into uncharted directions.

pub mod error;
pub mod explore;
pub mod flourish;
pub mod generator;
pub mod seed;

pub use error::{GenError, GenResult};
pub use explore::{DEFAULT_SPARSE_THRESHOLD, Exploration, Explorer, Terrain};
pub use generator::{WorldGenerator, ensure_scene};
pub use seed::Seed;
