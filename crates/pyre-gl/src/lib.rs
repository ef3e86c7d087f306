//! Graphics capability boundary for the fireball viewer.
//!
//! The viewer's rendering code is written against the narrow [`GlApi`]
//! trait rather than raw OpenGL, so the whole pipeline can be exercised
//! in tests without a GPU. Two backends are provided:
//!
//! - [`GlowApi`] issues real OpenGL calls through [glow]. It requires a
//!   valid, current OpenGL context supplied by the embedding host.
//! - [`RecordingApi`] records every call as a [`GlCall`] value and models
//!   uniform/attribute resolution from the shader source text, for
//!   GPU-free assertions.
//!
//! [`GlContext`] wraps a backend together with the process-wide
//! "currently active program" flag; it is created once at startup and
//! lives for the process.
//!
//! [glow]: https://docs.rs/glow

mod api;
mod context;
mod error;
mod glow_backend;
mod recording;

pub use api::{
    AttribLocation, BufferId, BufferTarget, GlApi, PrimitiveMode, ProgramId, ShaderId,
    ShaderStage, UniformLocation,
};
pub use context::GlContext;
pub use error::GlError;
pub use glow_backend::GlowApi;
pub use recording::{GlCall, RecordingApi};
