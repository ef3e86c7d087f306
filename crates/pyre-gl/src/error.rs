//! Error types for the graphics boundary.

use thiserror::Error;

use crate::api::ShaderStage;

/// Failures at the graphics-API boundary.
///
/// Shader compile and link failures are fatal and carry the driver's
/// diagnostic log; a broken shader makes the whole viewer visually
/// meaningless, so they are surfaced immediately rather than swallowed.
/// Absent uniform or attribute slots are deliberately *not* errors.
#[derive(Debug, Error)]
pub enum GlError {
    /// A shader stage failed to compile.
    #[error("{stage:?} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    /// Program linking failed.
    #[error("shader program failed to link: {log}")]
    ShaderLink { log: String },

    /// The driver refused to allocate a GPU resource.
    #[error("GPU resource allocation failed: {0}")]
    ResourceAllocation(String),
}
