use pyre_gl::GlError;
use thiserror::Error;

/// Errors raised while constructing or driving the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The embedding host could not supply a current graphics context.
    #[error("no graphics context is current on this thread")]
    MissingGraphicsContext,

    /// A backend operation failed; shader compile and link failures carry
    /// the driver's diagnostic log.
    #[error(transparent)]
    Graphics(#[from] GlError),
}
