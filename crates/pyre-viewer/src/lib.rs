//! The fireball viewer: frame-loop driver, live parameter synchronization,
//! and the embedded shader programs.
//!
//! The embedding host owns the window and the OpenGL context; this crate
//! drives one frame at a time from the host's display-refresh callback.
//! Between frames the host's control panel mutates the live [`Params`]
//! snapshot; the viewer diffs it against the committed copy each frame and
//! pushes only the changed uniforms.

mod error;
mod params;
mod shaders;
mod stats;
mod viewer;

pub use error::ViewerError;
pub use params::{Command, ParamField, Params};
pub use shaders::{BACKGROUND_FRAG, BACKGROUND_VERT, FIREBALL_FRAG, FIREBALL_VERT};
pub use stats::FrameStats;
pub use viewer::Viewer;
