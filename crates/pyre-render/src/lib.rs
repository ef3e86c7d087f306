//! Single-pass immediate-mode rendering pipeline: GPU buffer lifecycles,
//! shader slot tables, uniform synchronization, and draw dispatch.

mod camera;
mod drawable;
mod renderer;
mod shader_program;

pub use camera::Camera;
pub use drawable::Drawable;
pub use renderer::Renderer;
pub use shader_program::ShaderProgram;
