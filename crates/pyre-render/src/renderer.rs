//! Frame clearing, viewport sizing, and per-object draw dispatch.

use glam::Mat4;

use pyre_gl::{GlApi, GlContext};

use crate::camera::Camera;
use crate::drawable::Drawable;
use crate::shader_program::ShaderProgram;

/// Orchestrates clearing and draw dispatch for one pass.
///
/// Depth testing is deliberately not renderer state: callers toggle it on
/// the context between passes (background with depth test disabled,
/// foreground enabled).
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn set_clear_color<A: GlApi>(&self, gl: &mut GlContext<A>, r: f32, g: f32, b: f32, a: f32) {
        gl.api.set_clear_color(r, g, b, a);
    }

    pub fn clear<A: GlApi>(&self, gl: &mut GlContext<A>) {
        gl.api.clear();
    }

    /// Resize the viewport to the given pixel dimensions.
    pub fn set_size<A: GlApi>(&self, gl: &mut GlContext<A>, width: u32, height: u32) {
        gl.api.viewport(0, 0, width as i32, height as i32);
    }

    /// Draw `drawables` with `program`: pushes the camera's view-projection
    /// once, then an identity model matrix per drawable before its draw.
    pub fn render<A: GlApi>(
        &self,
        gl: &mut GlContext<A>,
        camera: &Camera,
        program: &ShaderProgram,
        drawables: &[&Drawable],
    ) {
        let view_proj = camera.view_projection_matrix();
        program.set_view_proj_matrix(gl, &view_proj);
        for drawable in drawables {
            program.set_model_matrix(gl, &Mat4::IDENTITY);
            program.draw(gl, drawable);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
