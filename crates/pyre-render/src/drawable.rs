//! GPU-resident mesh buffers for one drawable object.

use pyre_geometry::MeshData;
use pyre_gl::{BufferId, BufferTarget, GlApi, GlContext, GlError, PrimitiveMode};

/// Owns the position/normal/index buffers for one mesh configuration.
///
/// A drawable is created once per geometry configuration and replaced, not
/// mutated, when the configuration changes: callers [`destroy`](Self::destroy)
/// the old drawable and [`create`](Self::create) a new one.
/// Binding mutates global GPU bind-state; the draw contract in
/// [`ShaderProgram::draw`](crate::ShaderProgram::draw) pairs every
/// attribute enable with a matching disable so no state leaks into
/// unrelated draws.
pub struct Drawable {
    position_buffer: BufferId,
    normal_buffer: Option<BufferId>,
    index_buffer: BufferId,
    element_count: i32,
}

impl Drawable {
    /// Allocate GPU buffers from the CPU-side arrays and upload them.
    /// Propagates allocation failure from the graphics-API boundary.
    pub fn create<A: GlApi>(gl: &mut GlContext<A>, mesh: &MeshData) -> Result<Self, GlError> {
        let position_buffer = gl
            .api
            .create_buffer(BufferTarget::Array, bytemuck::cast_slice(&mesh.positions))?;
        let normal_buffer = match &mesh.normals {
            Some(normals) => Some(
                gl.api
                    .create_buffer(BufferTarget::Array, bytemuck::cast_slice(normals))?,
            ),
            None => None,
        };
        let index_buffer = gl.api.create_buffer(
            BufferTarget::ElementArray,
            bytemuck::cast_slice(&mesh.indices),
        )?;

        log::debug!(
            "drawable created: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.indices.len()
        );

        Ok(Self {
            position_buffer,
            normal_buffer,
            index_buffer,
            element_count: mesh.indices.len() as i32,
        })
    }

    /// Release the GPU buffers. Consumes the drawable so stale handles
    /// cannot be bound afterwards.
    pub fn destroy<A: GlApi>(self, gl: &mut GlContext<A>) {
        gl.api.delete_buffer(self.position_buffer);
        if let Some(normal_buffer) = self.normal_buffer {
            gl.api.delete_buffer(normal_buffer);
        }
        gl.api.delete_buffer(self.index_buffer);
    }

    /// Bind the position buffer. Always present; returns `true`.
    pub fn bind_position<A: GlApi>(&self, gl: &mut GlContext<A>) -> bool {
        gl.api.bind_buffer(BufferTarget::Array, self.position_buffer);
        true
    }

    /// Bind the normal buffer if this drawable has one. Returns whether the
    /// channel exists so callers can skip attribute wiring gracefully.
    pub fn bind_normal<A: GlApi>(&self, gl: &mut GlContext<A>) -> bool {
        match self.normal_buffer {
            Some(buffer) => {
                gl.api.bind_buffer(BufferTarget::Array, buffer);
                true
            }
            None => false,
        }
    }

    /// Bind the index buffer for draw issuance.
    pub fn bind_index<A: GlApi>(&self, gl: &mut GlContext<A>) {
        gl.api
            .bind_buffer(BufferTarget::ElementArray, self.index_buffer);
    }

    /// Primitive topology. Triangles for all geometry in this system.
    pub fn draw_mode(&self) -> PrimitiveMode {
        PrimitiveMode::Triangles
    }

    /// Number of indices to draw.
    pub fn element_count(&self) -> i32 {
        self.element_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use pyre_geometry::{build_icosphere, build_quad};
    use pyre_gl::{GlCall, RecordingApi};

    #[test]
    fn test_create_allocates_three_buffers_for_sphere() {
        let mut gl = GlContext::new(RecordingApi::new());
        let mesh = build_icosphere(Vec3::ZERO, 1.0, 0);
        let drawable = Drawable::create(&mut gl, &mesh).unwrap();
        assert_eq!(gl.api.live_buffer_count(), 3);
        assert_eq!(drawable.element_count(), 60); // 20 triangles
    }

    #[test]
    fn test_quad_has_no_normal_channel() {
        let mut gl = GlContext::new(RecordingApi::new());
        let quad = Drawable::create(&mut gl, &build_quad(Vec3::ZERO)).unwrap();
        assert_eq!(gl.api.live_buffer_count(), 2);
        assert!(!quad.bind_normal(&mut gl));
        assert!(quad.bind_position(&mut gl));
    }

    #[test]
    fn test_destroy_releases_all_buffers() {
        let mut gl = GlContext::new(RecordingApi::new());
        let mesh = build_icosphere(Vec3::ZERO, 1.0, 1);
        let drawable = Drawable::create(&mut gl, &mesh).unwrap();
        drawable.destroy(&mut gl);
        assert_eq!(gl.api.live_buffer_count(), 0);
    }

    #[test]
    fn test_upload_sizes_match_mesh() {
        let mut gl = GlContext::new(RecordingApi::new());
        let mesh = build_icosphere(Vec3::ZERO, 1.0, 0);
        let _drawable = Drawable::create(&mut gl, &mesh).unwrap();

        let uploads: Vec<(BufferTarget, usize)> = gl
            .api
            .calls()
            .iter()
            .filter_map(|c| match c {
                GlCall::CreateBuffer {
                    target, byte_len, ..
                } => Some((*target, *byte_len)),
                _ => None,
            })
            .collect();
        assert_eq!(
            uploads,
            vec![
                (BufferTarget::Array, 12 * 16),        // 12 vec4 positions
                (BufferTarget::Array, 12 * 16),        // 12 vec4 normals
                (BufferTarget::ElementArray, 60 * 4),  // 60 u32 indices
            ]
        );
    }
}
