//! The [`GlApi`] capability trait and its handle types.

use glam::{Mat4, Vec4};

use crate::error::GlError;

/// Handle to a compiled shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Handle to a GPU buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Resolved uniform slot within a program.
///
/// Lookup returns `None` for names the shader source does not declare;
/// setters treat that as a silent no-op, never a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Resolved vertex attribute slot within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribLocation(pub u32);

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Buffer bind target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data.
    Array,
    /// Index data.
    ElementArray,
}

/// Primitive topology for indexed draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    Triangles,
}

/// The subset of the graphics API the viewer depends on.
///
/// Backends provide shader compilation and linking, buffer lifecycle,
/// uniform upload, attribute wiring, and indexed draws. All operations are
/// synchronous from the caller's perspective and must be issued from the
/// single thread owning the context.
pub trait GlApi {
    /// Compile one shader stage. Fails with the driver's diagnostic log.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, GlError>;

    /// Link compiled stages into a program. Fails with the link log.
    fn link_program(&mut self, shaders: &[ShaderId]) -> Result<ProgramId, GlError>;

    /// Make `program` the active program.
    fn use_program(&mut self, program: ProgramId);

    /// Resolve a named vertex attribute, or `None` if the source omits it.
    fn attrib_location(&mut self, program: ProgramId, name: &str) -> Option<AttribLocation>;

    /// Resolve a named uniform, or `None` if the source omits it.
    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Allocate an immutable buffer and upload `data` to it.
    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<BufferId, GlError>;

    /// Release a buffer. The handle must not be used afterwards.
    fn delete_buffer(&mut self, buffer: BufferId);

    /// Bind `buffer` as current for `target`.
    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId);

    fn uniform_mat4(&mut self, location: UniformLocation, value: &Mat4);
    fn uniform_vec4(&mut self, location: UniformLocation, value: Vec4);
    fn uniform_f32(&mut self, location: UniformLocation, value: f32);

    fn enable_vertex_attrib(&mut self, location: AttribLocation);
    fn disable_vertex_attrib(&mut self, location: AttribLocation);

    /// Point `location` at the currently bound array buffer, interpreted as
    /// tightly packed 4-component f32 tuples.
    fn vertex_attrib_pointer_vec4(&mut self, location: AttribLocation);

    /// Issue an indexed draw of `count` u32 indices from the currently
    /// bound element buffer.
    fn draw_elements_u32(&mut self, mode: PrimitiveMode, count: i32);

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// Clear the color and depth attachments.
    fn clear(&mut self);

    /// Toggle depth testing. A caller-controlled global, not renderer state.
    fn set_depth_test(&mut self, enabled: bool);
}
