//! A deterministic, GPU-free [`GlApi`] backend for tests.
//!
//! Every operation is recorded as a [`GlCall`] value. Uniform and
//! attribute resolution is modeled from the shader source text that was
//! compiled into the program: a name resolves only if it occurs in the
//! source, so tests can build shader variants that omit `u_Tick` (or any
//! other slot) and assert that setters no-op for them.

use std::collections::HashMap;

use glam::{Mat4, Vec4};

use crate::api::{
    AttribLocation, BufferId, BufferTarget, GlApi, PrimitiveMode, ProgramId, ShaderId,
    ShaderStage, UniformLocation,
};
use crate::error::GlError;

/// One recorded backend operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CompileShader {
        stage: ShaderStage,
        shader: ShaderId,
    },
    LinkProgram(ProgramId),
    UseProgram(ProgramId),
    CreateBuffer {
        target: BufferTarget,
        buffer: BufferId,
        byte_len: usize,
    },
    DeleteBuffer(BufferId),
    BindBuffer {
        target: BufferTarget,
        buffer: BufferId,
    },
    UniformMat4 {
        location: UniformLocation,
        value: [f32; 16],
    },
    UniformVec4 {
        location: UniformLocation,
        value: [f32; 4],
    },
    UniformF32 {
        location: UniformLocation,
        value: f32,
    },
    EnableVertexAttrib(AttribLocation),
    DisableVertexAttrib(AttribLocation),
    VertexAttribPointerVec4(AttribLocation),
    DrawElements {
        mode: PrimitiveMode,
        count: i32,
    },
    Viewport {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    SetClearColor {
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    },
    Clear,
    SetDepthTest(bool),
}

#[derive(Debug, Default)]
struct ProgramRecord {
    /// Concatenated source of all attached stages, used for name resolution.
    source: String,
    uniforms: HashMap<String, UniformLocation>,
    attribs: HashMap<String, AttribLocation>,
    next_uniform: u32,
    next_attrib: u32,
}

/// Recording [`GlApi`] backend.
#[derive(Debug, Default)]
pub struct RecordingApi {
    calls: Vec<GlCall>,
    shader_sources: HashMap<ShaderId, String>,
    programs: HashMap<ProgramId, ProgramRecord>,
    buffers: HashMap<BufferId, usize>,
    next_id: u32,
    fail_next_compile: Option<String>,
    fail_next_link: Option<String>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, in issue order.
    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    /// Drop the recorded calls, keeping programs and buffers alive. Useful
    /// for asserting on a single frame after setup.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Make the next `compile_shader` fail with the given log.
    pub fn fail_next_compile(&mut self, log: impl Into<String>) {
        self.fail_next_compile = Some(log.into());
    }

    /// Make the next `link_program` fail with the given log.
    pub fn fail_next_link(&mut self, log: impl Into<String>) {
        self.fail_next_link = Some(log.into());
    }

    /// Number of buffers currently allocated and not deleted.
    pub fn live_buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Whether `buffer` is allocated and not deleted.
    pub fn buffer_is_live(&self, buffer: BufferId) -> bool {
        self.buffers.contains_key(&buffer)
    }

    /// Every f32 value uploaded to `location`, in order.
    pub fn f32_writes(&self, location: UniformLocation) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GlCall::UniformF32 { location: l, value } if *l == location => Some(*value),
                _ => None,
            })
            .collect()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GlApi for RecordingApi {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, GlError> {
        if let Some(log) = self.fail_next_compile.take() {
            return Err(GlError::ShaderCompile { stage, log });
        }
        let shader = ShaderId(self.next_id());
        self.shader_sources.insert(shader, source.to_string());
        self.calls.push(GlCall::CompileShader { stage, shader });
        Ok(shader)
    }

    fn link_program(&mut self, shaders: &[ShaderId]) -> Result<ProgramId, GlError> {
        if let Some(log) = self.fail_next_link.take() {
            return Err(GlError::ShaderLink { log });
        }
        let mut source = String::new();
        for shader in shaders {
            if let Some(s) = self.shader_sources.get(shader) {
                source.push_str(s);
                source.push('\n');
            }
        }
        let program = ProgramId(self.next_id());
        self.programs.insert(
            program,
            ProgramRecord {
                source,
                ..ProgramRecord::default()
            },
        );
        self.calls.push(GlCall::LinkProgram(program));
        Ok(program)
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn attrib_location(&mut self, program: ProgramId, name: &str) -> Option<AttribLocation> {
        let record = self.programs.get_mut(&program)?;
        if !record.source.contains(name) {
            return None;
        }
        if let Some(&loc) = record.attribs.get(name) {
            return Some(loc);
        }
        let loc = AttribLocation(record.next_attrib);
        record.next_attrib += 1;
        record.attribs.insert(name.to_string(), loc);
        Some(loc)
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let record = self.programs.get_mut(&program)?;
        if !record.source.contains(name) {
            return None;
        }
        if let Some(&loc) = record.uniforms.get(name) {
            return Some(loc);
        }
        // Offset per program so locations from different programs never
        // collide in assertions.
        let loc = UniformLocation(program.0 * 100 + record.next_uniform);
        record.next_uniform += 1;
        record.uniforms.insert(name.to_string(), loc);
        Some(loc)
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<BufferId, GlError> {
        let buffer = BufferId(self.next_id());
        self.buffers.insert(buffer, data.len());
        self.calls.push(GlCall::CreateBuffer {
            target,
            buffer,
            byte_len: data.len(),
        });
        Ok(buffer)
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
        self.calls.push(GlCall::DeleteBuffer(buffer));
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) {
        self.calls.push(GlCall::BindBuffer { target, buffer });
    }

    fn uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        self.calls.push(GlCall::UniformMat4 {
            location,
            value: value.to_cols_array(),
        });
    }

    fn uniform_vec4(&mut self, location: UniformLocation, value: Vec4) {
        self.calls.push(GlCall::UniformVec4 {
            location,
            value: value.to_array(),
        });
    }

    fn uniform_f32(&mut self, location: UniformLocation, value: f32) {
        self.calls.push(GlCall::UniformF32 { location, value });
    }

    fn enable_vertex_attrib(&mut self, location: AttribLocation) {
        self.calls.push(GlCall::EnableVertexAttrib(location));
    }

    fn disable_vertex_attrib(&mut self, location: AttribLocation) {
        self.calls.push(GlCall::DisableVertexAttrib(location));
    }

    fn vertex_attrib_pointer_vec4(&mut self, location: AttribLocation) {
        self.calls.push(GlCall::VertexAttribPointerVec4(location));
    }

    fn draw_elements_u32(&mut self, mode: PrimitiveMode, count: i32) {
        self.calls.push(GlCall::DrawElements { mode, count });
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(GlCall::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.calls.push(GlCall::SetClearColor { r, g, b, a });
    }

    fn clear(&mut self) {
        self.calls.push(GlCall::Clear);
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.calls.push(GlCall::SetDepthTest(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(api: &mut RecordingApi, source: &str) -> ProgramId {
        let vs = api.compile_shader(ShaderStage::Vertex, source).unwrap();
        api.link_program(&[vs]).unwrap()
    }

    #[test]
    fn test_declared_names_resolve() {
        let mut api = RecordingApi::new();
        let program = link(&mut api, "uniform float u_Tick; in vec4 vs_Pos;");
        assert!(api.uniform_location(program, "u_Tick").is_some());
        assert!(api.attrib_location(program, "vs_Pos").is_some());
    }

    #[test]
    fn test_undeclared_names_do_not_resolve() {
        let mut api = RecordingApi::new();
        let program = link(&mut api, "uniform float u_Tick;");
        assert!(api.uniform_location(program, "u_innerColor").is_none());
        assert!(api.attrib_location(program, "vs_Nor").is_none());
    }

    #[test]
    fn test_resolution_is_stable() {
        let mut api = RecordingApi::new();
        let program = link(&mut api, "uniform float u_Tick; uniform vec4 u_innerColor;");
        let a = api.uniform_location(program, "u_Tick");
        let b = api.uniform_location(program, "u_Tick");
        assert_eq!(a, b);
        assert_ne!(a, api.uniform_location(program, "u_innerColor"));
    }

    #[test]
    fn test_scripted_compile_failure() {
        let mut api = RecordingApi::new();
        api.fail_next_compile("0:1: syntax error");
        let err = api
            .compile_shader(ShaderStage::Fragment, "not glsl")
            .unwrap_err();
        match err {
            GlError::ShaderCompile { stage, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(log.contains("syntax error"));
            }
            other => panic!("expected ShaderCompile, got {other:?}"),
        }
        // The failure is one-shot.
        assert!(api.compile_shader(ShaderStage::Fragment, "ok").is_ok());
    }

    #[test]
    fn test_buffer_lifecycle_tracking() {
        let mut api = RecordingApi::new();
        let buffer = api.create_buffer(BufferTarget::Array, &[0u8; 16]).unwrap();
        assert!(api.buffer_is_live(buffer));
        assert_eq!(api.live_buffer_count(), 1);
        api.delete_buffer(buffer);
        assert!(!api.buffer_is_live(buffer));
        assert_eq!(api.live_buffer_count(), 0);
    }

    #[test]
    fn test_calls_recorded_in_order() {
        let mut api = RecordingApi::new();
        api.set_clear_color(0.2, 0.2, 0.2, 1.0);
        api.clear();
        api.set_depth_test(false);
        assert_eq!(
            api.calls(),
            &[
                GlCall::SetClearColor {
                    r: 0.2,
                    g: 0.2,
                    b: 0.2,
                    a: 1.0
                },
                GlCall::Clear,
                GlCall::SetDepthTest(false),
            ]
        );
    }
}
