//! Real OpenGL backend over [glow].
//!
//! The embedding host owns window and context creation; this backend
//! requires a valid OpenGL context that is current on the calling thread
//! for its whole lifetime, and must only be used from that thread. Handle
//! values exposed through [`GlApi`] are indices into internal tables
//! mapping to the native objects.
//!
//! [glow]: https://docs.rs/glow

use glam::{Mat4, Vec4};
use glow::HasContext;

use crate::api::{
    AttribLocation, BufferId, BufferTarget, GlApi, PrimitiveMode, ProgramId, ShaderId,
    ShaderStage, UniformLocation,
};
use crate::error::GlError;

fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn target_to_gl(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn mode_to_gl(mode: PrimitiveMode) -> u32 {
    match mode {
        PrimitiveMode::Triangles => glow::TRIANGLES,
    }
}

/// [`GlApi`] backend issuing real GL calls through a [`glow::Context`].
pub struct GlowApi {
    gl: glow::Context,
    shaders: Vec<glow::Shader>,
    programs: Vec<glow::Program>,
    buffers: Vec<Option<glow::Buffer>>,
    uniforms: Vec<glow::UniformLocation>,
}

impl GlowApi {
    /// Wrap a current context. Binds a single vertex array object for the
    /// lifetime of the backend, as core profiles require one for attribute
    /// pointers.
    pub fn new(gl: glow::Context) -> Result<Self, GlError> {
        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(GlError::ResourceAllocation)?;
            gl.bind_vertex_array(Some(vao));
        }
        Ok(Self {
            gl,
            shaders: Vec::new(),
            programs: Vec::new(),
            buffers: Vec::new(),
            uniforms: Vec::new(),
        })
    }

    fn native_program(&self, program: ProgramId) -> glow::Program {
        self.programs[program.0 as usize]
    }

    fn native_uniform(&self, location: UniformLocation) -> &glow::UniformLocation {
        &self.uniforms[location.0 as usize]
    }
}

impl GlApi for GlowApi {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, GlError> {
        unsafe {
            let shader = self
                .gl
                .create_shader(stage_to_gl(stage))
                .map_err(GlError::ResourceAllocation)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(GlError::ShaderCompile { stage, log });
            }
            let id = ShaderId(self.shaders.len() as u32);
            self.shaders.push(shader);
            Ok(id)
        }
    }

    fn link_program(&mut self, shaders: &[ShaderId]) -> Result<ProgramId, GlError> {
        unsafe {
            let program = self
                .gl
                .create_program()
                .map_err(GlError::ResourceAllocation)?;
            for shader in shaders {
                self.gl
                    .attach_shader(program, self.shaders[shader.0 as usize]);
            }
            self.gl.link_program(program);
            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(GlError::ShaderLink { log });
            }
            let id = ProgramId(self.programs.len() as u32);
            self.programs.push(program);
            Ok(id)
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe {
            self.gl.use_program(Some(self.native_program(program)));
        }
    }

    fn attrib_location(&mut self, program: ProgramId, name: &str) -> Option<AttribLocation> {
        unsafe {
            self.gl
                .get_attrib_location(self.native_program(program), name)
                .map(AttribLocation)
        }
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let native = unsafe {
            self.gl
                .get_uniform_location(self.native_program(program), name)?
        };
        let id = UniformLocation(self.uniforms.len() as u32);
        self.uniforms.push(native);
        Some(id)
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<BufferId, GlError> {
        unsafe {
            let buffer = self
                .gl
                .create_buffer()
                .map_err(GlError::ResourceAllocation)?;
            let gl_target = target_to_gl(target);
            self.gl.bind_buffer(gl_target, Some(buffer));
            self.gl
                .buffer_data_u8_slice(gl_target, data, glow::STATIC_DRAW);
            let id = BufferId(self.buffers.len() as u32);
            self.buffers.push(Some(buffer));
            Ok(id)
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        if let Some(native) = self.buffers[buffer.0 as usize].take() {
            unsafe {
                self.gl.delete_buffer(native);
            }
        } else {
            log::warn!("delete_buffer on already-deleted buffer {buffer:?}");
        }
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) {
        if let Some(native) = self.buffers[buffer.0 as usize] {
            unsafe {
                self.gl.bind_buffer(target_to_gl(target), Some(native));
            }
        }
    }

    fn uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                Some(self.native_uniform(location)),
                false,
                &value.to_cols_array(),
            );
        }
    }

    fn uniform_vec4(&mut self, location: UniformLocation, value: Vec4) {
        unsafe {
            self.gl.uniform_4_f32(
                Some(self.native_uniform(location)),
                value.x,
                value.y,
                value.z,
                value.w,
            );
        }
    }

    fn uniform_f32(&mut self, location: UniformLocation, value: f32) {
        unsafe {
            self.gl
                .uniform_1_f32(Some(self.native_uniform(location)), value);
        }
    }

    fn enable_vertex_attrib(&mut self, location: AttribLocation) {
        unsafe {
            self.gl.enable_vertex_attrib_array(location.0);
        }
    }

    fn disable_vertex_attrib(&mut self, location: AttribLocation) {
        unsafe {
            self.gl.disable_vertex_attrib_array(location.0);
        }
    }

    fn vertex_attrib_pointer_vec4(&mut self, location: AttribLocation) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(location.0, 4, glow::FLOAT, false, 0, 0);
        }
    }

    fn draw_elements_u32(&mut self, mode: PrimitiveMode, count: i32) {
        unsafe {
            self.gl
                .draw_elements(mode_to_gl(mode), count, glow::UNSIGNED_INT, 0);
        }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(x, y, width, height);
        }
    }

    fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
        }
    }

    fn clear(&mut self) {
        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }
}
