//! Shader program wrapper with a fixed slot table.
//!
//! Uniform and attribute locations are resolved by name exactly once, at
//! construction, into a struct of `Option` slots. Per-frame setters are
//! O(1) lookups; an absent slot (`None`) means the shader source does not
//! declare that name, and the setter silently no-ops — shader variants
//! legitimately omit channels, so this is not an error.

use glam::{Mat4, Vec4};

use pyre_gl::{AttribLocation, GlApi, GlContext, GlError, ShaderStage, UniformLocation};

use crate::drawable::Drawable;

#[derive(Debug, Default)]
struct UniformSlots {
    model: Option<UniformLocation>,
    model_inv_tr: Option<UniformLocation>,
    view_proj: Option<UniformLocation>,
    inner_color: Option<UniformLocation>,
    outer_color: Option<UniformLocation>,
    tick: Option<UniformLocation>,
    radial_bias: Option<UniformLocation>,
    radial_gain: Option<UniformLocation>,
    color_bias: Option<UniformLocation>,
    color_gain: Option<UniformLocation>,
}

#[derive(Debug, Default)]
struct AttribSlots {
    position: Option<AttribLocation>,
    normal: Option<AttribLocation>,
    color: Option<AttribLocation>,
}

/// A compiled and linked GPU program with its resolved slots.
#[derive(Debug)]
pub struct ShaderProgram {
    program: pyre_gl::ProgramId,
    uniforms: UniformSlots,
    attribs: AttribSlots,
}

impl ShaderProgram {
    /// Compile the given stages, link them, and resolve the slot table.
    ///
    /// Compilation and linking failures are fatal and carry the driver's
    /// diagnostic log.
    pub fn new<A: GlApi>(
        gl: &mut GlContext<A>,
        stages: &[(ShaderStage, &str)],
    ) -> Result<Self, GlError> {
        let mut shaders = Vec::with_capacity(stages.len());
        for (stage, source) in stages {
            shaders.push(gl.api.compile_shader(*stage, source)?);
        }
        let program = gl.api.link_program(&shaders)?;

        let uniforms = UniformSlots {
            model: gl.api.uniform_location(program, "u_Model"),
            model_inv_tr: gl.api.uniform_location(program, "u_ModelInvTr"),
            view_proj: gl.api.uniform_location(program, "u_ViewProj"),
            inner_color: gl.api.uniform_location(program, "u_innerColor"),
            outer_color: gl.api.uniform_location(program, "u_outerColor"),
            tick: gl.api.uniform_location(program, "u_Tick"),
            radial_bias: gl.api.uniform_location(program, "u_radialBias"),
            radial_gain: gl.api.uniform_location(program, "u_radialGain"),
            color_bias: gl.api.uniform_location(program, "u_colorBias"),
            color_gain: gl.api.uniform_location(program, "u_colorGain"),
        };
        let attribs = AttribSlots {
            position: gl.api.attrib_location(program, "vs_Pos"),
            normal: gl.api.attrib_location(program, "vs_Nor"),
            color: gl.api.attrib_location(program, "vs_Col"),
        };

        Ok(Self {
            program,
            uniforms,
            attribs,
        })
    }

    /// Activate this program, skipping the call when already active.
    pub fn use_program<A: GlApi>(&self, gl: &mut GlContext<A>) {
        gl.use_program(self.program);
    }

    /// Upload the model matrix and, when the shader declares it, the
    /// derived inverse-transpose used for normal transformation under
    /// non-uniform scale. The inverse-transpose is never supplied by the
    /// caller.
    pub fn set_model_matrix<A: GlApi>(&self, gl: &mut GlContext<A>, model: &Mat4) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.model {
            gl.api.uniform_mat4(location, model);
        }
        if let Some(location) = self.uniforms.model_inv_tr {
            let inv_tr = model.inverse().transpose();
            gl.api.uniform_mat4(location, &inv_tr);
        }
    }

    pub fn set_view_proj_matrix<A: GlApi>(&self, gl: &mut GlContext<A>, view_proj: &Mat4) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.view_proj {
            gl.api.uniform_mat4(location, view_proj);
        }
    }

    pub fn set_inner_color<A: GlApi>(&self, gl: &mut GlContext<A>, color: Vec4) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.inner_color {
            gl.api.uniform_vec4(location, color);
        }
    }

    pub fn set_outer_color<A: GlApi>(&self, gl: &mut GlContext<A>, color: Vec4) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.outer_color {
            gl.api.uniform_vec4(location, color);
        }
    }

    pub fn set_radial_bias<A: GlApi>(&self, gl: &mut GlContext<A>, bias: f32) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.radial_bias {
            gl.api.uniform_f32(location, bias);
        }
    }

    pub fn set_radial_gain<A: GlApi>(&self, gl: &mut GlContext<A>, gain: f32) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.radial_gain {
            gl.api.uniform_f32(location, gain);
        }
    }

    pub fn set_color_bias<A: GlApi>(&self, gl: &mut GlContext<A>, bias: f32) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.color_bias {
            gl.api.uniform_f32(location, bias);
        }
    }

    pub fn set_color_gain<A: GlApi>(&self, gl: &mut GlContext<A>, gain: f32) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.color_gain {
            gl.api.uniform_f32(location, gain);
        }
    }

    /// Upload the animation phase. The tick counter is unbounded on the
    /// CPU side; GL float uniforms are the narrowing point.
    pub fn set_tick<A: GlApi>(&self, gl: &mut GlContext<A>, tick: u64) {
        self.use_program(gl);
        if let Some(location) = self.uniforms.tick {
            gl.api.uniform_f32(location, tick as f32);
        }
    }

    /// Draw one object: bind the attribute channels both this program
    /// declares and the drawable provides, issue the indexed draw, then
    /// disable exactly the attributes that were enabled.
    pub fn draw<A: GlApi>(&self, gl: &mut GlContext<A>, drawable: &Drawable) {
        self.use_program(gl);

        let mut enabled: Vec<AttribLocation> = Vec::with_capacity(2);

        if let Some(location) = self.attribs.position
            && drawable.bind_position(gl)
        {
            gl.api.enable_vertex_attrib(location);
            gl.api.vertex_attrib_pointer_vec4(location);
            enabled.push(location);
        }
        if let Some(location) = self.attribs.normal
            && drawable.bind_normal(gl)
        {
            gl.api.enable_vertex_attrib(location);
            gl.api.vertex_attrib_pointer_vec4(location);
            enabled.push(location);
        }

        drawable.bind_index(gl);
        gl.api
            .draw_elements_u32(drawable.draw_mode(), drawable.element_count());

        for location in enabled {
            gl.api.disable_vertex_attrib(location);
        }
    }

    /// Whether the shader declares a color attribute. Unused by current
    /// drawables but part of the known attribute interface.
    pub fn has_color_attrib(&self) -> bool {
        self.attribs.color.is_some()
    }
}
