//! The frame-loop driver.
//!
//! Owns the scene (fireball sphere, background quad, their programs and
//! the camera) plus the live/committed parameter snapshots and the tick
//! counter. The embedding host calls [`Viewer::frame`] from its
//! display-refresh callback; `frame` never runs concurrently with itself.

use glam::Vec3;

use pyre_config::ViewerConfig;
use pyre_geometry::{build_icosphere, build_quad};
use pyre_gl::{GlApi, GlContext, ShaderStage};
use pyre_render::{Camera, Drawable, Renderer, ShaderProgram};

use crate::error::ViewerError;
use crate::params::{Command, ParamField, Params};
use crate::shaders;
use crate::stats::FrameStats;

const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const CLEAR_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

/// The viewer: scene state, parameter synchronization, and the per-frame
/// sequence.
pub struct Viewer {
    renderer: Renderer,
    camera: Camera,
    fireball_program: ShaderProgram,
    background_program: ShaderProgram,
    fireball: Drawable,
    background: Drawable,
    /// Snapshot the control panel mutates between frames.
    live: Params,
    /// Snapshot the GPU last saw. Updated only after a successful push.
    committed: Params,
    defaults: Params,
    tick: u64,
    width: u32,
    height: u32,
    stats: FrameStats,
}

impl Viewer {
    /// Build the scene and push every parameter uniform once so the first
    /// frame starts from a fully synchronized GPU state.
    pub fn new<A: GlApi>(
        gl: &mut GlContext<A>,
        config: &ViewerConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, ViewerError> {
        let params = Params::from(config);

        let fireball_program = ShaderProgram::new(
            gl,
            &[
                (ShaderStage::Vertex, shaders::FIREBALL_VERT),
                (ShaderStage::Fragment, shaders::FIREBALL_FRAG),
            ],
        )?;
        let background_program = ShaderProgram::new(
            gl,
            &[
                (ShaderStage::Vertex, shaders::BACKGROUND_VERT),
                (ShaderStage::Fragment, shaders::BACKGROUND_FRAG),
            ],
        )?;

        let fireball = Drawable::create(
            gl,
            &build_icosphere(Vec3::ZERO, 1.0, params.tessellations),
        )?;
        let background = Drawable::create(gl, &build_quad(Vec3::ZERO))?;

        let mut camera = Camera::new(CAMERA_EYE, Vec3::ZERO);
        camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
        camera.update_projection_matrix();

        let renderer = Renderer::new();
        renderer.set_clear_color(
            gl,
            CLEAR_COLOR[0],
            CLEAR_COLOR[1],
            CLEAR_COLOR[2],
            CLEAR_COLOR[3],
        );

        let mut viewer = Self {
            renderer,
            camera,
            fireball_program,
            background_program,
            fireball,
            background,
            live: params,
            committed: params,
            defaults: params,
            tick: 0,
            width,
            height,
            stats: FrameStats::new(),
        };
        viewer.push_all_params(gl);

        log::info!(
            "viewer initialized: {}x{}, {} tessellation rounds",
            width,
            height,
            params.tessellations
        );
        Ok(viewer)
    }

    /// Run one frame: synchronize changed parameters, advance the tick,
    /// then draw the background and the fireball.
    pub fn frame<A: GlApi>(&mut self, gl: &mut GlContext<A>) -> Result<(), ViewerError> {
        self.camera.update();
        self.stats.begin();

        self.renderer.set_size(gl, self.width, self.height);
        self.renderer.clear(gl);

        self.apply_param_changes(gl)?;

        // Exactly one increment per frame; the first frame pushes 1.
        self.tick += 1;
        self.fireball_program.set_tick(gl, self.tick);

        gl.api.set_depth_test(false);
        self.renderer
            .render(gl, &self.camera, &self.background_program, &[&self.background]);

        gl.api.set_depth_test(true);
        self.renderer
            .render(gl, &self.camera, &self.fireball_program, &[&self.fireball]);

        self.stats.end();
        Ok(())
    }

    /// Update viewport and camera projection for a new surface size. Called
    /// by the host outside the per-frame sequence.
    pub fn resize<A: GlApi>(&mut self, gl: &mut GlContext<A>, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.renderer.set_size(gl, width, height);
        self.camera
            .set_aspect_ratio(width as f32 / height.max(1) as f32);
        self.camera.update_projection_matrix();
        log::debug!("viewport resized to {}x{}", width, height);
    }

    /// Dispatch a control-panel command.
    pub fn handle_command<A: GlApi>(
        &mut self,
        gl: &mut GlContext<A>,
        command: Command,
    ) -> Result<(), ViewerError> {
        match command {
            Command::LoadScene => self.rebuild_fireball(gl),
            Command::Reset => {
                self.live = self.defaults;
                Ok(())
            }
        }
    }

    /// The snapshot the control panel mutates. Changes take effect on the
    /// next frame.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.live
    }

    pub fn params(&self) -> Params {
        self.live
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Push only the fields that changed since the last committed
    /// snapshot, then commit.
    fn apply_param_changes<A: GlApi>(&mut self, gl: &mut GlContext<A>) -> Result<(), ViewerError> {
        let changed = Params::diff(&self.committed, &self.live);
        for field in changed {
            match field {
                ParamField::Tessellations => self.rebuild_fireball(gl)?,
                ParamField::InnerColor => {
                    let color = self.live.inner_color_vec4();
                    self.fireball_program.set_inner_color(gl, color);
                    self.background_program.set_inner_color(gl, color);
                }
                ParamField::OuterColor => {
                    let color = self.live.outer_color_vec4();
                    self.fireball_program.set_outer_color(gl, color);
                    self.background_program.set_outer_color(gl, color);
                }
                ParamField::RadialBias => {
                    self.fireball_program.set_radial_bias(gl, self.live.radial_bias);
                }
                ParamField::RadialGain => {
                    self.fireball_program.set_radial_gain(gl, self.live.radial_gain);
                }
                ParamField::ColorBias => {
                    self.fireball_program.set_color_bias(gl, self.live.color_bias);
                }
                ParamField::ColorGain => {
                    self.fireball_program.set_color_gain(gl, self.live.color_gain);
                }
            }
        }
        self.committed = self.live;
        Ok(())
    }

    /// Replace the sphere with one built from the live tessellation count.
    /// The old drawable's buffers are released, never mutated in place.
    fn rebuild_fireball<A: GlApi>(&mut self, gl: &mut GlContext<A>) -> Result<(), ViewerError> {
        let mesh = build_icosphere(Vec3::ZERO, 1.0, self.live.tessellations);
        log::info!(
            "rebuilding fireball: {} tessellation rounds, {} vertices",
            self.live.tessellations,
            mesh.vertex_count()
        );
        let next = Drawable::create(gl, &mesh)?;
        let old = std::mem::replace(&mut self.fireball, next);
        old.destroy(gl);
        Ok(())
    }

    fn push_all_params<A: GlApi>(&mut self, gl: &mut GlContext<A>) {
        let inner = self.live.inner_color_vec4();
        let outer = self.live.outer_color_vec4();
        self.fireball_program.set_inner_color(gl, inner);
        self.fireball_program.set_outer_color(gl, outer);
        self.background_program.set_inner_color(gl, inner);
        self.background_program.set_outer_color(gl, outer);
        self.fireball_program.set_radial_bias(gl, self.live.radial_bias);
        self.fireball_program.set_radial_gain(gl, self.live.radial_gain);
        self.fireball_program.set_color_bias(gl, self.live.color_bias);
        self.fireball_program.set_color_gain(gl, self.live.color_gain);
    }
}
