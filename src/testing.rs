//! A software [`Gpu`] for tests. Rasterizes into in-memory RGBA framebuffers.
use std::{cell::RefCell, collections::HashMap, ffi::CStr, io, rc::Rc};

use crate::{
    config::{Rgba, Viewport},
    error::{RenderError, Result},
    gl_wrappers::ShaderType,
    gpu::Gpu,
    render_vec::{RenderVec, VertexLayout},
};

pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
/// What every pixel starts as before anything touches it.
pub const UNTOUCHED: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

/// A `Write` sink that can be inspected after being boxed away.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.borrow())
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A `Write` sink whose every write fails, like stdout closed under us.
pub struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
    fn flush(&mut self) -> io::Result<()> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
}

pub struct SoftProgram {
    inputs: Vec<String>,
    /// The bundled fragment stage writes one constant color.
    color: Rgba,
}

pub struct SoftGeometry {
    positions: Vec<[f32; 2]>,
}

pub struct SoftTarget {
    id: u32,
}

pub struct SoftGpu {
    width: i32,
    height: i32,
    framebuffers: HashMap<u32, Vec<Rgba>>,
    current: u32,
    viewport: Viewport,
    programs_built: usize,
    detects: usize,
    releases: usize,
    used: Vec<u32>,
    reads: Vec<(i32, i32)>,
    fail_compile: Option<ShaderType>,
    fail_link: bool,
    fail_draws: bool,
}

impl SoftGpu {
    pub fn new(width: i32, height: i32) -> Self {
        let mut framebuffers = HashMap::new();
        framebuffers.insert(0, vec![UNTOUCHED; (width * height) as usize]);
        Self {
            width,
            height,
            framebuffers,
            current: 0,
            viewport: Viewport::new(0, 0, width, height),
            programs_built: 0,
            detects: 0,
            releases: 0,
            used: vec![],
            reads: vec![],
            fail_compile: None,
            fail_link: false,
            fail_draws: false,
        }
    }

    /// Make `id` the framebuffer the host considers active, like a host swapping FBOs.
    pub fn switch_framebuffer(&mut self, id: u32) {
        let len = (self.width * self.height) as usize;
        self.framebuffers
            .entry(id)
            .or_insert_with(|| vec![UNTOUCHED; len]);
        self.current = id;
    }

    pub fn fail_compile(&mut self, stage: ShaderType) {
        self.fail_compile = Some(stage);
    }
    pub fn fail_link(&mut self) {
        self.fail_link = true;
    }
    pub fn fail_draws(&mut self) {
        self.fail_draws = true;
    }

    pub fn programs_built(&self) -> usize {
        self.programs_built
    }
    pub fn detects(&self) -> usize {
        self.detects
    }
    pub fn releases(&self) -> usize {
        self.releases
    }
    pub fn used_framebuffers(&self) -> &[u32] {
        &self.used
    }
    pub fn reads(&self) -> &[(i32, i32)] {
        &self.reads
    }

    pub fn pixel(&self, x: i32, y: i32) -> Rgba {
        self.framebuffer_pixel(self.current, x, y)
    }
    pub fn framebuffer_pixel(&self, id: u32, x: i32, y: i32) -> Rgba {
        self.framebuffers[&id][self.index(x, y)]
    }
    /// Every pixel of the active framebuffer with its coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32, Rgba)> + '_ {
        let width = self.width;
        self.framebuffers[&self.current]
            .iter()
            .enumerate()
            .map(move |(i, color)| (i as i32 % width, i as i32 / width, *color))
    }
    pub fn snapshot(&self) -> Vec<Rgba> {
        self.framebuffers[&self.current].clone()
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// `region` clipped to the surface, as exclusive pixel ranges.
    fn clip(&self, region: Viewport) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
        (
            region.x.max(0)..region.right().min(self.width),
            region.y.max(0)..region.top().min(self.height),
        )
    }

    fn fill(&mut self, id: u32, x: i32, y: i32, color: Rgba) {
        let index = self.index(x, y);
        if let Some(framebuffer) = self.framebuffers.get_mut(&id) {
            framebuffer[index] = color;
        }
    }

    fn to_window(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        let vp = self.viewport;
        [
            vp.x as f32 + (x + 1.0) * 0.5 * vp.width as f32,
            vp.y as f32 + (y + 1.0) * 0.5 * vp.height as f32,
        ]
    }

    fn raster_triangle(&mut self, corners: [[f32; 2]; 3], color: Rgba) {
        let [a, b, c] = corners.map(|corner| self.to_window(corner));
        let edge = |p: [f32; 2], q: [f32; 2], r: [f32; 2]| {
            (q[0] - p[0]) * (r[1] - p[1]) - (q[1] - p[1]) * (r[0] - p[0])
        };
        if edge(a, b, c) == 0.0 {
            return;
        }
        let (xs, ys) = self.clip(self.viewport);
        for y in ys {
            for x in xs.clone() {
                let p = [x as f32 + 0.5, y as f32 + 0.5];
                let (e0, e1, e2) = (edge(a, b, p), edge(b, c, p), edge(c, a, p));
                let inside = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0)
                    || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
                if inside {
                    self.fill(self.current, x, y, color);
                }
            }
        }
    }
}

/// Names of the `in` declarations of a GLSL vertex stage.
fn vertex_inputs(source: &CStr) -> Vec<String> {
    source
        .to_string_lossy()
        .lines()
        .filter_map(|line| line.trim().strip_prefix("in "))
        .filter_map(|decl| decl.trim_end_matches(';').split_whitespace().last())
        .map(str::to_owned)
        .collect()
}

impl Gpu for SoftGpu {
    type Program = SoftProgram;
    type Geometry = SoftGeometry;
    type Target = SoftTarget;

    fn build_program(&mut self, vert_source: &CStr, _frag_source: &CStr) -> Result<SoftProgram> {
        if let Some(stage) = self.fail_compile {
            return Err(RenderError::ShaderCompile {
                stage,
                log: "0:1(1): error: syntax error".to_owned(),
            });
        }
        if self.fail_link {
            return Err(RenderError::ShaderLink("no main() in vertex shader".to_owned()));
        }
        self.programs_built += 1;
        Ok(SoftProgram {
            inputs: vertex_inputs(vert_source),
            color: RED,
        })
    }

    fn upload_geometry<V: VertexLayout>(
        &mut self,
        program: &SoftProgram,
        vertices: &RenderVec<V>,
    ) -> Result<SoftGeometry> {
        let mut position_offset = None;
        for (attribute, offset) in V::offsets() {
            let name = attribute.name.to_string_lossy();
            if !program.inputs.iter().any(|input| *input == name) {
                return Err(RenderError::MissingAttribute(name.into_owned()));
            }
            position_offset.get_or_insert(offset);
        }
        let offset = position_offset.unwrap_or(0);
        let positions = vertices
            .as_bytes()
            .chunks_exact(vertices.stride())
            .map(|vertex| bytemuck::pod_read_unaligned(&vertex[offset..offset + 8]))
            .collect();
        Ok(SoftGeometry { positions })
    }

    fn detect_target(&mut self) -> Result<SoftTarget> {
        self.detects += 1;
        Ok(SoftTarget { id: self.current })
    }

    fn use_target(&mut self, target: &mut SoftTarget) {
        self.used.push(target.id);
    }

    fn clear_region(&mut self, target: &SoftTarget, region: Viewport, color: Rgba) -> Result<()> {
        let (xs, ys) = self.clip(region);
        for y in ys {
            for x in xs.clone() {
                self.fill(target.id, x, y, color);
            }
        }
        Ok(())
    }

    fn set_viewport(&mut self, region: Viewport) {
        self.viewport = region;
    }

    fn draw_triangles(&mut self, program: &SoftProgram, geometry: &SoftGeometry) -> Result<()> {
        if self.fail_draws {
            return Err(RenderError::Draw {
                call: "glDrawArrays",
                code: gl::INVALID_OPERATION,
            });
        }
        for corners in geometry.positions.chunks_exact(3) {
            self.raster_triangle([corners[0], corners[1], corners[2]], program.color);
        }
        Ok(())
    }

    fn read_pixel(&mut self, target: &SoftTarget, x: i32, y: i32) -> Result<Rgba> {
        if !Viewport::new(0, 0, self.width, self.height).contains(x, y) {
            return Err(RenderError::Draw {
                call: "glReadPixels",
                code: gl::INVALID_VALUE,
            });
        }
        self.reads.push((x, y));
        Ok(self.framebuffer_pixel(target.id, x, y))
    }

    fn release_target(&mut self, _target: SoftTarget) {
        self.releases += 1;
    }
}

mod tests {
    use super::*;

    #[test]
    fn vertex_inputs_are_parsed_from_glsl() {
        let inputs = vertex_inputs(crate::render::VERT_SHADER_SOURCE);
        assert_eq!(inputs, vec!["in_vert".to_owned()]);
    }

    #[test]
    fn clears_are_clipped_to_the_surface() {
        let mut gpu = SoftGpu::new(4, 4);
        let target = gpu.detect_target().unwrap();
        gpu.clear_region(&target, Viewport::new(2, 2, 10, 10), RED)
            .unwrap();
        assert_eq!(gpu.pixel(3, 3), RED);
        assert_eq!(gpu.pixel(1, 3), UNTOUCHED);
    }
}
