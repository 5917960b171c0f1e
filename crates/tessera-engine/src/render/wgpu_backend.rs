use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

use super::backend::{DrawSubmission, RenderBackend};
use super::error::{RenderError, ShaderError, TextureError};
use super::texture::{ImageData, Texture, TextureId};
use super::vertex::Topology;

// ── uniforms ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BatchUniform {
    projection: [[f32; 4]; 4],
    model_view: [[f32; 4]; 4],
    has_texture: u32,
    _pad: [u32; 3], // 16-byte struct alignment
}

// ── vertex layouts ────────────────────────────────────────────────────────

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const TEXCOORD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];

const POSITION_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;
const TEXCOORD_STRIDE: u64 = std::mem::size_of::<[f32; 2]>() as u64;
const COLOR_STRIDE: u64 = std::mem::size_of::<[f32; 4]>() as u64;
const INDEX_STRIDE: u64 = std::mem::size_of::<u32>() as u64;

/// One vertex buffer per attribute, mirroring the batch's staging arrays.
fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        wgpu::VertexBufferLayout {
            array_stride: POSITION_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: TEXCOORD_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &TEXCOORD_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: COLOR_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRS,
        },
    ]
}

fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::Points => wgpu::PrimitiveTopology::PointList,
        Topology::Lines => wgpu::PrimitiveTopology::LineList,
        Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
    }
}

// ── resources ─────────────────────────────────────────────────────────────

/// GPU buffers for one batch. Released on drop.
pub struct WgpuBuffers {
    positions: wgpu::Buffer,
    texcoords: wgpu::Buffer,
    colors: wgpu::Buffer,
    indices: Option<wgpu::Buffer>,
}

/// The batch shader linked into one pipeline per topology.
pub struct WgpuProgram {
    points: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
}

impl WgpuProgram {
    fn pipeline(&self, topology: Topology) -> &wgpu::RenderPipeline {
        match topology {
            Topology::Points => &self.points,
            Topology::Lines => &self.lines,
            Topology::Triangles => &self.triangles,
        }
    }
}

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

// ── backend ───────────────────────────────────────────────────────────────

/// wgpu implementation of [`RenderBackend`].
///
/// Every flush writes its staged data through the queue and submits its own command
/// buffer, so a batch flushed several times in one frame never overwrites data a
/// previous draw still reads. Untextured draws bind a 1x1 white texture and clear
/// the `has_texture` uniform.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,

    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_ubo: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    white: GpuTexture,

    textures: HashMap<TextureId, GpuTexture>,
    next_texture: u32,

    target: Option<wgpu::TextureView>,
}

impl WgpuBackend {
    /// Creates the backend for render targets of `format`.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<BatchUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Fixed sampler state: nearest filtering, clamp-to-edge.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tessera nearest sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let uniform_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessera uniform ubo"),
            size: std::mem::size_of::<BatchUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        let white = upload_texture(
            device,
            queue,
            &texture_layout,
            &sampler,
            "tessera white texture",
            1,
            1,
            &[255, 255, 255, 255],
        );

        Self {
            device: device.clone(),
            queue: queue.clone(),
            format,
            uniform_layout,
            texture_layout,
            sampler,
            uniform_ubo,
            uniform_bind_group,
            white,
            textures: HashMap::new(),
            next_texture: 0,
            target: None,
        }
    }

    /// Surface format the pipelines are built for.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn create_pipeline(
        &self,
        module: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        topology: Topology,
    ) -> wgpu::RenderPipeline {
        let label = format!("tessera {topology:?} pipeline");
        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(layout),

            vertex: wgpu::VertexState {
                module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &vertex_layouts(),
            },

            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: primitive_topology(topology),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn begin_pass<'e>(
        encoder: &'e mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera batch pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    fn vertex_buffer(&self, label: &str, size: u64) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size.max(wgpu::COPY_BUFFER_ALIGNMENT),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> GpuTexture {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    GpuTexture {
        _texture: texture,
        bind_group,
    }
}

/// Folds shader diagnostics into an error log.
///
/// Warnings and infos are logged and dropped. A validation error captured by the
/// error scope is reported when the compiler itself produced no error message.
fn shader_error_log(
    messages: impl IntoIterator<Item = (wgpu::CompilationMessageType, String)>,
    scope_error: Option<String>,
) -> Option<String> {
    let mut errors = Vec::new();
    for (kind, line) in messages {
        match kind {
            wgpu::CompilationMessageType::Error => errors.push(line),
            wgpu::CompilationMessageType::Warning => log::warn!("batch shader: {line}"),
            _ => log::debug!("batch shader: {line}"),
        }
    }
    if errors.is_empty() {
        errors.extend(scope_error);
    }
    (!errors.is_empty()).then(|| errors.join("\n"))
}

impl RenderBackend for WgpuBackend {
    type Buffers = WgpuBuffers;
    type Program = WgpuProgram;
    type Target = wgpu::TextureView;

    fn create_program(&mut self) -> Result<WgpuProgram, ShaderError> {
        // Validation errors are captured here instead of reaching the device's
        // uncaptured-error handler, which panics by default.
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera batch shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/batch.wgsl").into()),
        });
        let scope_error = pollster::block_on(scope.pop());

        let info = pollster::block_on(module.get_compilation_info());
        let messages = info.messages.iter().map(|msg| {
            let line = match &msg.location {
                Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, msg.message),
                None => msg.message.clone(),
            };
            (msg.message_type, line)
        });
        if let Some(log) = shader_error_log(messages, scope_error.map(|e| e.to_string())) {
            return Err(ShaderError::Compile { log });
        }

        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera pipeline layout"),
            bind_group_layouts: &[&self.uniform_layout, &self.texture_layout],
            immediate_size: 0,
        });
        let program = WgpuProgram {
            points: self.create_pipeline(&module, &layout, Topology::Points),
            lines: self.create_pipeline(&module, &layout, Topology::Lines),
            triangles: self.create_pipeline(&module, &layout, Topology::Triangles),
        };
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::Link { log: err.to_string() });
        }

        Ok(program)
    }

    fn create_buffers(
        &mut self,
        label: &str,
        _topology: Topology,
        vertex_capacity: usize,
        index_capacity: usize,
    ) -> WgpuBuffers {
        let n = vertex_capacity as u64;
        let indices = (index_capacity > 0).then(|| {
            self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label} indices")),
                size: index_capacity as u64 * INDEX_STRIDE,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });

        WgpuBuffers {
            positions: self.vertex_buffer(&format!("{label} positions"), n * POSITION_STRIDE),
            texcoords: self.vertex_buffer(&format!("{label} texcoords"), n * TEXCOORD_STRIDE),
            colors: self.vertex_buffer(&format!("{label} colors"), n * COLOR_STRIDE),
            indices,
        }
    }

    fn create_texture(&mut self, image: &ImageData) -> Result<Texture, TextureError> {
        let max = self.device.limits().max_texture_dimension_2d;
        if image.width() > max || image.height() > max {
            return Err(TextureError::TooLarge {
                width: image.width(),
                height: image.height(),
                max,
            });
        }

        self.next_texture += 1;
        let id = TextureId(self.next_texture);
        let gpu = upload_texture(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.sampler,
            &format!("tessera texture {}", id.0),
            image.width(),
            image.height(),
            image.pixels(),
        );
        self.textures.insert(id, gpu);

        log::debug!("uploaded texture {id:?} ({}x{})", image.width(), image.height());
        Ok(Texture::new(id, image.width(), image.height()))
    }

    fn release_texture(&mut self, texture: Texture) {
        if self.textures.remove(&texture.id()).is_none() {
            log::debug!("release of unknown texture {:?} ignored", texture.id());
        }
    }

    fn set_target(&mut self, target: Option<wgpu::TextureView>) {
        self.target = target;
    }

    fn clear(&mut self, color: Color) -> Result<(), RenderError> {
        let view = self.target.as_ref().ok_or(RenderError::NoTarget)?;
        let [r, g, b, a] = color.to_normalized();

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tessera clear encoder"),
        });
        {
            let _rpass = Self::begin_pass(
                &mut encoder,
                view,
                wgpu::LoadOp::Clear(wgpu::Color {
                    r: r as f64,
                    g: g as f64,
                    b: b as f64,
                    a: a as f64,
                }),
            );
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn submit(
        &mut self,
        program: &WgpuProgram,
        buffers: &mut WgpuBuffers,
        draw: &DrawSubmission<'_>,
    ) -> Result<(), RenderError> {
        let view = self.target.as_ref().ok_or(RenderError::NoTarget)?;
        let texture_group = match draw.texture {
            Some(id) => &self.textures.get(&id).ok_or(RenderError::UnknownTexture(id))?.bind_group,
            None => &self.white.bind_group,
        };

        let uniform = BatchUniform {
            projection: draw.transforms.projection.to_cols_array_2d(),
            model_view: draw.transforms.model_view.to_cols_array_2d(),
            has_texture: draw.texture.is_some() as u32,
            _pad: [0; 3],
        };
        self.queue.write_buffer(&self.uniform_ubo, 0, bytemuck::bytes_of(&uniform));
        self.queue.write_buffer(&buffers.positions, 0, bytemuck::cast_slice(draw.positions));
        self.queue.write_buffer(&buffers.texcoords, 0, bytemuck::cast_slice(draw.texcoords));
        self.queue.write_buffer(&buffers.colors, 0, bytemuck::cast_slice(draw.colors));

        let index_buffer = match (&buffers.indices, draw.indices.is_empty()) {
            (Some(ibo), false) => {
                self.queue.write_buffer(ibo, 0, bytemuck::cast_slice(draw.indices));
                Some(ibo)
            }
            _ => None,
        };

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tessera flush encoder"),
        });
        {
            let mut rpass = Self::begin_pass(&mut encoder, view, wgpu::LoadOp::Load);
            rpass.set_pipeline(program.pipeline(draw.topology));
            rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
            rpass.set_bind_group(1, texture_group, &[]);
            rpass.set_vertex_buffer(0, buffers.positions.slice(..));
            rpass.set_vertex_buffer(1, buffers.texcoords.slice(..));
            rpass.set_vertex_buffer(2, buffers.colors.slice(..));

            match index_buffer {
                Some(ibo) => {
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..draw.index_count() as u32, 0, 0..1);
                }
                None => rpass.draw(0..draw.vertex_count() as u32, 0..1),
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}
