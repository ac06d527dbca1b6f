use crate::mesh::{cube_mesh, quad_mesh, sphere_mesh, MeshData, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::collections::HashMap;
use storefront_assets::{TextureCache, TextureData, TextureHandle};
use storefront_common::Color;
use storefront_render::{model_matrix, resolve_surface, RenderView, SurfaceAppearance};
use storefront_scene::{Scene, Shape};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    params: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeshKind {
    Quad,
    Cube,
    Sphere,
}

/// One primitive's draw: instance `instance` of `mesh` with `texture` bound.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawCall {
    mesh: MeshKind,
    double_sided: bool,
    /// `None` binds the white texture.
    texture: Option<TextureHandle>,
    instance: u32,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Hex colours are authored in sRGB; the render target expects linear.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_color(color: Color) -> [f32; 4] {
    let [r, g, b, a] = color.to_array();
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
}

/// Turn the scene into instances and draw calls for this frame.
///
/// Textures that are ready in the cache but not yet uploaded draw as their
/// placeholder (or not at all, for overlays) until `uploaded` contains them.
fn plan_frame(
    scene: &Scene,
    textures: &TextureCache,
    uploaded: impl Fn(TextureHandle) -> bool,
) -> (Vec<InstanceData>, Vec<DrawCall>) {
    let mut instances = Vec::with_capacity(scene.len());
    let mut draws = Vec::with_capacity(scene.len());

    for p in scene.primitives() {
        let appearance = match resolve_surface(&p.material, textures) {
            SurfaceAppearance::Textured(h) if !uploaded(h) => {
                if p.material.overlay {
                    SurfaceAppearance::Hidden
                } else {
                    SurfaceAppearance::Solid(p.material.color)
                }
            }
            other => other,
        };
        let (texture, color) = match appearance {
            SurfaceAppearance::Hidden => continue,
            SurfaceAppearance::Textured(h) => (Some(h), [1.0; 4]),
            SurfaceAppearance::Solid(c) => (None, linear_color(c)),
        };
        let mesh = match p.shape {
            Shape::Plane { .. } => MeshKind::Quad,
            Shape::Cuboid { .. } => MeshKind::Cube,
            Shape::Sphere { .. } => MeshKind::Sphere,
        };
        let unlit = if mesh == MeshKind::Sphere { 1.0 } else { 0.0 };
        let cols = model_matrix(p).to_cols_array_2d();

        draws.push(DrawCall {
            mesh,
            double_sided: p.material.double_sided,
            texture,
            instance: instances.len() as u32,
        });
        instances.push(InstanceData {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
            params: [unlit, 0.0, 0.0, 0.0],
        });
    }
    (instances, draws)
}

/// wgpu-based shop renderer.
pub struct WgpuRenderer {
    single_sided_pipeline: wgpu::RenderPipeline,
    double_sided_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_texture: wgpu::BindGroup,
    textures: HashMap<TextureHandle, wgpu::BindGroup>,
    quad: GpuMesh,
    cube: GpuMesh,
    sphere: GpuMesh,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("surface_texture_layout"),
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

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("surface_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("surface_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SURFACE_SHADER.into()),
        });

        let single_sided_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            Some(wgpu::Face::Back),
        );
        let double_sided_pipeline =
            Self::create_pipeline(device, &pipeline_layout, &shader, surface_format, None);

        let white = TextureData {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        };
        let white_texture =
            Self::create_texture_bind_group(device, queue, &texture_layout, &sampler, &white);

        let max_instances = 256u32;
        let instance_buffer = Self::create_instance_buffer(device, max_instances);
        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            single_sided_pipeline,
            double_sided_pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            sampler,
            white_texture,
            textures: HashMap::new(),
            quad: GpuMesh::upload(device, "quad_mesh", &quad_mesh()),
            cube: GpuMesh::upload(device, "cube_mesh", &cube_mesh()),
            sphere: GpuMesh::upload(device, "sphere_mesh", &sphere_mesh(24, 48)),
            instance_buffer,
            max_instances,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn has_texture(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle)
    }

    /// Upload decoded pixels once per handle, shrunk to the device's texture
    /// limit. Textures that cannot be uploaded keep their placeholder.
    pub fn upload_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        handle: TextureHandle,
        data: &TextureData,
    ) {
        if self.textures.contains_key(&handle) {
            return;
        }
        if data.width == 0 || data.height == 0 {
            tracing::warn!(?handle, "skipping empty texture");
            return;
        }
        let max_dim = device.limits().max_texture_dimension_2d;
        let data = match data.fit_within(max_dim) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(?handle, error = %e, "skipping texture; keeping placeholder");
                return;
            }
        };
        let bind_group = Self::create_texture_bind_group(
            device,
            queue,
            &self.texture_layout,
            &self.sampler,
            &data,
        );
        tracing::debug!(?handle, width = data.width, height = data.height, "texture uploaded");
        self.textures.insert(handle, bind_group);
    }

    /// Render one frame of the scene from `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        scene: &Scene,
        textures: &TextureCache,
        view: &RenderView,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view.view_projection().to_cols_array_2d(),
            }),
        );

        let (instances, draws) = plan_frame(scene, textures, |h| self.textures.contains_key(&h));

        if instances.len() as u32 > self.max_instances {
            self.max_instances = (instances.len() as u32).next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.max_instances);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.25,
                            g: 0.5,
                            b: 0.75,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            for draw in &draws {
                let pipeline = if draw.double_sided {
                    &self.double_sided_pipeline
                } else {
                    &self.single_sided_pipeline
                };
                let mesh = match draw.mesh {
                    MeshKind::Quad => &self.quad,
                    MeshKind::Cube => &self.cube,
                    MeshKind::Sphere => &self.sphere,
                };
                let texture = draw
                    .texture
                    .and_then(|h| self.textures.get(&h))
                    .unwrap_or(&self.white_texture);

                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, texture, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, draw.instance..draw.instance + 1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        cull_mode: Option<wgpu::Face>,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(if cull_mode.is_some() {
                "single_sided_pipeline"
            } else {
                "double_sided_pipeline"
            }),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                            2 => Float32x2,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_texture_bind_group(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        data: &TextureData,
    ) -> wgpu::BindGroup {
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("surface_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
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
            &data.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * data.width),
                rows_per_image: Some(data.height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("surface_texture_bind_group"),
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
        })
    }

    fn create_instance_buffer(device: &wgpu::Device, max_instances: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
