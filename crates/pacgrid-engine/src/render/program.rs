use std::path::Path;

use anyhow::{Context, Result};

use crate::geometry::Vertex;

use super::scope::{captured, checked};
use super::{GpuTexture, PolygonMode, RenderCtx};

/// Entry points expected in the two shader sources.
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// A compiled shader module and the name used in its diagnostics.
struct Stage<'s> {
    label: &'s str,
    module: wgpu::ShaderModule,
}

/// Linked vertex + fragment program for textured cells.
///
/// wgpu bakes the polygon mode into the pipeline, so one pipeline is built per
/// mode the device supports. Bind group 0 holds the texture (binding 0) and its
/// sampler (binding 1).
pub struct ShaderProgram {
    bind_group_layout: wgpu::BindGroupLayout,
    fill: wgpu::RenderPipeline,
    line: Option<wgpu::RenderPipeline>,
    point: Option<wgpu::RenderPipeline>,
}

impl ShaderProgram {
    /// Reads both WGSL sources from disk and builds the program.
    ///
    /// Errors name the offending file and carry the compiler diagnostics.
    pub fn load(
        ctx: &RenderCtx<'_>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vertex_path = vertex_path.as_ref().display().to_string();
        let fragment_path = fragment_path.as_ref().display().to_string();

        let vertex_src = read_source(Path::new(&vertex_path))?;
        let fragment_src = read_source(Path::new(&fragment_path))?;

        let vertex = compile_module(ctx, &vertex_path, &vertex_src)?;
        let fragment = compile_module(ctx, &fragment_path, &fragment_src)?;

        Self::link(ctx, &vertex, &fragment)
    }

    /// Builds the program from in-memory WGSL.
    pub fn from_wgsl(ctx: &RenderCtx<'_>, vertex_src: &str, fragment_src: &str) -> Result<Self> {
        let vertex = compile_module(ctx, "pacgrid vertex shader", vertex_src)?;
        let fragment = compile_module(ctx, "pacgrid fragment shader", fragment_src)?;
        Self::link(ctx, &vertex, &fragment)
    }

    fn link(ctx: &RenderCtx<'_>, vertex: &Stage<'_>, fragment: &Stage<'_>) -> Result<Self> {
        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("pacgrid texture bgl"),
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

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("pacgrid pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let optional = |mode: PolygonMode| -> Result<Option<wgpu::RenderPipeline>> {
            if !ctx.features.contains(mode.required_features()) {
                log::debug!("polygon mode {mode:?} unavailable on this device");
                return Ok(None);
            }
            create_pipeline(ctx, &pipeline_layout, vertex, fragment, mode).map(Some)
        };

        Ok(Self {
            fill: create_pipeline(ctx, &pipeline_layout, vertex, fragment, PolygonMode::Fill)?,
            line: optional(PolygonMode::Line)?,
            point: optional(PolygonMode::Point)?,
            bind_group_layout,
        })
    }

    fn dedicated(&self, mode: PolygonMode) -> Option<&wgpu::RenderPipeline> {
        match mode {
            PolygonMode::Fill => Some(&self.fill),
            PolygonMode::Line => self.line.as_ref(),
            PolygonMode::Point => self.point.as_ref(),
        }
    }

    /// True when `mode` has its own pipeline on this device.
    #[inline]
    pub fn supports(&self, mode: PolygonMode) -> bool {
        self.dedicated(mode).is_some()
    }

    /// Pipeline for `mode`, falling back to the filled pipeline when unsupported.
    pub fn pipeline(&self, mode: PolygonMode) -> &wgpu::RenderPipeline {
        self.dedicated(mode).unwrap_or(&self.fill)
    }

    /// Creates the bind group that attaches `texture` to this program.
    pub fn bind_texture(&self, ctx: &RenderCtx<'_>, texture: &GpuTexture) -> Result<wgpu::BindGroup> {
        checked(ctx.device, || {
            ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("pacgrid texture bind group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(texture.view()),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(texture.sampler()),
                    },
                ],
            })
        })
        .context("failed to bind texture to cell program")
    }
}

/// Reads a shader source file as raw text.
pub fn read_source(path: &Path) -> Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shader source {}", path.display()))?;
    anyhow::ensure!(
        !src.trim().is_empty(),
        "shader source {} is empty",
        path.display()
    );
    Ok(src)
}

fn compile_module<'s>(ctx: &RenderCtx<'_>, label: &'s str, src: &str) -> Result<Stage<'s>> {
    let (module, scoped) = captured(ctx.device, || {
        ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(src.into()),
        })
    });

    let info = pollster::block_on(module.get_compilation_info());
    let mut errors = Vec::new();

    for msg in &info.messages {
        let text = match &msg.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, msg.message),
            None => msg.message.clone(),
        };
        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(text),
            wgpu::CompilationMessageType::Warning => log::warn!("{label}: {text}"),
            wgpu::CompilationMessageType::Info => log::debug!("{label}: {text}"),
        }
    }

    // The scope error repeats the diagnostics; only fall back to it when the
    // compilation info is empty.
    if errors.is_empty() {
        if let Some(err) = scoped {
            errors.push(err.to_string());
        }
    }

    anyhow::ensure!(
        errors.is_empty(),
        "failed to compile {label}:\n{}",
        errors.join("\n")
    );
    Ok(Stage { label, module })
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    layout: &wgpu::PipelineLayout,
    vertex: &Stage<'_>,
    fragment: &Stage<'_>,
    mode: PolygonMode,
) -> Result<wgpu::RenderPipeline> {
    let label = format!("pacgrid {mode:?} pipeline");

    checked(ctx.device, || {
        ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(layout),

            vertex: wgpu::VertexState {
                module: &vertex.module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment.module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: mode.to_wgpu(),
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    })
    .with_context(|| {
        format!(
            "failed to link {} with {} ({mode:?})",
            vertex.label, fragment.label
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{noop_ctx, noop_device, FRAGMENT_WGSL, VERTEX_WGSL};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("pacgrid-{}-{name}", std::process::id()))
    }

    // ── source files ─────────────────────────────────────────────────────

    #[test]
    fn missing_source_names_the_file() {
        let path = temp_path("absent.vert.wgsl");
        let err = read_source(&path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn blank_source_is_rejected() {
        let path = temp_path("blank.frag.wgsl");
        std::fs::write(&path, "  \n\t\n").unwrap();
        let result = read_source(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.unwrap_err().to_string().contains("is empty"));
    }

    #[test]
    fn source_is_read_verbatim() {
        let path = temp_path("ok.vert.wgsl");
        let src = "@vertex\nfn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(); }\n";
        std::fs::write(&path, src).unwrap();
        let result = read_source(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(result.unwrap(), src);
    }

    // ── compile + link ───────────────────────────────────────────────────

    #[test]
    fn builds_fill_pipeline_without_optional_features() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let program = ShaderProgram::from_wgsl(&ctx, VERTEX_WGSL, FRAGMENT_WGSL).unwrap();

        assert!(program.supports(PolygonMode::Fill));
        assert!(!program.supports(PolygonMode::Line));
        assert!(!program.supports(PolygonMode::Point));
        assert_eq!(program.pipeline(PolygonMode::Point), program.pipeline(PolygonMode::Fill));
    }

    #[test]
    fn invalid_wgsl_is_an_error_not_a_panic() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let err = ShaderProgram::from_wgsl(&ctx, "this is not wgsl", FRAGMENT_WGSL)
            .err()
            .unwrap();
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to compile pacgrid vertex shader"), "{msg}");
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let fragment = "@fragment\nfn other() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }\n";
        let err = ShaderProgram::from_wgsl(&ctx, VERTEX_WGSL, fragment).err().unwrap();
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to link"), "{msg}");
        assert!(msg.contains("pacgrid fragment shader"), "{msg}");
    }

    #[test]
    fn load_reports_the_broken_file() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);

        let vert = temp_path("broken.vert.wgsl");
        let frag = temp_path("fine.frag.wgsl");
        std::fs::write(&vert, "fn vs_main(").unwrap();
        std::fs::write(&frag, FRAGMENT_WGSL).unwrap();

        let result = ShaderProgram::load(&ctx, &vert, &frag);
        std::fs::remove_file(&vert).ok();
        std::fs::remove_file(&frag).ok();

        let msg = format!("{:#}", result.err().unwrap());
        assert!(msg.contains(&vert.display().to_string()), "{msg}");
    }
}
