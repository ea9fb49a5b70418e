//! wgpu-backed render target allocator.
//!
//! Creates one single-mip 2D texture plus default view per handle. Textures
//! are usable both as color attachments (shadow draws) and as sampled
//! bindings (character shading).

use rustc_hash::FxHashMap;

use crate::errors::{CharShadowError, Result};
use crate::renderer::graph::target::{RenderTargetAllocator, RenderTargetDesc, TextureHandle};

/// Texture usages of every shadow target.
pub const SHADOW_TARGET_USAGE: wgpu::TextureUsages =
    wgpu::TextureUsages::RENDER_ATTACHMENT.union(wgpu::TextureUsages::TEXTURE_BINDING);

struct AllocatedTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

pub struct WgpuRenderTargets {
    device: wgpu::Device,
    targets: FxHashMap<TextureHandle, AllocatedTarget>,
    next_id: u64,
}

impl WgpuRenderTargets {
    #[must_use]
    pub fn new(device: wgpu::Device) -> Self {
        Self {
            device,
            targets: FxHashMap::default(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn texture(&self, handle: TextureHandle) -> Option<&wgpu::Texture> {
        self.targets.get(&handle).map(|t| &t.texture)
    }

    #[must_use]
    pub fn view(&self, handle: TextureHandle) -> Option<&wgpu::TextureView> {
        self.targets.get(&handle).map(|t| &t.view)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl std::fmt::Debug for WgpuRenderTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuRenderTargets")
            .field("targets", &self.targets.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl RenderTargetAllocator for WgpuRenderTargets {
    fn allocate(&mut self, desc: &RenderTargetDesc) -> Result<TextureHandle> {
        let max = self.device.limits().max_texture_dimension_2d;
        if desc.width == 0 || desc.height == 0 || desc.width > max || desc.height > max {
            return Err(CharShadowError::TargetAllocation {
                label: desc.label,
                width: desc.width,
                height: desc.height,
                reason: format!("size must be within 1..={max}"),
            });
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(desc.label),
            size: wgpu::Extent3d {
                width: desc.width,
                height: desc.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: desc.format,
            usage: SHADOW_TARGET_USAGE,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(desc.label),
            ..Default::default()
        });

        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        self.targets.insert(handle, AllocatedTarget { texture, view });
        Ok(handle)
    }

    fn release(&mut self, handle: TextureHandle) -> Result<()> {
        let target = self
            .targets
            .remove(&handle)
            .ok_or(CharShadowError::UnknownTarget(handle))?;
        target.texture.destroy();
        Ok(())
    }
}
