//! Persistent Render Targets
//!
//! Shadow targets survive across frames and are only reallocated when the
//! requested size or format changes.
//!
//! ```text
//! prepare ──► RenderTargetDesc ──► ShadowTarget::reallocate_if_needed
//!                                     │ same desc  → reuse handle
//!                                     │ new desc   → release + allocate
//! ```

use crate::errors::Result;

/// Opaque handle to a backend-owned 2D texture.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextureHandle(pub u64);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RenderTargetDesc {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
    pub label: &'static str,
}

impl RenderTargetDesc {
    #[must_use]
    pub fn square(size: u32, format: wgpu::TextureFormat, label: &'static str) -> Self {
        Self {
            width: size,
            height: size,
            format,
            label,
        }
    }
}

/// Backend that creates and destroys render target images.
pub trait RenderTargetAllocator {
    fn allocate(&mut self, desc: &RenderTargetDesc) -> Result<TextureHandle>;

    fn release(&mut self, handle: TextureHandle) -> Result<()>;
}

/// A render target slot owned by a pass.
#[derive(Debug, Default)]
pub struct ShadowTarget {
    current: Option<(TextureHandle, RenderTargetDesc)>,
}

impl ShadowTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn handle(&self) -> Option<TextureHandle> {
        self.current.map(|(handle, _)| handle)
    }

    #[inline]
    #[must_use]
    pub fn desc(&self) -> Option<&RenderTargetDesc> {
        self.current.as_ref().map(|(_, desc)| desc)
    }

    /// Returns a handle matching `desc`, reallocating only on change.
    pub fn reallocate_if_needed(
        &mut self,
        desc: &RenderTargetDesc,
        allocator: &mut dyn RenderTargetAllocator,
    ) -> Result<TextureHandle> {
        if let Some((handle, current)) = &self.current
            && current == desc
        {
            return Ok(*handle);
        }

        if let Some((old, _)) = self.current.take() {
            allocator.release(old)?;
        }

        let handle = allocator.allocate(desc)?;
        log::debug!(
            "Allocated '{}' {}x{} {:?}",
            desc.label,
            desc.width,
            desc.height,
            desc.format
        );
        self.current = Some((handle, *desc));
        Ok(handle)
    }

    pub fn release(&mut self, allocator: &mut dyn RenderTargetAllocator) -> Result<()> {
        if let Some((handle, desc)) = self.current.take() {
            log::debug!("Released '{}'", desc.label);
            allocator.release(handle)?;
        }
        Ok(())
    }
}
