//! Global Shader State
//!
//! Process-wide shader properties written by the shadow passes and read by
//! every draw executed afterwards in the frame.
//!
//! [`GlobalStateSink`] is the collaborator contract; [`GlobalShaderState`] is
//! an in-memory implementation hosts can read back from or pack into a single
//! uniform block via [`CharShadowUniforms::gather`].

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::renderer::graph::target::TextureHandle;

/// Property names shared with the character shader library.
pub mod ids {
    pub const CHAR_SHADOW_MAP: &str = "_CharShadowMap";
    pub const CHAR_SHADOW_PARAMS: &str = "_CharShadowParams";
    pub const VIEW_MATRIX: &str = "_CharShadowViewM";
    pub const PROJ_MATRIX: &str = "_CharShadowProjM";
    pub const SHADOW_OFFSET_0: &str = "_CharShadowOffset0";
    pub const SHADOW_OFFSET_1: &str = "_CharShadowOffset1";
    pub const SHADOW_MAP_SIZE: &str = "_CharShadowmapSize";
    pub const CASCADE_PARAMS: &str = "_CharShadowCascadeParams";
    pub const USE_BRIGHTEST_LIGHT: &str = "_UseBrightestLight";
    pub const LOCAL_LIGHT_INDEX: &str = "_CharShadowLocalLightIndex";
    pub const BRIGHTEST_LIGHT_DIRECTION: &str = "_BrightestLightDirection";

    pub const TRANSPARENT_SHADOW_MAP: &str = "_TransparentShadowMap";
    pub const TRANSPARENT_ALPHA_SUM: &str = "_TransparentAlphaSum";
    pub const TRANSPARENT_SHADOW_MAP_SIZE: &str = "_CharTransparentShadowmapSize";
    pub const SHADOW_MAP_INDEX: &str = "_CharShadowmapIndex";

    /// Shader feature toggled for high quality soft shadows.
    pub const HIGH_SOFT_SHADOW_KEYWORD: &str = "_HIGH_CHAR_SOFTSHADOW";
}

/// Sink for named global shader writes.
pub trait GlobalStateSink {
    fn set_texture(&mut self, name: &'static str, texture: TextureHandle);
    fn set_vector(&mut self, name: &'static str, value: Vec4);
    fn set_matrix(&mut self, name: &'static str, value: Mat4);
    fn set_int(&mut self, name: &'static str, value: i32);
    fn set_float(&mut self, name: &'static str, value: f32);
    fn set_keyword(&mut self, keyword: &'static str, enabled: bool);
}

/// A typed value stored under a global shader property name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobalValue {
    Texture(TextureHandle),
    Vector(Vec4),
    Matrix(Mat4),
    Int(i32),
    Float(f32),
}

/// In-memory global state. Values persist until overwritten.
#[derive(Debug, Default, Clone)]
pub struct GlobalShaderState {
    values: FxHashMap<&'static str, GlobalValue>,
    keywords: FxHashSet<&'static str>,
}

impl GlobalShaderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<GlobalValue> {
        self.values.get(name).copied()
    }

    #[must_use]
    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        match self.get(name)? {
            GlobalValue::Texture(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn vector(&self, name: &str) -> Option<Vec4> {
        match self.get(name)? {
            GlobalValue::Vector(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn matrix(&self, name: &str) -> Option<Mat4> {
        match self.get(name)? {
            GlobalValue::Matrix(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            GlobalValue::Int(i) => Some(i),
            _ => None,
        }
    }

    #[must_use]
    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            GlobalValue::Float(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_keyword_enabled(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl GlobalStateSink for GlobalShaderState {
    fn set_texture(&mut self, name: &'static str, texture: TextureHandle) {
        self.values.insert(name, GlobalValue::Texture(texture));
    }

    fn set_vector(&mut self, name: &'static str, value: Vec4) {
        self.values.insert(name, GlobalValue::Vector(value));
    }

    fn set_matrix(&mut self, name: &'static str, value: Mat4) {
        self.values.insert(name, GlobalValue::Matrix(value));
    }

    fn set_int(&mut self, name: &'static str, value: i32) {
        self.values.insert(name, GlobalValue::Int(value));
    }

    fn set_float(&mut self, name: &'static str, value: f32) {
        self.values.insert(name, GlobalValue::Float(value));
    }

    fn set_keyword(&mut self, keyword: &'static str, enabled: bool) {
        if enabled {
            self.keywords.insert(keyword);
        } else {
            self.keywords.remove(keyword);
        }
    }
}

/// std140-compatible block carrying the main pass globals.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CharShadowUniforms {
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    pub params: Vec4,
    pub offset0: Vec4,
    pub offset1: Vec4,
    pub map_size: Vec4,
    pub cascade_params: Vec4,
    pub light_direction: Vec4,
    pub local_light_index: i32,
    pub use_brightest_light: i32,
    pub high_soft_shadow: i32,
    pub _padding: i32,
}

impl CharShadowUniforms {
    /// Packs the current main pass globals. Unset values read as zero,
    /// except the local light index which reads as `-1`.
    #[must_use]
    pub fn gather(state: &GlobalShaderState) -> Self {
        let vec = |name: &str| state.vector(name).unwrap_or(Vec4::ZERO);
        let mat = |name: &str| state.matrix(name).unwrap_or(Mat4::IDENTITY);

        Self {
            view_matrix: mat(ids::VIEW_MATRIX),
            projection_matrix: mat(ids::PROJ_MATRIX),
            params: vec(ids::CHAR_SHADOW_PARAMS),
            offset0: vec(ids::SHADOW_OFFSET_0),
            offset1: vec(ids::SHADOW_OFFSET_1),
            map_size: vec(ids::SHADOW_MAP_SIZE),
            cascade_params: vec(ids::CASCADE_PARAMS),
            light_direction: vec(ids::BRIGHTEST_LIGHT_DIRECTION),
            local_light_index: state.int(ids::LOCAL_LIGHT_INDEX).unwrap_or(-1),
            use_brightest_light: state.int(ids::USE_BRIGHTEST_LIGHT).unwrap_or(0),
            high_soft_shadow: i32::from(state.is_keyword_enabled(ids::HIGH_SOFT_SHADOW_KEYWORD)),
            _padding: 0,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
