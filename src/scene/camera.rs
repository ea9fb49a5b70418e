use glam::Vec3;

/// Role of the camera currently being rendered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraKind {
    #[default]
    Game,
    SceneView,
    Preview,
    /// Planar reflection / probe cameras never run the character shadow.
    Reflection,
}

/// The output camera as seen by the shadow passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputCamera {
    pub position: Vec3,
    /// Screen width divided by screen height.
    pub aspect: f32,
    pub kind: CameraKind,
}

impl OutputCamera {
    #[must_use]
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            aspect,
            kind: CameraKind::Game,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: CameraKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn from_screen_size(position: Vec3, width: u32, height: u32) -> Self {
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        Self::new(position, aspect)
    }
}
