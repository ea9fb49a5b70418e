//! Pass Event Definitions
//!
//! `PassEvent` defines where in the host's frame a shadow pass is injected.
//! Enqueued passes execute in ascending event order.
//!
//! | Event | Pass |
//! |-------|------|
//! | `BeforeRenderingPrePasses` | Character shadow map |
//! | `BeforeRenderingOpaques` | Transparent shadow + alpha sum |

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[repr(u8)]
pub enum PassEvent {
    /// Before depth / depth-normal pre-passes; nothing has sampled the
    /// shadow globals yet.
    BeforeRenderingPrePasses = 0,

    /// Before the opaque pass, which is the first consumer of the
    /// transparent shadow buffers.
    BeforeRenderingOpaques = 1,
}

impl PassEvent {
    #[inline]
    #[must_use]
    pub const fn order(self) -> u8 {
        self as u8
    }

    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BeforeRenderingPrePasses => "BeforeRenderingPrePasses",
            Self::BeforeRenderingOpaques => "BeforeRenderingOpaques",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ordering() {
        assert!(PassEvent::BeforeRenderingPrePasses < PassEvent::BeforeRenderingOpaques);
        assert_eq!(PassEvent::BeforeRenderingOpaques.order(), 1);
    }
}
