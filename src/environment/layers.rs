//! Layer stack produced by the compositor and consumed by the renderer.

use bevy::prelude::*;

use crate::palette::SkyStop;
use crate::shapes::Outline;

/// Every layer of the scene, back to front. The discriminant is the draw
/// order; it never changes with scene parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Sky,
    Stars,
    Moon,
    SunGlow,
    Aurora,
    FarMountains,
    MidMountains,
    CloudWisps,
    NearMountains,
    IcePlatform,
    StageDecorations,
    Snow,
    StormOverlay,
}

impl LayerKind {
    pub const ORDER: [LayerKind; 13] = [
        LayerKind::Sky,
        LayerKind::Stars,
        LayerKind::Moon,
        LayerKind::SunGlow,
        LayerKind::Aurora,
        LayerKind::FarMountains,
        LayerKind::MidMountains,
        LayerKind::CloudWisps,
        LayerKind::NearMountains,
        LayerKind::IcePlatform,
        LayerKind::StageDecorations,
        LayerKind::Snow,
        LayerKind::StormOverlay,
    ];
}

/// One drawable element in scene space (y down, origin top-left).
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Vertical gradient filling `rect`.
    Gradient { rect: Rect, stops: [SkyStop; 3] },
    /// Bezier outline already fitted into scene coordinates.
    Path { outline: Outline, color: Color },
    Dot { center: Vec2, radius: f32, color: Color },
    Segment { from: Vec2, to: Vec2, color: Color },
    /// Solid wash over `rect` (tints and flashes).
    Wash { rect: Rect, color: Color },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub visible: bool,
    /// Multiplied into every primitive's alpha at draw time.
    pub opacity: f32,
    pub primitives: Vec<Primitive>,
}

impl Layer {
    pub fn hidden(kind: LayerKind) -> Self {
        Self {
            kind,
            visible: false,
            opacity: 0.0,
            primitives: Vec::new(),
        }
    }

    pub fn shown(kind: LayerKind, opacity: f32, primitives: Vec<Primitive>) -> Self {
        Self {
            kind,
            visible: true,
            opacity: opacity.clamp(0.0, 1.0),
            primitives,
        }
    }
}

/// The full back-to-front stack. Always holds exactly one layer per
/// [`LayerKind`], in [`LayerKind::ORDER`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Build from a per-kind producer, preserving the fixed order.
    pub fn build(mut produce: impl FnMut(LayerKind) -> Layer) -> Self {
        let layers = LayerKind::ORDER
            .iter()
            .map(|&kind| {
                let mut layer = produce(kind);
                layer.kind = kind;
                layer
            })
            .collect();
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn is_visible(&self, kind: LayerKind) -> bool {
        self.get(kind).is_some_and(|l| l.visible)
    }

    pub fn visible_kinds(&self) -> Vec<LayerKind> {
        self.layers
            .iter()
            .filter(|l| l.visible)
            .map(|l| l.kind)
            .collect()
    }

    pub fn kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|l| l.kind).collect()
    }
}
