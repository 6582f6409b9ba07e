//! Accessory overlay: catalog lookup, behind/front partition and placement.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::shapes::{self, mascot as parts, props, Outline};
use crate::shared::{AccessoryItem, AccessorySlot};

/// How an accessory is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessoryVisual {
    /// Image path under the asset root.
    Sprite(String),
    /// Procedural stand-in when the image is missing, unit space.
    Placeholder(Outline),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedAccessory {
    pub id: String,
    pub slot: AccessorySlot,
    /// Scene-space box the visual is fitted into.
    pub rect: Rect,
    pub visual: AccessoryVisual,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessoryLayout {
    /// Drawn before the body.
    pub behind: Vec<PlacedAccessory>,
    /// Drawn after the face, in slot priority order.
    pub front: Vec<PlacedAccessory>,
}

impl AccessoryLayout {
    pub fn len(&self) -> usize {
        self.behind.len() + self.front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behind.is_empty() && self.front.is_empty()
    }
}

/// Read-only catalog keyed by accessory id.
#[derive(Resource, Debug, Clone, Default)]
pub struct AccessoryCatalog {
    items: HashMap<String, AccessoryItem>,
}

impl AccessoryCatalog {
    pub fn new(items: impl IntoIterator<Item = AccessoryItem>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&AccessoryItem> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve and place every equipped id. Unknown ids are skipped.
    /// `asset_exists` decides between the image and the placeholder.
    pub fn layout(
        &self,
        equipped: &HashSet<String>,
        mascot: Rect,
        asset_exists: impl Fn(&str) -> bool,
    ) -> AccessoryLayout {
        let mut items: Vec<&AccessoryItem> = equipped
            .iter()
            .filter_map(|id| {
                let item = self.items.get(id);
                if item.is_none() {
                    debug!("[Mascot] Unknown accessory '{}' skipped", id);
                }
                item
            })
            .collect();
        // Stable order: slot priority, then id.
        items.sort_by(|a, b| {
            a.slot
                .front_priority()
                .cmp(&b.slot.front_priority())
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut layout = AccessoryLayout::default();
        for item in items {
            let placed = PlacedAccessory {
                id: item.id.clone(),
                slot: item.slot,
                rect: place(item, mascot),
                visual: if asset_exists(&item.asset) {
                    AccessoryVisual::Sprite(item.asset.clone())
                } else {
                    AccessoryVisual::Placeholder(placeholder(item.slot))
                },
            };
            if item.slot.is_behind_body() {
                layout.behind.push(placed);
            } else {
                layout.front.push(placed);
            }
        }
        layout
    }
}

/// Square box centred at `offset × size` from the mascot centre, `scale ×
/// size` wide. Size is the mascot box width.
pub fn place(item: &AccessoryItem, mascot: Rect) -> Rect {
    let size = mascot.width();
    let center = mascot.center() + Vec2::new(item.offset.0, item.offset.1) * size;
    Rect::from_center_half_size(center, Vec2::splat(item.scale.max(0.0) * size * 0.5))
}

/// Slot-shaped stand-in drawn when an accessory image is missing.
pub fn placeholder(slot: AccessorySlot) -> Outline {
    match slot {
        AccessorySlot::Head => props::beanie(),
        AccessorySlot::Face => {
            let mut o = shapes::circle(Vec2::new(0.28, 0.5), 0.18);
            o.append(shapes::circle(Vec2::new(0.72, 0.5), 0.18));
            o.append(shapes::polyline(&[Vec2::new(0.46, 0.5), Vec2::new(0.54, 0.5)]));
            o
        }
        AccessorySlot::Neck => parts::scarf(0.0),
        AccessorySlot::Body => shapes::ellipse(Vec2::splat(0.5), 0.45, 0.48),
        AccessorySlot::Held => props::fishing_rod(),
        AccessorySlot::Furniture => shapes::rect(Vec2::new(0.1, 0.4), Vec2::new(0.9, 1.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, slot: AccessorySlot) -> AccessoryItem {
        AccessoryItem {
            id: id.to_string(),
            asset: format!("accessories/{id}.png"),
            slot,
            offset: (0.0, -0.4),
            scale: 0.5,
        }
    }

    fn catalog() -> AccessoryCatalog {
        AccessoryCatalog::new([
            item("crown", AccessorySlot::Head),
            item("shades", AccessorySlot::Face),
            item("scarf", AccessorySlot::Neck),
            item("parka", AccessorySlot::Body),
            item("rod", AccessorySlot::Held),
            item("chair", AccessorySlot::Furniture),
        ])
    }

    fn equipped(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn furniture_goes_behind_everything_else_in_front() {
        let layout = catalog().layout(
            &equipped(&["crown", "shades", "scarf", "parka", "rod", "chair"]),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            |_| true,
        );
        let behind: Vec<_> = layout.behind.iter().map(|p| p.id.as_str()).collect();
        let front: Vec<_> = layout.front.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(behind, ["chair"]);
        assert_eq!(front, ["parka", "scarf", "rod", "crown", "shades"]);
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let layout = catalog().layout(&equipped(&["crown", "jetpack"]), Rect::new(0.0, 0.0, 10.0, 10.0), |_| true);
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn missing_images_fall_back_to_placeholders() {
        let layout = catalog().layout(&equipped(&["crown", "chair"]), Rect::new(0.0, 0.0, 10.0, 10.0), |_| false);
        for p in layout.front.iter().chain(&layout.behind) {
            match &p.visual {
                AccessoryVisual::Placeholder(o) => assert!(!o.is_empty()),
                AccessoryVisual::Sprite(_) => panic!("expected a placeholder for {}", p.id),
            }
        }
    }

    #[test]
    fn placement_scales_with_mascot_size() {
        let crown = item("crown", AccessorySlot::Head);
        let small = place(&crown, Rect::new(0.0, 0.0, 100.0, 100.0));
        let big = place(&crown, Rect::new(0.0, 0.0, 200.0, 200.0));
        assert!((small.width() - 50.0).abs() < 1e-4);
        assert!((big.width() - 100.0).abs() < 1e-4);
        assert!((small.center() - Vec2::new(50.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn shipped_catalog_resolves() {
        let config = crate::config::SceneConfig::embedded().unwrap();
        let catalog = AccessoryCatalog::new(config.accessories);
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.get("lantern").map(|i| i.slot), Some(AccessorySlot::Furniture));
    }
}
