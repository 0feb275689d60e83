//! Hover / select state machine for map regions.
//!
//! At most one region is highlighted at a time. Highlighting replaces the
//! region's material with a tinted copy and raises it; the untouched
//! appearance is cached the first time a region is highlighted and written
//! back verbatim on restore.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::World;
use crate::components::{Color, Material};
use crate::entity::RegionId;

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectionStyle {
    pub hover_color: Color,
    pub selected_color: Color,
    /// Elevation added to a hovered region.
    pub hover_lift: f64,
    /// Elevation added to the selected region.
    pub select_lift: f64,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            hover_color: Color::from_hex(0xcfe0fa),
            selected_color: Color::from_hex(0x5b8def),
            hover_lift: 0.2,
            select_lift: 0.2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    None,
    Hovered(RegionId),
    Selected(RegionId),
}

impl InteractionState {
    /// The region currently drawn highlighted, if any.
    pub fn region(&self) -> Option<RegionId> {
        match *self {
            InteractionState::None => None,
            InteractionState::Hovered(r) | InteractionState::Selected(r) => Some(r),
        }
    }
}

/// What a hover or click did to the state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    HoverChanged {
        from: Option<RegionId>,
        to: Option<RegionId>,
    },
    Selected {
        region: RegionId,
        previous: Option<RegionId>,
    },
    Deselected {
        region: RegionId,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Original {
    material: Material,
    elevation: f64,
}

#[derive(Debug, Default)]
pub struct SelectionMachine {
    state: InteractionState,
    originals: HashMap<RegionId, Original>,
    style: SelectionStyle,
}

impl SelectionMachine {
    pub fn new(style: SelectionStyle) -> Self {
        Self {
            state: InteractionState::None,
            originals: HashMap::new(),
            style,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn style(&self) -> &SelectionStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: SelectionStyle) {
        self.style = style;
    }

    pub fn hovered(&self) -> Option<RegionId> {
        match self.state {
            InteractionState::Hovered(r) => Some(r),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<RegionId> {
        match self.state {
            InteractionState::Selected(r) => Some(r),
            _ => None,
        }
    }

    /// Pointer is now over `target` (or over nothing).
    ///
    /// Ignored while a region is selected. Unknown ids count as "nothing".
    pub fn hover(&mut self, world: &mut World, target: Option<RegionId>) -> Transition {
        if matches!(self.state, InteractionState::Selected(_)) {
            return Transition::Unchanged;
        }

        let target = target.filter(|id| world.contains(*id));
        let current = self.hovered();
        if current == target {
            return Transition::Unchanged;
        }

        if let Some(prev) = current {
            self.restore(world, prev);
        }
        self.state = match target {
            Some(next) => {
                let (color, lift) = (self.style.hover_color, self.style.hover_lift);
                self.highlight(world, next, color, lift);
                InteractionState::Hovered(next)
            }
            None => InteractionState::None,
        };

        debug!(?current, ?target, "hover changed");
        Transition::HoverChanged {
            from: current,
            to: target,
        }
    }

    /// A click (or tap) resolved to `target`.
    pub fn click(&mut self, world: &mut World, target: Option<RegionId>) -> Transition {
        let target = target.filter(|id| world.contains(*id));

        match (self.state, target) {
            (InteractionState::Selected(current), Some(next)) if current == next => {
                self.deselect(world, current)
            }
            (InteractionState::Selected(current), None) => self.deselect(world, current),
            (InteractionState::Selected(current), Some(next)) => {
                self.restore(world, current);
                self.select(world, next, Some(current))
            }
            (InteractionState::Hovered(hovered), Some(next)) => {
                self.restore(world, hovered);
                self.select(world, next, None)
            }
            (InteractionState::None, Some(next)) => self.select(world, next, None),
            (_, None) => Transition::Unchanged,
        }
    }

    /// Restores whatever is highlighted and returns to `None`.
    pub fn clear(&mut self, world: &mut World) -> Transition {
        match self.state {
            InteractionState::None => Transition::Unchanged,
            InteractionState::Hovered(r) => {
                self.restore(world, r);
                self.state = InteractionState::None;
                Transition::HoverChanged {
                    from: Some(r),
                    to: None,
                }
            }
            InteractionState::Selected(r) => self.deselect(world, r),
        }
    }

    /// Drops the cached original of `id`, e.g. after the host replaced the
    /// region. A highlighted region is restored first.
    pub fn forget(&mut self, world: &mut World, id: RegionId) {
        if self.state.region() == Some(id) {
            self.clear(world);
        }
        self.originals.remove(&id);
    }

    fn select(&mut self, world: &mut World, region: RegionId, previous: Option<RegionId>) -> Transition {
        let (color, lift) = (self.style.selected_color, self.style.select_lift);
        self.highlight(world, region, color, lift);
        self.state = InteractionState::Selected(region);
        debug!(%region, ?previous, "region selected");
        Transition::Selected { region, previous }
    }

    fn deselect(&mut self, world: &mut World, region: RegionId) -> Transition {
        self.restore(world, region);
        self.state = InteractionState::None;
        debug!(%region, "region deselected");
        Transition::Deselected { region }
    }

    fn highlight(&mut self, world: &mut World, id: RegionId, color: Color, lift: f64) {
        let Some(region) = world.get_mut(id) else {
            return;
        };
        let original = *self.originals.entry(id).or_insert(Original {
            material: region.material,
            elevation: region.elevation,
        });
        region.material = original.material.tinted(color);
        region.elevation = original.elevation + lift;
    }

    fn restore(&mut self, world: &mut World, id: RegionId) {
        let (Some(region), Some(original)) = (world.get_mut(id), self.originals.get(&id)) else {
            return;
        };
        region.material = original.material;
        region.elevation = original.elevation;
    }
}
