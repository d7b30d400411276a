use serde::{Deserialize, Serialize};

use crate::geometry::shapes_surrounding_quad;
use crate::model::{EditorShape, ShapeType};
use crate::shape_store::ShapeStore;

/// Which scale interactions the current selection supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleCapabilities {
    pub can_scale_x: bool,
    pub can_scale_y: bool,
    pub can_scale_diagonally: bool,
    pub can_scale_from_origin: bool,
    pub is_scaling_single_curve: bool,
}

/// Derives [`ScaleCapabilities`] from the live selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    eligible: Vec<u64>,
    capabilities: ScaleCapabilities,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the eligible set and capabilities.
    ///
    /// Ids missing from `store` and objects without spatial extent are
    /// filtered out; selection order is kept.
    pub fn update(&mut self, store: &ShapeStore, selected: &[u64]) {
        self.eligible.clear();
        self.eligible.extend(selected.iter().copied().filter(|&id| {
            store
                .get(id)
                .is_some_and(|object| object.has_spatial_extent())
        }));

        let quad = shapes_surrounding_quad(self.eligible.iter().filter_map(|&id| store.get(id)));
        let can_scale_x = quad.width() > 0.0;
        let can_scale_y = quad.height() > 0.0;

        let is_scaling_single_curve = match self.eligible.as_slice() {
            [id] => store
                .get(*id)
                .is_some_and(|object| object.shape_type() == ShapeType::Slider),
            _ => false,
        };

        self.capabilities = ScaleCapabilities {
            can_scale_x,
            can_scale_y,
            can_scale_diagonally: can_scale_x && can_scale_y,
            can_scale_from_origin: !self.eligible.is_empty(),
            is_scaling_single_curve,
        };
    }

    pub fn eligible(&self) -> &[u64] {
        &self.eligible
    }

    pub fn capabilities(&self) -> ScaleCapabilities {
        self.capabilities
    }
}
