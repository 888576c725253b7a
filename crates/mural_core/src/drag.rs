//! Cosmetic drag-and-drop repositioning of rendered recado nodes.
//!
//! Only the current [`MuralView`] is touched; the recado collection and its
//! sort order never change, and the next full render drops any placement.

use shared::domain::RecadoId;
use tracing::debug;

use crate::view::{MuralView, Placement};

pub const DRAGGING_OPACITY: f32 = 0.4;
const RESTING_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Default)]
pub struct DragState {
    dragging: Option<RecadoId>,
}

impl DragState {
    pub fn dragging(&self) -> Option<&RecadoId> {
        self.dragging.as_ref()
    }

    /// Captures `id` and dims its node. Unknown ids are ignored. A drag that
    /// never saw its end is finished first.
    pub fn start(&mut self, view: &mut MuralView, id: RecadoId) -> bool {
        self.end(view);
        let Some(node) = view.items.iter_mut().find(|node| node.id == id) else {
            return false;
        };
        node.opacity = DRAGGING_OPACITY;
        self.dragging = Some(id);
        true
    }

    /// Places the captured node at `pointer`, relative to the container's
    /// top-left corner, and moves it to the end of the list so it stacks on top.
    pub fn drop_at(
        &mut self,
        view: &mut MuralView,
        pointer: Point,
        container_origin: Point,
    ) -> bool {
        let Some(id) = self.dragging.as_ref() else {
            return false;
        };
        let Some(index) = view.items.iter().position(|node| &node.id == id) else {
            return false;
        };

        let mut node = view.items.remove(index);
        node.placement = Some(Placement {
            left: pointer.x - container_origin.x,
            top: pointer.y - container_origin.y,
        });
        debug!(recado_id = %node.id, x = pointer.x, y = pointer.y, "dropped recado");
        view.items.push(node);
        true
    }

    pub fn end(&mut self, view: &mut MuralView) {
        if let Some(id) = self.dragging.take() {
            if let Some(node) = view.items.iter_mut().find(|node| node.id == id) {
                node.opacity = RESTING_OPACITY;
            }
        }
    }

    pub fn reset(&mut self) {
        self.dragging = None;
    }
}
