use std::cell::Cell;
use std::rc::Rc;

use crate::geometry::{Rect, Vec2};

/// Opaque, stable handle to a composed element's resolved bounds.
///
/// The hook that hands one out keeps it in a remember slot, so the identity
/// is stable across frames. The host renderer calls `attach` once layout has
/// resolved the element's rect, and `detach` when the element leaves the
/// tree. Until then `bounds()` is `None`.
#[derive(Clone, Default)]
pub struct NodeRef {
    bounds: Rc<Cell<Option<Rect>>>,
}

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, bounds: Rect) {
        self.bounds.set(Some(bounds));
    }

    pub fn detach(&self) {
        self.bounds.set(None);
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    pub fn is_attached(&self) -> bool {
        self.bounds.get().is_some()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds().is_some_and(|r| r.contains(point))
    }
}
