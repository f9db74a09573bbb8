// SPDX-License-Identifier: MPL-2.0
//! Pointer session controller for the crop surface.
//!
//! Mouse and touch events share one state machine. At most one session is
//! active: a second pointer-down while dragging or resizing is ignored, and
//! any release, leave or cancel returns to [`InteractionSession::Idle`].

use crate::config::HANDLE_HIT_RADIUS;
use crate::domain::crop::{
    apply_drag, apply_resize, hit_test, Corner, CropBox, CropSurface, HitTarget, ImageBounds,
    NativePoint,
};

/// Kind of pointer input, covering both mouse and touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl PointerKind {
    #[must_use]
    pub fn is_press(self) -> bool {
        matches!(self, PointerKind::Down | PointerKind::TouchStart)
    }

    #[must_use]
    pub fn is_motion(self) -> bool {
        matches!(self, PointerKind::Move | PointerKind::TouchMove)
    }

    #[must_use]
    pub fn is_release(self) -> bool {
        matches!(
            self,
            PointerKind::Up | PointerKind::Leave | PointerKind::TouchEnd | PointerKind::TouchCancel
        )
    }
}

/// A pointer event in client (viewport) coordinates. Touch events carry the
/// first touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    #[must_use]
    pub fn new(kind: PointerKind, client_x: f32, client_y: f32) -> Self {
        Self {
            kind,
            client_x,
            client_y,
        }
    }
}

/// The active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionSession {
    #[default]
    Idle,
    /// Moving the box. `start_offset` is the pointer's native position
    /// relative to the box origin when the drag began.
    Dragging { start_offset: NativePoint },
    /// Dragging a corner while the opposite one stays fixed.
    Resizing { corner: Corner },
}

impl InteractionSession {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, InteractionSession::Idle)
    }
}

/// Turns pointer events into crop box updates.
#[derive(Debug, Clone)]
pub struct PointerController {
    session: InteractionSession,
    /// Handle hit radius in displayed pixels.
    handle_radius: f32,
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new(HANDLE_HIT_RADIUS)
    }
}

impl PointerController {
    #[must_use]
    pub fn new(handle_radius: f32) -> Self {
        Self {
            session: InteractionSession::Idle,
            handle_radius,
        }
    }

    #[must_use]
    pub fn session(&self) -> InteractionSession {
        self.session
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Starts a session for a pointer-down on `target`.
    ///
    /// Returns `false` and changes nothing if a session is already active.
    pub fn begin(
        &mut self,
        event: &PointerEvent,
        crop: &CropBox,
        target: HitTarget,
        surface: &CropSurface,
    ) -> bool {
        if self.session.is_active() {
            log::debug!("Ignoring pointer-down during {:?}", self.session);
            return false;
        }
        self.session = match target {
            HitTarget::Handle(corner) => InteractionSession::Resizing { corner },
            HitTarget::Body => {
                let pointer = surface.to_native(event.client_x, event.client_y);
                InteractionSession::Dragging {
                    start_offset: NativePoint::new(pointer.x - crop.x, pointer.y - crop.y),
                }
            }
        };
        log::debug!("Crop session started: {:?}", self.session);
        true
    }

    /// Computes the box for a pointer move. `None` while idle.
    #[must_use]
    pub fn update(
        &self,
        event: &PointerEvent,
        crop: &CropBox,
        surface: &CropSurface,
        bounds: ImageBounds,
    ) -> Option<CropBox> {
        let pointer = surface.to_native(event.client_x, event.client_y);
        match self.session {
            InteractionSession::Idle => None,
            InteractionSession::Dragging { start_offset } => {
                let dx = pointer.x - start_offset.x - crop.x;
                let dy = pointer.y - start_offset.y - crop.y;
                Some(apply_drag(*crop, dx, dy, bounds))
            }
            InteractionSession::Resizing { corner } => {
                Some(apply_resize(*crop, corner, pointer, bounds))
            }
        }
    }

    /// Ends the session. Calling it while idle is a no-op.
    pub fn end(&mut self) {
        if self.session.is_active() {
            log::debug!("Crop session ended: {:?}", self.session);
        }
        self.session = InteractionSession::Idle;
    }

    /// Routes one event through hit testing and the session state machine.
    ///
    /// Returns the new box when the event moved or resized it.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        crop: &CropBox,
        surface: &CropSurface,
        bounds: ImageBounds,
    ) -> Option<CropBox> {
        if event.kind.is_press() {
            if self.session.is_active() {
                return None;
            }
            let pointer = surface.to_native(event.client_x, event.client_y);
            let radius = surface.scale.to_native(self.handle_radius);
            if let Some(target) = hit_test(crop, pointer, radius) {
                self.begin(event, crop, target, surface);
            }
            None
        } else if event.kind.is_motion() {
            self.update(event, crop, surface, bounds)
        } else {
            self.end();
            None
        }
    }
}
