// SPDX-License-Identifier: MPL-2.0
//! Interactive editing: the pointer session controller for the crop surface
//! and the [`EditorSession`] that owns the poster being built.

pub mod pointer;
pub mod session;

pub use pointer::{InteractionSession, PointerController, PointerEvent, PointerKind};
pub use session::{CropEditor, EditorSession};
