// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Interactive corner editing: pointer events, the drag state machine, and
// the overlay handed to the rendering collaborator.

pub mod corner_editor;
pub mod overlay;

use std::collections::VecDeque;

use quadscan_core::Point;
use serde::{Deserialize, Serialize};

pub use corner_editor::{CornerEditor, EditorConfig};
pub use overlay::{Annotation, Handle, Overlay, OverlayRenderer};

/// A pointer or session event delivered by the windowing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorEvent {
    /// Primary button pressed.
    Press(Point),
    /// Pointer moved.
    Move(Point),
    /// Primary button released.
    Release(Point),
    /// The user accepted the corners; the session ends.
    Confirm,
}

/// Whether the editing session is still accepting events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Finished,
}

/// Serial source of editor events.
///
/// Returns `None` once the source is exhausted (e.g. the window closed).
pub trait EventSource {
    fn next_event(&mut self) -> Option<EditorEvent>;
}

impl EventSource for VecDeque<EditorEvent> {
    fn next_event(&mut self) -> Option<EditorEvent> {
        self.pop_front()
    }
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Option<EditorEvent> {
        (**self).next_event()
    }
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_event(&mut self) -> Option<EditorEvent> {
        (**self).next_event()
    }
}
