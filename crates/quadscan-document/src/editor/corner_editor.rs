// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner editor: press/drag/release state machine over the four corners of
// a detected document, redrawing the overlay after every change.

use quadscan_core::{DragState, Orientation, Point, PointSet, ScanConfig, Slot};
use tracing::{debug, trace};

use super::overlay::{Overlay, OverlayRenderer};
use super::{EditorEvent, SessionStatus};
use crate::corners::hit_test::nearest;

/// Editor settings, usually taken from a [`ScanConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Radius of the drawn corner handles.
    pub handle_radius: u32,
    /// Presses within `handle_radius * hit_radius_factor` grab a handle.
    pub hit_radius_factor: u32,
    /// Reject moves that would turn a convex quadrilateral non-convex.
    pub enforce_convexity: bool,
    /// Instruction lines drawn on every frame.
    pub annotations: Vec<String>,
}

impl From<&ScanConfig> for EditorConfig {
    fn from(config: &ScanConfig) -> Self {
        Self {
            handle_radius: config.handle_radius,
            hit_radius_factor: config.hit_radius_factor,
            enforce_convexity: config.enforce_convexity,
            annotations: config.annotations.clone(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

/// Interactive editor owning the corner points for one session.
///
/// Events arrive one at a time through [`CornerEditor::handle_event`]. A
/// press close enough to a corner starts a drag, moves update that corner,
/// and a release ends the drag. [`EditorEvent::Confirm`] ends the session;
/// the final corners are then taken with [`CornerEditor::into_points`].
pub struct CornerEditor<R: OverlayRenderer> {
    points: PointSet,
    drag: DragState,
    orientation: Orientation,
    config: EditorConfig,
    renderer: R,
    finished: bool,
}

impl<R: OverlayRenderer> CornerEditor<R> {
    /// Create an editor and draw the first frame.
    pub fn new(points: PointSet, orientation: Orientation, config: EditorConfig, renderer: R) -> Self {
        let mut editor = Self {
            points,
            drag: DragState::Idle,
            orientation,
            config,
            renderer,
            finished: false,
        };
        editor.redraw();
        editor
    }

    // -- Accessors ------------------------------------------------------------

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Distance within which a press grabs the nearest corner.
    pub fn hit_threshold(&self) -> f64 {
        self.config.handle_radius as f64 * self.config.hit_radius_factor as f64
    }

    /// End the session and hand the corners over by value.
    pub fn into_points(self) -> PointSet {
        self.points
    }

    // -- Event handling -------------------------------------------------------

    /// Feed one event into the state machine.
    pub fn handle_event(&mut self, event: EditorEvent) -> SessionStatus {
        if self.finished {
            trace!(?event, "Session finished; event ignored");
            return SessionStatus::Finished;
        }

        match (self.drag, event) {
            (_, EditorEvent::Confirm) => {
                debug!(points = ?self.points, "Corners confirmed");
                self.drag = DragState::Idle;
                self.finished = true;
                return SessionStatus::Finished;
            }
            (DragState::Idle, EditorEvent::Press(location)) => {
                let hit = nearest(location, &self.points);
                if hit.within(self.hit_threshold()) {
                    debug!(slot = %hit.slot, distance = hit.distance, "Drag started");
                    self.drag = DragState::Dragging(hit.slot);
                } else {
                    trace!(distance = hit.distance, "Press missed every handle");
                }
            }
            (DragState::Dragging(slot), EditorEvent::Move(location)) => {
                self.move_corner(slot, location);
            }
            (DragState::Dragging(slot), EditorEvent::Release(_)) => {
                debug!(%slot, point = %self.points[slot], "Drag finished");
                self.drag = DragState::Idle;
            }
            // Idle moves/releases and presses during a drag change nothing.
            _ => {}
        }
        SessionStatus::Active
    }

    /// Draw the current overlay. Never changes the corners.
    pub fn redraw(&mut self) {
        let overlay = self.overlay();
        self.renderer.render(&overlay);
    }

    /// The overlay for the current corners.
    pub fn overlay(&self) -> Overlay {
        Overlay::build(
            &self.points,
            self.config.handle_radius,
            &self.config.annotations,
            self.orientation,
        )
    }

    fn move_corner(&mut self, slot: Slot, location: Point) {
        if self.config.enforce_convexity
            && self.points.is_convex()
            && !diagonals_cross(&self.points, slot, location)
        {
            debug!(
                %slot,
                %location,
                opposite = %slot.opposite(),
                "Move rejected; corner would fold the quadrilateral"
            );
            return;
        }
        self.points[slot] = location;
        self.redraw();
    }
}

/// Whether the quadrilateral stays strictly convex with `slot` moved to
/// `location`.
///
/// A quadrilateral is convex exactly when its diagonals cross: the line
/// through the moved corner's two neighbours must separate it from the
/// opposite corner, and the line from the corner to its opposite must
/// separate the neighbours.
fn diagonals_cross(points: &PointSet, slot: Slot, location: Point) -> bool {
    let [before, after] = slot.neighbors().map(|s| points[s]);
    let opposite = points[slot.opposite()];

    let hinge = |p: Point| before.cross(after, p).signum();
    let diagonal = |p: Point| location.cross(opposite, p).signum();

    hinge(location) != 0
        && hinge(location) == -hinge(opposite)
        && diagonal(before) != 0
        && diagonal(before) == -diagonal(after)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects every overlay it is asked to draw.
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Overlay>,
    }

    impl OverlayRenderer for RecordingRenderer {
        fn render(&mut self, overlay: &Overlay) {
            self.frames.push(overlay.clone());
        }
    }

    fn square() -> PointSet {
        PointSet::new(
            Point::new(100, 100),
            Point::new(1000, 100),
            Point::new(1000, 1000),
            Point::new(100, 1000),
        )
    }

    fn editor() -> CornerEditor<RecordingRenderer> {
        CornerEditor::new(
            square(),
            Orientation::Upright,
            EditorConfig::default(),
            RecordingRenderer::default(),
        )
    }

    #[test]
    fn draws_on_construction() {
        let editor = editor();
        assert_eq!(editor.renderer.frames.len(), 1);
        assert_eq!(editor.drag_state(), DragState::Idle);
        assert_eq!(editor.hit_threshold(), 100.0);
    }

    #[test]
    fn press_move_release_drags_one_corner() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(110, 95)));
        assert_eq!(editor.drag_state(), DragState::Dragging(Slot::UpperLeft));

        editor.handle_event(EditorEvent::Move(Point::new(10, 10)));
        editor.handle_event(EditorEvent::Release(Point::new(10, 10)));

        assert_eq!(editor.drag_state(), DragState::Idle);
        let points = editor.points();
        assert_eq!(points[Slot::UpperLeft], Point::new(10, 10));
        assert_eq!(points[Slot::UpperRight], Point::new(1000, 100));
        assert_eq!(points[Slot::LowerRight], Point::new(1000, 1000));
        assert_eq!(points[Slot::LowerLeft], Point::new(100, 1000));
    }

    #[test]
    fn every_move_redraws() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(1000, 1000)));
        editor.handle_event(EditorEvent::Move(Point::new(990, 990)));
        editor.handle_event(EditorEvent::Move(Point::new(980, 985)));

        let frames = &editor.renderer.frames;
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].handles[2].center, Point::new(980, 985));
        assert_eq!(
            frames[2].edges[1],
            (Point::new(1000, 100), Point::new(980, 985))
        );
    }

    #[test]
    fn press_outside_threshold_stays_idle() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(550, 550)));
        assert_eq!(editor.drag_state(), DragState::Idle);

        editor.handle_event(EditorEvent::Move(Point::new(120, 120)));
        assert_eq!(*editor.points(), square());
        assert_eq!(editor.renderer.frames.len(), 1);
    }

    #[test]
    fn press_exactly_on_threshold_grabs() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(200, 100)));
        assert_eq!(editor.drag_state(), DragState::Dragging(Slot::UpperLeft));
    }

    #[test]
    fn idle_moves_and_releases_are_ignored() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Release(Point::new(100, 100)));
        editor.handle_event(EditorEvent::Move(Point::new(100, 100)));
        assert_eq!(editor.drag_state(), DragState::Idle);
        assert_eq!(editor.renderer.frames.len(), 1);
    }

    #[test]
    fn second_press_keeps_current_drag() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(100, 100)));
        editor.handle_event(EditorEvent::Press(Point::new(1000, 1000)));
        assert_eq!(editor.drag_state(), DragState::Dragging(Slot::UpperLeft));
    }

    #[test]
    fn redraw_is_idempotent() {
        let mut editor = editor();
        editor.redraw();
        editor.redraw();
        let frames = &editor.renderer.frames;
        assert_eq!(frames[1], frames[2]);
        assert_eq!(frames[0], frames[1]);
        assert_eq!(*editor.points(), square());
    }

    #[test]
    fn far_coordinates_are_not_errors() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(i32::MAX, i32::MIN)));
        assert_eq!(editor.drag_state(), DragState::Idle);

        editor.handle_event(EditorEvent::Press(Point::new(1000, 100)));
        editor.handle_event(EditorEvent::Move(Point::new(-50_000, 70_000)));
        assert_eq!(editor.points()[Slot::UpperRight], Point::new(-50_000, 70_000));
    }

    #[test]
    fn self_intersection_is_allowed_by_default() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(100, 100)));
        editor.handle_event(EditorEvent::Move(Point::new(1200, 1200)));
        assert_eq!(editor.points()[Slot::UpperLeft], Point::new(1200, 1200));
        assert!(!editor.points().is_convex());
    }

    #[test]
    fn convexity_guard_rejects_folding_moves() {
        let config = EditorConfig {
            enforce_convexity: true,
            ..EditorConfig::default()
        };
        let mut editor = CornerEditor::new(
            square(),
            Orientation::Upright,
            config,
            RecordingRenderer::default(),
        );
        editor.handle_event(EditorEvent::Press(Point::new(100, 100)));

        editor.handle_event(EditorEvent::Move(Point::new(1200, 1200)));
        assert_eq!(editor.points()[Slot::UpperLeft], Point::new(100, 100));
        assert_eq!(editor.renderer.frames.len(), 1);

        editor.handle_event(EditorEvent::Move(Point::new(50, 80)));
        assert_eq!(editor.points()[Slot::UpperLeft], Point::new(50, 80));
        assert_eq!(editor.renderer.frames.len(), 2);
    }

    #[test]
    fn diagonal_check_agrees_with_convexity() {
        let shapes = [
            square(),
            PointSet::new(
                Point::new(150, 40),
                Point::new(360, 110),
                Point::new(300, 460),
                Point::new(60, 380),
            ),
        ];
        for points in shapes {
            for slot in Slot::ALL {
                for y in (-200..=1400).step_by(50) {
                    for x in (-200..=1400).step_by(50) {
                        let location = Point::new(x, y);
                        let mut candidate = points;
                        candidate[slot] = location;
                        assert_eq!(
                            diagonals_cross(&points, slot, location),
                            candidate.is_convex(),
                            "{slot} moved to {location}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn convexity_guard_stops_a_corner_crossing_its_hinge() {
        let config = EditorConfig {
            enforce_convexity: true,
            ..EditorConfig::default()
        };
        let mut editor = CornerEditor::new(
            square(),
            Orientation::Upright,
            config,
            RecordingRenderer::default(),
        );
        editor.handle_event(EditorEvent::Press(Point::new(1000, 100)));

        // Just inside the line through the upper-left and lower-right corners.
        editor.handle_event(EditorEvent::Move(Point::new(560, 540)));
        assert_eq!(editor.points()[Slot::UpperRight], Point::new(560, 540));

        // On that line, then beyond it.
        editor.handle_event(EditorEvent::Move(Point::new(550, 550)));
        editor.handle_event(EditorEvent::Move(Point::new(400, 700)));
        assert_eq!(editor.points()[Slot::UpperRight], Point::new(560, 540));
        assert_eq!(editor.renderer.frames.len(), 2);
    }

    #[test]
    fn confirm_finishes_the_session() {
        let mut editor = editor();
        editor.handle_event(EditorEvent::Press(Point::new(100, 100)));
        assert_eq!(editor.handle_event(EditorEvent::Confirm), SessionStatus::Finished);
        assert!(editor.is_finished());
        assert_eq!(editor.drag_state(), DragState::Idle);

        // Later events are ignored.
        editor.handle_event(EditorEvent::Press(Point::new(100, 100)));
        editor.handle_event(EditorEvent::Move(Point::new(5, 5)));
        assert_eq!(editor.into_points(), square());
    }
}
