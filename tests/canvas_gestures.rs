use std::sync::Arc;

use eframe_draw::{Canvas, CanvasConfig, CanvasEvent, EventHandler, PathCommand};
use egui::{Color32, pos2};
use parking_lot::Mutex;

// Records every event it sees
struct Recorder(Arc<Mutex<Vec<CanvasEvent>>>);

impl EventHandler for Recorder {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.0.lock().push(event.clone());
    }
}

fn recorded_canvas() -> (Canvas, Arc<Mutex<Vec<CanvasEvent>>>) {
    let canvas = Canvas::default();
    let events = Arc::new(Mutex::new(Vec::new()));
    canvas.subscribe(Box::new(Recorder(Arc::clone(&events))));
    (canvas, events)
}

fn draw_line(canvas: &Canvas, from: (f32, f32), to: (f32, f32)) {
    canvas.on_gesture_start(from.0, from.1);
    canvas.on_gesture_move(to.0, to.1);
    canvas.on_gesture_end();
}

#[test]
fn test_gesture_commits_smoothed_path() {
    let canvas = Canvas::default();
    canvas.on_gesture_start(0.0, 0.0);
    canvas.on_gesture_move(10.0, 0.0);
    canvas.on_gesture_move(10.0, 10.0);
    canvas.on_gesture_end();

    let strokes = canvas.history().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(
        strokes[0].path().commands(),
        &[
            PathCommand::MoveTo(pos2(0.0, 0.0)),
            PathCommand::QuadTo {
                control: pos2(0.0, 0.0),
                to: pos2(5.0, 0.0)
            },
            PathCommand::QuadTo {
                control: pos2(10.0, 0.0),
                to: pos2(10.0, 5.0)
            },
            PathCommand::LineTo(pos2(10.0, 10.0)),
        ]
    );
}

#[test]
fn test_tap_renders_as_dot() {
    let canvas = Canvas::default();
    canvas.on_gesture_start(5.0, 5.0);
    canvas.on_gesture_end();

    let snapshot = canvas.snapshot_for_render();
    let path = snapshot.strokes[0].path();
    assert_eq!(path.len(), 5);
    let bounds = path.bounds(0.0);
    assert_eq!(bounds.width(), 1.0);
    assert_eq!(bounds.height(), 2.0);
}

#[test]
fn test_attribute_changes_do_not_touch_committed_strokes() {
    let canvas = Canvas::default();
    canvas.set_color(Color32::RED);
    canvas.set_stroke_width(3.0);
    draw_line(&canvas, (0.0, 0.0), (5.0, 5.0));

    canvas.set_color(Color32::BLUE);
    canvas.set_alpha(50);
    canvas.set_stroke_width(12.0);
    canvas.toggle_eraser();

    let committed = canvas.history().strokes()[0].attributes();
    assert_eq!(committed.color(), Color32::RED);
    assert_eq!(committed.stroke_width(), 3.0);
    assert_eq!(committed.alpha(), 255);
    assert!(!committed.is_eraser());

    draw_line(&canvas, (0.0, 0.0), (5.0, 5.0));
    let second = canvas.history().strokes()[1].attributes();
    assert_eq!(second.color(), Color32::BLUE);
    assert_eq!(second.alpha(), 127);
    assert_eq!(second.stroke_width(), 12.0);
    assert!(second.is_eraser());
}

#[test]
fn test_in_progress_stroke_uses_live_attributes() {
    let canvas = Canvas::default();
    canvas.on_gesture_start(0.0, 0.0);
    canvas.on_gesture_move(4.0, 4.0);
    canvas.set_color(Color32::GREEN);

    let snapshot = canvas.snapshot_for_render();
    assert!(snapshot.in_progress.is_some());
    assert_eq!(snapshot.live_attributes.color(), Color32::GREEN);

    canvas.on_gesture_end();
    assert_eq!(canvas.history().strokes()[0].attributes().color(), Color32::GREEN);
}

#[test]
fn test_new_gesture_invalidates_redo() {
    let canvas = Canvas::default();
    draw_line(&canvas, (0.0, 0.0), (1.0, 1.0));
    draw_line(&canvas, (2.0, 2.0), (3.0, 3.0));
    canvas.undo();
    canvas.undo();
    assert!(canvas.can_redo());

    canvas.redo();
    assert_eq!(canvas.history().len(), 1);
    assert!(canvas.can_redo());

    canvas.on_gesture_start(9.0, 9.0);
    assert!(!canvas.can_redo());
    canvas.on_gesture_end();
    assert_eq!(canvas.history().len(), 2);
}

#[test]
fn test_clear_drops_gesture_in_progress() {
    let canvas = Canvas::default();
    draw_line(&canvas, (0.0, 0.0), (1.0, 1.0));
    canvas.on_gesture_start(4.0, 4.0);
    canvas.on_gesture_move(6.0, 6.0);

    canvas.clear();
    assert!(canvas.snapshot_for_render().is_blank());

    // The rest of the interrupted gesture is ignored
    canvas.on_gesture_move(8.0, 8.0);
    canvas.on_gesture_end();
    assert!(canvas.history().is_empty());

    canvas.undo();
    assert_eq!(canvas.history().len(), 1);
}

#[test]
fn test_invalid_width_is_ignored() {
    let canvas = Canvas::new(&CanvasConfig {
        stroke_width: 5.0,
        ..Default::default()
    });
    canvas.set_stroke_width(0.0);
    canvas.set_stroke_width(f32::INFINITY);
    assert_eq!(canvas.attributes().stroke_width(), 5.0);
}

#[test]
fn test_events_for_each_change() {
    let (canvas, events) = recorded_canvas();
    draw_line(&canvas, (0.0, 0.0), (1.0, 1.0));
    let id = canvas.history().committed_ids()[0];
    canvas.undo();
    canvas.redo();
    canvas.clear();
    canvas.undo();
    canvas.toggle_eraser();

    let recorded = events.lock().clone();
    assert_eq!(recorded.len(), 8);
    assert_eq!(recorded[0], CanvasEvent::GestureStarted { redo_discarded: 0 });
    assert_eq!(recorded[1], CanvasEvent::GestureMoved);
    assert_eq!(recorded[2], CanvasEvent::StrokeCommitted { id });
    assert_eq!(recorded[3], CanvasEvent::StrokeUndone { id });
    assert_eq!(recorded[4], CanvasEvent::StrokeRedone { id });
    assert_eq!(recorded[5], CanvasEvent::Cleared { strokes: 1 });
    assert_eq!(recorded[6], CanvasEvent::ClearRestored { strokes: 1 });
    assert!(matches!(&recorded[7], CanvasEvent::AttributesChanged(attrs) if attrs.is_eraser()));
}

#[test]
fn test_no_events_for_noops() {
    let (canvas, events) = recorded_canvas();
    canvas.undo();
    canvas.redo();
    canvas.on_gesture_move(1.0, 1.0);
    canvas.on_gesture_end();
    canvas.set_stroke_width(-1.0);

    assert!(events.lock().is_empty());
}

#[test]
fn test_no_events_for_unchanged_settings_or_empty_clear() {
    let (canvas, events) = recorded_canvas();
    let attributes = canvas.attributes();
    canvas.set_color(attributes.color());
    canvas.set_alpha(100);
    canvas.set_stroke_width(attributes.stroke_width());
    canvas.clear();
    assert!(events.lock().is_empty());

    // Dropping a gesture in progress is still a visible change
    canvas.on_gesture_start(1.0, 1.0);
    canvas.clear();
    assert_eq!(events.lock().last(), Some(&CanvasEvent::Cleared { strokes: 0 }));
}

// Undoes every stroke as soon as it is committed
struct AutoUndo(Arc<Canvas>);

impl EventHandler for AutoUndo {
    fn handle_event(&mut self, event: &CanvasEvent) {
        if let CanvasEvent::StrokeCommitted { .. } = event {
            self.0.undo();
        }
    }
}

#[test]
fn test_handler_can_mutate_canvas() {
    let canvas = Arc::new(Canvas::default());
    let events = Arc::new(Mutex::new(Vec::new()));
    canvas.subscribe(Box::new(AutoUndo(Arc::clone(&canvas))));
    canvas.subscribe(Box::new(Recorder(Arc::clone(&events))));

    draw_line(&canvas, (0.0, 0.0), (4.0, 4.0));
    let id = canvas.history().undone_ids()[0];

    assert!(canvas.history().is_empty());
    let recorded = events.lock().clone();
    assert_eq!(
        &recorded[2..],
        &[
            CanvasEvent::StrokeCommitted { id },
            CanvasEvent::StrokeUndone { id },
        ]
    );
}

#[test]
fn test_redo_discard_is_reported() {
    let (canvas, events) = recorded_canvas();
    draw_line(&canvas, (0.0, 0.0), (1.0, 1.0));
    draw_line(&canvas, (0.0, 0.0), (1.0, 1.0));
    canvas.undo();
    canvas.undo();
    canvas.on_gesture_start(0.0, 0.0);

    assert_eq!(
        events.lock().last(),
        Some(&CanvasEvent::GestureStarted { redo_discarded: 2 })
    );
}

#[test]
fn test_render_snapshot_from_other_thread() {
    let canvas = Arc::new(Canvas::default());

    let renderer = {
        let canvas = Arc::clone(&canvas);
        std::thread::spawn(move || {
            for _ in 0..100 {
                let snapshot = canvas.snapshot_for_render();
                for stroke in &snapshot.strokes {
                    // Every committed path is finished
                    assert!(matches!(
                        stroke.path().commands().last(),
                        Some(PathCommand::LineTo(_))
                    ));
                }
            }
        })
    };

    for i in 0..100 {
        let x = i as f32;
        draw_line(&canvas, (x, 0.0), (x, 10.0));
        if i % 10 == 0 {
            canvas.undo();
        }
    }
    renderer.join().unwrap();

    assert_eq!(canvas.history().len(), 90);
}
