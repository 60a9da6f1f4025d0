#![allow(clippy::float_cmp)]

use super::*;
use crate::catalog::{Background, Category, Overlay, seed_backgrounds};
use crate::geometry::{Dimension, Geometry};

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn scenario_core() -> EngineCore {
    EngineCore::with_catalog(CatalogStore::with_backgrounds(seed_backgrounds()))
}

fn seed_target() -> GestureTarget {
    GestureTarget::new("default", "orange-flowers")
}

fn geometry_of(core: &EngineCore, target: &GestureTarget) -> Geometry {
    core.catalog
        .overlay(&target.background_id, &target.overlay_id)
        .unwrap()
        .geometry
}

fn css(core: &EngineCore, target: &GestureTarget) -> [String; 4] {
    let g = geometry_of(core, target);
    [g.width.to_string(), g.height.to_string(), g.top.to_string(), g.left.to_string()]
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_geometry_updated(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::GeometryUpdated { .. }))
}

fn has_gesture_ended(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::GestureEnded { .. }))
}

fn px_overlay(id: &str, x: f64, y: f64, w: f64, h: f64) -> Overlay {
    Overlay {
        id: id.into(),
        image_ref: String::new(),
        label: id.into(),
        category: Category::Light,
        geometry: Geometry::new(Dimension::px(w), Dimension::px(h), Dimension::px(y), Dimension::px(x)),
    }
}

/// Canvas at screen (100, 50), 800x800, with two stacked pixel overlays.
fn core_with_viewport() -> EngineCore {
    let bg = Background {
        id: "bg".into(),
        image_ref: String::new(),
        label: "bg".into(),
        geometry: Geometry::full_canvas(),
        overlays: vec![px_overlay("low", 0.0, 0.0, 400.0, 400.0), px_overlay("high", 200.0, 200.0, 100.0, 100.0)],
    };
    let mut core = EngineCore::with_catalog(CatalogStore::with_backgrounds(vec![bg]));
    core.set_viewport(CanvasRect::new(100.0, 50.0, 800.0, 800.0));
    core
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_starts_idle_without_viewport() {
    let core = EngineCore::new();
    assert!(core.input.is_idle());
    assert!(core.viewport.is_none());
    assert!(core.catalog.is_empty());
    assert!(core.gesture_kind().is_none());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn body_down_enters_translating() {
    let mut core = scenario_core();
    let actions = core.begin_gesture(seed_target(), HitPart::Body, pt(100.0, 100.0));
    assert_eq!(core.gesture_kind(), Some(GestureKind::Translate));
    assert_eq!(core.gesture_target(), Some(&seed_target()));
    assert!(has_action(&actions, |a| matches!(
        a,
        Action::GestureStarted { kind: GestureKind::Translate, .. }
    )));
    assert!(has_action(&actions, |a| *a == Action::SetCursor { cursor: "move".into() }));
}

#[test]
fn handle_down_enters_resizing() {
    let mut core = scenario_core();
    let actions = core.begin_gesture(seed_target(), HitPart::ResizeHandle, pt(0.0, 0.0));
    assert_eq!(core.gesture_kind(), Some(GestureKind::Resize));
    assert!(has_action(&actions, |a| *a == Action::SetCursor { cursor: "se-resize".into() }));
}

#[test]
fn down_on_missing_overlay_is_ignored() {
    let mut core = scenario_core();
    let actions = core.begin_gesture(GestureTarget::new("default", "ghost"), HitPart::Body, pt(0.0, 0.0));
    assert!(actions.is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn snapshot_captures_pixel_values() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::Body, pt(5.0, 6.0));
    let (_, g) = core.input.active().unwrap();
    assert_eq!(g.start, pt(5.0, 6.0));
    assert_eq!(g.snapshot, PixelSnapshot { width: 260.0, height: 0.0, top: -220.0, left: 110.0 });
}

#[test]
fn second_down_during_gesture_does_not_touch_snapshot() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::Body, pt(100.0, 100.0));
    let before = core.input.clone();

    let actions = core.begin_gesture(seed_target(), HitPart::ResizeHandle, pt(400.0, 400.0));

    assert!(actions.is_empty());
    assert_eq!(core.input, before);
}

#[test]
fn move_while_idle_does_nothing() {
    let mut core = scenario_core();
    let revision = core.catalog.revision();
    assert!(core.on_pointer_move(pt(10.0, 10.0)).is_empty());
    assert_eq!(core.catalog.revision(), revision);
}

#[test]
fn up_returns_to_idle() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::Body, pt(0.0, 0.0));
    let actions = core.on_pointer_up();
    assert!(core.input.is_idle());
    assert!(has_action(&actions, |a| *a == Action::GestureEnded { target: seed_target() }));
    assert!(has_action(&actions, |a| *a == Action::SetCursor { cursor: "default".into() }));
}

#[test]
fn up_while_idle_is_silent() {
    let mut core = scenario_core();
    assert!(core.on_pointer_up().is_empty());
    assert!(core.on_pointer_leave().is_empty());
}

// =============================================================
// Translate
// =============================================================

#[test]
fn translate_writes_pixel_offsets() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::Body, pt(100.0, 100.0));
    let actions = core.on_pointer_move(pt(130.0, 80.0));

    assert!(has_geometry_updated(&actions));
    assert!(has_action(&actions, |a| matches!(a, Action::RenderNeeded)));
    assert_eq!(css(&core, &seed_target()), ["260px", "100%", "-240px", "140px"]);
}

#[test]
fn consecutive_moves_match_single_final_move() {
    let mut stepped = scenario_core();
    stepped.begin_gesture(seed_target(), HitPart::Body, pt(0.0, 0.0));
    stepped.on_pointer_move(pt(15.0, -4.0));
    stepped.on_pointer_move(pt(-7.0, 22.0));

    let mut direct = scenario_core();
    direct.begin_gesture(seed_target(), HitPart::Body, pt(0.0, 0.0));
    direct.on_pointer_move(pt(-7.0, 22.0));

    let g = geometry_of(&stepped, &seed_target());
    assert_eq!(g, geometry_of(&direct, &seed_target()));
    assert_eq!(g.top, Dimension::px(-220.0 + 22.0));
    assert_eq!(g.left, Dimension::px(110.0 - 7.0));
}

#[test]
fn percent_offsets_become_pixels_once_touched() {
    let mut core = scenario_core();
    let target = seed_target();
    let patch = GeometryPatch::position(Dimension::percent(10.0), Dimension::percent(20.0));
    core.catalog.update_overlay_geometry(&target.background_id, &target.overlay_id, &patch);

    core.begin_gesture(target.clone(), HitPart::Body, pt(0.0, 0.0));
    core.on_pointer_move(pt(5.0, 5.0));

    let g = geometry_of(&core, &target);
    assert_eq!(g.top, Dimension::px(5.0));
    assert_eq!(g.left, Dimension::px(5.0));
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_respects_floor() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::ResizeHandle, pt(0.0, 0.0));
    core.on_pointer_move(pt(-10_000.0, -10_000.0));
    let g = geometry_of(&core, &seed_target());
    assert_eq!(g.width, Dimension::px(50.0));
    assert_eq!(g.height, Dimension::px(50.0));
    assert_eq!(g.top, Dimension::px(-220.0));
}

// =============================================================
// Ending the gesture
// =============================================================

#[test]
fn leave_commits_last_geometry() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::Body, pt(0.0, 0.0));
    core.on_pointer_move(pt(10.0, 10.0));
    let actions = core.on_pointer_leave();

    assert!(has_gesture_ended(&actions));
    assert!(core.input.is_idle());
    let [_, _, top, left] = css(&core, &seed_target());
    assert_eq!([top, left], ["-210px", "120px"]);
}

#[test]
fn move_outside_viewport_ends_gesture_without_writing() {
    let mut core = core_with_viewport();
    let target = GestureTarget::new("bg", "high");
    core.begin_gesture(target.clone(), HitPart::Body, pt(350.0, 300.0));
    core.on_pointer_move(pt(360.0, 310.0));
    let revision = core.catalog.revision();

    let actions = core.on_pointer_move(pt(5.0, 5.0));

    assert!(has_gesture_ended(&actions));
    assert!(!has_geometry_updated(&actions));
    assert!(core.input.is_idle());
    assert_eq!(core.catalog.revision(), revision);
    assert_eq!(geometry_of(&core, &target).left, Dimension::px(210.0));
}

#[test]
fn moves_after_gesture_end_are_ignored() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::Body, pt(0.0, 0.0));
    core.on_pointer_up();
    let before = geometry_of(&core, &seed_target());
    assert!(core.on_pointer_move(pt(300.0, 300.0)).is_empty());
    assert_eq!(geometry_of(&core, &seed_target()), before);
}

// =============================================================
// Target deletion mid-gesture
// =============================================================

#[test]
fn deleted_target_move_is_ignored() {
    let mut core = scenario_core();
    let target = seed_target();
    core.begin_gesture(target.clone(), HitPart::Body, pt(0.0, 0.0));
    assert!(core.catalog.remove_overlay(&target.background_id, &target.overlay_id));
    let revision = core.catalog.revision();

    let actions = core.on_pointer_move(pt(40.0, 40.0));

    assert!(actions.is_empty());
    assert_eq!(core.catalog.revision(), revision);
    assert_eq!(core.gesture_kind(), Some(GestureKind::Translate));

    core.on_pointer_up();
    assert!(core.input.is_idle());
}

#[test]
fn deleted_background_move_is_ignored() {
    let mut core = scenario_core();
    core.begin_gesture(seed_target(), HitPart::ResizeHandle, pt(0.0, 0.0));
    core.catalog.remove_background("default");
    assert!(core.on_pointer_move(pt(40.0, 40.0)).is_empty());
    assert_eq!(core.gesture_kind(), Some(GestureKind::Resize));
}

// =============================================================
// Hit-tested pointer-down
// =============================================================

#[test]
fn pointer_down_hit_tests_topmost_overlay() {
    let mut core = core_with_viewport();
    // Screen (350, 300) is local (250, 250): inside "high".
    core.on_pointer_down("bg", pt(350.0, 300.0));
    assert_eq!(core.gesture_target(), Some(&GestureTarget::new("bg", "high")));
    assert_eq!(core.gesture_kind(), Some(GestureKind::Translate));
}

#[test]
fn pointer_down_on_handle_starts_resize() {
    let mut core = core_with_viewport();
    // "high" spans local 200..300; its handle covers 276..300.
    core.on_pointer_down("bg", pt(390.0, 340.0));
    assert_eq!(core.gesture_kind(), Some(GestureKind::Resize));
    core.on_pointer_move(pt(420.0, 330.0));
    let g = geometry_of(&core, &GestureTarget::new("bg", "high"));
    assert_eq!(g.width, Dimension::px(130.0));
    assert_eq!(g.height, Dimension::px(90.0));
}

#[test]
fn pointer_down_on_empty_space_does_not_transition() {
    let mut core = core_with_viewport();
    let actions = core.on_pointer_down("bg", pt(850.0, 800.0));
    assert!(actions.is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn pointer_down_without_viewport_does_not_transition() {
    let mut core = scenario_core();
    assert!(core.on_pointer_down("default", pt(200.0, 100.0)).is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn pointer_down_on_unknown_background_does_not_transition() {
    let mut core = core_with_viewport();
    assert!(core.on_pointer_down("nope", pt(350.0, 300.0)).is_empty());
    assert!(core.input.is_idle());
}

// =============================================================
// End-to-end scenario
// =============================================================

#[test]
fn drag_then_resize_scenario() {
    let mut core = scenario_core();
    let target = seed_target();

    core.begin_gesture(target.clone(), HitPart::Body, pt(100.0, 100.0));
    core.on_pointer_move(pt(130.0, 80.0));
    assert_eq!(css(&core, &target), ["260px", "100%", "-240px", "140px"]);
    core.on_pointer_up();
    assert!(core.input.is_idle());

    core.begin_gesture(target.clone(), HitPart::ResizeHandle, pt(200.0, 200.0));
    core.on_pointer_move(pt(160.0, 260.0));
    assert_eq!(css(&core, &target), ["220px", "60px", "-240px", "140px"]);
    core.on_pointer_up();
    assert!(core.input.is_idle());
}

// =============================================================
// Action serde
// =============================================================

#[test]
fn actions_serialize_with_type_tag() {
    let action = Action::GeometryUpdated {
        target: seed_target(),
        patch: GeometryPatch::position(Dimension::px(1.0), Dimension::px(2.0)),
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "geometry_updated",
            "target": { "background_id": "default", "overlay_id": "orange-flowers" },
            "patch": { "top": "1px", "left": "2px" },
        })
    );
    assert_eq!(serde_json::to_value(Action::RenderNeeded).unwrap(), serde_json::json!({ "type": "render_needed" }));
}

// =============================================================
// Catalogs with unreadable geometry
// =============================================================

const CATALOG_WITH_BAD_FIELDS: &str = r#"[{
    "id": "bg",
    "image_ref": "/bg.png",
    "label": "Arch",
    "geometry": {"width": "100%", "height": "100%", "top": "0", "left": "0"},
    "overlays": [{
        "id": "ov",
        "image_ref": "/ov.png",
        "label": "Lights",
        "category": "light",
        "geometry": {"width": "auto", "height": "80px", "top": "oops", "left": "40px"}
    }]
}]"#;

fn core_with_bad_fields() -> EngineCore {
    let backgrounds: Vec<Background> = serde_json::from_str(CATALOG_WITH_BAD_FIELDS).unwrap();
    EngineCore::with_catalog(CatalogStore::with_backgrounds(backgrounds))
}

#[test]
fn translate_from_unreadable_offset_starts_at_zero() {
    let mut core = core_with_bad_fields();
    let target = GestureTarget::new("bg", "ov");

    core.begin_gesture(target.clone(), HitPart::Body, pt(0.0, 0.0));
    let actions = core.on_pointer_move(pt(5.0, 10.0));
    assert!(has_geometry_updated(&actions));

    let [_, _, top, left] = css(&core, &target);
    assert_eq!([top.as_str(), left.as_str()], ["10px", "45px"]);
}

#[test]
fn resize_from_unreadable_width_starts_at_zero() {
    let mut core = core_with_bad_fields();
    let target = GestureTarget::new("bg", "ov");

    core.begin_gesture(target.clone(), HitPart::ResizeHandle, pt(0.0, 0.0));
    core.on_pointer_move(pt(30.0, 40.0));

    let [width, height, _, _] = css(&core, &target);
    assert_eq!([width.as_str(), height.as_str()], ["50px", "120px"]);
}
