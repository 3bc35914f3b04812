//! Property and scenario tests for the editor session.
//!
//! Drives sessions through arbitrary sequences of edit operations and checks
//! that identity, selection and visual ownership stay consistent, and that
//! scenes survive an export/import round trip.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use serde_json::{json, Value};
use shape_core::{
    scene_channel, AdapterError, Color, EditorConfig, EditorError, EditorSession, HeadlessScene,
    Position, RandomPlacement, SceneAdapter, SceneInput, ShapeKind, VisualHandle,
};

type Session = EditorSession<HeadlessScene, RandomPlacement<StdRng>>;

fn new_session(seed: u64) -> (Session, SceneInput) {
    let (input, events) = scene_channel();
    let session = EditorSession::new(
        HeadlessScene::new(),
        events,
        RandomPlacement::seeded(seed),
        EditorConfig::default().with_pretty_export(false),
    );
    (session, input)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(1.0)
}

/// Check every registry invariant that must hold between operations.
fn assert_consistent(session: &Session) {
    let registry = session.registry();
    let ids: Vec<_> = registry.list().map(|s| s.id).collect();
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len(), "shape ids must be unique");
    assert_eq!(ids.len(), registry.len());

    assert_eq!(
        registry.adapter().live_visuals(),
        registry.len(),
        "one live visual per shape"
    );
    for shape in registry.list() {
        assert!(registry.adapter().contains(shape.visual));
        assert_eq!(registry.shape_for_visual(shape.visual), Some(shape.id));
    }

    if let Some(selected) = registry.selection() {
        assert!(
            registry.get(selected).is_some(),
            "selection must refer to a live shape"
        );
    }
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_export_single_rect() {
    let (mut session, _input) = new_session(1);
    session
        .add_shape_at(
            ShapeKind::Rectangle,
            Position::new(1.0, 2.0, 0.0),
            Color::rgb(0.1, 0.2, 0.3),
        )
        .expect("add");

    let exported: Value = serde_json::from_str(&session.export().expect("export")).expect("json");
    assert_eq!(
        exported,
        json!([{ "type": "rect", "position": [1.0, 2.0, 0.0], "color": [0.1, 0.2, 0.3] }])
    );
}

#[test]
fn test_delete_selected_of_two() {
    let (mut session, input) = new_session(2);
    let a = session.add_shape(ShapeKind::Rectangle).expect("add a");
    let b = session.add_shape(ShapeKind::Circle).expect("add b");

    input.pick(session.registry().get(a).expect("a").visual);
    session.pump_events();
    assert_eq!(session.registry().selection(), Some(a));

    session.delete_selected();
    assert!(session.registry().selection().is_none());
    let ids: Vec<_> = session.registry().list().map(|s| s.id).collect();
    assert_eq!(ids, vec![b]);
    assert_consistent(&session);
}

#[test]
fn test_import_skips_unknown_type() {
    let (mut session, _input) = new_session(3);
    let summary = session
        .import(
            br#"[{"type":"rect","position":[0,0,0],"color":[1,1,1]},
                 {"type":"bogus","position":[0,0,0],"color":[0,0,0]}]"#,
        )
        .expect("import succeeds");

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].index, 1);
    let kinds: Vec<_> = session.registry().list().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![ShapeKind::Rectangle]);
}

#[test]
fn test_import_not_an_array() {
    let (mut session, _input) = new_session(4);
    let existing = session.add_shape(ShapeKind::Line).expect("add");

    let err = session.import(br#""not an array""#).unwrap_err();
    assert!(matches!(err, EditorError::MalformedDocument(_)));
    assert!(session.registry().get(existing).is_some());
    assert_eq!(session.registry().len(), 1);
}

/// Headless scene that publishes its live visual count outside the session.
#[derive(Debug)]
struct SharedCountScene {
    scene: HeadlessScene,
    live: Rc<Cell<usize>>,
}

impl SceneAdapter for SharedCountScene {
    fn create_visual(
        &mut self,
        kind: ShapeKind,
        position: Position,
        color: Color,
    ) -> Result<VisualHandle, AdapterError> {
        let handle = self.scene.create_visual(kind, position, color)?;
        self.live.set(self.scene.live_visuals());
        Ok(handle)
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        self.scene.destroy_visual(handle);
        self.live.set(self.scene.live_visuals());
    }

    fn live_visuals(&self) -> usize {
        self.scene.live_visuals()
    }
}

#[test]
fn test_session_drop_releases_visuals() {
    let live = Rc::new(Cell::new(0));
    let (input, events) = scene_channel();
    let mut session = EditorSession::new(
        SharedCountScene {
            scene: HeadlessScene::new(),
            live: Rc::clone(&live),
        },
        events,
        RandomPlacement::seeded(5),
        EditorConfig::default(),
    );
    for kind in ShapeKind::ALL {
        session.add_shape(kind).expect("add");
    }
    let first = session.registry().list().next().expect("shape").visual;
    input.pick(first);
    session.pump_events();
    assert_eq!(live.get(), 3);

    drop(session);
    assert_eq!(live.get(), 0);
}

// ===========================================================================
// Properties
// ===========================================================================

#[derive(Debug, Clone)]
enum Op {
    Add(ShapeKind),
    Pick(usize),
    PickStale,
    Drag(usize, f64, f64),
    DeleteSelected,
    DeleteAll,
    Reimport,
}

fn arb_kind() -> impl Strategy<Value = ShapeKind> {
    prop_oneof![
        Just(ShapeKind::Rectangle),
        Just(ShapeKind::Circle),
        Just(ShapeKind::Line),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arb_kind().prop_map(Op::Add),
        3 => (0usize..16).prop_map(Op::Pick),
        1 => Just(Op::PickStale),
        2 => (0usize..16, -10.0f64..10.0, -10.0f64..10.0).prop_map(|(i, x, y)| Op::Drag(i, x, y)),
        2 => Just(Op::DeleteSelected),
        1 => Just(Op::DeleteAll),
        1 => Just(Op::Reimport),
    ]
}

fn arb_shape() -> impl Strategy<Value = (ShapeKind, [f64; 3], [f64; 3])> {
    (
        arb_kind(),
        prop::array::uniform3(-1.0e6f64..1.0e6),
        prop::array::uniform3(0.0f64..=1.0),
    )
}

fn apply(session: &mut Session, input: &SceneInput, stale: &mut Vec<VisualHandle>, op: &Op) {
    let visuals: Vec<_> = session.registry().list().map(|s| s.visual).collect();
    match *op {
        Op::Add(kind) => {
            session.add_shape(kind).expect("headless add never fails");
        }
        Op::Pick(i) => {
            if let Some(&handle) = visuals.get(i) {
                input.pick(handle);
            }
        }
        Op::PickStale => {
            if let Some(&handle) = stale.last() {
                input.pick(handle);
            }
        }
        Op::Drag(i, x, y) => {
            if let Some(&handle) = visuals.get(i) {
                input.drag(handle, Position::new(x, y, 0.0));
            }
        }
        Op::DeleteSelected => {
            if let Some(shape) = session.delete_selected() {
                stale.push(shape.visual);
            }
        }
        Op::DeleteAll => {
            stale.extend(visuals);
            session.delete_all();
        }
        Op::Reimport => {
            let json = session.export().expect("export");
            stale.extend(visuals);
            session.import(json.as_bytes()).expect("reimport");
        }
    }
    session.pump_events();
}

proptest! {
    #[test]
    fn prop_operations_keep_registry_consistent(
        ops in prop::collection::vec(arb_op(), 0..40)
    ) {
        let (mut session, input) = new_session(11);
        let mut stale = Vec::new();
        let mut live = HashSet::new();
        let mut gone = HashSet::new();
        for op in &ops {
            let selected_before = session.registry().selection();
            apply(&mut session, &input, &mut stale, op);
            assert_consistent(&session);

            if let Some(id) = selected_before {
                if session.registry().get(id).is_none() {
                    prop_assert_ne!(session.registry().selection(), Some(id));
                }
            }

            // A deleted id never comes back
            let now: HashSet<_> = session.registry().list().map(|s| s.id).collect();
            prop_assert!(now.is_disjoint(&gone));
            gone.extend(live.difference(&now).copied());
            live = now;
        }
    }

    #[test]
    fn prop_added_ids_are_distinct(kinds in prop::collection::vec(arb_kind(), 0..64)) {
        let (mut session, _input) = new_session(12);
        let mut ids = HashSet::new();
        for kind in kinds {
            let id = session.add_shape(kind).expect("add");
            prop_assert!(ids.insert(id), "duplicate id {}", id);
        }
    }

    #[test]
    fn prop_export_import_round_trip(shapes in prop::collection::vec(arb_shape(), 0..20)) {
        let (mut source, _a) = new_session(13);
        for (kind, position, color) in &shapes {
            let color = Color::try_from_array(*color).expect("in range");
            source.add_shape_at(*kind, Position::from(*position), color).expect("add");
        }
        let json = source.export().expect("export");

        let (mut target, _b) = new_session(14);
        target.add_shape(ShapeKind::Circle).expect("pre-existing shape");
        let summary = target.import(json.as_bytes()).expect("import");
        prop_assert_eq!(summary.imported, shapes.len());
        prop_assert!(summary.skipped.is_empty());

        let restored: Vec<_> = target.registry().list().collect();
        prop_assert_eq!(restored.len(), shapes.len());
        for (shape, (kind, position, color)) in restored.iter().zip(&shapes) {
            prop_assert_eq!(shape.kind, *kind);
            let p: [f64; 3] = shape.position.into();
            let c: [f64; 3] = shape.color.into();
            for i in 0..3 {
                prop_assert!(close(p[i], position[i]), "position {:?} != {:?}", p, position);
                prop_assert!(close(c[i], color[i]), "color {:?} != {:?}", c, color);
            }
        }
    }

    #[test]
    fn prop_partial_import_keeps_valid_entries_in_order(
        entries in prop::collection::vec((arb_shape(), any::<bool>()), 0..20)
    ) {
        let doc: Vec<Value> = entries
            .iter()
            .map(|((kind, position, color), valid)| {
                if *valid {
                    json!({ "type": kind.as_str(), "position": position, "color": color })
                } else {
                    json!({ "type": "hexagon", "position": position, "color": color })
                }
            })
            .collect();
        let expected: Vec<_> = entries
            .iter()
            .filter(|(_, valid)| *valid)
            .map(|((kind, _, _), _)| *kind)
            .collect();

        let (mut session, _input) = new_session(15);
        session.add_shape(ShapeKind::Line).expect("pre-existing shape");
        let summary = session
            .import(Value::Array(doc).to_string().as_bytes())
            .expect("import");

        prop_assert_eq!(summary.imported, expected.len());
        prop_assert_eq!(summary.skipped.len(), entries.len() - expected.len());
        let kinds: Vec<_> = session.registry().list().map(|s| s.kind).collect();
        prop_assert_eq!(kinds, expected);
    }
}
