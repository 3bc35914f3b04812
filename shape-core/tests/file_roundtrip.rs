//! Integration tests for exporting to and importing from the filesystem.

use shape_core::{
    scene_channel, Color, DocumentStore, EditorConfig, EditorError, EditorSession,
    FileDocumentStore, HeadlessScene, Position, RandomPlacement, ShapeKind,
};

fn session(config: EditorConfig) -> EditorSession<HeadlessScene, RandomPlacement<rand::rngs::StdRng>> {
    let (_input, events) = scene_channel();
    EditorSession::new(HeadlessScene::new(), events, RandomPlacement::seeded(0), config)
}

#[tokio::test]
async fn test_export_then_import_through_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileDocumentStore::new(dir.path());

    let mut editor = session(EditorConfig::default());
    editor
        .add_shape_at(
            ShapeKind::Rectangle,
            Position::new(1.0, 2.0, 0.0),
            Color::rgb(0.1, 0.2, 0.3),
        )
        .expect("add rect");
    editor
        .add_shape_at(
            ShapeKind::Line,
            Position::new(-4.5, 0.25, 0.0),
            Color::rgb(1.0, 0.0, 0.5),
        )
        .expect("add line");

    let exported = editor.export_to(&store).await.expect("export");
    assert_eq!(exported, 2);

    let saved = std::fs::read_to_string(dir.path().join("shapes.json")).expect("saved file");
    assert!(saved.contains('\n'), "default export is pretty-printed");

    let mut restored = session(EditorConfig::default());
    restored.add_shape(ShapeKind::Circle).expect("pre-existing");
    let summary = restored.import_from(&store).await.expect("import");
    assert_eq!(summary.imported, 2);

    let shapes: Vec<_> = restored
        .registry()
        .list()
        .map(|s| (s.kind, s.position, s.color))
        .collect();
    assert_eq!(
        shapes,
        vec![
            (
                ShapeKind::Rectangle,
                Position::new(1.0, 2.0, 0.0),
                Color::rgb(0.1, 0.2, 0.3)
            ),
            (
                ShapeKind::Line,
                Position::new(-4.5, 0.25, 0.0),
                Color::rgb(1.0, 0.0, 0.5)
            ),
        ]
    );
}

#[tokio::test]
async fn test_export_uses_configured_filename() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileDocumentStore::new(dir.path());
    let editor = session(
        EditorConfig::default()
            .with_export_filename("scene.json")
            .with_pretty_export(false),
    );

    editor.export_to(&store).await.expect("export");
    let saved = std::fs::read_to_string(dir.path().join("scene.json")).expect("saved file");
    assert_eq!(saved, "[]");
}

#[tokio::test]
async fn test_import_reads_back_configured_filename() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = EditorConfig::default().with_export_filename("scene.json");
    let store = FileDocumentStore::new(dir.path()).with_filename(config.export_filename.clone());

    let mut editor = session(config);
    editor
        .add_shape_at(
            ShapeKind::Circle,
            Position::new(0.5, -0.5, 0.0),
            Color::rgb(0.0, 1.0, 0.0),
        )
        .expect("add");
    editor.export_to(&store).await.expect("export");

    let summary = editor.import_from(&store).await.expect("import");
    assert_eq!(summary.imported, 1);
    assert_eq!(editor.registry().len(), 1);
}

#[tokio::test]
async fn test_import_missing_file_leaves_scene() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileDocumentStore::new(dir.path()).with_source(dir.path().join("missing.json"));

    let mut editor = session(EditorConfig::default());
    let id = editor.add_shape(ShapeKind::Circle).expect("add");

    let err = editor.import_from(&store).await.unwrap_err();
    assert!(matches!(err, EditorError::Persistence(_)));
    assert!(editor.registry().get(id).is_some());
}

#[tokio::test]
async fn test_import_malformed_file_leaves_scene() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"not\": \"an array\"}").expect("write");
    let store = FileDocumentStore::new(dir.path()).with_source(&path);

    let mut editor = session(EditorConfig::default());
    editor.add_shape(ShapeKind::Line).expect("add");

    let err = editor.import_from(&store).await.unwrap_err();
    assert!(matches!(err, EditorError::MalformedDocument(_)));
    assert_eq!(editor.registry().len(), 1);
}

#[tokio::test]
async fn test_store_is_object_safe() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store: Box<dyn DocumentStore> = Box::new(FileDocumentStore::new(dir.path()));
    let editor = session(EditorConfig::default());
    editor.export_to(store.as_ref()).await.expect("export");
    assert_eq!(store.open_document().await.expect("open"), b"[]");
}
