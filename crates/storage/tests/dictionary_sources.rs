use std::sync::Arc;

use storage::{BundledRepository, InMemoryRepository, JsonFileRepository, VerbRecord, VerbRepository};

#[tokio::test]
async fn sources_are_interchangeable_behind_the_trait() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verbs.json");
    std::fs::write(&path, r#"[["go", "went", "gone"]]"#).unwrap();

    let sources: Vec<Arc<dyn VerbRepository>> = vec![
        Arc::new(BundledRepository),
        Arc::new(JsonFileRepository::new(&path)),
        Arc::new(InMemoryRepository::from_records(vec![VerbRecord::new("go", "went", "gone")]).unwrap()),
    ];

    for source in sources {
        let verbs = source.load_verbs().await.expect("load");
        let go = verbs.iter().find(|v| v.base() == "go").expect("go present");
        assert_eq!(go.answer_line(), "go : went, gone");
    }
}
