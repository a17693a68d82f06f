//! Integration tests for the AI breakdown flow
//!
//! Uses a scripted client to drive the store's continuation logic,
//! including the delete-while-pending race and the failure notice.

use std::sync::Mutex;

use async_trait::async_trait;
use nexus_tasks::ai::{AiError, DecomposeClient, GeminiClient};
use nexus_tasks::domain::Priority;
use nexus_tasks::events::TaskEvent;
use nexus_tasks::store::TaskStore;

/// Scripted client: pops one pre-loaded outcome per decompose call
struct ScriptedClient {
    outcomes: Mutex<Vec<Result<Vec<String>, AiError>>>,
    refined: Option<String>,
}

impl ScriptedClient {
    fn new(outcomes: Vec<Result<Vec<String>, AiError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            refined: None,
        }
    }

    fn refining(refined: &str) -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
            refined: Some(refined.to_string()),
        }
    }
}

#[async_trait]
impl DecomposeClient for ScriptedClient {
    async fn decompose(&self, _title: &str) -> Result<Vec<String>, AiError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(AiError::InvalidResponse("no scripted outcome".to_string())))
    }

    async fn refine(&self, raw: &str) -> String {
        self.refined.clone().unwrap_or_else(|| raw.to_string())
    }
}

#[tokio::test]
async fn breakdown_appends_titles_in_order() {
    let mut store = TaskStore::in_memory();
    store.add_task("Write report", Priority::Medium);
    let id = store.tasks()[0].id.clone();

    let client = ScriptedClient::new(vec![Ok(vec![
        "Draft outline".to_string(),
        "Send for review".to_string(),
    ])]);
    store.request_breakdown(&id, &client).await;

    let subtasks = &store.tasks()[0].subtasks;
    assert_eq!(subtasks.len(), 2);
    assert_eq!(subtasks[0].title, "Draft outline");
    assert_eq!(subtasks[1].title, "Send for review");
    assert!(subtasks.iter().all(|s| !s.completed));
    assert!(!store.ai_busy());
}

#[tokio::test]
async fn breakdown_preserves_existing_subtasks() {
    let mut store = TaskStore::in_memory();
    store.add_task("Write report", Priority::Medium);
    let id = store.tasks()[0].id.clone();

    let client = ScriptedClient::new(vec![
        Ok(vec!["Later batch".to_string()]),
        Ok(vec!["First batch".to_string()]),
    ]);
    store.request_breakdown(&id, &client).await;
    store.request_breakdown(&id, &client).await;

    let titles: Vec<_> = store.tasks()[0].subtasks.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["First batch", "Later batch"]);
}

#[test]
fn delete_while_pending_discards_response() {
    let mut store = TaskStore::in_memory();
    store.add_task("Doomed", Priority::Medium);
    store.add_task("Bystander", Priority::Medium);
    let doomed = store.tasks().iter().find(|t| t.title == "Doomed").unwrap().id.clone();

    // Call goes out, then the target is deleted before it resolves
    let pending = store.begin_breakdown(&doomed).unwrap();
    assert!(store.ai_busy());
    assert!(store.delete_task(&doomed));

    store.apply_breakdown(pending, Ok(vec!["Too late".to_string()]));

    assert!(!store.ai_busy());
    assert!(store.tasks().iter().all(|t| t.id != doomed));
    assert!(store.tasks().iter().all(|t| t.subtasks.is_empty()));
}

#[tokio::test]
async fn failed_breakdown_leaves_task_unchanged_and_notifies_once() {
    let mut store = TaskStore::in_memory();
    store.add_task("Write report", Priority::Medium);
    let id = store.tasks()[0].id.clone();
    let snapshot = store.tasks().to_vec();
    let mut rx = store.subscribe();

    let client = ScriptedClient::new(vec![Err(AiError::Api {
        status: 500,
        message: "boom".to_string(),
    })]);
    store.request_breakdown(&id, &client).await;

    assert!(!store.ai_busy());
    assert_eq!(store.tasks(), &snapshot[..]);

    match rx.try_recv().unwrap() {
        TaskEvent::BreakdownFailed { task_id, message } => {
            assert_eq!(task_id, id);
            assert!(message.contains("500"));
        }
        other => panic!("expected BreakdownFailed, got {:?}", other),
    }
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn breakdown_for_unknown_id_is_noop() {
    let mut store = TaskStore::in_memory();
    let client = ScriptedClient::new(vec![Ok(vec!["Never appended".to_string()])]);
    store.request_breakdown("missing", &client).await;
    assert!(!store.ai_busy());
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn missing_api_key_yields_fallback_subtasks() {
    let mut store = TaskStore::in_memory();
    store.add_task("Write report", Priority::Medium);
    let id = store.tasks()[0].id.clone();

    // Real client, no credential: deterministic fallback, never an error
    let client = GeminiClient::new(
        "gemini-2.5-flash".to_string(),
        None,
        "https://generativelanguage.googleapis.com".to_string(),
        reqwest::Client::new(),
    );
    store.request_breakdown(&id, &client).await;

    let subtasks = &store.tasks()[0].subtasks;
    assert_eq!(subtasks.len(), 2);
    assert!(subtasks[0].title.contains("Breakdown unavailable"));
}

#[tokio::test]
async fn refine_rewrites_title() {
    let mut store = TaskStore::in_memory();
    store.add_task("do the thing with the stuff maybe", Priority::Medium);
    let id = store.tasks()[0].id.clone();

    let client = ScriptedClient::refining("Sort the stuff");
    assert!(store.refine_task(&id, &client).await);
    assert_eq!(store.tasks()[0].title, "Sort the stuff");
}

#[tokio::test]
async fn refine_with_unavailable_service_keeps_title() {
    let mut store = TaskStore::in_memory();
    store.add_task("keep me", Priority::Medium);
    let id = store.tasks()[0].id.clone();

    // refine echoes the input when no rewrite is available
    let client = ScriptedClient::new(vec![]);
    assert!(!store.refine_task(&id, &client).await);
    assert_eq!(store.tasks()[0].title, "keep me");
}
