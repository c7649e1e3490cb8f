//! A real server on a loopback port, driven through `HttpNotesClient` and
//! `NotePage`, backed by a `FileStore` in a temp dir.

use blocknotes::api::NotesApi;
use blocknotes::block::{BlockContent, BlockKind, TodoContent};
use blocknotes::editor::keys::{Key, KeyInput};
use blocknotes::editor::menu::Point;
use blocknotes::error::NotesError;
use blocknotes::http::{router, serve, AppState};
use blocknotes::model::NewNote;
use blocknotes::page::{HttpNotesClient, NotePage, NotesClient};
use blocknotes::store::fs::FileStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn start_server(dir: &TempDir) -> String {
    let api = NotesApi::new(FileStore::new(dir.path()));
    let app = router(AppState::new(api));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, app));
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_save_then_reload_yields_same_blocks() {
    let dir = TempDir::new().unwrap();
    let base = start_server(&dir).await;
    let client: Arc<dyn NotesClient> = Arc::new(HttpNotesClient::new(base));

    let id = client
        .create(&NewNote {
            title: "Trip".into(),
            content: json!(""),
        })
        .await
        .unwrap()
        .to_string();

    let mut page = NotePage::load(Arc::clone(&client), &id, Duration::from_millis(50))
        .await
        .unwrap();
    let first = page.editor().blocks()[0].id.clone();
    page.editor_mut().set_text(&first, "Pack".into()).unwrap();
    page.editor_mut()
        .handle_key(0, KeyInput::shifted(Key::Enter), Point::default());
    page.editor_mut()
        .handle_key(1, KeyInput::plain(Key::Char('/')), Point::default());
    page.editor_mut().select_menu_entry(BlockKind::Todo);
    let todo = page.editor().blocks()[1].id.clone();
    page.editor_mut()
        .update(
            &todo,
            BlockContent::Todo(TodoContent {
                text: "passport".into(),
                checked: true,
            }),
        )
        .unwrap();
    page.set_title("Trip to Lisbon");
    page.flush().await.unwrap();
    assert_eq!(page.banner(), None);

    let expected = page.note().content;
    page.close();

    let reloaded = client.get(&id).await.unwrap();
    assert_eq!(reloaded.title, "Trip to Lisbon");
    assert_eq!(reloaded.content, expected);
    assert_eq!(reloaded.revision, 1);
}

#[tokio::test]
async fn test_listing_and_delete_over_http() {
    let dir = TempDir::new().unwrap();
    let base = start_server(&dir).await;
    let client = HttpNotesClient::new(base);

    let id = client.create(&NewNote::default()).await.unwrap();
    let listing = client.list().await.unwrap();
    assert_eq!(listing.collection, "notes");
    assert_eq!(listing.data.len(), 1);
    assert_eq!(listing.data[0].id, id);

    client.delete(&id).await.unwrap();
    assert!(client.list().await.unwrap().data.is_empty());

    let err = client.get(&id.to_string()).await.unwrap_err();
    assert!(matches!(err, NotesError::NoteNotFound(missing) if missing == id));
    let err = client.delete(&id).await.unwrap_err();
    assert!(matches!(err, NotesError::NoteNotFound(_)));
}

#[tokio::test]
async fn test_bad_id_surfaces_server_message() {
    let dir = TempDir::new().unwrap();
    let client = HttpNotesClient::new(start_server(&dir).await);

    let err = client.get("garbage").await.unwrap_err();
    assert!(matches!(err, NotesError::Remote { status: 400, .. }));
    let message = err.to_string();
    assert!(message.contains("Invalid note id format"));
    assert!(message.contains("400"));
}

#[tokio::test]
async fn test_stale_page_save_is_refused() {
    let dir = TempDir::new().unwrap();
    let client: Arc<dyn NotesClient> =
        Arc::new(HttpNotesClient::new(start_server(&dir).await));
    let id = client.create(&NewNote::default()).await.unwrap().to_string();

    let mut older = NotePage::load(Arc::clone(&client), &id, Duration::from_secs(60))
        .await
        .unwrap();
    let mut newer = NotePage::load(Arc::clone(&client), &id, Duration::from_secs(60))
        .await
        .unwrap();

    newer.set_title("newer");
    newer.flush().await.unwrap();

    older.set_title("older");
    assert!(matches!(older.flush().await, Err(NotesError::Conflict(_))));
    assert!(older.banner().unwrap().contains("changed elsewhere"));

    assert_eq!(client.get(&id).await.unwrap().title, "newer");
}
