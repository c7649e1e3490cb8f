//! Client side of the notes API.
//!
//! [`NotesClient`] is the seam the page controller talks through. The real
//! implementation speaks JSON over HTTP; tests substitute an in-process recorder.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use uuid::Uuid;

use crate::error::{NotesError, Result};
use crate::http::{CreatedResponse, ErrorResponse, ListResponse, NoteResponse, SuccessResponse};
use crate::model::{NewNote, Note, NoteUpdate};

#[async_trait]
pub trait NotesClient: Send + Sync {
    /// The capped, newest-first listing.
    async fn list(&self) -> Result<ListResponse>;
    async fn create(&self, note: &NewNote) -> Result<Uuid>;
    async fn get(&self, id: &str) -> Result<Note>;
    /// Full replace of a stored note, carrying its revision.
    async fn save(&self, note: &Note) -> Result<()>;
    async fn delete(&self, id: &Uuid) -> Result<()>;
}

pub struct HttpNotesClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpNotesClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/notes{}", self.base_url, path)
    }
}

/// Turns a non-2xx response into an error carrying the server's message.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    Err(match status {
        StatusCode::CONFLICT => NotesError::Conflict(message),
        _ => NotesError::Remote {
            status: status.as_u16(),
            message,
        },
    })
}

/// A 404 about note `id` becomes [`NotesError::NoteNotFound`].
fn missing_note(id: Uuid) -> impl FnOnce(NotesError) -> NotesError {
    move |err| match err {
        NotesError::Remote { status: 404, .. } => NotesError::NoteNotFound(id),
        other => other,
    }
}

#[async_trait]
impl NotesClient for HttpNotesClient {
    async fn list(&self) -> Result<ListResponse> {
        let response = check(self.http.get(self.url("")).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, note: &NewNote) -> Result<Uuid> {
        let response = check(self.http.post(self.url("")).json(note).send().await?).await?;
        let created: CreatedResponse = response.json().await?;
        Ok(created.id)
    }

    async fn get(&self, id: &str) -> Result<Note> {
        let response = check(self.http.get(self.url(&format!("/{}", id))).send().await?).await;
        let response = match Uuid::parse_str(id) {
            Ok(uuid) => response.map_err(missing_note(uuid))?,
            Err(_) => response?,
        };
        let body: NoteResponse = response.json().await?;
        Ok(body.note)
    }

    async fn save(&self, note: &Note) -> Result<()> {
        let update = NoteUpdate::from(note);
        let response = check(self.http.put(self.url("")).json(&update).send().await?)
            .await
            .map_err(missing_note(note.id))?;
        let _: SuccessResponse = response.json().await?;
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let response = check(
            self.http
                .delete(self.url(""))
                .query(&[("id", id.to_string())])
                .send()
                .await?,
        )
        .await
        .map_err(missing_note(*id))?;
        let _: SuccessResponse = response.json().await?;
        Ok(())
    }
}
