// src/server/handlers.rs
// Route handlers: catalogue, sessions, and the two streaming turn endpoints

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html,
    },
    Json,
};
use futures::{Stream, StreamExt};
use serde_json::{json, Value};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::error::{ApiError, ApiResult, OrNotFound};
use super::sessions::{Session, TurnGuard};
use super::types::{
    CatalogueResponse, ChatStreamRequest, QuickActionInfo, QuickActionRequest, SessionCreated,
    TranscriptResponse, TurnEvent, VerbosityRange,
};
use super::AppState;
use crate::coach::{is_blank, QuickAction, TurnStream};
use crate::conversation::display::{render_transcript, WELCOME_PLACEHOLDER};
use crate::domain::Domain;
use crate::persona::Persona;
use crate::prompt::Verbosity;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    let client = state.coach.client();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": client.settings().model,
        "credential_configured": client.has_credential(),
        "sessions": state.sessions.len().await,
    }))
}

pub async fn catalogue_handler(State(state): State<AppState>) -> Json<CatalogueResponse> {
    Json(CatalogueResponse {
        personas: Persona::names(),
        domains: Domain::names(),
        quick_actions: QuickAction::iter()
            .map(|a| QuickActionInfo {
                label: a.label(),
                icon: a.icon(),
            })
            .collect(),
        verbosity: VerbosityRange {
            min: Verbosity::MIN,
            max: Verbosity::MAX,
        },
        defaults: state.defaults,
    })
}

pub async fn create_session_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    let session = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id,
        }),
    )
}

pub async fn messages_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TranscriptResponse>> {
    let session = lookup(&state, &id).await?;
    let conversation = session.conversation().await;

    Ok(Json(TranscriptResponse {
        session_id: id,
        placeholder: conversation.is_empty().then_some(WELCOME_PLACEHOLDER),
        messages: render_transcript(&conversation),
    }))
}

pub async fn clear_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let session = lookup(&state, &id).await?;
    let _guard = begin_turn(&session)?;
    session.clear().await;
    tracing::info!(session = %id, "Conversation cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn chat_stream_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatStreamRequest>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    // Blank text never reaches the selectors
    let settings = if is_blank(&request.message) {
        state.defaults
    } else {
        request.selection.resolve(&state.defaults)?
    };
    let session = lookup(&state, &id).await?;
    let guard = begin_turn(&session)?;

    let turn = state
        .coach
        .start_turn(session.conversation().await, &request.message, settings);
    Ok(stream_turn(session, guard, turn))
}

pub async fn quick_action_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<QuickActionRequest>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let action = QuickAction::from_name(&request.action)?;
    let settings = request.selection.resolve(&state.defaults)?;
    let session = lookup(&state, &id).await?;
    let guard = begin_turn(&session)?;

    let turn = state
        .coach
        .start_quick_action(action, session.conversation().await, settings);
    Ok(stream_turn(session, guard, turn))
}

async fn lookup(state: &AppState, id: &Uuid) -> ApiResult<Arc<Session>> {
    state
        .sessions
        .get(id)
        .await
        .or_not_found("unknown session")
}

fn begin_turn(session: &Session) -> ApiResult<TurnGuard> {
    session
        .try_begin_turn()
        .ok_or_else(|| ApiError::conflict("a turn is already streaming for this session"))
}

/// Drive the turn in its own task and forward events over SSE.
///
/// Every snapshot is written back to the session before its event is sent,
/// and the task keeps going if the browser disconnects, so the stored
/// conversation always settles.
fn stream_turn(
    session: Arc<Session>,
    guard: TurnGuard,
    turn: TurnStream,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<TurnEvent>(100);

    tokio::spawn(async move {
        let _guard = guard;
        let driver = tokio::spawn(drive_turn(session, turn, tx.clone()));
        match driver.await {
            Ok(message_count) => {
                let _ = tx.send(TurnEvent::Done { message_count }).await;
            }
            Err(e) => {
                tracing::error!("Turn task failed: {}", e);
                let _ = tx
                    .send(TurnEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
            }
        }
    });

    let stream = async_stream::stream! {
        let mut rx = rx;
        while let Some(event) = rx.recv().await {
            let data = serde_json::to_string(&event).unwrap_or_default();
            yield Ok(Event::default().data(data));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn drive_turn(
    session: Arc<Session>,
    mut turn: TurnStream,
    tx: mpsc::Sender<TurnEvent>,
) -> usize {
    let mut message_count = 0;
    while let Some(snapshot) = turn.next().await {
        let event = TurnEvent::from_snapshot(&snapshot);
        message_count = snapshot.conversation.len();
        session.replace(snapshot.conversation).await;
        if let Some(event) = event {
            let _ = tx.send(event).await;
        }
    }
    message_count
}
