//! Rotas HTTP e WebSocket.

use std::sync::{mpsc, Arc};

use addrparse_core::{samples::demo_texts, AddressParser, ParseEvent, ParsedAddress};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Estado compartilhado da aplicação
pub struct AppState {
    pub parser: AddressParser,
    pub config: AppConfig,
}

impl AppState {
    fn check_size(&self, text: &str) -> Result<(), ApiError> {
        let limit = self.config.max_input_bytes;
        if text.len() > limit {
            return Err(ApiError::InputTooLarge { size: text.len(), limit });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ParseRequest {
    text: String,
}

#[derive(Deserialize)]
struct BatchRequest {
    texts: Vec<String>,
}

#[derive(Serialize)]
struct Sample {
    label: &'static str,
    text: &'static str,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/parse", post(parse_handler))
        .route("/parse/batch", post(batch_handler))
        .route("/ws", get(ws_handler))
        .route("/samples", get(samples_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Extração via HTTP POST (sem streaming)
async fn parse_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<ParsedAddress>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::EmptyText);
    }
    state.check_size(&req.text)?;

    let record = state.parser.parse(&req.text);
    info!(bytes = req.text.len(), filled = record.filled_count(), "texto analisado");
    Ok(Json(record))
}

/// Vários textos de uma vez; um texto vazio produz um registro vazio.
async fn batch_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<Vec<ParsedAddress>>, ApiError> {
    let limit = state.config.max_batch;
    if req.texts.len() > limit {
        return Err(ApiError::BatchTooLarge { size: req.texts.len(), limit });
    }
    for text in &req.texts {
        state.check_size(text)?;
    }

    // O lote usa o pool do rayon: roda fora do runtime
    let worker = Arc::clone(&state);
    let records = tokio::task::spawn_blocking(move || worker.parser.parse_batch(&req.texts))
        .await
        .map_err(|err| {
            warn!(%err, "falha no lote");
            ApiError::Worker
        })?;
    info!(count = records.len(), "lote analisado");
    Ok(Json(records))
}

/// Retorna textos de demonstração
async fn samples_handler() -> Json<Vec<Sample>> {
    Json(
        demo_texts()
            .into_iter()
            .map(|(label, text)| Sample { label, text })
            .collect(),
    )
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

fn error_frame(err: &ApiError) -> String {
    serde_json::json!({ "type": "Error", "data": { "message": err.to_string() } }).to_string()
}

/// Recebe texto (puro ou `{"text": ...}`), executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(raw) => {
                let text = match serde_json::from_str::<ParseRequest>(&raw) {
                    Ok(req) => req.text,
                    Err(_) => raw,
                };
                if text.trim().is_empty() {
                    continue;
                }
                if let Err(err) = state.check_size(&text) {
                    if socket.send(Message::Text(error_frame(&err))).await.is_err() {
                        return;
                    }
                    continue;
                }

                debug!(bytes = text.len(), "analisando via WebSocket");

                // O pipeline é síncrono: roda fora do runtime
                let (tx, rx) = mpsc::channel::<ParseEvent>();
                let worker = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    worker.parser.parse_streaming(&text, tx);
                });
                if let Err(err) = handle.await {
                    warn!(%err, "falha na extração");
                    continue;
                }

                let events: Vec<ParseEvent> = rx.try_iter().collect();
                for event in &events {
                    let Ok(json) = serde_json::to_string(event) else {
                        continue;
                    };
                    if socket.send(Message::Text(json)).await.is_err() {
                        return; // cliente desconectou
                    }
                    // Pequena pausa para animação visual (passo a passo)
                    tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
