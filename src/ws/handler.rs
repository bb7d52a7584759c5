//! WebSocket upgrade handler

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use tracing::{debug, error, info, warn};

use crate::app::AppState;
use crate::session::{encode, BotSession, SessionHandle};
use crate::util::rate_limit::ConnectionRateLimiter;
use crate::util::time::unix_millis;
use crate::ws::protocol::ServerMsg;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle the upgraded WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let handle = state.sessions.open();
    let session_id = handle.id;
    info!(session_id = %session_id, "New runner connection");

    let (mut ws_sink, ws_stream) = socket.split();

    let welcome = ServerMsg::Welcome {
        session_id,
        server_time: unix_millis(),
    };

    if let Err(e) = send_msg(&mut ws_sink, &welcome).await {
        error!(session_id = %session_id, error = %e, "Failed to send welcome");
        state.sessions.remove(&session_id);
        return;
    }

    run_session(&state, handle, ws_sink, ws_stream).await;

    // Cleanup on disconnect
    if let Some(handle) = state.sessions.remove(&session_id) {
        info!(
            session_id = %session_id,
            ticks = handle.ticks(),
            actions = handle.actions(),
            "Runner connection closed"
        );
    }
}

/// Answer runner messages until the match finishes or the socket closes
async fn run_session(
    state: &AppState,
    handle: std::sync::Arc<SessionHandle>,
    mut ws_sink: SplitSink<WebSocket, Message>,
    mut ws_stream: SplitStream<WebSocket>,
) {
    let session_id = handle.id;
    let rate_limiter = ConnectionRateLimiter::new(state.config.tick_rate_limit);
    let mut session = BotSession::new(state.strategy.clone(), handle, state.config.forward_debug);

    while let Some(result) = ws_stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let replies = session.handle_frame(&text, &rate_limiter);

                for reply in &replies {
                    if let Err(e) = send_msg(&mut ws_sink, reply).await {
                        debug!(session_id = %session_id, error = %e, "WebSocket send failed");
                        return;
                    }
                }

                if session.is_finished() {
                    let _ = ws_sink.send(Message::Close(None)).await;
                    break;
                }
            }
            Ok(Message::Binary(_)) => {
                warn!(session_id = %session_id, "Received binary message, ignoring");
            }
            Ok(Message::Ping(_)) => {
                debug!(session_id = %session_id, "Received ping");
            }
            Ok(Message::Pong(_)) => {
                debug!(session_id = %session_id, "Received pong");
            }
            Ok(Message::Close(_)) => {
                info!(session_id = %session_id, "Runner initiated close");
                break;
            }
            Err(e) => {
                error!(session_id = %session_id, error = %e, "WebSocket error");
                break;
            }
        }
    }
}

/// Send a message over WebSocket
async fn send_msg(sink: &mut SplitSink<WebSocket, Message>, msg: &ServerMsg) -> Result<(), String> {
    let json = encode(msg).map_err(|e| e.to_string())?;
    sink.send(Message::Text(json))
        .await
        .map_err(|e| e.to_string())
}
