use crate::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use log::*;
use tokio::sync::mpsc;

/// Admin notification channel: a long-lived WebSocket the server pushes JSON
/// events into. The server never reacts to inbound frames; clients may send
/// anything (typically pings) to keep intermediaries from idling the
/// connection out.
pub(crate) async fn admin_notifications(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: AppState) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Ownership of the sending half transfers to the registry here; from now
    // on this task only pumps frames and reports the disconnect.
    let connection_id = app_state.notification_manager.register_connection(tx);
    debug!(
        "Admin notification connection established: {}",
        connection_id.as_str()
    );

    let (mut sink, mut stream) = socket.split();

    // Broadcast frames arrive over the channel and are forwarded to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    // Inbound frames are drained and ignored; a close frame or transport
    // error ends the connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    // Whichever half finishes first, tear the other one down
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    debug!(
        "Admin notification connection closed: {}",
        connection_id.as_str()
    );
    app_state
        .notification_manager
        .unregister_connection(&connection_id);
}
