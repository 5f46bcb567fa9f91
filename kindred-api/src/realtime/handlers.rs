//! Socket.IO side-channel: join/leave chat rooms, typing indicators, read
//! receipts, and the emission helpers REST handlers use for new-match and
//! new-message events. Everything here is best-effort; delivery is never
//! load-bearing for the REST/store state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use socketioxide::extract::{Data, SocketRef};
use socketioxide::SocketIo;
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomPayload {
    pub match_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReadReceiptPayload {
    pub match_id: Uuid,
    pub message_id: Uuid,
}

fn get_user_id(socket: &SocketRef) -> Option<Uuid> {
    socket.extensions.get::<Uuid>()
}

fn match_room(match_id: Uuid) -> String {
    format!("match:{match_id}")
}

fn user_room(user_id: Uuid) -> String {
    format!("user:{user_id}")
}

pub async fn on_connect(socket: SocketRef, state: Arc<AppState>) {
    let user_id = match authenticate_socket(&socket, &state) {
        Ok(id) => id,
        Err(msg) => {
            tracing::warn!(error = %msg, "socket auth failed");
            let _ = socket.emit(
                "error",
                &ErrorPayload {
                    code: "AUTH_FAILED".into(),
                    message: msg,
                },
            );
            socket.disconnect().ok();
            return;
        }
    };

    socket.extensions.insert(user_id);

    // Join the user-specific room so REST handlers can push to this user.
    socket.join(user_room(user_id)).ok();
    state.presence.connect(user_id, socket.id.to_string());

    tracing::info!(user_id = %user_id, sid = %socket.id, "socket connected");
    let _ = socket.emit("connected", &serde_json::json!({ "user_id": user_id }));

    socket.on("join_chat", {
        let state = state.clone();
        move |socket: SocketRef, Data::<RoomPayload>(payload)| {
            let state = state.clone();
            async move { on_join_chat(socket, payload, &state).await; }
        }
    });

    socket.on("leave_chat", {
        let state = state.clone();
        move |socket: SocketRef, Data::<RoomPayload>(payload)| {
            let state = state.clone();
            async move { on_leave_chat(socket, payload, &state).await; }
        }
    });

    socket.on("typing_start", |socket: SocketRef, Data::<RoomPayload>(payload)| async move {
        relay_typing(&socket, payload.match_id, "user_typing");
    });

    socket.on("typing_stop", |socket: SocketRef, Data::<RoomPayload>(payload)| async move {
        relay_typing(&socket, payload.match_id, "user_stop_typing");
    });

    socket.on("message_read", |socket: SocketRef, Data::<ReadReceiptPayload>(payload)| async move {
        if get_user_id(&socket).is_none() {
            return;
        }
        let _ = socket
            .to(match_room(payload.match_id))
            .emit("message_read_receipt", &serde_json::json!({
                "match_id": payload.match_id,
                "message_id": payload.message_id,
            }));
    });

    socket.on_disconnect({
        let state = state.clone();
        move |socket: SocketRef| {
            let state = state.clone();
            async move {
                if let Some(user_id) = state.presence.disconnect(&socket.id.to_string()) {
                    tracing::info!(user_id = %user_id, "socket disconnected");
                }
            }
        }
    });
}

async fn on_join_chat(socket: SocketRef, payload: RoomPayload, state: &Arc<AppState>) {
    let Some(user_id) = get_user_id(&socket) else { return };

    // Room membership mirrors match participation; non-participants are
    // rejected the same way the REST surface rejects them.
    let is_participant = state
        .store
        .match_by_id(payload.match_id)
        .ok()
        .flatten()
        .map(|m| m.involves(user_id))
        .unwrap_or(false);

    if !is_participant {
        let _ = socket.emit(
            "error",
            &ErrorPayload {
                code: "NOT_PARTICIPANT".into(),
                message: "you are not part of this match".into(),
            },
        );
        return;
    }

    socket.join(match_room(payload.match_id)).ok();
    state.presence.join_room(payload.match_id, user_id);

    let _ = socket
        .to(match_room(payload.match_id))
        .emit("user_joined", &serde_json::json!({
            "user_id": user_id,
            "match_id": payload.match_id,
        }));
}

async fn on_leave_chat(socket: SocketRef, payload: RoomPayload, state: &Arc<AppState>) {
    let Some(user_id) = get_user_id(&socket) else { return };

    socket.leave(match_room(payload.match_id)).ok();
    state.presence.leave_room(payload.match_id, user_id);

    let _ = socket
        .to(match_room(payload.match_id))
        .emit("user_left", &serde_json::json!({
            "user_id": user_id,
            "match_id": payload.match_id,
        }));
}

fn relay_typing(socket: &SocketRef, match_id: Uuid, event: &'static str) {
    let Some(user_id) = get_user_id(socket) else { return };
    let _ = socket
        .to(match_room(match_id))
        .emit(event, &serde_json::json!({ "user_id": user_id }));
}

fn authenticate_socket(socket: &SocketRef, state: &Arc<AppState>) -> Result<Uuid, String> {
    let connect_info = socket.req_parts();

    // Extract token from query string
    let query = connect_info.uri.query().unwrap_or_default();
    let token = query
        .split('&')
        .find_map(|pair| {
            let mut split = pair.splitn(2, '=');
            let key = split.next()?;
            let value = split.next()?;
            if key == "token" {
                Some(value.to_string())
            } else {
                None
            }
        })
        .ok_or_else(|| "missing token query parameter".to_string())?;

    let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = jsonwebtoken::decode::<kindred_shared::types::auth::Claims>(
        &token,
        &jsonwebtoken::DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| format!("invalid token: {e}"))?;

    if token_data.claims.is_expired() {
        return Err("token has expired".into());
    }

    Ok(token_data.claims.sub)
}

// --- Emission helpers used by REST handlers (fire-and-forget) ---

pub fn notify_new_match(io: &SocketIo, user_a: Uuid, user_b: Uuid, match_id: Uuid) {
    let payload = serde_json::json!({
        "match_id": match_id,
        "message": "It's a match!",
    });
    for user_id in [user_a, user_b] {
        let _ = io.to(user_room(user_id)).emit("new_match", &payload);
    }
}

pub fn notify_new_message(io: &SocketIo, match_id: Uuid, payload: &serde_json::Value) {
    let _ = io.to(match_room(match_id)).emit("new_message", payload);
}
