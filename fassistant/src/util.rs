//! Small convenience constructors for driving a [`ChatService`](crate::ChatService)
//! directly, without an [`Assistant`](crate::Assistant).

use crate::{ChatSession, ChatTurnRequest, SessionId};

pub fn session(id: impl Into<SessionId>, model: impl Into<String>) -> ChatSession {
    ChatSession::new(id, model)
}

pub fn turn(session: ChatSession, user_input: impl Into<String>) -> ChatTurnRequest {
    ChatTurnRequest::new(session, user_input)
}
