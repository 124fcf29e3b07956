/// Creates a [`ChatSession`](crate::ChatSession), optionally with a system prompt.
///
/// ```rust
/// use fassistant::fa_session;
///
/// let session = fa_session!("session-1", "gpt-4o-mini", "Be concise.");
/// assert_eq!(session.model, "gpt-4o-mini");
/// assert_eq!(session.system_prompt.as_deref(), Some("Be concise."));
/// ```
#[macro_export]
macro_rules! fa_session {
    ($session_id:expr, $model:expr $(,)?) => {
        $crate::ChatSession::new($session_id, $model)
    };
    ($session_id:expr, $model:expr, $system_prompt:expr $(,)?) => {
        $crate::ChatSession::new($session_id, $model).with_system_prompt($system_prompt)
    };
}
