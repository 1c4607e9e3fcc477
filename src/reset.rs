//! Deferred post-submit reset.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::session::{FormSession, SubmitOutcome};

/// A session shared between the UI event handlers and the reset task.
pub type SharedSession = Arc<Mutex<FormSession>>;

pub fn shared(session: FormSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}

pub(crate) fn lock(session: &SharedSession) -> MutexGuard<'_, FormSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Submits the form and, if it is accepted, spawns a task that clears it
/// after `reset_delay`.
///
/// With [`ResetPolicy::Unconditional`](crate::ResetPolicy::Unconditional)
/// nothing cancels the task: input typed before it fires is wiped. With
/// [`ResetPolicy::CancelOnInput`](crate::ResetPolicy::CancelOnInput) the
/// next input event cancels it.
///
/// # Returns
/// The submit outcome, plus the reset task handle when the form was accepted.
pub async fn submit_and_schedule_reset(
    session: &SharedSession,
) -> (SubmitOutcome, Option<JoinHandle<()>>) {
    let (outcome, id, token, delay) = {
        let mut guard = lock(session);
        let outcome = guard.submit();
        if !outcome.accepted() {
            return (outcome, None);
        }
        let (id, token) = guard.arm_reset();
        (outcome, id, token, guard.config().reset_delay)
    };

    #[cfg(feature = "tracing")]
    tracing::info!("Form reset scheduled in {:?}", delay);

    let session = Arc::clone(session);
    let handle = tokio::spawn(async move {
        if token
            .run_until_cancelled(tokio::time::sleep(delay))
            .await
            .is_none()
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("Scheduled form reset skipped: cancelled");
            return;
        }
        // Input may have cancelled the token while we waited for the lock.
        lock(&session).fire_reset(id);
    });

    (outcome, Some(handle))
}
