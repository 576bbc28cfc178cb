//! Browser session lifecycle management
//!
//! One `Session` owns one rendering engine for a sequence of operations.
//! The state machine is strict: a session launches once, serves navigation
//! and evaluation only while `Ready`, and is unusable after `Closed` — a
//! new session must be constructed instead of reusing a closed one.

use crate::engine::{EngineResult, RenderEngine};
use crate::{ScrapeError, SessionError, SessionResult};
use std::future::Future;

/// Lifecycle states of a browser session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Launching,
    Ready,
    Closed,
}

/// Owns the lifecycle of one rendering-engine session
pub struct Session<E: RenderEngine> {
    engine: Option<E>,
    state: SessionState,
}

impl<E: RenderEngine> Session<E> {
    /// Creates a session with no engine attached yet
    pub fn new() -> Self {
        Self {
            engine: None,
            state: SessionState::Uninitialized,
        }
    }

    /// Launches the engine, transitioning `Uninitialized -> Launching -> Ready`
    ///
    /// The launcher is where viewport, user agent, and sandbox flags are
    /// configured. A failed launch moves the session to `Closed`: launch
    /// failures are session-fatal, never retried.
    pub async fn launch<L, Fut>(&mut self, launcher: L) -> SessionResult<()>
    where
        L: FnOnce() -> Fut,
        Fut: Future<Output = EngineResult<E>>,
    {
        if self.state != SessionState::Uninitialized {
            return Err(SessionError::Launch(format!(
                "cannot launch from state {:?}",
                self.state
            )));
        }

        self.state = SessionState::Launching;
        tracing::debug!("Launching browser session");

        match launcher().await {
            Ok(engine) => {
                self.engine = Some(engine);
                self.state = SessionState::Ready;
                tracing::debug!("Browser session ready");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Closed;
                Err(SessionError::Launch(e.to_string()))
            }
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Grants access to the engine; only valid while `Ready`
    pub fn engine(&mut self) -> SessionResult<&mut E> {
        match self.state {
            SessionState::Ready => self
                .engine
                .as_mut()
                .ok_or(SessionError::NotReady {
                    state: SessionState::Ready,
                }),
            SessionState::Closed => Err(SessionError::Closed),
            state => Err(SessionError::NotReady { state }),
        }
    }

    /// Terminates the engine and moves to `Closed`
    ///
    /// Idempotent: closing a closed (or never-launched) session is a no-op,
    /// so every teardown path can call this unconditionally.
    pub async fn close(&mut self) -> SessionResult<()> {
        let was = self.state;
        self.state = SessionState::Closed;

        if let Some(mut engine) = self.engine.take() {
            tracing::debug!("Closing browser session");
            engine
                .shutdown()
                .await
                .map_err(|e| SessionError::Teardown(e.to_string()))?;
        } else if was == SessionState::Ready {
            // Ready without an engine cannot happen through this API
            return Err(SessionError::Teardown("engine missing".to_string()));
        }

        Ok(())
    }
}

impl<E: RenderEngine> Drop for Session<E> {
    fn drop(&mut self) {
        if self.state == SessionState::Ready {
            // The engine's own drop still kills the browser process; this
            // only flags that the orderly teardown path was skipped.
            tracing::warn!("Session dropped without close()");
        }
    }
}

/// Runs an operation against a freshly launched session, guaranteeing
/// teardown on every exit path
///
/// The operation receives the session by value and must hand it back with
/// its result; `close()` runs before either error surfaces, and an
/// operation error takes precedence over a teardown error.
pub async fn with_session<E, L, LFut, F, Fut, T>(launcher: L, op: F) -> crate::Result<T>
where
    E: RenderEngine,
    L: FnOnce() -> LFut,
    LFut: Future<Output = EngineResult<E>>,
    F: FnOnce(Session<E>) -> Fut,
    Fut: Future<Output = (Session<E>, crate::Result<T>)>,
{
    let mut session = Session::new();
    session.launch(launcher).await.map_err(ScrapeError::Session)?;

    let (mut session, result) = op(session).await;
    let teardown = session.close().await;

    let value = result?;
    teardown.map_err(ScrapeError::Session)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineError;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct StubEngine {
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RenderEngine for StubEngine {
        async fn navigate(&mut self, _url: &str, _timeout: Duration) -> EngineResult<()> {
            Ok(())
        }

        async fn evaluate(&mut self, _script: &str) -> EngineResult<Value> {
            Ok(Value::Null)
        }

        async fn scroll_by(&mut self, _pixels: u32) -> EngineResult<()> {
            Ok(())
        }

        async fn shutdown(&mut self) -> EngineResult<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn stub(closed: &Arc<AtomicBool>) -> StubEngine {
        StubEngine {
            closed: Arc::clone(closed),
        }
    }

    #[tokio::test]
    async fn test_launch_transitions_to_ready() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = stub(&closed);

        let mut session = Session::new();
        assert_eq!(session.state(), SessionState::Uninitialized);

        session
            .launch(|| async move { Ok::<_, EngineError>(engine) })
            .await
            .unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.engine().is_ok());

        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_launch_is_terminal() {
        let mut session: Session<StubEngine> = Session::new();
        let err = session
            .launch(|| async { Err(EngineError::Launch("no chromium".to_string())) })
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Launch(_)));
        assert_eq!(session.state(), SessionState::Closed);
        assert!(matches!(session.engine(), Err(SessionError::Closed)));
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_terminal() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = stub(&closed);

        let mut session = Session::new();
        session
            .launch(|| async move { Ok::<_, EngineError>(engine) })
            .await
            .unwrap();

        session.close().await.unwrap();
        assert!(closed.load(Ordering::SeqCst));
        assert!(session.is_closed());

        // Second close is a no-op; the session cannot be reused
        session.close().await.unwrap();
        assert!(matches!(session.engine(), Err(SessionError::Closed)));
    }

    #[tokio::test]
    async fn test_engine_before_launch_is_rejected() {
        let mut session: Session<StubEngine> = Session::new();
        assert!(matches!(
            session.engine(),
            Err(SessionError::NotReady {
                state: SessionState::Uninitialized
            })
        ));
    }

    #[tokio::test]
    async fn test_with_session_closes_on_success() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = stub(&closed);

        let value = with_session(
            || async move { Ok::<_, EngineError>(engine) },
            |session| async move { (session, Ok(42)) },
        )
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_with_session_closes_on_failure() {
        let closed = Arc::new(AtomicBool::new(false));
        let engine = stub(&closed);

        let result: crate::Result<u32> = with_session(
            || async move { Ok::<_, EngineError>(engine) },
            |session| async move {
                let failure = Err(crate::ScrapeError::Evaluation {
                    message: "boom".to_string(),
                });
                (session, failure)
            },
        )
        .await;

        assert!(result.is_err());
        assert!(closed.load(Ordering::SeqCst));
    }
}
