//! A session served from its own worker thread.
//!
//! Requests are queued on a flume channel and handled one at a time, so at
//! most one evaluation is ever in flight for the session.

use std::io;
use std::thread;

use thiserror::Error;

use crate::history::{HistoryEntry, HistoryError};
use crate::session::{Command, Session, Snapshot};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("session worker has stopped")]
    Disconnected,

    #[error(transparent)]
    History(#[from] HistoryError),
}

enum Request {
    Apply {
        commands: Vec<Command>,
        reply: flume::Sender<Snapshot>,
    },
    History {
        reply: flume::Sender<Result<Vec<HistoryEntry>, HistoryError>>,
    },
    ClearHistory {
        reply: flume::Sender<Result<(), HistoryError>>,
    },
}

/// Cloneable handle to a session running on a worker thread.
///
/// The worker exits once every handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    sender: flume::Sender<Request>,
}

impl SessionHandle {
    pub fn spawn(session: Session) -> io::Result<Self> {
        let (sender, receiver) = flume::unbounded();
        thread::Builder::new()
            .name("keycalc-session".to_string())
            .spawn(move || serve(session, receiver))?;
        Ok(Self { sender })
    }

    /// Apply commands in order and return the final view.
    pub fn apply(&self, commands: Vec<Command>) -> Result<Snapshot, ServiceError> {
        let (reply, response) = flume::bounded(1);
        self.send(Request::Apply { commands, reply })?;
        response.recv().map_err(|_| ServiceError::Disconnected)
    }

    pub async fn apply_async(&self, commands: Vec<Command>) -> Result<Snapshot, ServiceError> {
        let (reply, response) = flume::bounded(1);
        self.sender
            .send_async(Request::Apply { commands, reply })
            .await
            .map_err(|_| ServiceError::Disconnected)?;
        response
            .recv_async()
            .await
            .map_err(|_| ServiceError::Disconnected)
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        let (reply, response) = flume::bounded(1);
        self.send(Request::History { reply })?;
        Ok(response.recv().map_err(|_| ServiceError::Disconnected)??)
    }

    pub async fn history_async(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        let (reply, response) = flume::bounded(1);
        self.sender
            .send_async(Request::History { reply })
            .await
            .map_err(|_| ServiceError::Disconnected)?;
        Ok(response
            .recv_async()
            .await
            .map_err(|_| ServiceError::Disconnected)??)
    }

    pub fn clear_history(&self) -> Result<(), ServiceError> {
        let (reply, response) = flume::bounded(1);
        self.send(Request::ClearHistory { reply })?;
        Ok(response.recv().map_err(|_| ServiceError::Disconnected)??)
    }

    fn send(&self, request: Request) -> Result<(), ServiceError> {
        self.sender
            .send(request)
            .map_err(|_| ServiceError::Disconnected)
    }
}

fn serve(mut session: Session, receiver: flume::Receiver<Request>) {
    tracing::debug!("session worker started");
    for request in receiver.iter() {
        // A dropped reply receiver just means the caller stopped waiting.
        match request {
            Request::Apply { commands, reply } => {
                let _ = reply.send(session.apply_all(commands));
            }
            Request::History { reply } => {
                let _ = reply.send(session.history());
            }
            Request::ClearHistory { reply } => {
                let _ = reply.send(session.clear_history());
            }
        }
    }
    tracing::debug!("session worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::FendEvaluator;
    use crate::history::MemoryHistory;
    use crate::session::{SessionState, parse_keys};

    fn handle() -> SessionHandle {
        let session = Session::new(FendEvaluator::new()).with_history(MemoryHistory::new());
        SessionHandle::spawn(session).unwrap()
    }

    #[test]
    fn test_apply_in_order() {
        let handle = handle();
        handle.apply(parse_keys("12+").unwrap()).unwrap();
        let snapshot = handle.apply(parse_keys("3").unwrap()).unwrap();
        assert_eq!(snapshot.expression, "12+3");
        assert_eq!(snapshot.display, "15");
        assert_eq!(snapshot.state, SessionState::HasResult);
    }

    #[test]
    fn test_concurrent_callers_share_one_session() {
        let handle = handle();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || handle.apply(parse_keys("1").unwrap()).unwrap())
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let snapshot = handle.apply(Vec::new()).unwrap();
        assert_eq!(snapshot.expression, "1111");
    }

    #[test]
    fn test_history_through_handle() {
        let handle = handle();
        handle.apply(parse_keys("2×3=").unwrap()).unwrap();

        let entries = handle.history().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].expression, "2×3");
        assert_eq!(entries[0].result, "6");

        handle.clear_history().unwrap();
        assert!(handle.history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_apply_async() {
        let handle = handle();
        let snapshot = handle.apply_async(parse_keys("7~").unwrap()).await.unwrap();
        assert_eq!(snapshot.expression, "-7");
    }

    #[tokio::test]
    async fn test_history_async() {
        let handle = handle();
        assert!(handle.history_async().await.unwrap().is_empty());

        handle.apply_async(parse_keys("1÷8=").unwrap()).await.unwrap();
        let entries = handle.history_async().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].expression, "1÷8");
        assert_eq!(entries[0].result, "0.125");
    }
}
