//! In-memory directories for resolver tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use futures::channel::oneshot;

use super::{DirectoryError, RoleDirectory};
use crate::role::Role;

/// Answers each key from a queue of scripted results and counts calls.
///
/// Each lookup yields to the executor once before answering so concurrent
/// callers overlap.
#[derive(Default)]
pub(crate) struct ScriptedDirectory {
    script: RefCell<HashMap<String, VecDeque<Result<Role, DirectoryError>>>>,
    calls: Cell<u32>,
}

impl ScriptedDirectory {
    pub(crate) fn with(mut self, key: &str, result: Result<Role, DirectoryError>) -> Self {
        self.script.get_mut().entry(key.to_owned()).or_default().push_back(result);
        self
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.get()
    }
}

#[async_trait::async_trait(?Send)]
impl RoleDirectory for ScriptedDirectory {
    async fn lookup_role(&self, key: &str) -> Result<Role, DirectoryError> {
        self.calls.set(self.calls.get() + 1);
        tokio::task::yield_now().await;
        self.script
            .borrow_mut()
            .get_mut(key)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(DirectoryError::Status { status: 404 }))
    }
}

/// Holds every lookup open until the test releases it through a channel.
#[derive(Default)]
pub(crate) struct GatedDirectory {
    gates: RefCell<HashMap<String, oneshot::Receiver<Role>>>,
}

impl GatedDirectory {
    pub(crate) fn gate(&self, key: &str) -> oneshot::Sender<Role> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(key.to_owned(), rx);
        tx
    }
}

#[async_trait::async_trait(?Send)]
impl RoleDirectory for GatedDirectory {
    async fn lookup_role(&self, key: &str) -> Result<Role, DirectoryError> {
        let gate = self.gates.borrow_mut().remove(key);
        match gate {
            Some(rx) => rx.await.map_err(|_| DirectoryError::Transport("gate dropped".to_owned())),
            None => Err(DirectoryError::Status { status: 404 }),
        }
    }
}
