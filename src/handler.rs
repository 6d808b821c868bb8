use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use crate::adapter::Adapter;
use crate::config::NullDBConfig;
use crate::connection::NullConnection;

/// Holds the connection an application currently talks to.
///
/// Test suites swap a [`NullConnection`] in before a group of tests and put
/// the real connection back afterwards.
pub struct ConnectionHandler {
    current: RwLock<Arc<dyn Adapter>>,
}

impl ConnectionHandler {
    pub fn new(connection: Arc<dyn Adapter>) -> Self {
        ConnectionHandler {
            current: RwLock::new(connection),
        }
    }

    pub fn connection(&self) -> Arc<dyn Adapter> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Makes `connection` current and returns the one it replaced.
    pub fn establish(&self, connection: Arc<dyn Adapter>) -> Arc<dyn Adapter> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!(
            "Establishing {} connection in place of {}",
            connection.adapter_name(),
            current.adapter_name()
        );
        std::mem::replace(&mut *current, connection)
    }

    /// Establishes a fresh null connection until the returned guard is dropped.
    pub fn nullify(&self, config: NullDBConfig) -> Nullified<'_> {
        let connection = Arc::new(NullConnection::new(config));
        let previous = self.establish(connection.clone());
        Nullified {
            handler: self,
            connection,
            previous: Some(previous),
        }
    }

    /// Runs a group of tests against a null connection, restoring the previous
    /// connection afterwards even if the group panics.
    pub fn with_null_connection<R>(
        &self,
        config: NullDBConfig,
        group: impl FnOnce(&NullConnection) -> R,
    ) -> R {
        let nullified = self.nullify(config);
        group(&nullified)
    }
}

/// A null connection made current by [`ConnectionHandler::nullify`].
#[must_use]
pub struct Nullified<'a> {
    handler: &'a ConnectionHandler,
    connection: Arc<NullConnection>,
    previous: Option<Arc<dyn Adapter>>,
}

impl Nullified<'_> {
    pub fn connection(&self) -> Arc<NullConnection> {
        Arc::clone(&self.connection)
    }

    pub fn restore(mut self) {
        self.reestablish();
    }

    fn reestablish(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.handler.establish(previous);
        }
    }
}

impl Deref for Nullified<'_> {
    type Target = NullConnection;

    fn deref(&self) -> &NullConnection {
        &self.connection
    }
}

impl Drop for Nullified<'_> {
    fn drop(&mut self) {
        self.reestablish();
    }
}
