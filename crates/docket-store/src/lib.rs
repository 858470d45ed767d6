//! Docket Storage Layer
//!
//! Implements the PredictionStore trait using SQLite, plus an in-memory
//! store with identical semantics for tests and ephemeral runs.
//!
//! # Architecture
//!
//! - One `predictions` row per accepted observation id
//! - The primary key makes check-and-insert atomic: of two concurrent
//!   requests with the same id, at most one insert succeeds
//! - Ground truth is attached at most once
//!
//! # Examples
//!
//! ```no_run
//! use docket_store::SqliteStore;
//!
//! let store = SqliteStore::open(":memory:").unwrap();
//! // Store is now ready for prediction operations
//! ```

#![warn(missing_docs)]

mod memory;

pub use memory::MemoryStore;

use docket_domain::traits::{KnownIds, PredictionStore};
use docket_domain::{ObservationId, PredictionRecord};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A prediction with this id already exists
    #[error("Observation ID {0} already exists")]
    Duplicate(ObservationId),

    /// No prediction with this id
    #[error("Observation ID: {0} does not exist")]
    NotFound(ObservationId),

    /// Ground truth was already recorded for this id
    #[error("Outcome already recorded for observation ID {0}")]
    OutcomeAlreadySet(ObservationId),
}

/// SQLite-based implementation of PredictionStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store across tasks
/// behind a mutex, or give each thread its own `SqliteStore`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Number of stored predictions
    pub fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM predictions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether the store holds no predictions
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PredictionRecord> {
        let true_class: Option<i64> = row.get(3)?;
        Ok(PredictionRecord {
            observation_id: ObservationId::new(row.get(0)?),
            observation: row.get(1)?,
            proba: row.get(2)?,
            true_class: true_class.map(|v| v != 0),
        })
    }
}

impl KnownIds for SqliteStore {
    type Error = StoreError;

    fn is_known(&self, id: ObservationId) -> Result<bool, Self::Error> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM predictions WHERE observation_id = ?1",
                params![id.value()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }
}

impl PredictionStore for SqliteStore {
    fn insert_prediction(&mut self, record: PredictionRecord) -> Result<(), Self::Error> {
        let id = record.observation_id;
        let result = self.conn.execute(
            "INSERT INTO predictions (observation_id, observation, proba, true_class)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                id.value(),
                &record.observation,
                record.proba,
                record.true_class.map(i64::from),
            ],
        );

        match result {
            Ok(_) => {
                debug!(id = %id, proba = record.proba, "prediction stored");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Duplicate(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_prediction(&self, id: ObservationId) -> Result<Option<PredictionRecord>, Self::Error> {
        let record = self
            .conn
            .query_row(
                "SELECT observation_id, observation, proba, true_class
                 FROM predictions WHERE observation_id = ?1",
                params![id.value()],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn record_outcome(
        &mut self,
        id: ObservationId,
        outcome: bool,
    ) -> Result<PredictionRecord, Self::Error> {
        let updated = self.conn.execute(
            "UPDATE predictions SET true_class = ?2
             WHERE observation_id = ?1 AND true_class IS NULL",
            params![id.value(), i64::from(outcome)],
        )?;

        let record = self.get_prediction(id)?.ok_or(StoreError::NotFound(id))?;
        if updated == 0 {
            return Err(StoreError::OutcomeAlreadySet(id));
        }

        debug!(id = %id, outcome, "outcome recorded");
        Ok(record)
    }
}
