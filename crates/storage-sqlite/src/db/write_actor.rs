use super::{DbConnection, DbPool};
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::{debug, error};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};
use treasury_core::errors::{DatabaseError, Error, Result};

// A write job runs against the actor's connection inside one immediate
// transaction. Results are type-erased so one channel carries every job.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedResult = Result<Box<dyn Any + Send + 'static>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<ErasedResult>)>,
}

impl WriteHandle {
    /// Executes a job on the writer's dedicated connection.
    ///
    /// The job runs inside `BEGIN IMMEDIATE`, so it holds SQLite's write lock
    /// from its first statement to commit. Returning an error from the job
    /// rolls back every statement it executed.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| {
                Error::Database(DatabaseError::Internal(
                    "writer actor is no longer running".to_string(),
                ))
            })?;

        let boxed = ret_rx.await.map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "writer actor dropped the job without replying".to_string(),
            ))
        })??;

        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "writer actor returned an unexpected result type".to_string(),
            ))
        })
    }
}

// A panicking job is rolled back like a failed one and the actor keeps serving.
fn job_panicked(payload: &(dyn Any + Send)) -> Error {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    error!("Write job panicked: {}", message);
    Error::Database(DatabaseError::Internal(format!(
        "write job panicked: {}",
        message
    )))
}

/// Spawns a background Tokio task that acts as the single database writer.
///
/// The actor owns one pooled connection for its whole life and runs jobs one
/// at a time, in the order they were sent.
pub fn spawn_writer(pool: &DbPool) -> Result<WriteHandle> {
    let mut conn: DbConnection = pool.get().map_err(StorageError::from)?;

    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<ErasedResult>,
    )>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: ErasedResult = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    panic::catch_unwind(AssertUnwindSafe(|| job(c)))
                        .unwrap_or_else(|payload| Err(job_panicked(payload.as_ref())))
                        .map_err(StorageError::from)
                })
                .map_err(Error::from);

            if let Err(e) = &result {
                debug!("Write job rolled back: {}", e);
            }
            // The requester may have gone away; the outcome is already committed or rolled back.
            let _ = reply_tx.send(result);
        }
        debug!("Writer actor stopped: all handles dropped");
    });

    Ok(WriteHandle { tx })
}
