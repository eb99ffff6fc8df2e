use shared::domain::SubjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("directory service unavailable: {source}")]
    DirectoryUnavailable { source: anyhow::Error },
    #[error("image catalog unavailable while loading subject {subject_id}: {source}")]
    CatalogUnavailable {
        subject_id: SubjectId,
        source: anyhow::Error,
    },
    #[error("no subjects available to select from")]
    EmptyCandidatePool,
    #[error("card session is busy with a load or transition")]
    SessionBusy,
    #[error("card transition task failed: {0}")]
    TransitionTask(#[from] tokio::task::JoinError),
}
