use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Browse actor has stopped")]
    ActorStopped,
}
