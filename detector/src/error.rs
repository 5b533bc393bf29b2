use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Message has an empty author id")]
    MissingAuthorId,
}

#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Incoming messages channel was closed. That should never happen.")]
    IncomingChannelClosed,
}
