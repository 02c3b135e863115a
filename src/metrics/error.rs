#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("met unknown state of container: `{state}`")]
    UnknownState { state: String },
    #[error("unknown metric bucket `{name}`")]
    UnknownBucket { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
