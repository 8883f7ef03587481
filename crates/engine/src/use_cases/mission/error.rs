use midian_domain::MissionRuleError;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("Character '{0}' not found")]
    CharacterNotFound(String),
    #[error("Mission '{0}' not found")]
    MissionNotFound(String),
    #[error("Minimum level required: {required}")]
    LevelTooLow { required: u32, actual: i64 },
    #[error("Mission not started or not found")]
    NotStarted,
    #[error(transparent)]
    Rule(#[from] MissionRuleError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
