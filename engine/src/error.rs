use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Empty ratings for user({0}), cannot compute its mean")]
    EmptyRatings(String),

    #[error("Couldn't compute {0}, no predictions were evaluated")]
    EmptyEvaluation(String),
}
