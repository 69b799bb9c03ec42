use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Center '{requested}' is outside the user's center '{assigned}'")]
    CenterMismatch { requested: String, assigned: String },

    #[error("User is center-scoped but has no center assigned")]
    NoCenterAssigned,
}
