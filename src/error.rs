use thiserror::Error;

/// Rejections raised while validating what the user typed or passed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("League ID must be a number.")]
    NonNumericLeagueId,
    #[error("Season must be a 4-digit year.")]
    InvalidSeason,
}
