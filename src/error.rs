use thiserror::Error;

/// Client-local failures of the booking workflow. Everything here maps to
/// an alert in the screens; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("no date and time selected")]
    MissingSelection,
    #[error("{0}")]
    ClosedAtTime(String),
    #[error("slot {0} is already booked")]
    SlotTaken(String),
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error("backend request failed: {0}")]
    Backend(String),
}
