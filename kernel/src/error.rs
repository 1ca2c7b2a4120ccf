use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    Conflict,
    InvalidTransition,
    NotFound,
    InvalidInterval,
    InvalidMileage,
    InvalidToken,
    AlreadyCompleted,
    InvalidAmount,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Conflict => write!(f, "Requested period conflicts with an existing booking"),
            KernelError::InvalidTransition => write!(f, "Transition is not permitted"),
            KernelError::NotFound => write!(f, "Referenced entity not found"),
            KernelError::InvalidInterval => write!(f, "End must be after start"),
            KernelError::InvalidMileage => write!(f, "Invalid or missing mileage"),
            KernelError::InvalidToken => write!(f, "Portal token is unknown or expired"),
            KernelError::AlreadyCompleted => write!(f, "Reservation was already completed"),
            KernelError::InvalidAmount => write!(f, "Amount must not be negative"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
