use std::fmt::{Display, Formatter};

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    PendingCustomer,
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::PendingCustomer => "pending-customer",
            ReservationStatus::Scheduled => "scheduled",
            ReservationStatus::Active => "active",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a reservation in this state holds its interval against other bookings.
    pub fn is_occupying(&self) -> bool {
        matches!(self, ReservationStatus::Scheduled | ReservationStatus::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed | ReservationStatus::Cancelled
        )
    }

    pub fn can_transition_to(&self, next: &ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (PendingCustomer, Scheduled)
                | (Scheduled, Active)
                | (Active, Completed)
                | (PendingCustomer, Cancelled)
                | (Scheduled, Cancelled)
        )
    }

    pub fn transition(self, next: ReservationStatus) -> error_stack::Result<Self, KernelError> {
        if self.can_transition_to(&next) {
            Ok(next)
        } else {
            Err(Report::new(KernelError::InvalidTransition)
                .attach_printable(format!("{self} -> {next}")))
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReservationStatus {
    type Error = Report<KernelError>;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending-customer" => Ok(Self::PendingCustomer),
            "scheduled" => Ok(Self::Scheduled),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown reservation status: {value}"))),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::entity::ReservationStatus::{self, *};

    const ALL: [ReservationStatus; 5] = [PendingCustomer, Scheduled, Active, Completed, Cancelled];

    #[test]
    fn only_forward_transitions_are_allowed() {
        let allowed = [
            (PendingCustomer, Scheduled),
            (Scheduled, Active),
            (Active, Completed),
            (PendingCustomer, Cancelled),
            (Scheduled, Cancelled),
        ];
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn terminal_states_have_no_exit() {
        for from in [Completed, Cancelled] {
            assert!(from.is_terminal());
            assert!(ALL.iter().all(|to| !from.can_transition_to(to)));
        }
    }

    #[test]
    fn status_names_round_trip() {
        for status in ALL {
            assert_eq!(ReservationStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert_eq!(
            serde_json::to_string(&PendingCustomer).unwrap(),
            "\"pending-customer\""
        );
    }
}
