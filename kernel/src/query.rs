mod contract;
mod customer;
mod ledger;
mod notification;
mod reservation;
mod vehicle;

pub use self::{contract::*, customer::*, ledger::*, notification::*, reservation::*, vehicle::*};
