mod contract;
mod customer;
mod ledger;
mod notification;
mod portal;
mod rental;
mod report;
mod reservation;
mod vehicle;

pub use self::{
    contract::*, customer::*, ledger::*, notification::*, portal::*, rental::*, report::*,
    reservation::*, vehicle::*,
};
