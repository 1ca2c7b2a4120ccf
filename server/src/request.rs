mod customer;
mod ledger;
mod notification;
mod portal;
mod report;
mod reservation;
mod vehicle;

pub use self::{
    customer::*, ledger::*, notification::*, portal::*, report::*, reservation::*, vehicle::*,
};
