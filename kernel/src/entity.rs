mod common;
mod contract;
mod customer;
mod financial;
mod notification;
mod reservation;
mod vehicle;

pub use self::{
    common::*, contract::*, customer::*, financial::*, notification::*, reservation::*,
    vehicle::*,
};
