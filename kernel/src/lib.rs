pub use crate::error::*;

mod database;
mod entity;
mod error;
mod event;
mod generator;
mod modify;
mod policy;
mod query;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod policy {
        pub use crate::policy::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod database {
        pub use crate::database::*;
    }
    pub mod event {
        pub use crate::event::*;
    }
    pub mod generator {
        pub use crate::generator::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
}
