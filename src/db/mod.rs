mod connection;
mod events;
mod helpers;
mod migrations;
mod repositories;

pub use connection::Database;
pub use events::DataEvent;
