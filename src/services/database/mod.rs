// Database service module
// SQLite connection and schema management for the event store.

mod connection;
mod migrations;
mod schema;

pub use connection::Database;
