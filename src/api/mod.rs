//! HTTP API module: route table, dispatcher, handlers and JSON encoding.

pub mod dispatcher;
pub mod encoder;
pub mod handlers;
pub mod routes;

pub use dispatcher::Dispatcher;
pub use handlers::{Endpoint, Health, Welcome, WELCOME_MESSAGE};
pub use routes::{create_router, RouteTable, RouteTableBuilder};
