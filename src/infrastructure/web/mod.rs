pub mod routes;
pub mod webserver;
pub use webserver::MockServer;
