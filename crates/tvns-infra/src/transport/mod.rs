mod http;

pub use http::{HttpCommandTransport, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
