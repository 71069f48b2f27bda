mod http;
mod traits;

pub use http::HttpGoterraClient;
pub use traits::*;
