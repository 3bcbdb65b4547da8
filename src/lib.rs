pub mod common {
    pub use docid_common::*;
}

#[cfg(feature = "request")]
pub mod request {
    pub use docid_request::*;
}
