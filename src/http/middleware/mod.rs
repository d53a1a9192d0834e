pub mod dispatch;

pub use dispatch::{not_found, route_dispatch, NOT_FOUND_BODY};
