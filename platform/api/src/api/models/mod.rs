//! JSON representations returned by the API.

mod livecomment;
mod livestream;
mod tag;
mod user;

pub use livecomment::*;
pub use livestream::*;
pub use tag::*;
pub use user::*;
