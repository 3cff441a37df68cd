mod icon;
mod livecomment;
mod livecomment_report;
mod livestream;
mod livestream_tag;
mod reservation_slot;
mod session;
mod tag;
mod theme;
mod user;
mod viewer_history;

pub use icon::*;
pub use livecomment::*;
pub use livecomment_report::*;
pub use livestream::*;
pub use livestream_tag::*;
pub use reservation_slot::*;
pub use session::*;
pub use tag::*;
pub use theme::*;
pub use user::*;
pub use viewer_history::*;
