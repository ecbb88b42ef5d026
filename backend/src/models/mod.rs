pub mod api;
pub mod conversation;
pub mod verse;

pub use api::*;
pub use conversation::*;
pub use verse::*;
