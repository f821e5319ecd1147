//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod draw;
pub mod flush;

pub use draw::draw_task;
pub use flush::flush_task;
