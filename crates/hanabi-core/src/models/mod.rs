mod ranking;
mod schedule;
mod title;

pub use ranking::*;
pub use schedule::*;
pub use title::*;
