mod atomic;
mod basic;
mod batch;
mod interface;
mod lock;

pub use atomic::*;
pub use basic::*;
pub use batch::*;
pub use interface::*;
pub use lock::*;
