mod atomic;
mod file;
mod interface;
mod memory;
mod shared;

pub use atomic::*;
pub use file::*;
pub use interface::*;
pub use memory::*;
pub use shared::*;
