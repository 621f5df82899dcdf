//! Local session storage for myFlix

mod file;
mod memory;
mod session;
mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::{SessionStore, TOKEN_KEY, USER_KEY};
pub use traits::KeyValueStore;
