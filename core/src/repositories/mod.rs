pub mod whitelist;

pub use whitelist::{MemoryWhitelist, WhitelistStore};
