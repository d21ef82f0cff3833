mod explain;
mod hash;
mod load;
mod realise;

pub use explain::cmd_explain;
pub use hash::cmd_hash;
pub use realise::cmd_realise;
