pub use actions::*;
pub use board::*;
pub use errors::*;
pub use protocol_types::*;
pub use search::*;
pub use selector::*;
pub use visualization::*;

mod actions;
#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod protocol_types;
mod search;
mod selector;
mod visualization;
