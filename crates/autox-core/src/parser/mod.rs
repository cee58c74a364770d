//! Event export parsing.
//!
//! Decodes a raw per-event timing export into [`EventResults`]:
//! - `decode` - byte-level text decoding
//! - `rows` - the tagged row shapes of the supported export revisions
//! - `event` - `EventResultsParser`, the assembly pass

mod decode;
mod event;
mod rows;

pub use decode::*;
pub use event::*;
pub use rows::*;
