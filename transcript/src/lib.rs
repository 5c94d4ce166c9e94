mod errors;
pub use errors::*;

mod io_pattern;
pub use io_pattern::*;

mod op_queue;
pub use op_queue::*;

mod config;
pub use config::*;

mod safe;
pub use safe::*;

mod reader;
pub use reader::*;

mod byte_transcript_reader;
pub use byte_transcript_reader::*;

mod field_transcript_reader;
pub use field_transcript_reader::*;

#[cfg(test)]
mod tests;
