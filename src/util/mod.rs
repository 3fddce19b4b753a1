pub mod writer;

pub use writer::CodeWriter;
