//! Byte stream abstraction for the textwire codec.
//!
//! The codec only needs two primitives: read up to `n` bytes and write up to
//! `n` bytes, each reporting how many bytes actually moved. This crate
//! defines those primitives and ships the stream implementations the rest of
//! the workspace uses:
//! - In-memory streams backed by [`bytes`]
//! - Adapters over any [`std::io::Read`] / [`std::io::Write`]

pub mod error;
pub mod io;
pub mod mem;
pub mod traits;

pub use error::{Result, StreamError};
pub use io::{IoIStream, IoOStream};
pub use mem::{MemIStream, MemOStream};
pub use traits::{InputStream, OutputStream};
