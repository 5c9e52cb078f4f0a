//! Reading and writing meshes from and to files.
//!
//! Only the ASCII OFF format is supported right now. It is trivial to parse,
//! supports arbitrary polygon degrees and is enough to get meshes in and out
//! of the connectivity structure for testing and small tools.

pub mod off;

pub use off::{read_off, write_off, OffError};
