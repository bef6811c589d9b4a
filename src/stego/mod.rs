//! Plainsight text codec.
//!
//! Maps an arbitrary byte payload onto textual features of a user-supplied
//! carrier document and back. Encoding is capacity-checked before anything
//! is produced; the embedded frame is self-describing, so decoding needs
//! only the stego text itself.

pub mod carrier;
pub mod codec;
pub mod payload;

pub use carrier::{Corpus, CorpusError};
pub use codec::{decode, encode, StegoError};
pub use payload::{FRAME_OVERHEAD, STEGO_VERSION};
