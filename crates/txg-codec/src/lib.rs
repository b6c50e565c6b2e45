//! Primitive wire codec for the transaction entry graph.
//!
//! The formats here are bit-exact and shared by every implementation of the
//! protocol:
//!
//! - **varint63**: little-endian base-128 continuation encoding; bit 63 of
//!   the value must be zero.
//! - **varint31**: the same encoding restricted to 31 bits, used only for
//!   lengths and counts.
//! - **varstr31**: varint31 length followed by raw bytes.
//! - **varstr list**: varint31 count followed by varstr31 elements.
//! - **extensible string**: a varstr31 frame around a sub-encoding that may
//!   grow in later protocol versions. Strict readers require the
//!   sub-encoding to fill the frame exactly; lenient readers skip the rest.

pub mod codec;
pub mod error;
pub mod extensible;
pub mod flags;

pub use codec::{
    read_fixed, read_varint31, read_varint63, read_varstr31, read_varstr_list, write_varint31,
    write_varint63, write_varstr31, write_varstr_list, MAX_VARINT31, MAX_VARINT63,
    MAX_VARINT_LEN,
};
pub use error::{CodecError, CodecResult, Context};
pub use extensible::{read_extensible_string, write_extensible_string};
pub use flags::SerFlags;
