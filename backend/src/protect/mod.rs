//! Protection stages of the secure package: content cipher, guard script and
//! the obfuscation applied to it.

pub mod crypto;
pub mod guard;
pub mod obfuscate;
