//! Identifier helpers.

use bech32::Bech32m;
use uuid7::uuid7;

/// Mint an id: a uuid7 encoded with bech32 under a human-readable prefix
/// such as `req` or `emp`. The bech32 charset is not alphabetical, so the
/// encoded strings carry no ordering; sort records by their timestamps.
pub fn new_scoped_id(hrp: &str) -> anyhow::Result<String> {
    let hrp = bech32::Hrp::parse(hrp)?;
    let encode = bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())?;
    Ok(encode)
}
