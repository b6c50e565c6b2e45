//! Output commitments: what an output is worth and who can claim it.

use std::io::{Read, Write};

use tracing::trace;
use txg_codec::{read_fixed, read_varint63, read_varstr31, write_varint63, write_varstr31};
use txg_types::AssetId;

use crate::canonical::{Encodable, Record, Value};
use crate::error::{Context, EntryError, EntryResult};

/// The only asset version whose commitment layout is understood.
pub const ASSET_VERSION_1: u64 = 1;

/// The only claim-program version understood under asset version 1.
pub const CLAIM_VERSION_1: u64 = 1;

/// An amount of a specific asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssetAmount {
    pub asset_id: AssetId,
    pub amount: u64,
}

impl AssetAmount {
    pub fn new(asset_id: AssetId, amount: u64) -> Self {
        Self { asset_id, amount }
    }

    /// Asset ID (32 raw bytes), then the amount as a varint63.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> EntryResult<()> {
        w.write_all(self.asset_id.as_bytes())
            .map_err(txg_codec::CodecError::from)
            .context("writing asset id")?;
        write_varint63(w, self.amount).context("writing amount")?;
        Ok(())
    }

    pub fn read_from<R: Read + ?Sized>(r: &mut R) -> EntryResult<Self> {
        let asset_id = AssetId::from_bytes(read_fixed::<_, 32>(r).context("reading asset id")?);
        let amount = read_varint63(r).context("reading amount")?;
        Ok(Self { asset_id, amount })
    }
}

impl Encodable for AssetAmount {
    fn to_value(&self) -> Value {
        Record::new("AssetAmount")
            .field("asset_id", self.asset_id)
            .field("amount", self.amount)
            .into()
    }
}

/// The spendable value of an output and the program that authorizes
/// claiming it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputCommitment {
    pub asset_amount: AssetAmount,
    pub claim_version: u64,
    pub claim_program: Vec<u8>,
}

impl OutputCommitment {
    /// A version-1 commitment.
    pub fn new(asset_amount: AssetAmount, claim_program: Vec<u8>) -> Self {
        Self {
            asset_amount,
            claim_version: CLAIM_VERSION_1,
            claim_program,
        }
    }

    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> EntryResult<()> {
        self.asset_amount
            .write_to(w)
            .context("writing asset amount")?;
        trace!(claim_version = self.claim_version, "writing claim program version");
        write_varint63(w, self.claim_version).context("writing claim program version")?;
        write_varstr31(w, &self.claim_program).context("writing claim program")?;
        Ok(())
    }

    /// Decode a commitment written under `asset_version`.
    ///
    /// Only asset version 1 has a defined layout. Any other asset version
    /// reads nothing and yields the zero commitment; rejecting such outputs
    /// is left to whoever inspects the asset version. Under asset version 1,
    /// a claim-program version other than 1 is an error.
    pub fn read_from<R: Read + ?Sized>(r: &mut R, asset_version: u64) -> EntryResult<Self> {
        if asset_version != ASSET_VERSION_1 {
            trace!(asset_version, "skipping commitment of unknown asset version");
            return Ok(Self::default());
        }

        let asset_amount = AssetAmount::read_from(r).context("reading asset amount")?;
        let claim_version = read_varint63(r).context("reading claim program version")?;
        if claim_version != CLAIM_VERSION_1 {
            return Err(EntryError::UnrecognizedVersion {
                what: "claim program",
                version: claim_version,
            });
        }
        let claim_program = read_varstr31(r).context("reading claim program")?;

        Ok(Self {
            asset_amount,
            claim_version,
            claim_program,
        })
    }
}

impl Encodable for OutputCommitment {
    fn to_value(&self) -> Value {
        Record::new("OutputCommitment")
            .field("asset_amount", self.asset_amount.to_value())
            .field("claim_version", self.claim_version)
            .field("claim_program", self.claim_program.clone())
            .into()
    }
}
