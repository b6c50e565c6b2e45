//! Transaction outputs.

use std::io::{Read, Write};

use txg_codec::{
    read_extensible_string, read_varint63, read_varstr31, write_extensible_string,
    write_varint63, write_varstr31, CodecResult, SerFlags,
};
use txg_crypto::{sum256, EMPTY_STRING_HASH};
use txg_types::{AssetId, Hash};

use crate::canonical::{Encodable, Record, Value};
use crate::commitment::{AssetAmount, OutputCommitment, ASSET_VERSION_1};
use crate::entry::Entry;
use crate::error::{Context, EntryResult};

/// Type tag of output entries.
pub const OUTPUT_TYPE: &str = "output1";

/// A transaction output.
///
/// Immutable once built; later spends refer to it by its entry ID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutput {
    asset_version: u64,
    commitment: OutputCommitment,
    reference_data: Vec<u8>,
    ordinal: Option<usize>,
}

impl TxOutput {
    /// An asset-version-1 output with a version-1 claim program.
    pub fn new(
        asset_id: AssetId,
        amount: u64,
        claim_program: Vec<u8>,
        reference_data: Vec<u8>,
    ) -> Self {
        Self {
            asset_version: ASSET_VERSION_1,
            commitment: OutputCommitment::new(AssetAmount::new(asset_id, amount), claim_program),
            reference_data,
            ordinal: None,
        }
    }

    /// Assemble an output from already-decoded parts.
    pub fn from_parts(
        asset_version: u64,
        commitment: OutputCommitment,
        reference_data: Vec<u8>,
    ) -> Self {
        Self {
            asset_version,
            commitment,
            reference_data,
            ordinal: None,
        }
    }

    /// Record the output's position in its transaction's output list.
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub fn asset_version(&self) -> u64 {
        self.asset_version
    }

    pub fn commitment(&self) -> &OutputCommitment {
        &self.commitment
    }

    pub fn asset_id(&self) -> AssetId {
        self.commitment.asset_amount.asset_id
    }

    pub fn amount(&self) -> u64 {
        self.commitment.asset_amount.amount
    }

    pub fn claim_version(&self) -> u64 {
        self.commitment.claim_version
    }

    pub fn claim_program(&self) -> &[u8] {
        &self.commitment.claim_program
    }

    pub fn reference_data(&self) -> &[u8] {
        &self.reference_data
    }

    /// Write the output in wire form.
    ///
    /// The commitment is framed as an extensible string even when the asset
    /// version has no commitment layout, so newer versions stay parseable.
    /// The witness is reserved and always written empty.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W, flags: SerFlags) -> EntryResult<()> {
        write_varint63(w, self.asset_version).context("writing asset version")?;
        write_extensible_string(w, |buf| self.write_commitment(buf))
            .context("writing output commitment")?;
        write_ref_data(w, &self.reference_data, flags).context("writing reference data")?;
        write_varstr31(w, &[]).context("writing witness")?;
        Ok(())
    }

    /// Write only the commitment, or nothing for asset versions other than 1.
    pub fn write_commitment<W: Write + ?Sized>(&self, w: &mut W) -> EntryResult<()> {
        if self.asset_version == ASSET_VERSION_1 {
            self.commitment.write_to(w)?;
        }
        Ok(())
    }

    /// Read an output written under transaction version `tx_version`.
    ///
    /// For transaction version 1 the commitment frame must be consumed
    /// exactly; for any other version trailing frame bytes are skipped.
    pub fn read_from<R: Read + ?Sized>(r: &mut R, tx_version: u64) -> EntryResult<Self> {
        let asset_version = read_varint63(r).context("reading asset version")?;

        let strict = tx_version == 1;
        let (commitment, _suffix) = read_extensible_string(r, strict, |frame| {
            OutputCommitment::read_from(frame, asset_version)
        })
        .context("reading output commitment")?;

        let reference_data = read_varstr31(r).context("reading reference data")?;

        // the witness is empty in this version
        read_varstr31(r).context("reading output witness")?;

        Ok(Self::from_parts(asset_version, commitment, reference_data))
    }

    /// Commitment to the output's witness, which is always empty.
    pub fn witness_hash(&self) -> Hash {
        EMPTY_STRING_HASH
    }
}

/// Write reference data as selected by `flags`.
///
/// With [`SerFlags::METADATA`] the data is written verbatim. Without it the
/// data is replaced by its hash (or nothing, when empty), as used for
/// serializations that commit to the reference data without carrying it.
pub fn write_ref_data<W: Write + ?Sized>(
    w: &mut W,
    data: &[u8],
    flags: SerFlags,
) -> CodecResult<usize> {
    if flags.contains(SerFlags::METADATA) {
        return write_varstr31(w, data);
    }
    if data.is_empty() {
        return write_varstr31(w, &[]);
    }
    write_varstr31(w, sum256(data).as_bytes())
}

impl Encodable for TxOutput {
    fn to_value(&self) -> Value {
        Record::new("TxOutput")
            .field("asset_version", self.asset_version)
            .field("commitment", self.commitment.to_value())
            .field("data", sum256(&self.reference_data))
            .into()
    }
}

impl Entry for TxOutput {
    fn type_tag(&self) -> &'static str {
        OUTPUT_TYPE
    }

    fn body(&self) -> Value {
        self.to_value()
    }

    fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }
}
