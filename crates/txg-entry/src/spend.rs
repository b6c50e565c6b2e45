//! Spends: entries that consume a prior output.

use std::sync::{Arc, Weak};

use tracing::debug;
use txg_types::{AssetId, Hash};

use crate::canonical::{Encodable, Record, Value};
use crate::entry::{entry_id, Entry};
use crate::error::{EntryError, EntryResult};
use crate::output::TxOutput;

/// Type tag of spend entries.
pub const SPEND_TYPE: &str = "spend1";

/// Where value leaving an entry goes next.
///
/// `entry` is a lookup-only link to the destination; it never keeps the
/// destination alive.
#[derive(Clone, Debug, Default)]
pub struct ValueDestination {
    pub reference: Hash,
    pub position: u64,
    pub entry: Option<Weak<dyn Entry>>,
}

impl ValueDestination {
    /// The destination entry, if linked and still alive.
    pub fn entry(&self) -> Option<Arc<dyn Entry>> {
        self.entry.as_ref()?.upgrade()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct SpendBody {
    spent_output: Hash,
    data: Hash,
    ext_hash: Hash,
}

impl Encodable for SpendBody {
    fn to_value(&self) -> Value {
        Record::new("Spend")
            .field("spent_output", self.spent_output)
            .field("data", self.data)
            .field("ext_hash", self.ext_hash)
            .into()
    }
}

#[derive(Clone, Debug, Default)]
struct SpendWitness {
    destination: ValueDestination,
    arguments: Vec<Vec<u8>>,
}

/// Consumption of a prior output.
///
/// Only the body (spent output ID, data, extension hash) is hashed. The
/// witness is attached after the spend's ID is fixed. `spent_output` is a
/// derived handle to the output that `spent_output_id` names; it is never
/// serialized and may be missing on a freshly decoded spend.
#[derive(Clone, Debug)]
pub struct Spend {
    body: SpendBody,
    ordinal: usize,
    witness: SpendWitness,
    spent_output: Option<Arc<TxOutput>>,
}

impl Spend {
    /// Spend `output`, which becomes input number `ordinal` of its
    /// transaction.
    pub fn new(output: &Arc<TxOutput>, data: Hash, ordinal: usize) -> EntryResult<Self> {
        let spent_output = entry_id(Some(output.as_ref()))?;
        Ok(Self {
            body: SpendBody {
                spent_output,
                data,
                ext_hash: Hash::zero(),
            },
            ordinal,
            witness: SpendWitness::default(),
            spent_output: Some(Arc::clone(output)),
        })
    }

    /// A spend known only by the ID of the output it consumes. Accessors
    /// that need the output fail until [`Spend::resolve`] is called.
    pub fn detached(spent_output: Hash, data: Hash, ordinal: usize) -> Self {
        Self {
            body: SpendBody {
                spent_output,
                data,
                ext_hash: Hash::zero(),
            },
            ordinal,
            witness: SpendWitness::default(),
            spent_output: None,
        }
    }

    /// Attach the output this spend consumes.
    ///
    /// The output must hash to [`Spend::spent_output_id`].
    pub fn resolve(&mut self, output: Arc<TxOutput>) -> EntryResult<()> {
        let actual = entry_id(Some(output.as_ref()))?;
        if actual != self.body.spent_output {
            return Err(EntryError::MismatchedReference {
                expected: self.body.spent_output,
                actual,
            });
        }
        debug!(output = %actual.short_hex(), "resolved spent output");
        self.spent_output = Some(output);
        Ok(())
    }

    pub fn is_resolved(&self) -> bool {
        self.spent_output.is_some()
    }

    pub fn spent_output_id(&self) -> Hash {
        self.body.spent_output
    }

    pub fn data(&self) -> Hash {
        self.body.data
    }

    pub fn ext_hash(&self) -> Hash {
        self.body.ext_hash
    }

    /// The consumed output.
    pub fn spent_output(&self) -> EntryResult<&Arc<TxOutput>> {
        self.spent_output
            .as_ref()
            .ok_or(EntryError::UnresolvedReference(self.body.spent_output))
    }

    pub fn asset_id(&self) -> EntryResult<AssetId> {
        Ok(self.spent_output()?.asset_id())
    }

    pub fn amount(&self) -> EntryResult<u64> {
        Ok(self.spent_output()?.amount())
    }

    pub fn claim_program(&self) -> EntryResult<&[u8]> {
        Ok(self.spent_output()?.claim_program())
    }

    pub fn destination(&self) -> &ValueDestination {
        &self.witness.destination
    }

    pub fn arguments(&self) -> &[Vec<u8>] {
        &self.witness.arguments
    }

    /// Route the spent value to `position` of the entry `reference`.
    ///
    /// Witness data: may be set at any time without changing the spend's ID.
    pub fn set_destination(
        &mut self,
        reference: Hash,
        position: u64,
        entry: Option<Weak<dyn Entry>>,
    ) {
        self.witness.destination = ValueDestination {
            reference,
            position,
            entry,
        };
    }

    /// Attach unlocking arguments (signatures and the like).
    pub fn set_arguments(&mut self, arguments: Vec<Vec<u8>>) {
        self.witness.arguments = arguments;
    }
}

impl Entry for Spend {
    fn type_tag(&self) -> &'static str {
        SPEND_TYPE
    }

    fn body(&self) -> Value {
        self.body.to_value()
    }

    fn ordinal(&self) -> Option<usize> {
        Some(self.ordinal)
    }
}
