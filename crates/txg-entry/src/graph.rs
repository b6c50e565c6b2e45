//! An owning arena for the entries of one or more transactions.
//!
//! Entries refer to each other by ID. [`EntryGraph`] owns every output and
//! spend it is given, and [`EntryGraph::link`] turns ID references into
//! handles: spends get their spent output attached, and spend destinations
//! that name an output in the graph get a non-owning link to it.
//!
//! # Invariants
//!
//! - Entry IDs are unique within the graph.
//! - A linked spend's output hashes to the spend's `spent_output` ID.
//! - Destination links never keep their target alive.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};
use txg_types::Hash;

use crate::entry::{downgrade, Entry};
use crate::error::{EntryError, EntryResult};
use crate::output::TxOutput;
use crate::spend::Spend;

/// Outputs and spends keyed by entry ID.
#[derive(Debug, Default)]
pub struct EntryGraph {
    outputs: HashMap<Hash, Arc<TxOutput>>,
    spends: HashMap<Hash, Spend>,
    /// Spent output ID -> IDs of the spends that name it.
    spent_by: HashMap<Hash, Vec<Hash>>,
}

impl EntryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.outputs.len() + self.spends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty() && self.spends.is_empty()
    }

    /// Add an output and return its ID.
    pub fn add_output(&mut self, output: impl Into<Arc<TxOutput>>) -> EntryResult<Hash> {
        let output = output.into();
        let id = output.id()?;
        if self.outputs.contains_key(&id) {
            return Err(EntryError::DuplicateEntry(id));
        }
        debug!(output = %id.short_hex(), amount = output.amount(), "added output");
        self.outputs.insert(id, output);
        Ok(id)
    }

    /// Add a spend and return its ID. The spend need not be resolved.
    pub fn add_spend(&mut self, spend: Spend) -> EntryResult<Hash> {
        let id = spend.id()?;
        if self.spends.contains_key(&id) {
            return Err(EntryError::DuplicateEntry(id));
        }
        let spent = spend.spent_output_id();
        self.spent_by.entry(spent).or_default().push(id);
        debug!(
            spend = %id.short_hex(),
            spent_output = %spent.short_hex(),
            "added spend"
        );
        self.spends.insert(id, spend);
        Ok(id)
    }

    /// Resolve every reference that can be resolved from the entries in the
    /// graph.
    ///
    /// Returns how many spends were newly attached to their output. Spends
    /// whose output is not in the graph stay unresolved and are reported by
    /// [`EntryGraph::unresolved`].
    pub fn link(&mut self) -> EntryResult<usize> {
        let mut resolved = 0;
        for (id, spend) in &mut self.spends {
            if !spend.is_resolved() {
                match self.outputs.get(&spend.spent_output_id()) {
                    Some(output) => {
                        spend.resolve(Arc::clone(output))?;
                        resolved += 1;
                    }
                    None => warn!(
                        spend = %id.short_hex(),
                        spent_output = %spend.spent_output_id().short_hex(),
                        "spent output not in graph"
                    ),
                }
            }

            let dest = spend.destination();
            if dest.entry().is_none() && !dest.reference.is_zero() {
                if let Some(target) = self.outputs.get(&dest.reference) {
                    let (reference, position) = (dest.reference, dest.position);
                    spend.set_destination(reference, position, Some(downgrade(target)));
                }
            }
        }
        debug!(resolved, total = self.spends.len(), "linked entry graph");
        Ok(resolved)
    }

    pub fn output(&self, id: &Hash) -> Option<&Arc<TxOutput>> {
        self.outputs.get(id)
    }

    pub fn spend(&self, id: &Hash) -> Option<&Spend> {
        self.spends.get(id)
    }

    /// Mutable access to a spend, for attaching witness data.
    pub fn spend_mut(&mut self, id: &Hash) -> Option<&mut Spend> {
        self.spends.get_mut(id)
    }

    /// Spends that consume the output `output_id`, in insertion order.
    pub fn spends_of(&self, output_id: &Hash) -> Vec<&Spend> {
        self.spent_by
            .get(output_id)
            .map(|ids| ids.iter().filter_map(|id| self.spends.get(id)).collect())
            .unwrap_or_default()
    }

    /// IDs of spends whose output has not been attached, sorted.
    pub fn unresolved(&self) -> Vec<Hash> {
        let mut ids: Vec<Hash> = self
            .spends
            .iter()
            .filter(|(_, s)| !s.is_resolved())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// The linked destination entry of spend `spend_id`, if any.
    pub fn destination_of(&self, spend_id: &Hash) -> Option<Arc<dyn Entry>> {
        self.spends.get(spend_id)?.destination().entry()
    }
}
