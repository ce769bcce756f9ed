use dnscheck_domain::{DomainError, HostResults, LookupMetadata, LookupResultSet, QueryResult};
use std::sync::OnceLock;

/// Pre-allocated, write-once result slots for one batch.
///
/// Slot `h * resolvers + r` belongs to the query for host position `h` and
/// resolver position `r`. Each slot is claimed by exactly one worker, so the
/// only synchronisation is the per-slot `OnceLock`; no lock covers the whole
/// collection.
#[derive(Debug)]
pub struct ResultAggregator {
    resolvers_per_host: usize,
    slots: Box<[OnceLock<QueryResult>]>,
}

impl ResultAggregator {
    pub fn new(hosts: usize, resolvers_per_host: usize) -> Self {
        let slots = (0..hosts * resolvers_per_host)
            .map(|_| OnceLock::new())
            .collect();
        Self {
            resolvers_per_host,
            slots,
        }
    }

    pub fn slot_index(&self, host_index: usize, resolver_index: usize) -> usize {
        host_index * self.resolvers_per_host + resolver_index
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    /// Stores the result for `slot`. A slot can be written once.
    pub fn record(&self, slot: usize, result: QueryResult) -> Result<(), DomainError> {
        let cell = self.slots.get(slot).ok_or_else(|| {
            DomainError::IntegrityError(format!(
                "slot {} out of range ({} slots)",
                slot,
                self.slots.len()
            ))
        })?;
        cell.set(result)
            .map_err(|_| DomainError::IntegrityError(format!("slot {} written twice", slot)))
    }

    /// Consumes the slots into a result set, host order first, resolver order
    /// within a host. Any empty slot is an integrity error.
    pub fn assemble(self, metadata: LookupMetadata) -> Result<LookupResultSet, DomainError> {
        let expected = metadata.hosts.len() * metadata.resolvers.len();
        if expected != self.slots.len() || metadata.resolvers.len() != self.resolvers_per_host {
            return Err(DomainError::IntegrityError(format!(
                "metadata describes {} queries, aggregator holds {} slots",
                expected,
                self.slots.len()
            )));
        }

        let mut slots = self.slots.into_vec().into_iter().map(OnceLock::into_inner);
        let mut entries = Vec::with_capacity(metadata.hosts.len());

        for (host_index, host) in metadata.hosts.iter().enumerate() {
            let mut results = Vec::with_capacity(self.resolvers_per_host);
            for (resolver_index, resolver) in metadata.resolvers.iter().enumerate() {
                let result = slots.next().flatten().ok_or_else(|| {
                    DomainError::IntegrityError(format!(
                        "no result for ({}, {}) at slot {}",
                        host,
                        resolver,
                        host_index * self.resolvers_per_host + resolver_index
                    ))
                })?;
                results.push(result);
            }
            entries.push(HostResults {
                host: host.clone(),
                results,
            });
        }

        let set = LookupResultSet { metadata, entries };
        set.verify_complete()?;
        Ok(set)
    }
}
