//! Audit Log
//!
//! Append-only record of settled loan events (funding and repayment). Each
//! record carries a 1-based sequence index and a SHA-256 hash of its
//! canonicalized payload. Records are immutable once appended and survive the
//! loan's eviction from the live registry.
//!
//! The hash covers each record's own content only; records are not chained
//! through their predecessor's hash. Verification therefore detects content
//! tampering and index gaps, not wholesale record replacement.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable audit entry describing a settled loan event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// 1-based sequence index, contiguous for the life of the process
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    /// The settled event: a funded loan, or a `loan_repaid` wrapper
    pub transaction: Value,
    /// SHA-256 over the canonical JSON form of `transaction`, hex-encoded
    pub hash: String,
}

/// Append-only, read-concurrent audit log.
#[derive(Debug, Default)]
pub struct AuditLog {
    records: RwLock<Vec<AuditRecord>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a settled event, assigning the next sequence index.
    ///
    /// Never fails under normal operation; allocation failure aborts the
    /// process rather than silently losing a record.
    pub fn append(&self, transaction: Value) -> AuditRecord {
        let hash = sha256_hex(&canonical_json(&transaction));
        let mut records = self.records.write();
        let record = AuditRecord {
            index: records.len() as u64 + 1,
            timestamp: Utc::now(),
            transaction,
            hash,
        };
        records.push(record.clone());

        tracing::debug!(index = record.index, hash = %record.hash, "audit record appended");
        record
    }

    /// All records, oldest first. Safe to call concurrently with `append`.
    pub fn all(&self) -> Vec<AuditRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Recompute every record's hash and check index contiguity.
    pub fn verify(&self) -> VerificationResult {
        let records = self.records.read();

        for (position, record) in records.iter().enumerate() {
            let expected_index = position as u64 + 1;
            if record.index != expected_index {
                return VerificationResult::invalid_at(record.index, position as u64);
            }

            let recalculated = sha256_hex(&canonical_json(&record.transaction));
            if recalculated != record.hash {
                return VerificationResult {
                    is_valid: false,
                    records_checked: position as u64,
                    first_invalid_index: Some(record.index),
                    expected_hash: Some(recalculated),
                    actual_hash: Some(record.hash.clone()),
                };
            }
        }

        VerificationResult {
            is_valid: true,
            records_checked: records.len() as u64,
            first_invalid_index: None,
            expected_hash: None,
            actual_hash: None,
        }
    }
}

/// Result of audit log verification
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub records_checked: u64,
    pub first_invalid_index: Option<u64>,
    pub expected_hash: Option<String>,
    pub actual_hash: Option<String>,
}

impl VerificationResult {
    fn invalid_at(index: u64, checked: u64) -> Self {
        Self {
            is_valid: false,
            records_checked: checked,
            first_invalid_index: Some(index),
            expected_hash: None,
            actual_hash: None,
        }
    }
}

/// Deterministic byte form of a payload, independent of attribute ordering.
/// `serde_json` maps are BTreeMaps, so serialization is key-sorted at every
/// nesting level.
fn canonical_json(value: &Value) -> String {
    value.to_string()
}

/// Calculate SHA-256 and return as hex string
fn sha256_hex(input: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
