//! LMDB database integrity checks.
//!
//! Run on startup to detect corruption early, before the ledger accepts
//! any writes.

use std::collections::BTreeMap;

use tally_store::{ProposalStore, StoreError};
use tally_types::{ProposalId, TokenAmount};

use crate::LmdbProposalStore;

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub proposals_checked: u64,
    pub votes_checked: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check the ledger invariants held by an LMDB proposal store.
///
/// Verifies that proposal ids are dense from 1, that the stored proposal
/// count matches them, and that every tally equals the sum of its recorded
/// vote weights. Violations are collected in the report rather than
/// returned as errors; only read failures are errors.
pub fn check_integrity(store: &LmdbProposalStore) -> Result<IntegrityReport, StoreError> {
    let mut report = IntegrityReport::default();

    let count = store.proposal_count()?;
    let proposals = store.iter_proposals()?;

    let mut expected = ProposalId::FIRST;
    for proposal in &proposals {
        report.proposals_checked += 1;
        if proposal.id != expected {
            report
                .errors
                .push(format!("expected proposal {expected}, found {}", proposal.id));
        }
        expected = proposal.id.next().unwrap_or(proposal.id);

        let votes: BTreeMap<_, _> = store.get_votes(proposal.id)?.into_iter().collect();
        report.votes_checked += votes.len() as u64;
        let recorded: TokenAmount = votes.values().copied().sum();
        if recorded != proposal.vote_count {
            report.errors.push(format!(
                "proposal {} tally {} does not match recorded weights {}",
                proposal.id, proposal.vote_count, recorded
            ));
        }
        if proposal.executed {
            report
                .errors
                .push(format!("proposal {} is marked executed", proposal.id));
        }
    }

    if proposals.len() as u64 != count {
        report.errors.push(format!(
            "proposal count {} does not match {} stored proposals",
            count,
            proposals.len()
        ));
    }

    if report.is_healthy() {
        tracing::debug!(
            proposals = report.proposals_checked,
            votes = report.votes_checked,
            "LMDB integrity check passed"
        );
    } else {
        tracing::warn!(errors = report.errors.len(), "LMDB integrity check failed");
    }

    Ok(report)
}
