//! LMDB environment setup.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::proposal::LmdbProposalStore;
use crate::LmdbError;

/// Names of every database the ledger creates.
pub(crate) const PROPOSALS_DB: &str = "proposals";
pub(crate) const VOTES_DB: &str = "votes";
pub(crate) const META_DB: &str = "meta";

/// Number of named databases requested from LMDB.
const MAX_DBS: u32 = 8;

/// Wraps the LMDB environment and all database handles.
#[derive(Clone)]
pub struct LmdbEnvironment {
    env: Env,
    /// `ProposalId` (big-endian) → bincode `Proposal`.
    pub(crate) proposals_db: Database<Bytes, Bytes>,
    /// `ProposalId` (big-endian) ‖ account bytes → bincode `TokenAmount`.
    pub(crate) votes_db: Database<Bytes, Bytes>,
    /// Ledger-wide counters.
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if missing. `map_size` is the maximum size of
    /// the memory map in bytes.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process per path; the
        // memory map is not modified by anything outside heed.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let proposals_db = env.create_database(&mut wtxn, Some(PROPOSALS_DB))?;
        let votes_db = env.create_database(&mut wtxn, Some(VOTES_DB))?;
        let meta_db = env.create_database(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env,
            proposals_db,
            votes_db,
            meta_db,
        })
    }

    /// The underlying heed environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// A proposal store backed by this environment.
    pub fn proposal_store(&self) -> LmdbProposalStore {
        LmdbProposalStore::new(self.clone())
    }
}
