//! End-to-end ledger scenarios: the budget walkthrough, isolation between
//! proposals, and concurrent voting through a shared ledger.

use std::sync::Arc;
use std::thread;

use tally_governance::{GovernanceError, GovernanceLedger};
use tally_nullables::{NullBalanceOracle, NullStore};
use tally_types::{AccountId, ProposalId, ProposalView, TokenAmount};

fn account(name: &str) -> AccountId {
    AccountId::new(name)
}

fn view(description: &str, votes: u128) -> ProposalView {
    ProposalView {
        description: description.to_string(),
        vote_count: TokenAmount::new(votes),
        executed: false,
    }
}

#[test]
fn dev_budget_walkthrough() {
    let oracle = NullBalanceOracle::with_balances([("A", 500), ("B", 0), ("C", 200)]);
    let ledger = GovernanceLedger::new(&oracle, NullStore::new());
    let desc = "Increase dev budget by 50%";

    let id = ledger.create_proposal(desc).unwrap();
    assert_eq!(id, ProposalId::FIRST);

    ledger.cast_vote(id, &account("A")).unwrap();
    assert_eq!(ledger.get_proposal(id).unwrap(), view(desc, 500));

    let err = ledger.cast_vote(id, &account("A")).unwrap_err();
    assert!(matches!(err, GovernanceError::AlreadyVoted { .. }));
    assert_eq!(ledger.get_proposal(id).unwrap(), view(desc, 500));

    let err = ledger.cast_vote(id, &account("B")).unwrap_err();
    assert!(matches!(err, GovernanceError::NoVotingPower { .. }));
    assert_eq!(ledger.get_proposal(id).unwrap(), view(desc, 500));

    ledger.cast_vote(id, &account("C")).unwrap();
    assert_eq!(ledger.get_proposal(id).unwrap(), view(desc, 700));
    ledger.verify_tally(id).unwrap();
}

#[test]
fn weights_add_up_in_either_order() {
    for order in [["a", "b"], ["b", "a"]] {
        let oracle = NullBalanceOracle::with_balances([("a", 300), ("b", 200)]);
        let ledger = GovernanceLedger::new(&oracle, NullStore::new());
        let id = ledger.create_proposal("order").unwrap();
        for name in order {
            ledger.cast_vote(id, &account(name)).unwrap();
        }
        assert_eq!(
            ledger.get_proposal(id).unwrap().vote_count,
            TokenAmount::new(500)
        );
    }
}

#[test]
fn votes_on_one_proposal_do_not_touch_another() {
    let oracle = NullBalanceOracle::with_balances([("alice", 40), ("bob", 2)]);
    let ledger = GovernanceLedger::new(&oracle, NullStore::new());
    let p1 = ledger.create_proposal("one").unwrap();
    let p2 = ledger.create_proposal("two").unwrap();

    ledger.cast_vote(p1, &account("alice")).unwrap();
    ledger.cast_vote(p1, &account("bob")).unwrap();

    assert_eq!(ledger.get_proposal(p2).unwrap(), view("two", 0));
    assert!(ledger.voters(p2).unwrap().is_empty());

    // Voting on p1 does not count as voting on p2.
    ledger.cast_vote(p2, &account("alice")).unwrap();
    assert_eq!(ledger.get_proposal(p2).unwrap().vote_count, TokenAmount::new(40));
    assert_eq!(ledger.get_proposal(p1).unwrap().vote_count, TokenAmount::new(42));
}

#[test]
fn unknown_ids_read_as_zero_triple() {
    let oracle = NullBalanceOracle::new();
    let ledger = GovernanceLedger::new(&oracle, NullStore::new());
    ledger.create_proposal("").unwrap();

    // A created-but-empty proposal and a never-created one read the same;
    // the proposal count tells them apart.
    assert_eq!(ledger.get_proposal(ProposalId::new(1)).unwrap(), ProposalView::default());
    assert_eq!(ledger.get_proposal(ProposalId::new(2)).unwrap(), ProposalView::default());
    assert!(ledger.find_proposal(ProposalId::new(1)).unwrap().is_some());
    assert!(ledger.find_proposal(ProposalId::new(2)).unwrap().is_none());
    assert_eq!(ledger.proposal_count().unwrap(), 1);
}

#[test]
fn concurrent_duplicate_votes_record_exactly_once() {
    let oracle = Arc::new(NullBalanceOracle::with_balances([("alice", 100)]));
    let ledger = Arc::new(GovernanceLedger::new(Arc::clone(&oracle), NullStore::new()));
    let id = ledger.create_proposal("race").unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || ledger.cast_vote(id, &AccountId::new("alice")))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, GovernanceError::AlreadyVoted { .. })));
    assert_eq!(
        ledger.get_proposal(id).unwrap().vote_count,
        TokenAmount::new(100)
    );
}

#[test]
fn concurrent_distinct_voters_all_count() {
    let oracle = Arc::new(NullBalanceOracle::new());
    for i in 0..32u128 {
        oracle.set_balance(&AccountId::new(format!("voter{i}")), i + 1);
    }
    let ledger = Arc::new(GovernanceLedger::new(Arc::clone(&oracle), NullStore::new()));
    let id = ledger.create_proposal("crowd").unwrap();

    let handles: Vec<_> = (0..32u128)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || ledger.cast_vote(id, &AccountId::new(format!("voter{i}"))))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    // 1 + 2 + ... + 32
    assert_eq!(
        ledger.get_proposal(id).unwrap().vote_count,
        TokenAmount::new(528)
    );
    assert_eq!(ledger.voters(id).unwrap().len(), 32);
    ledger.verify_tally(id).unwrap();
}

#[test]
fn concurrent_creation_keeps_ids_dense() {
    let ledger = Arc::new(GovernanceLedger::new(
        NullBalanceOracle::new(),
        NullStore::new(),
    ));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                (0..10)
                    .map(|i| ledger.create_proposal(format!("t{t}-{i}")).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .map(|id| id.raw())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=80).collect::<Vec<u64>>());
    assert_eq!(ledger.proposal_count().unwrap(), 80);
}
