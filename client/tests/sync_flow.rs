use client::{
    context::Session,
    fixtures::MockLedger,
    sync::{
        CounterState,
        CounterSync,
    },
    transactions::MEMO_PREFIX,
    CounterError,
};
use counter_interface::{
    memo_program,
    program,
    state::Counter,
};
use solana_sdk::signature::Keypair;

fn new_counter(ledger: &MockLedger) -> CounterSync<MockLedger, MockLedger> {
    let session = Session::new(Keypair::new(), ledger.clone(), ledger.clone());
    CounterSync::new(session).expect("derivation should succeed")
}

#[tokio::test]
async fn absent_before_initialize() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    assert_eq!(counter.sync().await.unwrap(), CounterState::Absent);
    let mirror = counter.mirror();
    assert_eq!(mirror.value, 0);
    assert!(!mirror.initialized);
    assert!(!mirror.loading);
}

#[tokio::test]
async fn sync_is_idempotent() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    let first = counter.sync().await.unwrap();
    let second = counter.sync().await.unwrap();
    assert_eq!(first, second);

    counter.initialize().await.unwrap();
    let first = counter.sync().await.unwrap();
    let second = counter.sync().await.unwrap();
    assert_eq!(first, CounterState::Present(0));
    assert_eq!(first, second);
}

#[tokio::test]
async fn initialize_then_update_scenario() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    assert_eq!(counter.sync().await.unwrap(), CounterState::Absent);

    counter.initialize().await.unwrap();
    assert_eq!(counter.state(), CounterState::Present(0));

    counter.update(1).await.unwrap();
    assert_eq!(counter.state(), CounterState::Present(1));

    let mirror = counter.mirror();
    assert_eq!(mirror.value, 1);
    assert!(mirror.initialized);
    assert!(!mirror.loading);
}

#[tokio::test]
async fn double_initialize_is_rejected_locally() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    counter.sync().await.unwrap();
    counter.initialize().await.unwrap();
    let submissions_before = ledger.applied_units().len();

    let err = counter.initialize().await.unwrap_err();
    assert!(matches!(err, CounterError::AlreadyInitialized));

    // Rejected before any network call, state untouched.
    assert_eq!(ledger.applied_units().len(), submissions_before);
    assert_eq!(counter.state(), CounterState::Present(0));
}

#[tokio::test]
async fn update_before_initialize_is_rejected_locally() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    counter.sync().await.unwrap();
    let err = counter.update(1).await.unwrap_err();
    assert!(matches!(err, CounterError::NotInitialized));
    assert!(ledger.applied_units().is_empty());
    assert_eq!(counter.state(), CounterState::Absent);
}

#[tokio::test]
async fn update_unit_orders_update_before_memo() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    counter.sync().await.unwrap();
    counter.initialize().await.unwrap();
    counter.update(1).await.unwrap();

    let units = ledger.applied_units();
    let update_unit = units.last().unwrap();
    assert_eq!(update_unit.len(), 2);
    assert_eq!(update_unit[0].program_id, program::ID);
    assert_eq!(update_unit[1].program_id, memo_program::ID);

    assert_eq!(
        ledger.memos(),
        vec![format!("{MEMO_PREFIX}{}", program::ID)]
    );
}

#[tokio::test]
async fn transport_failure_is_unknown_not_absent() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    ledger.fail_fetches(true);
    let err = counter.sync().await.unwrap_err();
    assert!(matches!(err, CounterError::Transport(_)));
    assert_eq!(counter.state(), CounterState::Unknown);

    // Once the transport recovers, the same address is simply absent.
    ledger.fail_fetches(false);
    assert_eq!(counter.sync().await.unwrap(), CounterState::Absent);
}

#[tokio::test]
async fn malformed_account_data_is_unknown() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    ledger.set_account(counter.counter_address(), vec![1, 2, 3]);
    let err = counter.sync().await.unwrap_err();
    assert!(matches!(err, CounterError::Interface(_)));
    assert_eq!(counter.state(), CounterState::Unknown);
}

#[tokio::test]
async fn failed_submission_leaves_state_unchanged() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    counter.sync().await.unwrap();
    assert_eq!(counter.state(), CounterState::Absent);

    ledger.fail_submissions(true);
    let err = counter.initialize().await.unwrap_err();
    assert!(matches!(err, CounterError::Transport(_)));
    assert_eq!(counter.state(), CounterState::Absent);
    assert!(!counter.mirror().loading);
}

#[tokio::test]
async fn remote_double_initialize_rejection_surfaces() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    counter.sync().await.unwrap();

    // Someone else created the account between our sync and our submit.
    ledger.set_account(
        counter.counter_address(),
        Counter::default().to_account_bytes(),
    );

    let err = counter.initialize().await.unwrap_err();
    assert!(matches!(err, CounterError::Rejected(_)));
}

#[tokio::test]
async fn update_value_is_not_clamped() {
    let ledger = MockLedger::new();
    let mut counter = new_counter(&ledger);

    counter.sync().await.unwrap();
    counter.initialize().await.unwrap();

    counter.update(200).await.unwrap();
    assert_eq!(counter.state(), CounterState::Present(200));
}
