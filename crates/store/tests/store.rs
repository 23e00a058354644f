//! Integration tests for the store: bootstrap, event ordering, reduction and
//! failure handling against an in-memory ledger.


use alloy_primitives::{Address, U256};
use balance::{MetadataCache, TextField};
use config::NetworkType;
use setup::{redemption_log, vault_log, MockLedger, ACCOUNT, REDEEMABLE, T1, VAULT, WBTC};
use std::{
    sync::{atomic::Ordering, Arc, Mutex},
    time::Duration,
};
use store::{bootstrap, bootstrap_with_retry, BootstrapError, Settings, Store, StoreHandle};
use tokio::sync::{mpsc, watch};

struct Harness {
    ledger: Arc<MockLedger>,
    cache: Arc<MetadataCache>,
    logs: mpsc::UnboundedSender<store::LedgerLog>,
    accounts: watch::Sender<Option<Address>>,
    store: Store<MockLedger>,
    handle: StoreHandle,
}

/// Bootstrap and create a store. `configure` runs before bootstrap.
async fn harness(
    network: NetworkType,
    account: Option<Address>,
    configure: impl FnOnce(&MockLedger),
) -> Harness {
    let (ledger, logs) = MockLedger::new(network);
    configure(&ledger);
    let ledger = Arc::new(ledger);
    let cache = Arc::new(MetadataCache::new());

    let settings = bootstrap(ledger.as_ref(), &cache)
        .await
        .expect("bootstrap should succeed");

    let (accounts, account_rx) = watch::channel(account);
    let (store, handle) = Store::create(ledger.clone(), cache.clone(), settings, account_rx).await;

    Harness {
        ledger,
        cache,
        logs,
        accounts,
        store,
        handle,
    }
}

#[tokio::test]
async fn test_bootstrap_resolves_settings_and_native_placeholder() {
    let (ledger, _logs) = MockLedger::new(NetworkType::Rinkeby);
    let cache = MetadataCache::new();

    let settings = bootstrap(&ledger, &cache).await.unwrap();

    assert_eq!(
        settings,
        Settings {
            network: NetworkType::Rinkeby,
            vault: VAULT,
            redeemable_token: REDEEMABLE,
            native_token: Address::ZERO,
        }
    );
    assert_eq!(cache.decimals(&Address::ZERO), Some(18));
    assert_eq!(cache.text(&Address::ZERO, TextField::Name).as_deref(), Some("Ether"));
    assert_eq!(cache.text(&Address::ZERO, TextField::Symbol).as_deref(), Some("ETH"));
}

#[tokio::test]
async fn test_bootstrap_failure_is_typed() {
    let (ledger, _logs) = MockLedger::new(NetworkType::Private);
    ledger.vault_failures.store(1, Ordering::SeqCst);
    let cache = MetadataCache::new();

    let err = bootstrap(&ledger, &cache).await.unwrap_err();
    assert!(matches!(err, BootstrapError::Vault(_)));
    // Nothing registered on failure.
    assert!(cache.is_empty());

    ledger.fail_redeemable_token.store(true, Ordering::SeqCst);
    let err = bootstrap(&ledger, &cache).await.unwrap_err();
    assert!(matches!(err, BootstrapError::RedeemableToken(_)));
    assert!(err.to_string().contains("redeemable token"));
}

#[tokio::test]
async fn test_bootstrap_retry_recovers() {
    let (ledger, _logs) = MockLedger::new(NetworkType::Private);
    ledger.vault_failures.store(2, Ordering::SeqCst);
    let cache = MetadataCache::new();

    let settings = bootstrap_with_retry(&ledger, &cache, Duration::from_millis(1), Some(3))
        .await
        .unwrap();

    assert_eq!(settings.vault, VAULT);
}

#[tokio::test]
async fn test_bootstrap_retry_is_bounded() {
    let (ledger, _logs) = MockLedger::new(NetworkType::Private);
    ledger.vault_failures.store(5, Ordering::SeqCst);
    let cache = MetadataCache::new();

    let result = bootstrap_with_retry(&ledger, &cache, Duration::from_millis(1), Some(3)).await;

    assert!(matches!(result, Err(BootstrapError::Vault(_))));
    // Three attempts consumed three failures.
    assert_eq!(ledger.vault_failures.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_bootstrap_retries_until_success_without_cap() {
    let (ledger, _logs) = MockLedger::new(NetworkType::Private);
    ledger.vault_failures.store(10, Ordering::SeqCst);
    let cache = MetadataCache::new();

    let started = tokio::time::Instant::now();
    let settings = bootstrap_with_retry(&ledger, &cache, Duration::from_secs(1), None)
        .await
        .unwrap();

    assert_eq!(settings.vault, VAULT);
    assert_eq!(ledger.vault_failures.load(Ordering::SeqCst), 0);
    // One fixed delay after each of the ten failures.
    assert!(started.elapsed() >= Duration::from_secs(10));
}

#[tokio::test]
async fn test_initialization_is_reduced_first() {
    let mut h = harness(NetworkType::Private, Some(ACCOUNT), |ledger| {
        ledger.add_token(Address::ZERO, 7, 18, "", "");
        ledger.set_spendable(ACCOUNT, 20_000);
    })
    .await;
    // A log is already waiting before the store takes its first step.
    h.logs.send(redemption_log()).unwrap();

    assert_eq!(h.handle.revision(), 0);

    let step = h.store.step().await.unwrap();
    assert_eq!(step.event, "initialization");
    assert!(step.committed);

    let state = h.handle.state();
    assert_eq!(state.redeemable_token.symbol, "RDM");
    assert_eq!(state.redeemable_token.decimals, 18);
    assert_eq!(state.redeemable_token.total_supply, U256::from(100_000));
    assert_eq!(state.redeemable_token.account_balance, None);
    assert_eq!(state.tokens.len(), 1);
    assert_eq!(state.tokens[0].symbol, "ETH");
    assert!(state.tokens[0].verified);
}

#[tokio::test]
async fn test_account_change_only_touches_account_balance() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger.add_token(T1, 45_231, 6, "Token One", "ONE");
        ledger.set_spendable(ACCOUNT, 20_000);
    })
    .await;

    h.store.step().await.unwrap();
    let initialized = h.handle.state();

    h.accounts.send_replace(Some(ACCOUNT));
    let step = h.store.step().await.unwrap();
    assert_eq!(step.event, "account_changed");

    let state = h.handle.state();
    assert_eq!(
        state.redeemable_token.account_balance,
        Some(U256::from(20_000))
    );
    assert_eq!(state.tokens, initialized.tokens);
    assert_eq!(
        state.redeemable_token.total_supply,
        initialized.redeemable_token.total_supply
    );
    // The prior snapshot is untouched.
    assert_eq!(initialized.redeemable_token.account_balance, None);

    // Same account again: same balance.
    h.accounts.send_replace(Some(ACCOUNT));
    h.store.step().await.unwrap();
    assert_eq!(
        h.handle.state().redeemable_token.account_balance,
        Some(U256::from(20_000))
    );
    assert_eq!(h.ledger.calls.spendable.load(Ordering::SeqCst), 2);
    assert_eq!(h.handle.revision(), 3);
}

#[tokio::test]
async fn test_redemption_refreshes_supply_and_balances() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger.add_token(T1, 45_231, 18, "Token One", "ONE");
        ledger.add_token(Address::ZERO, 1_000, 18, "", "");
    })
    .await;

    h.store.step().await.unwrap();
    assert_eq!(h.handle.state().tokens[0].amount, U256::from(45_231));

    // 20000 of 100000 redeemed: the vault pays out its share.
    h.ledger.set_total_supply(80_000);
    h.ledger.set_vault_balance(T1, 45_231 - 9_046);
    h.ledger.set_vault_balance(Address::ZERO, 800);
    h.logs.send(redemption_log()).unwrap();

    let step = h.store.step().await.unwrap();
    assert_eq!(step.event, "ledger_log");
    assert!(step.committed);

    let state = h.handle.state();
    assert_eq!(state.redeemable_token.total_supply, U256::from(80_000));
    assert_eq!(state.redeemable_token.symbol, "RDM");
    assert_eq!(state.tokens[0].amount, U256::from(36_185));
    assert_eq!(state.tokens[1].amount, U256::from(800));
}

#[tokio::test]
async fn test_vault_log_keeps_state() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger.add_token(T1, 10, 18, "Token One", "ONE");
    })
    .await;

    h.store.step().await.unwrap();
    let before = h.handle.current();
    let balance_calls = h.ledger.calls.vault_balances.load(Ordering::SeqCst);

    h.ledger.set_vault_balance(T1, 99);
    h.logs.send(vault_log()).unwrap();
    let step = h.store.step().await.unwrap();

    assert!(step.committed);
    assert_eq!(step.revision, before.revision + 1);
    assert_eq!(*h.handle.state(), *before.state);
    assert_eq!(
        h.ledger.calls.vault_balances.load(Ordering::SeqCst),
        balance_calls
    );
}

#[tokio::test]
async fn test_failed_event_keeps_prior_state() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger.add_token(T1, 10, 18, "Token One", "ONE");
    })
    .await;

    h.store.step().await.unwrap();
    let before = h.handle.current();

    h.ledger.fail_tokens.store(true, Ordering::SeqCst);
    h.ledger.set_total_supply(1);
    h.logs.send(redemption_log()).unwrap();

    let step = h.store.step().await.unwrap();
    assert!(!step.committed);
    assert_eq!(step.revision, before.revision);
    assert_eq!(*h.handle.state(), *before.state);

    // The next event is processed normally.
    h.ledger.fail_tokens.store(false, Ordering::SeqCst);
    h.logs.send(redemption_log()).unwrap();
    let step = h.store.step().await.unwrap();
    assert!(step.committed);
    assert_eq!(
        h.handle.state().redeemable_token.total_supply,
        U256::from(1)
    );
}

#[tokio::test]
async fn test_metadata_fetched_once_across_refreshes() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger.add_token(T1, 10, 6, "Token One", "ONE");
    })
    .await;

    h.store.step().await.unwrap();
    // Redeemable token symbol + decimals, then T1 decimals + name + symbol.
    assert_eq!(h.ledger.calls.metadata(), 5);
    assert_eq!(h.cache.decimals(&T1), Some(6));

    for _ in 0..3 {
        h.logs.send(redemption_log()).unwrap();
        h.store.step().await.unwrap();
    }

    assert_eq!(h.ledger.calls.metadata(), 5);
    assert_eq!(h.handle.state().tokens[0].symbol, "ONE");
}

#[tokio::test]
async fn test_failed_decimals_use_network_fallback() {
    let mut h = harness(NetworkType::Mainnet, None, |ledger| {
        ledger.add_token(WBTC, 45_231, 8, "Wrapped BTC", "WBTC");
        ledger.remove_decimals(WBTC);
        ledger.add_token(T1, 5, 6, "Token One", "ONE");
    })
    .await;

    h.store.step().await.unwrap();

    let tokens = &h.handle.state().tokens;
    assert_eq!(tokens[0].address, WBTC);
    assert_eq!(tokens[0].decimals, 8);
    assert!(tokens[0].verified);
    assert_eq!(tokens[1].decimals, 6);
    assert!(!tokens[1].verified);
}

#[tokio::test]
async fn test_missing_metadata_defaults_to_empty() {
    let mut h = harness(NetworkType::Mainnet, None, |ledger| {
        ledger.add_bare_token(T1, 5);
    })
    .await;

    h.store.step().await.unwrap();

    let entry = &h.handle.state().tokens[0];
    assert_eq!(entry.decimals, 0);
    assert_eq!(entry.name, "");
    assert_eq!(entry.symbol, "");
    assert_eq!(entry.amount, U256::from(5));
}

#[tokio::test]
async fn test_token_order_follows_token_list() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger.add_token(T1, 1, 18, "Slow", "SLOW");
        ledger.add_token(Address::ZERO, 2, 18, "", "");
        ledger.set_delay(T1, 30);
    })
    .await;

    h.store.step().await.unwrap();

    let order: Vec<_> = h.handle.state().tokens.iter().map(|t| t.address).collect();
    assert_eq!(order, vec![T1, Address::ZERO]);
}

#[tokio::test]
async fn test_logs_start_at_initialization_block() {
    let h = harness(NetworkType::Private, None, |_| {}).await;

    assert_eq!(*h.ledger.logs_from.lock().unwrap(), Some(Some(1_000)));
}

#[tokio::test]
async fn test_missing_initialization_block_degrades() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger
            .fail_initialization_block
            .store(true, Ordering::SeqCst);
    })
    .await;

    assert_eq!(*h.ledger.logs_from.lock().unwrap(), Some(None));

    let step = h.store.step().await.unwrap();
    assert!(step.committed);
}

#[tokio::test]
async fn test_run_until_sources_close() {
    let h = harness(NetworkType::Private, Some(ACCOUNT), |ledger| {
        ledger.add_token(T1, 10, 18, "Token One", "ONE");
        ledger.set_spendable(ACCOUNT, 42);
    })
    .await;
    let Harness {
        store,
        mut handle,
        logs,
        accounts,
        ..
    } = h;

    logs.send(redemption_log()).unwrap();
    let steps = Arc::new(Mutex::new(Vec::new()));
    let recorded = steps.clone();
    let task = tokio::spawn(store.run(move |step, handle| {
        assert_eq!(step.revision, handle.revision());
        recorded.lock().unwrap().push(step.event);
    }));

    // initialization + account + redemption
    let snapshot = handle.wait_for_revision(3).await.unwrap();
    assert_eq!(
        snapshot.state.redeemable_token.account_balance,
        Some(U256::from(42))
    );

    drop(logs);
    drop(accounts);
    task.await.unwrap();

    assert_eq!(handle.revision(), 3);

    let mut steps = steps.lock().unwrap().clone();
    assert_eq!(steps.remove(0), "initialization");
    steps.sort_unstable();
    assert_eq!(steps, vec!["account_changed", "ledger_log"]);
}

#[tokio::test]
async fn test_snapshot_serializes_for_readers() {
    let mut h = harness(NetworkType::Private, None, |ledger| {
        ledger.add_token(T1, 10, 18, "Token One", "ONE");
    })
    .await;
    h.store.step().await.unwrap();

    let json = serde_json::to_value(h.handle.state().as_ref()).unwrap();

    assert_eq!(json["redeemableToken"]["symbol"], "RDM");
    assert!(json["redeemableToken"]["totalSupply"].is_string());
    assert_eq!(json["tokens"][0]["symbol"], "ONE");
    assert_eq!(json["tokens"][0]["verified"], false);
}
