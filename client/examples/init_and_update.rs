//! End-to-end flow against a local validator: fund a wallet, initialize the
//! counter if needed, then bump it once.
//!
//! Run a `solana-test-validator` with the counter program deployed, then:
//! `cargo run --example init_and_update`

use std::sync::Arc;

use client::{
    channels::RpcChannel,
    context::Session,
    sync::{
        CounterState,
        CounterSync,
    },
};
use solana_sdk::{
    signature::Keypair,
    signer::Signer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let rpc = Arc::new(RpcChannel::new("http://127.0.0.1:8899"));

    let wallet = Keypair::new();
    rpc.fund_account(&wallet.pubkey()).await?;

    let session = Session::new(wallet, rpc.clone(), rpc);
    let mut counter = CounterSync::new(session)?;

    println!("counter address: {}", counter.counter_address());

    if counter.sync().await? == CounterState::Absent {
        counter.initialize().await?;
    }

    let next = counter.mirror().value.wrapping_add(1);
    counter.update(next).await?;

    println!("counter value: {}", counter.mirror().value);
    Ok(())
}
