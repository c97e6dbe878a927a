//! Basic transfer walkthrough: derive an account, build and sign a
//! transfer, submit it, and wait for the receipt.
//!
//! Run against a local node with:
//!   cargo run --example transfer -- http://localhost:8545

use anyhow::Result;

use aether_sdk::config::DEFAULT_FEE;
use aether_sdk::crypto::keys::Keypair;
use aether_sdk::rpc::AetherClient;
use aether_sdk::transaction::TransactionBuilder;
use aether_sdk::types::Address;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8545".to_string());
    let client = AetherClient::new(&endpoint)?;

    // Deterministic devnet account. Seeded keys are for demos only.
    let keypair = Keypair::from_seed("aether-demo-account-1");
    println!("sender:    {}", keypair.address());

    let balance = client.get_balance(keypair.address()).await?;
    let nonce = client.get_nonce(keypair.address()).await?;
    println!("balance:   {balance}");
    println!("nonce:     {nonce}");

    let recipient: Address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse()?;
    let tx = TransactionBuilder::transfer(recipient, 1_000)
        .fee(DEFAULT_FEE)
        .gas_limit(21_000)
        .nonce(nonce)
        .memo("first transfer from the rust sdk")
        .build(&keypair)?;

    println!("recipient: {recipient}");
    println!("tx hash:   {}", tx.hash);

    let receipt = client.submit_and_wait(&tx).await?;
    println!(
        "included:  slot {} ({}), gas used {}",
        receipt.block_slot, receipt.status, receipt.gas_used
    );

    Ok(())
}
