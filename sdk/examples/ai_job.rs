//! AI job walkthrough: submit a compute job, wait for completion, then
//! fetch and verify its compute receipt.
//!
//! Run against a local node with:
//!   cargo run --example ai_job -- http://localhost:8545

use anyhow::{bail, Result};

use aether_sdk::ai::AiJobs;
use aether_sdk::crypto::keys::Keypair;
use aether_sdk::rpc::AetherClient;
use aether_sdk::types::TxHash;

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
    let keypair = Keypair::from_seed("aether-demo-account-1");
    let jobs = AiJobs::new(&client);

    // Any model registered on the devnet works here.
    let model_hash: TxHash = match client.ai_list_models().await?.first() {
        Some(hash) => *hash,
        None => bail!("no models registered on {endpoint}"),
    };
    println!("model:   {model_hash}");

    let tx = jobs
        .submit_job(
            &keypair,
            model_hash,
            b"translate to french: the ledger never sleeps".to_vec(),
            5_000,
        )
        .await?;
    let job_id = client.submit(&tx).await?;
    println!("job id:  {job_id}");

    let job = jobs.wait_for_completion(job_id).await?;
    println!("status:  {}", job.status);
    if let Some(result) = &job.result {
        println!("result:  {}", String::from_utf8_lossy(result));
    }

    match client.ai_get_vcr(job_id).await? {
        None => println!("no receipt recorded yet"),
        Some(vcr) => {
            let verdict = jobs.verify_receipt(&job, &vcr).await?;
            println!(
                "receipt: valid={} kzg={} tee={}",
                verdict.valid, verdict.kzg_valid, verdict.tee_valid
            );
            if let Some(provider) = job.provider {
                let rep = jobs.provider_reputation(provider).await?;
                println!(
                    "provider {provider}: score {:.2}, {} jobs completed",
                    rep.score, rep.completed_jobs
                );
            }
        }
    }

    Ok(())
}
