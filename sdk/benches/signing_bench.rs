// Signing and canonical-encoding benchmarks for the Aether SDK.
//
// Covers Ed25519 keypair generation, digest signing and verification, full
// transaction construction (encode + digest + sign), and canonical encoding
// at various payload sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use aether_sdk::crypto::hash::digest;
use aether_sdk::crypto::keys::Keypair;
use aether_sdk::transaction::TransactionBuilder;
use aether_sdk::types::Address;

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("ed25519/keypair_generate", |b| {
        b.iter(Keypair::generate);
    });
}

fn bench_sign_digest(c: &mut Criterion) {
    let keypair = Keypair::generate();
    let message = digest(b"transfer 500 AETH from alice to bob; nonce=42");

    c.bench_function("ed25519/sign_digest", |b| {
        b.iter(|| keypair.sign(message.as_bytes()));
    });
}

fn bench_verify_signature(c: &mut Criterion) {
    let keypair = Keypair::generate();
    let message = digest(b"transfer 500 AETH from alice to bob; nonce=42");
    let signature = keypair.sign(message.as_bytes());
    let public_key = keypair.public_key();

    c.bench_function("ed25519/verify_signature", |b| {
        b.iter(|| public_key.verify(message.as_bytes(), &signature));
    });
}

fn bench_build_signed_transaction(c: &mut Criterion) {
    let keypair = Keypair::generate();
    let recipient = Address::from_bytes([0xAA; 20]);

    c.bench_function("transaction/build_signed", |b| {
        b.iter(|| {
            TransactionBuilder::transfer(recipient, 1_000_000)
                .fee(2_000_000)
                .gas_limit(21_000)
                .nonce(42)
                .build(&keypair)
                .unwrap()
        });
    });
}

fn bench_canonical_encode(c: &mut Criterion) {
    let keypair = Keypair::generate();
    let recipient = Address::from_bytes([0xAA; 20]);
    let mut group = c.benchmark_group("transaction/canonical_encode");

    for payload_size in [0usize, 256, 4_096, 65_536] {
        let tx = TransactionBuilder::transfer(recipient, 1_000_000)
            .fee(2_000_000)
            .gas_limit(500_000)
            .nonce(42)
            .payload(vec![0xAB; payload_size])
            .build(&keypair)
            .unwrap();

        group.throughput(Throughput::Bytes(payload_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(payload_size),
            &tx,
            |b, tx| {
                b.iter(|| tx.canonical_bytes());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_digest,
    bench_verify_signature,
    bench_build_signed_transaction,
    bench_canonical_encode,
);
criterion_main!(benches);
