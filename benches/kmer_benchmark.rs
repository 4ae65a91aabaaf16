use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmerring::kmer::{unpack_to_bytes, KmerLength};
use kmerring::{
    canonical, hash_kmer, pack, CanonicalTokenizer, MinimizerRing, MinimizerTokenizer, Tokenizer,
};

const KS: [usize; 4] = [5, 11, 21, 31];

fn kmer_bytes(k: usize) -> Vec<u8> {
    b"ACGT".repeat(k / 4 + 1)[..k].to_vec()
}

/// A deterministic pseudo-random sequence.
fn sequence(len: usize) -> Vec<u8> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            b"ACGT"[(state & 0b11) as usize]
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");

    for k in KS {
        let bytes = kmer_bytes(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &bytes, |b, bytes| {
            b.iter(|| pack(black_box(bytes)))
        });
    }

    group.finish();
}

fn bench_unpack(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpack_to_bytes");

    for k in KS {
        let kmer = pack(&kmer_bytes(k)).unwrap();
        let len = KmerLength::new(k).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(k), &kmer, |b, &kmer| {
            b.iter(|| unpack_to_bytes(black_box(kmer), len))
        });
    }

    group.finish();
}

fn bench_canonical(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical");

    for k in KS {
        let kmer = pack(&kmer_bytes(k)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(k), &kmer, |b, &kmer| {
            b.iter(|| canonical(black_box(kmer), k))
        });
    }

    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_kmer");

    for k in KS {
        let kmer = pack(&kmer_bytes(k)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(k), &kmer, |b, &kmer| {
            b.iter(|| hash_kmer(black_box(kmer), k))
        });
    }

    group.finish();
}

fn bench_ring_slide(c: &mut Criterion) {
    let mut group = c.benchmark_group("MinimizerRing::add_kmer");
    let seq = sequence(10_000);

    for (k, m) in [(11, 7), (21, 11), (31, 15), (31, 21)] {
        let kmers: Vec<u64> = Tokenizer::new(&seq, k).unwrap().collect();
        group.throughput(Throughput::Elements(kmers.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{k}/{m}")),
            &kmers,
            |b, kmers| {
                b.iter(|| {
                    let mut ring = MinimizerRing::create(k, m, kmers[0]).unwrap();
                    for &kmer in &kmers[1..] {
                        ring.add_kmer(kmer).unwrap();
                    }
                    black_box(ring.get_mini())
                })
            },
        );
    }

    group.finish();
}

fn bench_tokenizers(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizers");
    let seq = sequence(10_000);
    group.throughput(Throughput::Bytes(seq.len() as u64));

    group.bench_function("forward/21", |b| {
        b.iter(|| Tokenizer::new(black_box(&seq), 21).unwrap().sum::<u64>())
    });
    group.bench_function("canonical/21", |b| {
        b.iter(|| {
            CanonicalTokenizer::new(black_box(&seq), 21)
                .unwrap()
                .sum::<u64>()
        })
    });
    group.bench_function("minimizer/21/11", |b| {
        b.iter(|| {
            MinimizerTokenizer::new(black_box(&seq), 21, 11)
                .unwrap()
                .map(|(_, mini)| mini)
                .fold(0u64, u64::wrapping_add)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pack,
    bench_unpack,
    bench_canonical,
    bench_hash,
    bench_ring_slide,
    bench_tokenizers,
);

criterion_main!(benches);
