//! Sample input generation.
//!
//! When no input file is given, we generate data whose statistics make the
//! Huffman behavior visible:
//! - Runs of a single byte (one dominant symbol)
//! - English-like text with a skewed letter distribution
//! - Short repeating patterns (small alphabet, flat weights)
//! - Uniformly random bytes (full alphabet, ~8 bits per symbol)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Letters roughly ordered by English frequency, with relative weights.
const TEXT_WEIGHTS: &[(u8, u32)] = &[
    (b' ', 18),
    (b'e', 12),
    (b't', 9),
    (b'a', 8),
    (b'o', 7),
    (b'i', 7),
    (b'n', 7),
    (b's', 6),
    (b'h', 6),
    (b'r', 6),
    (b'd', 4),
    (b'l', 4),
    (b'u', 3),
    (b'c', 3),
    (b'm', 2),
    (b'.', 1),
    (b'\n', 1),
];

/// Size of one generated section.
const SECTION_BYTES: usize = 4096;

/// Generate `size_bytes` of mixed sample data, reproducible from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(SECTION_BYTES);

        match rng.gen_range(0..10) {
            // 20% single-byte runs
            0..=1 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }

            // 50% skewed text
            2..=6 => {
                let total: u32 = TEXT_WEIGHTS.iter().map(|&(_, w)| w).sum();
                for _ in 0..section {
                    data.push(pick_weighted(&mut rng, total));
                }
            }

            // 20% repeating patterns
            7..=8 => {
                let pattern_len = rng.gen_range(3..=16);
                let pattern: Vec<u8> = (0..pattern_len).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }

            // 10% random bytes
            _ => {
                data.extend((0..section).map(|_| rng.gen::<u8>()));
            }
        }
    }

    data
}

fn pick_weighted(rng: &mut ChaCha8Rng, total: u32) -> u8 {
    let mut roll = rng.gen_range(0..total);
    for &(byte, weight) in TEXT_WEIGHTS {
        if roll < weight {
            return byte;
        }
        roll -= weight;
    }
    b' '
}
