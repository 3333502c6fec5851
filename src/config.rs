// Command-line configuration

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "textbook-rsa")]
#[command(version, about = "Textbook RSA encryption, signing and sign-then-encrypt")]
pub struct Config {
    /// Overall key size in bits; prompted for when omitted
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Seed the random source for reproducible keys
    #[arg(long)]
    pub seed: Option<u64>,

    /// Refuse characters whose code point does not fit below the modulus
    #[arg(long)]
    pub strict: bool,

    /// Print private keys alongside public keys
    #[arg(long)]
    pub show_private: bool,
}

impl Config {
    /// Random source for key generation, seeded when requested
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
