//! Time and randomness used when stamping offers.

use alloy::primitives::B256;
use parking_lot::Mutex;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Source of the current unix time in seconds.
pub trait Clock: Send + Sync {
    fn now_unix(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: u64,
}

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now_unix(&self) -> u64 {
        self.now
    }
}

/// Source of 256-bit offer salts.
pub trait SaltSource: Send + Sync {
    fn next_salt(&self) -> B256;
}

/// Salts from the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn next_salt(&self) -> B256 {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        B256::from(bytes)
    }
}

/// Deterministic salts for reproducible tests.
#[derive(Debug)]
pub struct SeededSaltSource {
    rng: Mutex<StdRng>,
}

impl SeededSaltSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SaltSource for SeededSaltSource {
    fn next_salt(&self) -> B256 {
        let mut bytes = [0u8; 32];
        self.rng.lock().fill_bytes(&mut bytes);
        B256::from(bytes)
    }
}
