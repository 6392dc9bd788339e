use std::sync::Arc;

use log::debug;
use rand::Rng;

use crate::domain::errors::DomainError;
use crate::domain::ports::NumberRepository;

/// Numbers are drawn from `0..RANDOM_UPPER_BOUND`.
pub const RANDOM_UPPER_BOUND: i32 = 100;

/// Hands out random numbers, each at most once.
pub struct RandomService {
    numbers: Arc<dyn NumberRepository>,
}

impl RandomService {
    pub fn new(numbers: Arc<dyn NumberRepository>) -> Self {
        Self { numbers }
    }

    pub fn next_unique(&self) -> Result<i32, DomainError> {
        if self.numbers.count()? >= i64::from(RANDOM_UPPER_BOUND) {
            return Err(DomainError::NumbersExhausted);
        }

        let mut rng = rand::thread_rng();
        let number = loop {
            let candidate = rng.gen_range(0..RANDOM_UPPER_BOUND);
            if !self.numbers.exists(candidate)? {
                break candidate;
            }
            debug!("Random number {} already issued, drawing again", candidate);
        };

        self.numbers.insert(number)?;
        Ok(number)
    }
}
