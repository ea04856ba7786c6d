use super::Buffer::{FIFO_ELEMSZ_DEFAULT, FIFO_SIZE_DEFAULT};
use super::Fifo;
use crate::error::FifoError;
use std::env;

/// Environment variable overriding the number of slots.
pub const ENV_FIFO_SIZE: &str = "SCULL_FIFO_SIZE";

/// Environment variable overriding the maximum record size.
pub const ENV_FIFO_ELEMSZ: &str = "SCULL_FIFO_ELEMSZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FifoBuilder {
    capacity: usize,
    elem_size: usize,
}

impl Default for FifoBuilder {
    fn default() -> Self {
        Self {
            capacity: FIFO_SIZE_DEFAULT,   // 10 slots
            elem_size: FIFO_ELEMSZ_DEFAULT, // 4000 bytes
        }
    }
}

impl FifoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `SCULL_FIFO_SIZE` and `SCULL_FIFO_ELEMSZ` when set.
    pub fn from_env() -> Result<Self, FifoError> {
        let mut builder = Self::default();
        if let Some(capacity) = read_env(ENV_FIFO_SIZE)? {
            builder.capacity = capacity;
        }
        if let Some(elem_size) = read_env(ENV_FIFO_ELEMSZ)? {
            builder.elem_size = elem_size;
        }
        Ok(builder)
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_elem_size(mut self, elem_size: usize) -> Self {
        self.elem_size = elem_size;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    pub fn build(self) -> Result<Fifo, FifoError> {
        if self.capacity == 0 {
            return Err(FifoError::InvalidRequest(
                "FIFO size must be greater than zero".into(),
            ));
        }
        Fifo::create(self.capacity, self.elem_size)
    }
}

fn read_env(key: &str) -> Result<Option<usize>, FifoError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<usize>().map(Some).map_err(|e| {
            FifoError::InvalidRequest(format!("{key}={raw:?} is not a valid size: {e}"))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(FifoError::InvalidRequest(format!(
            "{key} is not valid unicode"
        ))),
    }
}
