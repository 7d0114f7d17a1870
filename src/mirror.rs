use crate::error::ResolverError;
use crate::result::Result;

use std::collections::VecDeque;

const UNAVAILABLE_MARKER: &str = "this video is not available";

#[derive(Debug, Clone, PartialEq)]
pub struct Mirror {
    pub uri: String,
    pub latency_ms: f64,
}

impl Mirror {
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.uri.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The video itself is gone; says nothing about the mirror's health.
    Benign,
    Real,
}

impl Failure {
    pub fn classify(body: &str) -> Failure {
        if body.to_lowercase().contains(UNAVAILABLE_MARKER) {
            Failure::Benign
        } else {
            Failure::Real
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Rotation {
    Stay,
    Rotated { from: Mirror },
    Exhausted,
}

/// Ranked mirrors with exactly one active at a time. Rotates to the next
/// mirror after `threshold` real failures against the active one.
#[derive(Debug)]
pub struct MirrorPool {
    current: Mirror,
    remaining: VecDeque<Mirror>,
    error_count: usize,
    threshold: usize,
}

impl MirrorPool {
    pub fn new(mirrors: Vec<Mirror>, threshold: usize) -> Result<MirrorPool> {
        let mut remaining = VecDeque::from(mirrors);
        let current = remaining.pop_front().ok_or(ResolverError::NoMirrors)?;

        Ok(MirrorPool {
            current,
            remaining,
            error_count: 0,
            threshold: threshold.max(1),
        })
    }

    pub fn current(&self) -> &Mirror {
        &self.current
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn record_failure(&mut self, failure: Failure) -> Rotation {
        if failure == Failure::Benign {
            return Rotation::Stay;
        }

        self.error_count += 1;
        if self.error_count < self.threshold {
            return Rotation::Stay;
        }

        match self.remaining.pop_front() {
            Some(next) => {
                self.error_count = 0;
                let from = std::mem::replace(&mut self.current, next);
                Rotation::Rotated { from }
            }
            None => Rotation::Exhausted,
        }
    }
}
