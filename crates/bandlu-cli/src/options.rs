//! Command-line option types.

use std::str::FromStr;

use clap::ValueEnum;

/// One matrix shape from `-N`: `N`, `M,N` or `MxN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub m: usize,
    pub n: usize,
}

impl FromStr for SizeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid size '{}': {}", part.trim(), e))
        };

        match s.split_once([',', 'x', 'X']) {
            Some((m, n)) => Ok(Self {
                m: parse(m)?,
                n: parse(n)?,
            }),
            None => {
                let n = parse(s)?;
                Ok(Self { m: n, n })
            }
        }
    }
}

/// Square sizes `start, start+step, ..` up to and including `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl RangeSpec {
    pub fn sizes(&self) -> impl Iterator<Item = SizeSpec> {
        (self.start..=self.stop)
            .step_by(self.step)
            .map(|n| SizeSpec { m: n, n })
    }
}

impl FromStr for RangeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [start, stop, step] = parts.as_slice() else {
            return Err(format!("range '{}' is not start:stop:step", s));
        };
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid range bound '{}': {}", part.trim(), e))
        };

        let range = Self {
            start: parse(*start)?,
            stop: parse(*stop)?,
            step: parse(*step)?,
        };
        if range.step == 0 {
            return Err("range step must be positive".to_string());
        }
        if range.start > range.stop {
            return Err(format!(
                "range start {} is past stop {}",
                range.start, range.stop
            ));
        }
        Ok(range)
    }
}

/// Scalar type the trials run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Precision {
    /// Double-precision complex
    Z,
    /// Double-precision real
    D,
}

/// Default sizes when neither `-N` nor `--range` is given.
pub const DEFAULT_RANGE: RangeSpec = RangeSpec {
    start: 128,
    stop: 1024,
    step: 128,
};

/// Expand `-N` sizes followed by `--range` sizes, or the default range.
pub fn collect_sizes(sizes: &[SizeSpec], ranges: &[RangeSpec]) -> Vec<SizeSpec> {
    let mut out: Vec<SizeSpec> = sizes.to_vec();
    out.extend(ranges.iter().flat_map(|r| r.sizes()));
    if out.is_empty() {
        out.extend(DEFAULT_RANGE.sizes());
    }
    out
}
