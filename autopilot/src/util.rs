use anyhow::{anyhow, Context, Result};

pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let mut seeds = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        seeds.push(parse_seed(token)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

/// Derive `count` seeds from a starting value with an LCG step, so a whole
/// benchmark is reproducible from one number.
pub fn seed_sequence(start: u32, count: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(count as usize);
    let mut cur = start;
    for _ in 0..count {
        out.push(cur);
        cur = cur.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }
    out
}
