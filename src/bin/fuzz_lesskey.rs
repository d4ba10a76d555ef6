// src/bin/fuzz_lesskey.rs
// Generate random-but-valid lesskey sources and check the translator on them:
//   - zero errors
//   - two fresh sessions give identical bytes
//   - every table reads back, and its listing recompiles to the same bytes
//
//   FUZZ_ITERS=<n>     number of cases (default 200)
//   FUZZ_LEN=<bytes>   target source size (default 4096)
//   FUZZ_SEED=<u64>    first seed (default: time based)
//   FUZZ_SAVE=1        keep failing sources under FUZZ_DIR (default "fuzz-cases")

use std::{
    env, fs,
    path::PathBuf,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::{Result, bail};
use lesskeyc::{
    dev::generator::gen_valid_source,
    lesskey::{ParseOptions, parse_lesskey_str, tables::disasm::listing},
};
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn check_case(src: &str, options: &ParseOptions) -> Result<()> {
    let (a, sink) = parse_lesskey_str("fuzz", src, options);
    if !a.is_clean() {
        bail!("{} errors: {:?}", a.errors, sink.messages());
    }
    let (b, _) = parse_lesskey_str("fuzz", src, options);
    if a != b {
        bail!("non-deterministic output");
    }
    let text = listing(&a).map_err(anyhow::Error::msg)?;
    let (c, _) = parse_lesskey_str("listing", &text, options);
    if c != a {
        bail!("listing does not recompile to the same tables:\n{text}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let iters = env_u64("FUZZ_ITERS", 200);
    let len = env_u64("FUZZ_LEN", 4096) as usize;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let seed0 = env_u64("FUZZ_SEED", now);
    let save = env::var("FUZZ_SAVE").is_ok_and(|v| v == "1");
    let dir = PathBuf::from(env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".into()));
    let options = ParseOptions::default();

    println!("[fuzz_lesskey] iters={iters} len={len} seed0={seed0}");
    let t0 = Instant::now();
    let mut failures = 0usize;
    for i in 0..iters {
        let seed = seed0.wrapping_add(i);
        let src = gen_valid_source(&mut StdRng::seed_from_u64(seed), len);
        if let Err(e) = check_case(&src, &options) {
            failures += 1;
            eprintln!("[fuzz_lesskey] seed {seed}: {e:#}");
            if save {
                fs::create_dir_all(&dir)?;
                let p = dir.join(format!("seed{seed}.lesskey"));
                fs::write(&p, &src)?;
                eprintln!("[fuzz_lesskey] saved {}", p.display());
            }
        }
    }
    println!(
        "[fuzz_lesskey] {} cases, {} failures, {:.1} ms",
        iters,
        failures,
        t0.elapsed().as_secs_f64() * 1e3
    );
    if failures > 0 {
        bail!("{failures} failing cases");
    }
    Ok(())
}
