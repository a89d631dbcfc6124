use rebatch::{run_generated, sin_degrees, Result, RoundConfig};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    // Pool size and seed are overridable from the environment.
    let mut config = RoundConfig::default();
    if let Ok(pool) = env::var("REBATCH_POOL") {
        config.pool = pool.parse().unwrap_or(config.pool);
    }
    config.seed = env::var("REBATCH_SEED").ok().and_then(|s| s.parse().ok());

    println!("====================================================");
    println!("        REBATCH WORKLOAD REDISTRIBUTION DEMO        ");
    println!("====================================================");
    println!("Pool:       {} workers", config.pool);
    match config.seed {
        Some(seed) => println!("Seed:       {}", seed),
        None => println!("Seed:       (entropy)"),
    }

    let output = run_generated(&config, sin_degrees)?;

    println!("\nINITIALIZE: private batches");
    for report in &output.reports {
        println!(
            "  worker {} holds {} items: {:?}",
            report.rank,
            report.batch.len(),
            report.batch
        );
    }

    println!("\nPROGRESS: {} items consolidated", output.summary.total);
    println!("  original counts: {:?}", output.summary.counts);
    println!("  balanced shares: {:?}", output.summary.balanced);

    println!("\nTASK: balanced assignments");
    for (rank, share) in output.summary.balanced.iter().enumerate() {
        println!("  worker {} computes {} items", rank, share);
    }

    println!("\nRESULT: per-worker results, in contribution order");
    for report in &output.reports {
        for (item, value) in report.batch.iter().zip(&report.results) {
            println!("  worker {}: sin({:>3} deg) = {:+.6}", report.rank, item, value);
        }
    }

    Ok(())
}
