//! `strm match` / `strm similarity`: standalone label matching.

use strmarket_match::{find_best_match, similarity};

use crate::CliError;

pub fn cmd_match(target: &str, candidates: &[String], threshold: f64, json: bool) -> Result<(), CliError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CliError::args(format!("--threshold must be between 0 and 1, got {threshold}")));
    }

    let best = find_best_match(target, candidates, threshold);

    if json {
        let out = serde_json::to_string(&best)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{out}");
    } else if let Some(ref m) = best {
        println!("{}\t{:.4}", m.matched, m.similarity);
    }

    match best {
        Some(_) => Ok(()),
        None if json => Err(CliError::empty("")),
        None => Err(CliError::empty(format!("no candidate reached {threshold} for '{target}'"))),
    }
}

pub fn cmd_similarity(a: &str, b: &str) -> Result<(), CliError> {
    println!("{:.4}", similarity(a, b));
    Ok(())
}
