//! Delta-E command - perceptual difference between two colours
//!
//! Each argument may be a hex colour (`#13ecb6`) or a board cell (`K12`).

use anyhow::{bail, Result};
use clap::Args;

use huecue_core::{
    accuracy_percent, color_at, color_difference, interpret_delta_e, parse_hex_color, Color,
};

#[derive(Args)]
pub struct DeltaEArgs {
    /// First colour: hex or board cell
    pub first: String,

    /// Second colour: hex or board cell
    pub second: String,
}

pub fn run(args: DeltaEArgs) -> Result<()> {
    let a = resolve_color(&args.first)?;
    let b = resolve_color(&args.second)?;
    let delta_e = color_difference(a, b);

    println!("{a} vs {b}");
    println!("  Delta E 2000: {delta_e:.2}");
    println!("  {}", interpret_delta_e(delta_e));
    println!("  Accuracy: {:.1}%", accuracy_percent(delta_e));

    Ok(())
}

/// Board cell first, then hex
fn resolve_color(text: &str) -> Result<Color> {
    if let Some(color) = color_at(text) {
        return Ok(color);
    }
    match parse_hex_color(text) {
        Ok(color) => Ok(color),
        Err(_) => bail!("Not a board cell or hex colour: {text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_cell_and_hex() {
        assert_eq!(resolve_color("k12").unwrap().to_string(), "#13ecb6");
        assert_eq!(resolve_color("#13ECB6").unwrap().to_string(), "#13ecb6");
        assert_eq!(resolve_color("13ecb6").unwrap().to_string(), "#13ecb6");
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        assert!(resolve_color("purple").is_err());
        assert!(resolve_color("Z1").is_err());
    }
}
