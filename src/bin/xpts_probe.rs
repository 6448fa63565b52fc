use anyhow::{Context, Result, bail};

use xpts_radar::win_prob::{self, Venue};

fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.len() < 2 {
        bail!("usage: xpts_probe <xg_for> <xg_against> [home|away]");
    }

    let xg_for = parse_rate(&args[0], "xg_for")?;
    let xg_against = parse_rate(&args[1], "xg_against")?;
    let venue = match args.get(2).map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("home") | Some("h") => Venue::Home,
        Some("away") | Some("a") => Venue::Away,
        Some(other) => bail!("unknown venue `{other}`, expected home or away"),
    };

    // Probabilities are always reported from the home side's point of view.
    let probs = match venue {
        Venue::Home => win_prob::match_outcome_probs(xg_for, xg_against),
        Venue::Away => win_prob::match_outcome_probs(xg_against, xg_for),
    };
    let xpts = win_prob::calculate_xpts(xg_for, xg_against, venue);

    println!("Venue: {venue:?}");
    println!("Home win: {:.1}%", probs.home * 100.0);
    println!("Draw:     {:.1}%", probs.draw * 100.0);
    println!("Away win: {:.1}%", probs.away * 100.0);
    println!("xPTS:     {xpts:.2}");

    Ok(())
}

fn parse_rate(raw: &str, name: &str) -> Result<f64> {
    let v = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("{name} must be a number, got `{raw}`"))?;
    if !v.is_finite() || v < 0.0 {
        bail!("{name} must be finite and non-negative, got {v}");
    }
    Ok(v)
}
