//! Rendering of ranked lists

use serde::Serialize;
use spear_common::config::{OutputFormat, OutputSettings};
use spear_common::errors::Result;
use spear_ranking::{RankingOutcome, Ranked};
use std::fmt::Display;
use std::fmt::Write as _;

/// Render an outcome in the configured format
pub fn render<U, R>(outcome: &RankingOutcome<U, R>, settings: &OutputSettings) -> Result<String>
where
    U: Serialize + Display,
    R: Serialize + Display,
{
    match settings.format {
        OutputFormat::Json if settings.pretty => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Json => Ok(serde_json::to_string(outcome)?),
        OutputFormat::Text => Ok(render_text(outcome)),
    }
}

fn render_text<U: Display, R: Display>(outcome: &RankingOutcome<U, R>) -> String {
    let mut out = String::new();
    write_section(&mut out, "Expertise", &outcome.expertise);
    out.push('\n');
    write_section(&mut out, "Quality", &outcome.quality);

    let stats = &outcome.stats;
    let _ = writeln!(
        out,
        "\n{} activities, {} users, {} resources, {} edges, {} iterations (residual {:.3e})",
        stats.activities,
        stats.users,
        stats.resources,
        stats.edges,
        stats.iterations,
        stats.residual
    );
    out
}

fn write_section<I: Display>(out: &mut String, title: &str, ranked: &[Ranked<I>]) {
    let _ = writeln!(out, "{}", title);
    for (position, entry) in ranked.iter().enumerate() {
        let _ = writeln!(out, "{:>4}  {:.8}  {}", position + 1, entry.score, entry.identity);
    }
}
