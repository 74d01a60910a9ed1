use irsscreen::core::results::RankedResults;
use irsscreen::engine::generator::InhibitionCandidate;
use std::io::{self, Write};

const RULE_WIDTH: usize = 110;

/// Writes the ranking table, limited to the first `top_n` rows when given.
pub fn write_ranking_table<W: Write>(
    out: &mut W,
    results: &RankedResults,
    top_n: Option<usize>,
) -> io::Result<()> {
    let shown = results.top(top_n.unwrap_or(results.len()));

    writeln!(out)?;
    writeln!(out, "=== IRS Screening Results ===")?;
    writeln!(
        out,
        "{:<4} {:<60} {:<15} {:<15} {:<15}",
        "Rank", "IRS sequence", "ΔG(IRS-Target)", "ΔG(IRS-HiBiT)", "Displacement"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for (i, result) in shown.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<60} {:<15.2} {:<15.2} {:<15.2}",
            i + 1,
            result.irs_sequence,
            result.dg1,
            result.dg2,
            result.displacement_score
        )?;
    }
    if shown.len() < results.len() {
        writeln!(out, "... {} more not shown", results.len() - shown.len())?;
    }
    Ok(())
}

pub fn write_candidate_table<W: Write>(
    out: &mut W,
    candidates: &[InhibitionCandidate],
) -> io::Result<()> {
    writeln!(out, "{:<4} {:<7} {:<4} {:<4} {}", "#", "Anchor", "L", "Used", "Strand")?;
    for (i, c) in candidates.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<7} {:<4} {:<4} {}",
            i + 1,
            c.anchor.to_string(),
            c.requested_length,
            c.complementary_length,
            c.strand
        )?;
    }
    Ok(())
}
