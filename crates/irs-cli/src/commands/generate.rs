use super::screen::seeded_rng;
use crate::cli::GenerateArgs;
use crate::config::builder::build_design_config;
use crate::error::Result;
use crate::report;
use irsscreen::engine::generator;
use std::io::Write;
use tracing::info;

pub async fn run(args: GenerateArgs) -> Result<()> {
    let design = build_design_config(&args.design)?;
    let template = &design.core_config.template;
    let mut rng = seeded_rng(design.seed);

    let candidates = generator::generate_candidates(template, &mut rng);
    info!(
        "Generated {} candidate(s) for a {}-nt strand template.",
        candidates.len(),
        template.strand_length()
    );

    let mut out = std::io::stdout().lock();
    writeln!(
        out,
        "Template: {} + [{} nt middle from {}] + {}",
        template.prefix, template.middle_length, template.reference, template.suffix
    )?;
    report::write_candidate_table(&mut out, &candidates)?;
    Ok(())
}
