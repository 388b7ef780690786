use console::style;
use miette::Result;

use konfig_engine::propagator::Propagator;

pub fn exec(verbose: bool) -> Result<()> {
    let (project_root, settings) = super::load_project()?;

    let propagator = Propagator::from_settings(&project_root, &settings)?;
    let sealed = propagator.seal()?;
    let snapshot_path = sealed.materialize()?;

    let report = sealed.report();
    println!(
        "Configured {} module(s) under {}",
        report.evaluated.len(),
        style(sealed.output_root().display()).cyan()
    );
    if !report.overrides.is_empty() {
        print!("{}", report.overrides);
    }
    if verbose {
        for dep in &report.resolved {
            println!(
                "  {}: {}:{} -> {}",
                dep.module, dep.group, dep.artifact, dep.resolved
            );
        }
    }
    for skip in &report.skipped {
        println!(
            "{} {}/{}: {}",
            style("warning:").yellow().bold(),
            skip.module,
            skip.skip.task,
            skip.skip.reason
        );
    }
    println!("Snapshot written to {}", snapshot_path.display());

    Ok(())
}
