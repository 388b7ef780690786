use console::style;
use miette::Result;

use konfig_engine::propagator::Propagator;

/// Dry-run: seal the configuration and print it without writing anything.
pub fn exec(verbose: bool) -> Result<()> {
    let (project_root, settings) = super::load_project()?;

    let sealed = Propagator::from_settings(&project_root, &settings)?.seal()?;
    let snapshot = sealed.snapshot();

    println!("Toolchain: {}", snapshot.toolchain_path.display());
    for plugin in &snapshot.plugins {
        println!("Plugin: {plugin}");
    }
    println!("Output root: {}", style(snapshot.output_root.display()).cyan());
    for module in &snapshot.modules {
        println!("  {} -> {}", module.name, module.output_dir.display());
    }
    for (group, version) in &snapshot.forced {
        println!("Force: {group} -> {version}");
    }
    if verbose {
        println!("{}", sealed.report());
    }
    println!("{}", style("Nothing written (plan only)").dim());

    Ok(())
}
