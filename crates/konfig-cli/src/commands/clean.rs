use miette::Result;

use konfig_engine::clean::{clean, CleanResult};

pub fn exec() -> Result<()> {
    let (project_root, settings) = super::load_project()?;

    // The output root is derived the same way apply derives it, so clean
    // removes exactly the tree a previous apply created.
    let output_root = project_root.join(&settings.build.output_dir);
    match clean(&output_root)? {
        CleanResult::Cleaned => println!("Cleaned {}", output_root.display()),
        CleanResult::NothingToClean => println!("Nothing to clean"),
    }

    Ok(())
}
