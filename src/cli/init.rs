use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(input: Option<String>, target_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(path) = input {
        settings.input_file = shellexpand_path(&path);
    }
    if let Some(dir) = target_dir {
        settings.target_dir = shellexpand_path(&dir);
    }

    let path = save_settings(&settings)?;
    println!("Saved settings to {}", path.display());
    println!("Input:       {}", settings.input_file);
    println!("Target dir:  {}", settings.target_dir);
    Ok(())
}
