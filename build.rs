use std::env;

use anyhow::*;
use fs_extra::{copy_items, dir::CopyOptions};

fn main() -> Result<()> {
    // Re-run when any sprite art in `content/` changes.
    println!("cargo:rerun-if-changed=content/*");

    // Sprites are loaded at runtime from `$OUT_DIR/content`.
    let out_dir = env::var("OUT_DIR")?;

    let copy_options = CopyOptions::new().overwrite(true);
    copy_items(&["content/"], out_dir, &copy_options)?;

    Ok(())
}
