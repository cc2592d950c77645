use std::path::Path;

use tracing::info;

/// Loads a file from the content directory and returns it as a vector of
/// bytes. `file_path` should be relative to the content\ directory.
pub async fn load_as_binary<P>(file_path: P) -> anyhow::Result<Vec<u8>>
where
    P: AsRef<Path> + std::fmt::Debug,
{
    info!("load file as binary: {file_path:?}");

    // TODO: Look next to the executable as well so release builds can ship
    //       with a content directory instead of relying on OUT_DIR.
    let full_path = Path::new(env!("OUT_DIR")).join("content").join(file_path);
    Ok(std::fs::read(full_path)?)
}
