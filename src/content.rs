use std::{path::Path, rc::Rc};

use image::RgbaImage;

use crate::platform::load_as_binary;

/// Loads a sprite image from the content directory and converts it to RGBA8.
#[tracing::instrument(level = "info")]
pub async fn load_sprite_image<P>(file_path: P) -> anyhow::Result<Rc<RgbaImage>>
where
    P: AsRef<Path> + std::fmt::Debug,
{
    let file_bytes = load_as_binary(file_path.as_ref()).await?;
    let image = image::load_from_memory(&file_bytes)?;

    Ok(Rc::new(image.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_bundled_sprites() {
        let badge = pollster::block_on(load_sprite_image("badge.png")).unwrap();
        assert_eq!((60, 60), badge.dimensions());

        let portrait = pollster::block_on(load_sprite_image("portrait.png")).unwrap();
        assert_eq!((80, 60), portrait.dimensions());
    }

    #[test]
    fn missing_sprite_is_an_error() {
        assert!(pollster::block_on(load_sprite_image("no_such_sprite.png")).is_err());
    }
}
