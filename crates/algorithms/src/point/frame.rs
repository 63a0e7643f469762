//! Frame drawing

use morpho_core::raster::Volume;
use morpho_core::{Error, Result};

/// Set every pixel within `thickness` of the image frame to `value`.
///
/// On 3D images the first and last `thickness` planes belong to the frame
/// as well.
pub fn draw_edge<V: Volume>(image: &mut V, thickness: usize, value: u32) -> Result<()> {
    if thickness == 0 {
        return Err(Error::InvalidParameter {
            name: "thickness",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }
    let (width, height, length) = image.size();
    let in_frame = |c: usize, n: usize| c < thickness || c + thickness >= n;
    for z in 0..length {
        let plane_in_frame = V::DIMS == 3 && in_frame(z, length);
        for y in 0..height {
            for x in 0..width {
                if plane_in_frame || in_frame(x, width) || in_frame(y, height) {
                    image.set_at(x, y, z, value)?;
                }
            }
        }
    }
    Ok(())
}
