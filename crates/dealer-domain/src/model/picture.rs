use image::{DynamicImage, Rgb, RgbImage};

const PLACEHOLDER_WIDTH: u32 = 160;
const PLACEHOLDER_HEIGHT: u32 = 120;

/// Built-in picture shown for cars without a usable stored image
pub fn placeholder_image() -> DynamicImage {
    let mut img = RgbImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, Rgb([224, 224, 224]));

    // Diagonal cross, the usual "no picture" mark
    for x in 0..PLACEHOLDER_WIDTH {
        let y = x * PLACEHOLDER_HEIGHT / PLACEHOLDER_WIDTH;
        img.put_pixel(x, y, Rgb([160, 160, 160]));
        img.put_pixel(x, PLACEHOLDER_HEIGHT - 1 - y, Rgb([160, 160, 160]));
    }

    DynamicImage::ImageRgb8(img)
}
