use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, BresenhamLineIter};
use crate::types::Contour;

/// Pure blue
pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const CONTOUR_THICKNESS: u32 = 3;

/// Draw each contour as a closed polyline on a copy of `image`
pub fn draw_contours(image: &RgbImage, contours: &[Contour], color: Rgb<u8>, thickness: u32) -> RgbImage {
    let mut canvas = image.clone();
    draw_contours_mut(&mut canvas, contours, color, thickness);
    canvas
}

pub fn draw_contours_mut(canvas: &mut RgbImage, contours: &[Contour], color: Rgb<u8>, thickness: u32) {
    let radius = (thickness / 2) as i32;

    for contour in contours {
        let n = contour.points.len();
        match n {
            0 => continue,
            1 => {
                let [x, y] = contour.points[0];
                stamp(canvas, (x, y), radius, color);
            }
            _ => {
                for i in 0..n {
                    let [x0, y0] = contour.points[i];
                    let [x1, y1] = contour.points[(i + 1) % n];
                    let line = BresenhamLineIter::new((x0 as f32, y0 as f32), (x1 as f32, y1 as f32));
                    for pixel in line {
                        stamp(canvas, pixel, radius, color);
                    }
                }
            }
        }
    }
}

fn stamp(canvas: &mut RgbImage, (x, y): (i32, i32), radius: i32, color: Rgb<u8>) {
    if radius > 0 {
        draw_filled_circle_mut(canvas, (x, y), radius, color);
    } else if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}
