//! End-to-end scenarios on small literal rasters.

use morpho_algorithms::morphology::erode;
use morpho_algorithms::point::{add, compute_volume, convert_by_mask, threshold};
use morpho_algorithms::reconstruction::build;
use morpho_algorithms::segmentation::{valued_watershed, watershed_segment, WATERSHED_LINE};
use morpho_core::prelude::*;

fn square_at(image: &mut Image, x0: usize, y0: usize, side: usize) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            image.set_pixel(x, y, 1).unwrap();
        }
    }
}

#[test]
fn binary_erosion_by_square() {
    let mut a = Image::new(16, 16, Depth::Binary).unwrap();
    square_at(&mut a, 5, 5, 5);
    assert_eq!(compute_volume(&a).unwrap(), 25);

    let mut b = a.clone();
    erode(&a, &mut b, 1, &StructuringElement::square3x3(), Edge::Filled).unwrap();
    let mut expected = Image::new(16, 16, Depth::Binary).unwrap();
    square_at(&mut expected, 6, 6, 3);
    assert_eq!(b, expected);
    assert_eq!(compute_volume(&b).unwrap(), 9);
}

#[test]
fn threshold_and_mask_round_trip() {
    let mut input = Image::new(16, 16, Depth::Grey).unwrap();
    for y in 0..16 {
        for x in 0..16 {
            input.set_pixel(x, y, y as u32 * 16).unwrap();
        }
    }
    let mut bin = Image::new(16, 16, Depth::Binary).unwrap();
    threshold(&input, 64, 191, &mut bin).unwrap();
    for y in 0..16 {
        assert_eq!(bin.get_pixel(7, y).unwrap(), (4..=11).contains(&y) as u32);
    }

    let mut out = Image::new(16, 16, Depth::Grey).unwrap();
    convert_by_mask(&bin, &mut out, 10, 200).unwrap();
    assert_eq!(out.get_pixel(0, 4).unwrap(), 200);
    assert_eq!(out.get_pixel(0, 12).unwrap(), 10);
    assert_eq!(compute_volume(&out).unwrap(), 26_880);
}

#[test]
fn reconstruction_keeps_the_marked_square() {
    let mut mask = Image::new(16, 16, Depth::Binary).unwrap();
    square_at(&mut mask, 0, 0, 4);
    square_at(&mut mask, 10, 0, 4);
    let mut marker = Image::new(16, 16, Depth::Binary).unwrap();
    marker.set_pixel(1, 1, 1).unwrap();

    build(&mask, &mut marker, Grid::Square).unwrap();
    let mut expected = Image::new(16, 16, Depth::Binary).unwrap();
    square_at(&mut expected, 0, 0, 4);
    assert_eq!(marker, expected);
    assert_eq!(compute_volume(&marker).unwrap(), 16);
}

#[test]
fn watershed_of_a_valley() {
    let mut relief = Image::new(5, 5, Depth::Grey).unwrap();
    for y in 0..5 {
        for x in 0..5 {
            relief.set_pixel(x, y, 10 * (y as u32).abs_diff(2)).unwrap();
        }
    }
    let mut markers = Image::new(5, 5, Depth::Long).unwrap();
    markers.set_pixel(0, 2, 1).unwrap();
    markers.set_pixel(4, 2, 2).unwrap();

    watershed_segment(&relief, &mut markers, Grid::Square, None).unwrap();
    for y in 0..5 {
        let row: Vec<u32> = (0..5).map(|x| markers.get_pixel(x, y).unwrap()).collect();
        assert_eq!(row, vec![1, 1, WATERSHED_LINE, 2, 2], "row {}", y);
    }
}

#[test]
fn saturating_and_wide_addition() {
    let mut a = Image::new(16, 16, Depth::Grey).unwrap();
    let mut b = a.clone();
    a.fill(200);
    b.fill(100);

    let mut c = a.clone();
    add(&a, &b, &mut c).unwrap();
    assert!(c.to_values().unwrap().iter().all(|&v| v == 255));

    let mut d = Image::new(16, 16, Depth::Long).unwrap();
    add(&a, &b, &mut d).unwrap();
    assert!(d.to_values().unwrap().iter().all(|&v| v == 300));
}

#[test]
fn valued_watershed_of_a_ramp() {
    let mut relief = Image::new(11, 4, Depth::Grey).unwrap();
    for y in 0..4 {
        for x in 0..11 {
            relief.set_pixel(x, y, x as u32).unwrap();
        }
    }
    let mut out = Image::new(11, 4, Depth::Long).unwrap();
    let basins = valued_watershed(&relief, &mut out, Grid::Square).unwrap();
    assert_eq!(basins, 1);
    for y in 0..4 {
        let row: Vec<u32> = (0..11).map(|x| out.get_pixel(x, y).unwrap()).collect();
        assert_eq!(row, (0..11).collect::<Vec<u32>>());
    }
}
