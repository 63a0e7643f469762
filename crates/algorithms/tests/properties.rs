//! Randomised invariants of the operator families.

use morpho_algorithms::distance::compute_distance;
use morpho_algorithms::labelling::label;
use morpho_algorithms::morphology::{dilate, erode};
use morpho_algorithms::point::{
    compare, compute_volume, copy_bit_plane, copy_byte_plane, logic, negate,
};
use morpho_algorithms::reconstruction::build;
use morpho_algorithms::segmentation::{watershed_segment, WATERSHED_LINE};
use morpho_core::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn image(width: usize, depth: Depth, values: &[u32]) -> Image {
    let mut im = Image::new(width, values.len() / width, depth).unwrap();
    im.load_values(values).unwrap();
    im
}

fn raster(depth: Depth) -> impl Strategy<Value = Image> {
    let top = depth.max_value();
    (1usize..12, 1usize..12).prop_flat_map(move |(w, h)| {
        prop::collection::vec(0..=top, w * h).prop_map(move |v| image(w, depth, &v))
    })
}

fn planar_grid() -> impl Strategy<Value = Grid> {
    prop_oneof![Just(Grid::Square), Just(Grid::Hexagonal)]
}

fn values(im: &Image) -> Vec<u32> {
    im.to_values().unwrap()
}

proptest! {
    #[test]
    fn negate_is_an_involution(a in raster(Depth::Grey)) {
        let mut once = a.clone();
        negate(&a, &mut once).unwrap();
        let mut twice = a.clone();
        negate(&once, &mut twice).unwrap();
        prop_assert_eq!(twice, a);
    }

    #[test]
    fn logic_is_commutative(
        (a, b) in (1usize..10, 1usize..10).prop_flat_map(|(w, h)| {
            let v = prop::collection::vec(0u32..=255, w * h);
            (v.clone(), v).prop_map(move |(x, y)| {
                (image(w, Depth::Grey, &x), image(w, Depth::Grey, &y))
            })
        })
    ) {
        for op in [LogicOp::And, LogicOp::Or, LogicOp::Xor, LogicOp::Inf, LogicOp::Sup] {
            let mut ab = a.clone();
            let mut ba = a.clone();
            logic(&a, &b, &mut ab, op).unwrap();
            logic(&b, &a, &mut ba, op).unwrap();
            prop_assert_eq!(ab, ba);
        }
    }

    #[test]
    fn inf_and_sup_are_idempotent(a in raster(Depth::Binary)) {
        let mut out = a.clone();
        logic(&a, &a, &mut out, LogicOp::Inf).unwrap();
        prop_assert_eq!(&out, &a);
        logic(&a, &a, &mut out, LogicOp::Sup).unwrap();
        prop_assert_eq!(&out, &a);
    }

    #[test]
    fn fill_sets_the_volume(w in 1usize..70, h in 1usize..8, v in 0u32..=255) {
        let mut a = Image::new(w, h, Depth::Grey).unwrap();
        a.fill(v);
        prop_assert_eq!(compute_volume(&a).unwrap(), (v as usize * w * h) as u128);
        let mut c = Image3D::new(w, h, 3, Depth::Long).unwrap();
        c.fill(v);
        prop_assert_eq!(compute_volume(&c).unwrap(), (v as usize * w * h * 3) as u128);
    }

    #[test]
    fn opening_and_closing_sandwich(a in raster(Depth::Grey), grid in planar_grid()) {
        let se = StructuringElement::full(grid);
        let mut eroded = a.clone();
        erode(&a, &mut eroded, 1, &se, Edge::Filled).unwrap();
        let mut opened = a.clone();
        dilate(&eroded, &mut opened, 1, &se.transpose(), Edge::Empty).unwrap();

        let mut dilated = a.clone();
        dilate(&a, &mut dilated, 1, &se, Edge::Empty).unwrap();
        let mut closed = a.clone();
        erode(&dilated, &mut closed, 1, &se.transpose(), Edge::Filled).unwrap();

        let (o, f, c) = (values(&opened), values(&a), values(&closed));
        for i in 0..f.len() {
            prop_assert!(o[i] <= f[i] && f[i] <= c[i]);
        }
    }

    #[test]
    fn build_from_one_pixel_gives_its_component(
        a in raster(Depth::Binary),
        grid in planar_grid(),
        pick in any::<prop::sample::Index>(),
    ) {
        let f = values(&a);
        let ones: Vec<usize> = (0..f.len()).filter(|&i| f[i] == 1).collect();
        prop_assume!(!ones.is_empty());
        let seed = ones[pick.index(ones.len())];

        let mut labels = a.blank_like(Depth::Long).unwrap();
        let count = label(&a, &mut labels, grid).unwrap();
        let l = values(&labels);
        let distinct: BTreeSet<u32> = l.iter().copied().filter(|&v| v != 0).collect();
        prop_assert_eq!(distinct.len() as u32, count);

        let mut marker = a.blank_like(Depth::Binary).unwrap();
        marker.set_pixel(seed % a.width(), seed / a.width(), 1).unwrap();
        build(&a, &mut marker, grid).unwrap();
        let component: Vec<u32> = l.iter().map(|&v| (v == l[seed]) as u32).collect();
        prop_assert_eq!(values(&marker), component);
    }

    #[test]
    fn build_identities(mask in raster(Depth::Grey), grid in planar_grid()) {
        let mut same = mask.clone();
        build(&mask, &mut same, grid).unwrap();
        prop_assert_eq!(&same, &mask);

        let mut zero = mask.blank_like(Depth::Grey).unwrap();
        build(&mask, &mut zero, grid).unwrap();
        prop_assert_eq!(compute_volume(&zero).unwrap(), 0);

        let mut marker = mask.clone();
        let thinned: Vec<u32> = values(&mask)
            .iter()
            .enumerate()
            .map(|(i, &v)| if i % 3 == 0 { v } else { v / 2 })
            .collect();
        marker.load_values(&thinned).unwrap();
        build(&mask, &mut marker, grid).unwrap();
        let mut again = marker.clone();
        build(&mask, &mut again, grid).unwrap();
        prop_assert_eq!(again, marker);
    }

    #[test]
    fn distance_is_zero_on_the_background(a in raster(Depth::Binary), grid in planar_grid()) {
        let f = values(&a);
        for edge in [Edge::Empty, Edge::Filled] {
            let mut dist = a.blank_like(Depth::Long).unwrap();
            compute_distance(&a, &mut dist, grid, edge).unwrap();
            let d = values(&dist);
            for i in 0..f.len() {
                prop_assert_eq!(d[i] == 0, f[i] == 0);
            }
        }
    }

    #[test]
    fn watershed_keeps_one_basin_per_marker(
        relief in raster(Depth::Grey),
        grid in planar_grid(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..5),
    ) {
        let n = relief.pixel_count();
        let seeds: BTreeSet<usize> = picks.iter().map(|p| p.index(n)).collect();
        let mut markers = relief.blank_like(Depth::Long).unwrap();
        for (k, &s) in seeds.iter().enumerate() {
            markers.set_pixel(s % relief.width(), s / relief.width(), k as u32 + 1).unwrap();
        }
        watershed_segment(&relief, &mut markers, grid, None).unwrap();
        let basins: BTreeSet<u32> = values(&markers)
            .into_iter()
            .filter(|&v| v != 0 && v != WATERSHED_LINE)
            .collect();
        prop_assert_eq!(basins.len(), seeds.len());
    }

    #[test]
    fn bit_plane_round_trip(a in raster(Depth::Binary), k in 0usize..8) {
        let mut z = a.blank_like(Depth::Grey).unwrap();
        copy_bit_plane(&a, k, &mut z).unwrap();
        let mut b = a.blank_like(Depth::Binary).unwrap();
        copy_bit_plane(&z, k, &mut b).unwrap();
        prop_assert_eq!(b, a);
    }

    #[test]
    fn byte_plane_round_trip(a in raster(Depth::Grey), k in 0usize..4) {
        let mut z = a.blank_like(Depth::Long).unwrap();
        copy_byte_plane(&a, k, &mut z).unwrap();
        let mut b = a.blank_like(Depth::Grey).unwrap();
        copy_byte_plane(&z, k, &mut b).unwrap();
        prop_assert_eq!(b, a);
    }

    #[test]
    fn compare_with_itself_finds_nothing(a in raster(Depth::Grey)) {
        let mut out = a.clone();
        prop_assert_eq!(compare(&a, &a, &mut out).unwrap(), None);
    }
}
