use super::*;

fn sz(w: f64, h: f64) -> Size {
    Size::new(w, h)
}

#[test]
fn corner_table_with_room_to_spare() {
    let img = sz(800.0, 600.0);
    let text = sz(100.0, 32.0);
    assert_eq!(
        resolve_origin(img, text, 24.0, Anchor::TopLeft),
        Point::new(24.0, 24.0)
    );
    assert_eq!(
        resolve_origin(img, text, 24.0, Anchor::TopRight),
        Point::new(676.0, 24.0)
    );
    assert_eq!(
        resolve_origin(img, text, 24.0, Anchor::BottomLeft),
        Point::new(24.0, 544.0)
    );
    assert_eq!(
        resolve_origin(img, text, 24.0, Anchor::BottomRight),
        Point::new(676.0, 544.0)
    );
}

#[test]
fn center_ignores_padding() {
    let img = sz(200.0, 100.0);
    let text = sz(50.0, 20.0);
    for pad in [0.0, 24.0, 500.0] {
        assert_eq!(
            resolve_origin(img, text, pad, Anchor::Center),
            Point::new(75.0, 40.0)
        );
    }
}

#[test]
fn oversized_box_falls_back_to_zero() {
    let img = sz(100.0, 100.0);
    let text = sz(640.0, 96.0);
    let p = resolve_origin(img, text, 24.0, Anchor::TopLeft);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 4.0);

    let p = resolve_origin(img, sz(640.0, 300.0), 24.0, Anchor::BottomRight);
    assert_eq!(p, Point::new(0.0, 0.0));

    let p = resolve_origin(img, sz(640.0, 300.0), 0.0, Anchor::Center);
    assert_eq!(p, Point::new(0.0, 0.0));
}

#[test]
fn huge_padding_is_clamped_into_bounds() {
    let img = sz(120.0, 80.0);
    let text = sz(40.0, 10.0);
    for anchor in Anchor::ALL {
        let p = resolve_origin(img, text, 10_000.0, anchor);
        assert!((0.0..=80.0).contains(&p.x), "{anchor}: {p:?}");
        assert!((0.0..=70.0).contains(&p.y), "{anchor}: {p:?}");
    }
    assert_eq!(
        resolve_origin(img, text, 10_000.0, Anchor::TopLeft),
        Point::new(80.0, 70.0)
    );
    assert_eq!(
        resolve_origin(img, text, 10_000.0, Anchor::BottomRight),
        Point::new(0.0, 0.0)
    );
}

#[test]
fn extreme_inputs_still_produce_in_bounds_coordinates() {
    let img = sz(64.0, 48.0);
    let cases = [
        (sz(f64::NAN, 10.0), 5.0),
        (sz(10.0, f64::INFINITY), 5.0),
        (sz(10.0, 10.0), f64::NAN),
        (sz(10.0, 10.0), f64::INFINITY),
        (sz(10.0, 10.0), -50.0),
        (sz(0.0, 0.0), 0.0),
    ];
    for (text, pad) in cases {
        for anchor in Anchor::ALL {
            let p = resolve_origin(img, text, pad, anchor);
            assert!(p.x.is_finite() && p.y.is_finite(), "{anchor}: {p:?}");
            assert!((0.0..=64.0).contains(&p.x), "{anchor}: {p:?}");
            assert!((0.0..=48.0).contains(&p.y), "{anchor}: {p:?}");
        }
    }
}

#[test]
fn clamp_or_lower_handles_inverted_and_nan() {
    assert_eq!(clamp_or_lower(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp_or_lower(-5.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp_or_lower(15.0, 0.0, 10.0), 10.0);
    assert_eq!(clamp_or_lower(5.0, 0.0, -10.0), 0.0);
    assert_eq!(clamp_or_lower(f64::NAN, 0.0, 10.0), 0.0);
    assert_eq!(clamp_or_lower(5.0, 0.0, f64::NAN), 0.0);
}

#[test]
fn placement_rect_spans_extent() {
    let p = Placement::resolve(sz(800.0, 600.0), sz(100.0, 32.0), 24.0, Anchor::BottomRight);
    let r = p.rect();
    assert_eq!(r.x1, 776.0);
    assert_eq!(r.y1, 576.0);
}
