use tuku::geo::*;

fn ids<I: Clone>(list: &[Ranked<I>]) -> Vec<I> {
    list.iter().map(|x| x.id.clone()).collect()
}

#[test]
fn distance_to_self_is_zero() {
    for p in [
        GeoPoint::new(23.70, 120.40),
        GeoPoint::new(-33.86, 151.21),
        GeoPoint::new(89.9, -179.9),
    ] {
        assert_eq!(distance_km(&p, &p), 0.);
    }
}

#[test]
fn distance_is_symmetric() {
    let a = GeoPoint::new(23.70, 120.40);
    let b = GeoPoint::new(24.00, 121.00);
    assert_eq!(distance_km(&a, &b), distance_km(&b, &a));
    assert!(distance_km(&a, &b) > 0.);
}

#[test]
fn nearest_skips_placeholders() {
    let r = GeoPoint::new(23.70, 120.40);
    let candidates = vec![
        (1, Some(GeoPoint::new(24.00, 121.00))),
        (2, Some(GeoPoint::new(23.71, 120.41))),
        (3, Some(GeoPoint::placeholder(23.70, 120.40))),
    ];
    let ret = nearest(None, &r, candidates, 2);
    assert_eq!(ids(&ret), [2, 1]);
    assert!(ret[0].distance_km < ret[1].distance_km);
}

#[test]
fn nearest_spec_example() {
    let r = GeoPoint::new(23.70, 120.40);
    let candidates = vec![
        (1, Some(GeoPoint::new(23.71, 120.41))),
        (2, Some(GeoPoint::new(24.00, 121.00))),
        (3, Some(GeoPoint::placeholder(0., 0.))),
    ];
    assert_eq!(ids(&nearest(None, &r, candidates, 2)), [1, 2]);
}

#[test]
fn nearest_of_nothing() {
    let r = GeoPoint::new(23.70, 120.40);
    let ret = nearest::<u32>(None, &r, vec![], DEFAULT_NEAREST_LIMIT);
    assert!(ret.is_empty());
    let ret = nearest(
        None,
        &r,
        vec![(1, None), (2, Some(GeoPoint::placeholder(1., 1.)))],
        DEFAULT_NEAREST_LIMIT,
    );
    assert!(ret.is_empty());
}

#[test]
fn nearest_excludes_reference_and_keeps_tie_order() {
    let r = GeoPoint::new(23.70, 120.40);
    let same = GeoPoint::new(23.75, 120.40);
    let candidates = vec![
        ("self", Some(r)),
        ("b", Some(same)),
        ("missing", None),
        ("a", Some(same)),
        ("c", Some(same)),
    ];
    let ret = nearest(Some(&"self"), &r, candidates, 10);
    assert_eq!(ids(&ret), ["b", "a", "c"]);
}

#[test]
fn limit_truncates() {
    let r = GeoPoint::new(0., 0.);
    let candidates = (1..=5).map(|i| (i, Some(GeoPoint::new(i as f64 / 10., 0.))));
    assert_eq!(ids(&nearest(None, &r, candidates, 3)), [1, 2, 3]);
}
