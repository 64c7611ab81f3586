use isochrones::geohash::{self, DEFAULT_PRECISION};
use isochrones::{Config, IsochroneError, encode_batch, geohash_encode};

#[test]
fn test_origin_golden_code() {
    assert_eq!(
        geohash_encode(0.0, 0.0, 18, 2).expect("encode"),
        "200000000000000000"
    );
    assert_eq!(
        geohash::encode_default(0.0, 0.0).expect("encode"),
        "200000000000000000"
    );
}

#[test]
fn test_deterministic() {
    let first = geohash_encode(37.514230, 55.933302, 18, 2).expect("encode");
    for _ in 0..10 {
        assert_eq!(
            geohash_encode(37.514230, 55.933302, 18, 2).expect("encode"),
            first
        );
    }
}

#[test]
fn test_prefix_stable_inside_coarse_cell() {
    // Both points fall in the same 2^6 x 2^6 cell.
    let a = geohash_encode(37.514230, 55.933302, DEFAULT_PRECISION, 2).expect("encode");
    let b = geohash_encode(37.614230, 55.833302, DEFAULT_PRECISION, 2).expect("encode");
    assert_eq!(a[..6], b[..6]);
    assert_ne!(a, b);
}

#[test]
fn test_codes_are_fixed_width_base4() {
    for precision in [1usize, 5, 18, 32] {
        for (lon, lat) in [(-180.0, -90.0), (12.5, -33.3), (179.9, 89.9)] {
            let code = geohash_encode(lon, lat, precision, 2).expect("encode");
            assert_eq!(code.len(), precision);
            assert!(code.chars().all(|c| ('0'..='3').contains(&c)));
        }
    }
}

#[test]
fn test_invalid_arguments() {
    let cases = [
        geohash_encode(200.0, 0.0, 18, 2),
        geohash_encode(0.0, 0.0, 0, 2),
        geohash_encode(0.0, 0.0, 18, 3),
    ];
    for result in cases {
        assert!(matches!(result, Err(IsochroneError::InvalidInput(_))));
    }
}

#[test]
fn test_not_implemented_paths() {
    assert!(matches!(
        geohash_encode(0.0, 0.0, 8, 4),
        Err(IsochroneError::NotImplemented(_))
    ));
    assert!(matches!(
        geohash::decode("200000000000000000"),
        Err(IsochroneError::NotImplemented(_))
    ));
}

#[test]
fn test_wide_alphabets_at_default_precision() {
    for bits in [4, 6] {
        let result = geohash_encode(0.0, 0.0, 18, bits);
        assert!(
            matches!(result, Err(IsochroneError::NotImplemented(_))),
            "bits {}: {:?}",
            bits,
            result
        );
    }

    let config = Config::default().with_workers(2).with_bits_per_char(6);
    let err = encode_batch(&[0.0, 10.0], &[0.0, 10.0], &config).unwrap_err();
    assert!(matches!(err, IsochroneError::NotImplemented(_)));
}

#[test]
fn test_encode_batch_preserves_order() {
    let lons: Vec<f64> = (0..1_000).map(|i| -180.0 + i as f64 * 0.36).collect();
    let lats: Vec<f64> = (0..1_000).map(|i| -90.0 + i as f64 * 0.18).collect();
    let config = Config::default().with_workers(6);

    let codes = encode_batch(&lons, &lats, &config).expect("batch");
    assert_eq!(codes.len(), lons.len());
    for i in (0..lons.len()).step_by(37) {
        assert_eq!(
            codes[i],
            geohash_encode(lons[i], lats[i], 18, 2).expect("encode")
        );
    }
}

#[test]
fn test_encode_batch_rejects_bad_config() {
    let config = Config::default().with_bits_per_char(5);
    let err = encode_batch(&[0.0], &[0.0], &config).unwrap_err();
    assert!(matches!(err, IsochroneError::Config(_)));
}
