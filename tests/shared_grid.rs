use grid_cipher::{Algorithm, CipherConfig, Error, GridBuilder, Key, KeyRegistry, Matrix, Request};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::rstest;

/// Snapshot of every locked cell and its letter.
fn locked_letters(matrix: &Matrix) -> Vec<((usize, usize), Option<char>)> {
    matrix
        .locked_cells()
        .into_iter()
        .map(|(row, col)| ((row, col), matrix.cell_at(row, col)))
        .collect()
}

#[rstest]
#[case(&[Algorithm::Row, Algorithm::Skip, Algorithm::SkipPlow])]
#[case(&[Algorithm::Skip, Algorithm::Row, Algorithm::RowPlow])]
#[case(&[Algorithm::SkipPlow, Algorithm::RowPlow, Algorithm::Skip])]
fn later_placements_never_disturb_earlier_ones(#[case] order: &[Algorithm]) {
    let config = CipherConfig {
        columns: 12,
        rows: 12,
        ..CipherConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut matrix = Matrix::random(
        config.columns,
        config.rows,
        &config.alphabet().unwrap(),
        &mut rng,
    );
    let messages = ["HELLO", "WORLD", "HERP"];

    let mut placed: Vec<(Algorithm, Key, &str)> = Vec::new();
    for (&algorithm, message) in order.iter().zip(messages) {
        let before = locked_letters(&matrix);
        let key = matrix.add_message(algorithm, message, None, &mut rng).unwrap();

        let after = locked_letters(&matrix);
        assert!(before.iter().all(|cell| after.contains(cell)));

        placed.push((algorithm, key, message));
        for (algorithm, key, message) in &placed {
            assert!(matrix.decode(*algorithm, key).unwrap().starts_with(message));
        }
    }
}

#[test]
fn failed_preset_leaves_grid_untouched() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut matrix: Matrix = "A B C\nD E F\nG H I".parse().unwrap();
    let bottom: Key = "6,0,0".parse().unwrap();
    matrix
        .add_message(Algorithm::Skip, "XYZ", Some(&bottom), &mut rng)
        .unwrap();
    let before = matrix.clone();

    // six open cells verify fine before the sweep reaches the locked `X`
    let sweep: Key = "0".parse().unwrap();
    assert!(matrix.can_encode(Algorithm::Skip, "QQQQQQX", &sweep));
    let err = matrix
        .add_message(Algorithm::Skip, "QQQQQQQ", Some(&sweep), &mut rng)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::EncodingConflict {
            row: 2,
            col: 0,
            expected: 'Q',
            found: 'X'
        }
    ));
    assert_eq!(matrix, before);

    let err = matrix
        .add_message(Algorithm::Skip, "DEFQ", Some(&"3,0,0".parse().unwrap()), &mut rng)
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientSpace { placed: 3, total: 4 }));
    assert_eq!(matrix, before);
}

#[test]
fn text_form_survives_placement() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut matrix = Matrix::random(6, 4, &CipherConfig::default().alphabet().unwrap(), &mut rng);
    let key = matrix
        .add_message(Algorithm::RowPlow, "spy", None, &mut rng)
        .unwrap();

    let reloaded: Matrix = matrix.to_string().parse().unwrap();
    assert_eq!(reloaded.raw(), matrix.raw());
    assert!(reloaded.locked_cells().is_empty());
    assert!(reloaded
        .decode(Algorithm::RowPlow, &key)
        .unwrap()
        .starts_with("SPY"));
}

#[test]
fn issued_pools_build_a_two_message_grid() {
    // room for twenty letters per row key
    let config = CipherConfig {
        columns: 20,
        rows: 20,
        ..CipherConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut registry = KeyRegistry::new();
    for group in ["ravens", "wolves"] {
        registry.add_group(group).unwrap();
        for algorithm in Algorithm::ALL {
            for _ in 0..4 {
                registry.issue(group, algorithm, &config, &mut rng).unwrap();
            }
        }
    }

    assert_eq!(registry.groups().collect::<Vec<_>>(), ["ravens", "wolves"]);

    let builder = GridBuilder::new(config.clone()).unwrap();
    assert_eq!(builder.config(), &config);
    let built = builder
        .build(
            Request::for_group(&registry, "ravens", "the base has fallen").unwrap(),
            Some(Request::for_group(&registry, "wolves", "trust noone").unwrap()),
            &mut rng,
        )
        .unwrap();

    let primary = &built.primary;
    assert!(registry.pool("ravens").unwrap().contains(primary));
    assert!(built
        .matrix
        .decode(primary.algorithm, &primary.key)
        .unwrap()
        .starts_with("THE.BASE.HAS.FALLEN."));

    let secondary = built.secondary.as_ref().unwrap();
    assert!(registry.pool("wolves").unwrap().contains(secondary));
    assert!(built
        .matrix
        .decode(secondary.algorithm, &secondary.key)
        .unwrap()
        .starts_with("TRUST.NOONE."));
}

#[test]
fn unknown_group_is_an_error_not_an_empty_pool() {
    let registry = KeyRegistry::new();
    assert!(matches!(
        Request::for_group(&registry, "ghosts", "boo"),
        Err(Error::UnknownGroup(_))
    ));
}
