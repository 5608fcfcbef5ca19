use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_samples_stay_in_unit_interval() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn range_and_chance_use_one_sample_each() {
    let mut r = ReplayRandom::new([0.5, 0.01, 0.99]);
    assert_eq!(r.range(2.5, 7.5), 5.0);
    assert!(r.chance(0.05));
    assert!(!r.chance(0.05));
    assert_eq!(r.consumed(), 3);
}

#[test]
fn replay_cycles_and_handles_empty() {
    let mut r = ReplayRandom::new([0.25]);
    assert_eq!(r.next_f64(), 0.25);
    assert_eq!(r.next_f64(), 0.25);

    let mut empty = ReplayRandom::new(Vec::<f64>::new());
    assert_eq!(empty.next_f64(), 0.0);
}
