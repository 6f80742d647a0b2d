//! Property tests for the uplink SIR engine

use fuzz_harness::prelude::*;
use nalgebra::Point2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uplink_sir::channel::path_loss;
use uplink_sir::geometry::{hex_boundary_radius, sample_user, SectorBoresight};
use uplink_sir::power::tx_power_scale;
use uplink_sir::rate::shannon_rate;
use uplink_sir::{is_co_channel, SirEngine, VICTIM_CELL, VICTIM_SECTOR};

fn engine_cases() -> ProptestConfig {
    FuzzConfig::new().cases(48).to_proptest_config()
}

proptest! {
    #[test]
    fn path_loss_non_increasing(nu in path_loss_exponent(), a in distance_m(), b in distance_m()) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(path_loss(far, nu) <= path_loss(near, nu));
        prop_assert!(path_loss(near, nu) <= 1.0);
    }

    #[test]
    fn victim_never_co_channel(reuse in reuse_factor()) {
        prop_assert!(!is_co_channel(VICTIM_CELL, VICTIM_SECTOR, reuse));
    }

    #[test]
    fn reuse_three_is_sector_zero_outside_victim_cell((cell, sector) in cell_sector()) {
        prop_assert_eq!(
            is_co_channel(cell, sector, ReuseFactor::Three),
            cell != VICTIM_CELL && sector == 0
        );
    }

    #[test]
    fn co_channel_sets_are_nested((cell, sector) in cell_sector()) {
        if is_co_channel(cell, sector, ReuseFactor::Nine) {
            prop_assert!(is_co_channel(cell, sector, ReuseFactor::Three));
        }
        if is_co_channel(cell, sector, ReuseFactor::Three) {
            prop_assert!(is_co_channel(cell, sector, ReuseFactor::One));
        }
    }

    #[test]
    fn tx_scale_is_at_least_one(d in 1.0f64..20_000.0, eps in power_control_exponent(), nu in path_loss_exponent()) {
        prop_assert!(tx_power_scale(d, eps, nu) >= 1.0);
    }

    #[test]
    fn users_stay_inside_sector(
        radius in cell_radius_m(),
        sector in sector_index(),
        seed in seed(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let center = Point2::new(0.0, 0.0);
        let wedge = SectorBoresight::of(sector);
        for _ in 0..64 {
            let p = sample_user(&mut rng, center, sector, radius);
            let r = p.coords.norm();
            let bearing = p.y.atan2(p.x);
            prop_assert!(r <= hex_boundary_radius(radius, bearing) * (1.0 + 1e-9));
            prop_assert!(wedge.contains(bearing, 1e-9));
        }
    }

    #[test]
    fn shannon_rate_matches_log2(sir in 0.0f64..1e6, bw in 1e3f64..1e8) {
        let rate = shannon_rate(sir, bw);
        prop_assert!(rate >= 0.0);
        prop_assert!((rate - bw * (1.0 + sir).log2()).abs() <= 1e-9 * rate.max(1.0));
    }
}

proptest! {
    #![proptest_config(engine_cases())]

    #[test]
    fn snapshot_sir_finite_and_non_negative(config in engine_config(), seed in seed()) {
        let engine = SirEngine::new(config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sir = engine.snapshot_sir(&mut rng);
        prop_assert!(sir.linear() >= 0.0);
        prop_assert!(sir.linear().is_finite());
    }

    #[test]
    fn empty_interferer_set_is_infinite(config in engine_config(), seed in seed()) {
        let engine = SirEngine::new(config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let users = uplink_sir::geometry::sample_all_users(&mut rng, engine.grid());
        let sir = engine.evaluate_with(&users, &mut rng, |_, _| false);
        prop_assert!(sir.is_interference_free());
    }

    #[test]
    fn same_seed_same_snapshot(config in engine_config(), seed in seed()) {
        let engine = SirEngine::new(config).unwrap();
        let a = engine.snapshot_sir(&mut ChaCha8Rng::seed_from_u64(seed));
        let b = engine.snapshot_sir(&mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }
}

#[test]
fn seeded_runner_checks_sir_non_negative() {
    let mut runner = FuzzConfig::new().cases(32).seed(20240611).runner();
    let result = runner.run(&(engine_config(), seed()), |(config, seed)| {
        let engine = SirEngine::new(config).unwrap();
        let sir = engine.snapshot_sir(&mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert!(sir.linear() >= 0.0);
        Ok(())
    });
    assert!(result.is_ok(), "{:?}", result);
}
