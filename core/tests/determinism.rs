//! Every generator, called twice with the same parameters, must return
//! value-equal results. Cached and uncached providers must agree.

use sentinel_core::{
    config::DashboardConfig,
    provider::MetricsProvider,
    session::Session,
};

fn providers() -> (MetricsProvider, MetricsProvider) {
    (
        MetricsProvider::new(DashboardConfig::default_test()),
        MetricsProvider::with_cache(DashboardConfig::default_test()),
    )
}

#[test]
fn cached_and_uncached_providers_agree() {
    let (mut plain, mut cached) = providers();

    assert_eq!(plain.archetypes(), cached.archetypes());
    assert_eq!(plain.timeline(), cached.timeline());
    assert_eq!(plain.equity(), cached.equity());
    assert_eq!(plain.scatter(), cached.scatter());
    assert_eq!(plain.regression().unwrap(), cached.regression().unwrap());
}

#[test]
fn repeated_calls_return_identical_values() {
    let (mut plain, mut cached) = providers();
    for provider in [&mut plain, &mut cached] {
        let first = (
            provider.archetypes(),
            provider.timeline(),
            provider.equity(),
            provider.scatter(),
        );
        let second = (
            provider.archetypes(),
            provider.timeline(),
            provider.equity(),
            provider.scatter(),
        );
        assert_eq!(first, second, "Generator output changed between calls");
    }
}

#[test]
fn cache_serves_repeat_requests() {
    let (_, mut cached) = providers();
    cached.scatter();
    cached.scatter();
    cached.timeline();
    cached.timeline();

    let cache = cached.cache().expect("cache enabled");
    assert_eq!(cache.misses(), 2);
    assert_eq!(cache.hits(), 2);
}

#[test]
fn independent_sessions_produce_identical_snapshots() {
    let mut a = Session::new(DashboardConfig::default_test());
    let mut b = Session::new(DashboardConfig::default_test());
    assert_ne!(a.id, b.id, "Sessions must have distinct ids");

    let mut snap_a = a.snapshot().unwrap();
    let snap_b = b.snapshot().unwrap();
    snap_a.session_id = snap_b.session_id;
    assert_eq!(snap_a, snap_b);
}
