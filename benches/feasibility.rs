use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rust_dealer::{
    CardUniverse, CountPlan, Dealer, DistributionMethod, GameRng, HandPlan, PlayerId, RuleSet,
    Zone, ZoneLedger,
};

/// Per-player opening plan covering `2..=max` players.
fn opening(max: usize) -> CountPlan {
    CountPlan::per_player((2..=max).map(|p| (p, (52 / p as u32).min(6))))
}

fn rules(max: usize) -> RuleSet {
    RuleSet::builder(52, 2, max)
        .early_hand(HandPlan::new(opening(max), 0, 0))
        .early_hand(HandPlan::new(0, 3, 1))
        .steady_state(HandPlan::new(0, 1, 1))
        .order([Zone::PlayerHands, Zone::Board, Zone::TrashPile])
        .all_methods(DistributionMethod::Lump)
        .build()
        .unwrap()
}

/// Benchmark rule set construction, including the feasibility proof
fn bench_rule_set_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_set_build");

    for max in [4, 7].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("2_to_{}_players", max)),
            max,
            |b, &max| {
                b.iter(|| rules(max));
            },
        );
    }

    group.finish();
}

/// Benchmark JSON parsing of a validated rule set
fn bench_rule_set_json(c: &mut Criterion) {
    let json = rules(7).to_json().unwrap();

    c.bench_function("rule_set_from_json", |b| {
        b.iter(|| RuleSet::from_json(&json).unwrap());
    });
}

/// Benchmark dealing the opening hand on a fresh ledger
fn bench_opening_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("opening_deal");
    let universe = CardUniverse::french();
    let rules = rules(7);

    for n_players in [2, 4, 7].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_players", n_players)),
            n_players,
            |b, &n| {
                let roster = PlayerId::roster(n);
                b.iter_batched(
                    || {
                        let (ledger, key) = ZoneLedger::new(&universe, &mut GameRng::new(1));
                        let mut dealer = Dealer::new("bench");
                        dealer.assign_game(key.delegate("bench"));
                        (ledger, dealer)
                    },
                    |(mut ledger, dealer)| dealer.deal(&roster, &rules, &mut ledger, 0).unwrap(),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark ledger clone plus conservation check
fn bench_ledger_clone(c: &mut Criterion) {
    let (ledger, _key) = ZoneLedger::new(&CardUniverse::french(), &mut GameRng::new(2));

    c.bench_function("ledger_clone_and_check", |b| {
        b.iter(|| ledger.clone().check_conservation().is_ok());
    });
}

criterion_group!(rules_benches, bench_rule_set_build, bench_rule_set_json);

criterion_group!(ledger_benches, bench_opening_deal, bench_ledger_clone);

criterion_main!(rules_benches, ledger_benches);
