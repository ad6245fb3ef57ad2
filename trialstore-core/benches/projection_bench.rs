//! Benchmarks for sample projection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trialstore_core::{project, ActorFilter, FieldFilter, MatchMode, Subscription};
use trialstore_types::{
    ActorDescriptor, ActorPeer, ActorStepSample, PayloadRef, SampleField, SampleMessage,
    TrialSample,
};

fn roster(actors: usize) -> Vec<ActorDescriptor> {
    (0..actors)
        .map(|i| ActorDescriptor {
            name: format!("actor_{}", i),
            actor_class: if i % 2 == 0 { "learner" } else { "scripted" }.into(),
            implementation: "bench".into(),
            endpoint: String::new(),
            config: Vec::new(),
        })
        .collect()
}

/// One step per actor, each with its own observation, action and outgoing message
fn sample(actors: usize, payload_len: usize) -> TrialSample {
    let mut payloads = Vec::with_capacity(actors * 3);
    let mut actor_samples = Vec::with_capacity(actors);

    for i in 0..actors {
        let base = (i * 3) as u32;
        payloads.extend((0..3).map(|_| vec![i as u8; payload_len]));
        actor_samples.push(ActorStepSample {
            observation: Some(PayloadRef(base)),
            action: Some(PayloadRef(base + 1)),
            reward: Some(1.0),
            sent_messages: vec![SampleMessage {
                peer: ActorPeer::Environment,
                payload: PayloadRef(base + 2),
            }],
            ..ActorStepSample::new(i as u32)
        });
    }

    TrialSample {
        trial_id: "bench".into(),
        actor_samples,
        payloads,
        ..Default::default()
    }
}

fn bench_filter_construction(c: &mut Criterion) {
    let roster = roster(64);

    c.bench_function("actor_filter_exact", |b| {
        b.iter(|| {
            let filter = ActorFilter::from_patterns(
                black_box(&["actor_3", "actor_17"]),
                &[],
                &["bench"],
                &roster,
                MatchMode::Exact,
            );
            black_box(filter);
        })
    });

    c.bench_function("actor_filter_glob", |b| {
        b.iter(|| {
            let filter = ActorFilter::from_patterns(
                black_box(&["actor_1*"]),
                &["learner"],
                &[],
                &roster,
                MatchMode::Glob,
            );
            black_box(filter);
        })
    });

    c.bench_function("field_filter_parse", |b| {
        b.iter(|| {
            let filter =
                FieldFilter::parse(black_box(&["TRIAL_SAMPLE_FIELD_ACTION", "observation"]));
            black_box(filter)
        })
    });
}

fn bench_projection(c: &mut Criterion) {
    let roster = roster(8);
    let input = sample(8, 256);
    let actors =
        ActorFilter::from_patterns(&["actor_0", "actor_5"], &[], &[], &roster, MatchMode::Exact);
    let fields = FieldFilter::build([SampleField::Observation, SampleField::Action]);

    c.bench_function("project_passthrough", |b| {
        b.iter(|| {
            let projected = project(
                black_box(&input),
                &ActorFilter::Unrestricted,
                &FieldFilter::Unrestricted,
            );
            black_box(projected)
        })
    });

    c.bench_function("project_actor_filter", |b| {
        b.iter(|| {
            let projected = project(black_box(&input), &actors, &FieldFilter::Unrestricted);
            black_box(projected)
        })
    });

    c.bench_function("project_field_filter", |b| {
        b.iter(|| {
            let projected = project(black_box(&input), &ActorFilter::Unrestricted, &fields);
            black_box(projected)
        })
    });

    c.bench_function("project_combined", |b| {
        b.iter(|| {
            let projected = project(black_box(&input), &actors, &fields);
            black_box(projected)
        })
    });
}

fn bench_subscription(c: &mut Criterion) {
    let roster = roster(8);
    let input = sample(8, 256);
    let subscription = Subscription::from_filters(
        ActorFilter::from_patterns(&[], &["learner"], &[], &roster, MatchMode::Exact),
        FieldFilter::build([SampleField::Action]),
    );

    c.bench_function("subscription_project", |b| {
        b.iter(|| {
            let projected = subscription.project(black_box(&input));
            black_box(projected)
        })
    });
}

fn bench_actor_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("actor_count");

    for actors in [2, 16, 128].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(actors), actors, |b, &actors| {
            let roster = roster(actors);
            let input = sample(actors, 64);
            let filter =
                ActorFilter::from_patterns(&[], &["learner"], &[], &roster, MatchMode::Exact);
            let fields = FieldFilter::build([SampleField::SentMessages]);

            b.iter(|| {
                let projected = project(black_box(&input), &filter, &fields);
                black_box(projected)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_filter_construction,
    bench_projection,
    bench_subscription,
    bench_actor_count,
);

criterion_main!(benches);
