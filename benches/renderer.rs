use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs_renderer::measure::{CardMeasure, CardSize, FixedMeasure, measure_events};
use timeline_rs_renderer::{
    ContentSize, LayoutConfig, LayoutRequest, Mode, Theme, TimelineEvent, compute_layout,
    parse_timeline, render_svg,
};

/// `count` events spread over roughly a decade, bunched so the packer has
/// to open several lanes.
fn synthetic_events(count: usize) -> Vec<TimelineEvent> {
    (0..count)
        .map(|i| {
            let year = 2010 + (i * 7 / 12) % 10;
            let month = 1 + (i * 5) % 12;
            let day = 1 + (i * 11) % 28;
            TimelineEvent::new(format!("{year:04}-{month:02}-{day:02}"))
                .with_title(format!("Event {i}"))
                .with_description("Short description that wraps onto a second line.")
        })
        .collect()
}

fn synthetic_document(count: usize) -> String {
    let mut out = String::from("{ label: 'bench', events: [\n");
    for event in synthetic_events(count) {
        out.push_str(&format!(
            "  {{ date: '{}', title: '{}' }},\n",
            event.date,
            event.title.unwrap_or_default()
        ));
    }
    out.push_str("] }\n");
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for count in [10usize, 100, 1000] {
        let input = synthetic_document(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, data| {
            b.iter(|| {
                let document = parse_timeline(black_box(data)).expect("parse failed");
                black_box(document.events.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    let provider = FixedMeasure(CardSize {
        width: 250.0,
        height: 265.0,
    });
    for count in [10usize, 100, 1000] {
        let events = synthetic_events(count);
        let boxes = measure_events(&events, &provider).expect("measure failed");
        for mode in [Mode::Horizontal, Mode::Vertical] {
            let request = LayoutRequest::new(mode, ContentSize::new(1200.0, 800.0));
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}").to_lowercase(), count),
                &boxes,
                |b, boxes| {
                    b.iter(|| {
                        let layout =
                            compute_layout(black_box(boxes), &request, &config).expect("layout");
                        black_box(layout.lane_count);
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::dark();
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..Default::default()
    };
    let measure = CardMeasure::new(&config, &theme);
    let request = LayoutRequest::new(Mode::Horizontal, ContentSize::new(1200.0, 800.0));
    for count in [10usize, 100] {
        let events = synthetic_events(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| {
                let boxes = measure_events(black_box(events), &measure).expect("measure failed");
                let layout = compute_layout(&boxes, &request, &config).expect("layout");
                let svg = render_svg(&layout, events, "bench", &theme, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_layout, bench_end_to_end);
criterion_main!(benches);
