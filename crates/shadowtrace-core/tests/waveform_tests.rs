use proptest::prelude::*;
use shadowtrace_core::{
    AngleIngest, DrawOp, RenderParams, TelemetryContext, Vec2, WaveformRenderer, SAMPLE_CAPACITY,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn setup() -> (AngleIngest, WaveformRenderer) {
    let ctx = TelemetryContext::shared(220.0);
    let ingest = AngleIngest::new(Arc::clone(&ctx));
    let renderer = WaveformRenderer::with_params(RenderParams::default(), ctx, Instant::now());
    (ingest, renderer)
}

#[test]
fn test_startup_frame_is_flat() {
    let (_, renderer) = setup();
    let frame = renderer.render(1920.0);
    let trace = frame.trace().unwrap();
    assert!(trace.iter().all(|p| p.y == 248.0));
}

#[test]
fn test_ingest_feeds_next_tick() {
    let (ingest, mut renderer) = setup();
    ingest.context().set_running_offset(0);

    ingest.on_line("89.00 99");
    renderer.tick();
    assert!((renderer.buffer().newest() + 220.0).abs() < 1e-3);

    ingest.on_line("269.00 299");
    renderer.tick();
    assert!((renderer.buffer().newest() - 220.0).abs() < 1e-3);
    assert!((renderer.buffer().get(1).unwrap() + 220.0).abs() < 1e-3);
}

#[test]
fn test_look_ahead_and_running_offset_reach_buffer() {
    let (ingest, mut renderer) = setup();
    ingest.context().set_running_offset(2);

    ingest.on_line("179.00 199");
    renderer.tick();

    let expected = -(220.0 * 182.0f64.to_radians().sin()) as f32;
    assert!((renderer.buffer().newest() - expected).abs() < 1e-3);
    assert_eq!(ingest.context().readout().angle_text, "180.00");
}

#[test]
fn test_malformed_lines_keep_trace_flat() {
    let (ingest, mut renderer) = setup();
    for line in ["garbage", "", "12.5"] {
        assert!(!ingest.on_line(line));
        renderer.tick();
    }
    assert!(renderer.buffer().as_slice().iter().all(|v| *v == 0.0));
}

#[test]
fn test_junk_after_half_steps_still_feeds_trace() {
    let (ingest, mut renderer) = setup();
    ingest.context().set_running_offset(0);

    assert!(ingest.on_line("89.00 99abc"));
    renderer.tick();

    assert!((renderer.buffer().newest() + 220.0).abs() < 1e-3);
    assert_eq!(ingest.context().readout().half_steps, 99);
}

#[test]
fn test_ingested_angle_moves_shadow_tip() {
    let (ingest, renderer) = setup();
    ingest.context().set_running_offset(0);
    ingest.on_line("89.00 99");

    let frame = renderer.render(1600.0);
    let right = 1600.0 - 523.0;
    let shadow_tip = frame
        .ops
        .iter()
        .rev()
        .find_map(|op| match op {
            DrawOp::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .unwrap();
    assert!((shadow_tip - Vec2::new(right, 248.0 - 220.0)).length() < 1e-3);
}

#[test]
fn test_clear_trace_keeps_ticking() {
    let (ingest, mut renderer) = setup();
    ingest.context().set_running_offset(0);
    ingest.on_line("89.00 99");
    for _ in 0..10 {
        renderer.tick();
    }

    renderer.clear_trace();
    assert_eq!(renderer.buffer().len(), SAMPLE_CAPACITY);
    assert!(renderer.buffer().as_slice().iter().all(|v| *v == 0.0));

    renderer.tick();
    assert!((renderer.buffer().newest() + 220.0).abs() < 1e-3);
    assert_eq!(renderer.buffer().get(1), Some(0.0));
}

#[test]
fn test_two_samples_between_ticks_coalesce() {
    let (ingest, mut renderer) = setup();
    ingest.context().set_running_offset(0);
    ingest.on_sample(-1.0, 0);
    ingest.on_sample(89.0, 100);
    renderer.tick();
    renderer.tick();
    assert!((renderer.buffer().get(0).unwrap() + 220.0).abs() < 1e-3);
    assert!((renderer.buffer().get(1).unwrap() + 220.0).abs() < 1e-3);
    assert_eq!(renderer.buffer().get(2), Some(0.0));
}

#[test]
fn test_scheduled_ticks_follow_interval_change() {
    let t0 = Instant::now();
    let ctx = TelemetryContext::shared(220.0);
    let mut renderer = WaveformRenderer::with_params(RenderParams::default(), ctx, t0);
    renderer.set_tick_interval_at(5, t0);

    let fired = (1..=20)
        .filter(|i| renderer.poll(t0 + Duration::from_millis(10 * i)))
        .count();
    assert_eq!(fired, 4);
}

proptest! {
    #[test]
    fn prop_shift_invariant(heights in proptest::collection::vec(-300.0f32..300.0, 0..1500)) {
        let ctx = TelemetryContext::shared(220.0);
        let mut renderer =
            WaveformRenderer::with_params(RenderParams::default(), Arc::clone(&ctx), Instant::now());

        for h in &heights {
            ctx.set_current_height(*h);
            renderer.tick();
        }

        let k = heights.len();
        for i in 0..SAMPLE_CAPACITY {
            let slot = renderer.buffer().get(i).unwrap();
            if i < k {
                prop_assert_eq!(slot, -heights[k - 1 - i]);
            } else {
                prop_assert_eq!(slot, 0.0);
            }
        }
    }

    #[test]
    fn prop_pause_freezes_buffer(
        before in proptest::collection::vec(-300.0f32..300.0, 1..50),
        during in proptest::collection::vec(-300.0f32..300.0, 1..50),
    ) {
        let ctx = TelemetryContext::shared(220.0);
        let mut renderer =
            WaveformRenderer::with_params(RenderParams::default(), Arc::clone(&ctx), Instant::now());
        for h in &before {
            ctx.set_current_height(*h);
            renderer.tick();
        }
        let snapshot = renderer.buffer().clone();

        renderer.pause();
        for h in &during {
            ctx.set_current_height(*h);
            renderer.tick();
        }
        prop_assert_eq!(renderer.buffer(), &snapshot);
    }
}
