use proptest::prelude::*;
use shadowtrace_control::{
    spawn_ingest_worker, CommandDispatcher, DeviceCommand, DeviceModel, SimulatedDevice,
    StreamLink,
};
use shadowtrace_core::{AngleIngest, TelemetryContext};
use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_stream_feeds_ingest_and_skips_garbage() {
    let ctx = TelemetryContext::shared(220.0);
    let ingest = AngleIngest::new(Arc::clone(&ctx));
    let input = b"garbage\n\n12.5\n89.00 100\nnoise 1\n".to_vec();
    let (reader, _writer) = StreamLink::new(Cursor::new(input), Vec::<u8>::new()).split();

    let handle = spawn_ingest_worker(reader, move |line| {
        ingest.on_line(line);
    })
    .unwrap();
    handle.join().unwrap();

    let readout = ctx.readout();
    assert_eq!(readout.angle_text, "90.00");
    assert_eq!(readout.half_steps, 100);
}

#[test]
fn test_simulator_round_trip() {
    let ctx = TelemetryContext::shared(220.0);
    let ingest = AngleIngest::new(Arc::clone(&ctx));
    let (source, sink) = SimulatedDevice::spawn_with(DeviceModel::new(), Duration::from_millis(1))
        .unwrap();
    spawn_ingest_worker(source, move |line| {
        ingest.on_line(line);
    })
    .unwrap();

    let dispatcher = CommandDispatcher::spawn(sink).unwrap();
    dispatcher.send(DeviceCommand::SetPosition(180.0)).unwrap();

    assert!(wait_for(|| ctx.readout().half_steps == 200));
    assert_eq!(ctx.readout().angle_text, "181.00");

    dispatcher.send(DeviceCommand::Speed(6)).unwrap();
    dispatcher.send(DeviceCommand::GoTo(270.0)).unwrap();
    assert!(wait_for(|| ctx.readout().half_steps == 300));
}

fn any_command() -> impl Strategy<Value = DeviceCommand> {
    prop_oneof![
        (1u8..=6).prop_map(DeviceCommand::Speed),
        Just(DeviceCommand::Pause),
        Just(DeviceCommand::Continue),
        Just(DeviceCommand::Release),
        Just(DeviceCommand::Clockwise),
        Just(DeviceCommand::CounterClockwise),
        Just(DeviceCommand::HalfStep),
        (-720.0f64..720.0).prop_map(DeviceCommand::SetPosition),
        (-720.0f64..720.0).prop_map(DeviceCommand::GoTo),
    ]
}

proptest! {
    #[test]
    fn prop_model_stays_within_one_revolution(
        script in proptest::collection::vec((any_command(), 0usize..20), 1..40)
    ) {
        let mut model = DeviceModel::new();
        for (command, steps) in script {
            model.apply(command);
            for _ in 0..steps {
                model.step();
                prop_assert!((0.0..360.0).contains(&model.angle_degrees()));
                prop_assert!((0..400).contains(&model.half_steps()));
            }
        }
    }
}
