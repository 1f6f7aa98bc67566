//! Frame loop demo: a simulated platform thread feeds input to a UI loop
//! that manages its widgets through a generational pool.
//!
//! Run with `RUST_LOG=debug cargo run --example frame_loop` to see queue
//! overflow warnings and pool diagnostics.

use std::thread;
use std::time::Duration;

use keel::prelude::*;

const FRAMES: u64 = 30;

#[derive(Debug)]
struct Button {
    label: String,
    clicks: u32,
}

fn main() {
    env_logger::init();

    // A deliberately small queue so the burst in frame 10 overflows.
    let mut input = SwapQueue::with_config(QueueConfig::with_capacity(32), LogDiagnostics::shared())
        .expect("valid queue config");
    let sender = input.sender();

    let platform = thread::spawn(move || {
        let mut t = 0u64;
        for frame in 0..FRAMES {
            let burst = if frame == 10 { 100 } else { 4 };
            for i in 0..burst {
                t += 250;
                let event = match i % 4 {
                    0 => InputEvent::MouseMove {
                        position: Vec2::new(i as f32, frame as f32),
                    },
                    1 => InputEvent::MouseDown {
                        button: MouseButton::Left,
                        position: Vec2::new(5.0, 5.0),
                    },
                    2 => InputEvent::MouseUp {
                        button: MouseButton::Left,
                        position: Vec2::new(5.0, 5.0),
                    },
                    _ => InputEvent::KeyDown { key: KeyCode(57) },
                };
                // Overflow is reported through diagnostics; nothing to do here.
                let _ = sender.push(EventRecord::new(t, event));
            }
            thread::sleep(Duration::from_millis(2));
        }
    });

    let mut buttons: Pool<Button> = Pool::new();
    let mut active = buttons.allocate(Button {
        label: "Start".into(),
        clicks: 0,
    });
    let retired_handle = active;

    for frame in 0..FRAMES {
        thread::sleep(Duration::from_millis(2));
        input.swap_queues();

        for record in input.front_queue() {
            if let InputEvent::MouseUp { .. } = record.event {
                if let Some(button) = buttons.get_mut(active) {
                    button.clicks += 1;
                }
            }
        }

        // Swap the button out every ten frames; old handles go stale.
        if frame % 10 == 9 {
            if let Ok(old) = buttons.release(active) {
                log::info!("frame {frame}: retired {:?} after {} clicks", old.label, old.clicks);
            }
            active = buttons.allocate(Button {
                label: format!("Button {}", frame / 10 + 1),
                clicks: 0,
            });
        }
    }
    platform
        .join()
        .expect("platform thread panicked");
    input.swap_queues();

    let metrics = input.metrics();
    println!(
        "frames: {FRAMES}, swaps: {}, events delivered: {}, dropped: {} ({:.1}%)",
        metrics.swaps,
        metrics.pushed,
        metrics.dropped,
        metrics.drop_ratio() * 100.0
    );
    println!(
        "first handle {} still resolves: {}",
        retired_handle,
        buttons.contains(retired_handle)
    );
    for (handle, button) in &buttons {
        println!("{handle}: {} ({} clicks)", button.label, button.clicks);
    }
}
