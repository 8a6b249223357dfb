//! Console demo: plays the stock notify-error theme through a logging pin
//! backend driven by a simulated tick loop, then optionally renders it to a
//! WAV file (`export-wav` feature).

use anyhow::Result;

#[cfg(feature = "themes")]
mod demo {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::Result;
    use beeptone::{BeeperPin, PinToneBackend, ToneEngine, ToneTimer};

    struct ConsolePin;

    impl BeeperPin for ConsolePin {
        fn set(&mut self, _level: bool) {}
        fn off(&mut self) {}
    }

    struct ConsoleTimer;

    impl ToneTimer for ConsoleTimer {
        fn tone(&mut self, frequency: u16) {
            println!("timer: tone {frequency} Hz");
        }
        fn no_tone(&mut self) {
            println!("timer: off");
        }
        fn toggle_divider(&self, _frequency: u16) -> u8 {
            0
        }
    }

    pub fn run() -> Result<()> {
        let engine = Arc::new(ToneEngine::new(PinToneBackend::new(
            ConsolePin,
            ConsoleTimer,
        )));
        let theme = beeptone::themes::notify_error();
        println!(
            "playing {:?} ({} tones, {} ms)",
            theme.name(),
            theme.len(),
            theme.total_duration()
        );

        // Fast tick on a helper thread; the main thread blocks on playback.
        let ticker = {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let start = Instant::now();
                while engine.is_playing() || start.elapsed() < Duration::from_millis(20) {
                    engine.process_tick(start.elapsed().as_millis() as u64);
                    std::thread::sleep(Duration::from_millis(1));
                }
            })
        };

        engine.play_theme(&theme, true);
        let _ = ticker.join();

        #[cfg(feature = "export-wav")]
        {
            beeptone::export::render_theme(&theme, "notify_error.wav", Default::default())?;
            println!("rendered notify_error.wav");
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "themes")]
    demo::run()?;

    #[cfg(not(feature = "themes"))]
    println!("built without the `themes` feature; nothing to demo");

    Ok(())
}
