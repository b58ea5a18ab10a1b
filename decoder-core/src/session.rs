//! Decoder session: owns all mutable state and drives one polling loop

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;

use crate::assembler::{DecodedText, LetterAssembler};
use crate::classifier::{Debouncer, Edge, InputClassifier};
use crate::hal::{DecoderHal, Duration, InputButton};
use crate::presenter;
use crate::types::{Decoded, DecoderConfig, InputEvent, SymbolSequence};

/// Sampling period used by [`decoder_task`]
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// What happened during one loop iteration
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Release classified this iteration
    pub event: Option<InputEvent>,
    /// Letter resolved this iteration (timeout or forced by a text request)
    pub decoded: Option<Decoded>,
    /// Frames drawn if the full-text view was shown
    pub text_frames: Option<usize>,
}

impl PollOutcome {
    pub fn is_idle(&self) -> bool {
        self.event.is_none() && self.decoded.is_none() && self.text_frames.is_none()
    }
}

/// All decoder state, owned by the control loop
#[derive(Debug)]
pub struct DecoderSession {
    config: DecoderConfig,
    classifier: InputClassifier,
    show_button: Debouncer,
    assembler: LetterAssembler,
}

impl DecoderSession {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            classifier: InputClassifier::new(config),
            show_button: Debouncer::new(config.debounce),
            assembler: LetterAssembler::new(config),
        }
    }

    /// Initialize hardware, show the banner, then the empty live view
    pub fn start<H: DecoderHal>(&mut self, hal: &mut H) -> Result<(), H::Error> {
        hal.initialize()?;
        presenter::show_banner(hal.display())?;

        #[cfg(feature = "defmt")]
        {
            defmt::info!("Morse decoder ready");
            defmt::info!("Short press = dot, long press = dash");
            defmt::info!("Pause to complete a letter");
        }

        let (display, delay) = hal.display_and_delay();
        delay.delay_ms(presenter::dwell_ms(self.config.banner_dwell));
        presenter::show_live(display, self.assembler.pending(), self.assembler.text())
    }

    /// One loop iteration: Morse button, show-text button, letter timeout
    pub fn step<H: DecoderHal>(&mut self, hal: &mut H) -> Result<PollOutcome, H::Error> {
        let mut outcome = PollOutcome::default();
        let now = hal.now();

        let raw = hal.morse_button().is_pressed()?;
        if let Some(event) = self.classifier.poll(raw, now) {
            self.assembler.accept(&event);
            self.refresh(hal)?;
            outcome.event = Some(event);
        }

        let raw = hal.show_button().is_pressed()?;
        if self.show_button.update(raw, now) == Some(Edge::Pressed) {
            #[cfg(feature = "defmt")]
            defmt::info!("Show text requested");

            outcome.decoded = self.assembler.resolve();
            let (display, delay) = hal.display_and_delay();
            let frames =
                presenter::play_full_text(display, delay, self.assembler.text(), &self.config)?;
            self.refresh(hal)?;
            outcome.text_frames = Some(frames);
        }

        // The text view may have blocked for seconds, so read the clock again
        if let Some(decoded) = self.assembler.check_timeout(hal.now()) {
            self.refresh(hal)?;
            outcome.decoded = Some(decoded);
        }

        Ok(outcome)
    }

    /// Start, then poll forever
    pub fn run<H: DecoderHal>(&mut self, hal: &mut H) -> Result<Infallible, H::Error> {
        self.start(hal)?;
        loop {
            self.step(hal)?;
        }
    }

    fn refresh<H: DecoderHal>(&self, hal: &mut H) -> Result<(), H::Error> {
        presenter::show_live(hal.display(), self.assembler.pending(), self.assembler.text())
    }

    pub fn pending(&self) -> &SymbolSequence {
        self.assembler.pending()
    }

    pub fn text(&self) -> &DecodedText {
        self.assembler.text()
    }

    pub fn classifier(&self) -> &InputClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

/// Async task running the decoder loop, sampling every [`POLL_INTERVAL`]
#[cfg(feature = "embassy-time")]
pub async fn decoder_task<H: DecoderHal>(
    hal: &mut H,
    config: DecoderConfig,
) -> Result<Infallible, H::Error> {
    use embassy_time::Timer;

    let mut session = DecoderSession::new(config);
    session.start(hal)?;

    loop {
        let _outcome = session.step(hal)?;

        #[cfg(feature = "defmt")]
        {
            if let Some(frames) = _outcome.text_frames {
                defmt::trace!("Full text shown in {} frames", frames);
            }
        }

        Timer::after(POLL_INTERVAL).await;
    }
}
