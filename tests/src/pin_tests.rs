//! Active-low button adapter over embedded-hal pins

use decoder_core::{EmbeddedHalButton, HalError, InputButton};
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use embedded_hal_mock::eh1::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

#[test]
fn test_low_level_reads_as_pressed() {
    let expectations = [
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::High),
    ];
    let mut pin = PinMock::new(&expectations);
    let mut button = EmbeddedHalButton::new(pin.clone());

    assert!(!button.is_pressed().unwrap());
    assert!(button.is_pressed().unwrap());
    assert!(button.is_pressed().unwrap());
    assert!(!button.is_pressed().unwrap());

    pin.done();
}

#[test]
fn test_release_returns_pin() {
    let expectations = [PinTransaction::get(PinState::Low)];
    let pin = PinMock::new(&expectations);
    let button = EmbeddedHalButton::new(pin);

    let mut pin = button.release();
    assert!(pin.is_low().unwrap());
    pin.done();
}

/// Pin whose every read fails
struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

#[test]
fn test_pin_error_maps_to_gpio_error() {
    let mut button = EmbeddedHalButton::new(BrokenPin);
    assert_eq!(button.is_pressed(), Err(HalError::GpioError));
}
