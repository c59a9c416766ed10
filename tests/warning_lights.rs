#![allow(missing_docs)]
//! Host-level tests for the farkle warning LEDs.

use std::{cell::Cell, convert::Infallible, rc::Rc};

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use farkle_console::{Error, warning_lights::WarningLights};

/// An output pin whose level the test can observe. `None` until first driven.
#[derive(Clone, Default)]
struct ObservedPin {
    level: Rc<Cell<Option<bool>>>,
}

impl ObservedPin {
    fn is_lit(&self) -> bool {
        self.level.get() == Some(true)
    }
}

impl ErrorType for ObservedPin {
    type Error = Infallible;
}

impl OutputPin for ObservedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(Some(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(Some(true));
        Ok(())
    }
}

#[test]
fn new_turns_both_lights_off() {
    let yellow = ObservedPin::default();
    let red = ObservedPin::default();
    let _lights = WarningLights::new(yellow.clone(), red.clone()).unwrap();

    assert_eq!(yellow.level.get(), Some(false));
    assert_eq!(red.level.get(), Some(false));
}

#[test]
fn lights_follow_farkle_count() {
    let yellow = ObservedPin::default();
    let red = ObservedPin::default();
    let mut lights = WarningLights::new(yellow.clone(), red.clone()).unwrap();

    for (count, expected) in [
        (1, (true, false)),
        (2, (true, true)),
        (3, (true, true)),
        (u8::MAX, (true, true)),
        (0, (false, false)),
    ] {
        lights.show_farkles(count).unwrap();
        assert_eq!((yellow.is_lit(), red.is_lit()), expected, "count {count}");
    }
}

#[derive(Debug)]
struct StuckPinError;

impl digital::Error for StuckPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

struct StuckPin;

impl ErrorType for StuckPin {
    type Error = StuckPinError;
}

impl OutputPin for StuckPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(StuckPinError)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(StuckPinError)
    }
}

#[test]
fn pin_errors_are_reported() {
    let result = WarningLights::new(ObservedPin::default(), StuckPin);
    assert!(matches!(
        result,
        Err(Error::Pin {
            kind: ErrorKind::Other
        })
    ));
}
