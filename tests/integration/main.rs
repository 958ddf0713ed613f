//! Host-side integration tests: blinker and classifier wired together over a
//! recording output pin.

mod blinker_tests;
