//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                     |
//! |------------|-------------|---------------------------------|
//! | `sysfs`    | PinPort     | Linux `/sys/class/gpio`         |
//! | `hal`      | PinPort     | any `embedded-hal` 1.0 pin type |
//! | `log_sink` | EventSink   | `log` facade                    |
//! | `time`     | ClockPort   | `std::time::Instant`            |

pub mod hal;
pub mod log_sink;
pub mod sysfs;
pub mod time;
