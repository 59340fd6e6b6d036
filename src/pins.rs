//! Raspberry Pi 40-pin header map.
//!
//! Configuration refers to pins by their physical header position (the
//! numbers printed on pinout diagrams).  The kernel's GPIO interface wants
//! BCM numbers instead; this table is the single translation point.
//!
//! Header pins 1, 2, 4, 6, 9, 14, 17, 20, 25, 30, 34 and 39 are power or
//! ground and have no GPIO behind them.

use crate::app::ports::PinId;

/// `(physical header pin, BCM GPIO)` pairs.
const HEADER_TO_BCM: [(PinId, u32); 28] = [
    (3, 2),
    (5, 3),
    (7, 4),
    (8, 14),
    (10, 15),
    (11, 17),
    (12, 18),
    (13, 27),
    (15, 22),
    (16, 23),
    (18, 24),
    (19, 10),
    (21, 9),
    (22, 25),
    (23, 11),
    (24, 8),
    (26, 7),
    (27, 0),
    (28, 1),
    (29, 5),
    (31, 6),
    (32, 12),
    (33, 13),
    (35, 19),
    (36, 16),
    (37, 26),
    (38, 20),
    (40, 21),
];

/// BCM GPIO number for a physical header pin, `None` for power/ground or
/// out-of-range pins.
pub fn bcm_for_header(pin: PinId) -> Option<u32> {
    HEADER_TO_BCM
        .iter()
        .find(|(header, _)| *header == pin)
        .map(|(_, bcm)| *bcm)
}
