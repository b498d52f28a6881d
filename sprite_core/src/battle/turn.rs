//! Turn order

use crate::creature::Creature;

/// Whether `a` acts before `b`. Speed ties go to `a`.
pub fn a_moves_first(a: &Creature, b: &Creature) -> bool {
    a.stats.spd >= b.stats.spd
}

/// Order two creatures by speed, returning `(first, second)`.
/// Ties are broken in favour of `a`, never randomly.
pub fn determine_turn_order<'a>(a: &'a Creature, b: &'a Creature) -> (&'a Creature, &'a Creature) {
    if a_moves_first(a, b) {
        (a, b)
    } else {
        (b, a)
    }
}
