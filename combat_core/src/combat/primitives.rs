//! Pool mutation primitives; the only code that writes HP or MP
//!
//! Results always stay within [0, max], so callers never clamp again.

use crate::entity::Combatant;
use crate::stats::Stats;

/// Subtract damage from current HP, returning the amount actually removed
///
/// Negative amounts count as zero.
pub fn apply_damage<C: Combatant + ?Sized>(target: &mut C, amount: i64) -> u32 {
    let amount = amount.clamp(0, u32::MAX as i64) as u32;
    let current = target.current_hp();
    let dealt = amount.min(current);
    target.set_current_hp(current - dealt);
    dealt
}

/// Heal up to the effective max HP, returning the amount actually restored
pub fn apply_heal<C: Combatant + ?Sized>(
    target: &mut C,
    amount: u32,
    stats: &Stats,
    full: bool,
) -> u32 {
    let (restored, hp) = restore(target.current_hp(), stats.max_hp, amount, full);
    target.set_current_hp(hp);
    restored
}

/// Restore MP up to the effective max MP, returning the amount actually restored
pub fn apply_mp_recovery<C: Combatant + ?Sized>(
    target: &mut C,
    amount: u32,
    stats: &Stats,
    full: bool,
) -> u32 {
    let (restored, mp) = restore(target.current_mp(), stats.max_mp, amount, full);
    target.set_current_mp(mp);
    restored
}

fn restore(current: u32, max: u32, amount: u32, full: bool) -> (u32, u32) {
    if current >= max {
        return (0, max);
    }
    let restored = if full {
        max - current
    } else {
        amount.min(max - current)
    };
    (restored, current + restored)
}
