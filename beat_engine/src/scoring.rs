/// BeatEngine v1: Scoring, Combo and Damage
///
/// Integer only. Damage is fixed-point (see `DAMAGE_SCALE`); accuracy is
/// compared as ratios of integers rather than as a float.

use crate::domain::{GameState, Rank, DAMAGE_DECAY, DAMAGE_MAX, DAMAGE_SCALE, MAX_MULTIPLIER};

/// Combo multiplier: the largest power of two not above `combo`, capped at 8.
/// A combo of 0 yields 1.
pub fn multiplier_for_combo(combo: u32) -> u32 {
    if combo >= MAX_MULTIPLIER {
        MAX_MULTIPLIER
    } else if combo == 0 {
        1
    } else {
        1 << combo.ilog2()
    }
}

/// What a damaging event did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    pub applied: bool,
    pub game_over: bool,
}

/// Apply one point of damage and break the combo.
///
/// No-op under god mode or while not actively playing. Reaching
/// `DAMAGE_MAX` resets damage to 0 and sets game over in the same step.
pub fn take_damage(state: &mut GameState, god_mode: bool) -> DamageOutcome {
    if god_mode || !state.is_playing {
        return DamageOutcome::default();
    }
    state.damage += DAMAGE_SCALE;
    state.score.combo = 0;
    state.score.multiplier = 1;
    DamageOutcome {
        applied: true,
        game_over: check_game_over(state),
    }
}

fn check_game_over(state: &mut GameState) -> bool {
    if state.damage >= DAMAGE_MAX {
        state.damage = 0;
        state.is_game_over = true;
        return true;
    }
    false
}

/// Recover `DAMAGE_DECAY`, saturating at 0.
pub fn decay_damage(state: &mut GameState) {
    state.damage = (state.damage - DAMAGE_DECAY).max(0);
}

/// Register a successful hit.
pub fn register_hit(state: &mut GameState) {
    decay_damage(state);
    let score = &mut state.score;
    score.beats_hit += 1;
    score.score += 1;
    score.combo += 1;
    score.max_combo = score.max_combo.max(score.combo);
    score.multiplier = multiplier_for_combo(score.combo);
}

/// Zero the run: damage, hit/miss counts, combo, score. Multiplier back to 1.
pub fn reset_score(state: &mut GameState) {
    state.damage = 0;
    state.score.beats_hit = 0;
    state.score.beats_missed = 0;
    state.score.combo = 0;
    state.score.max_combo = 0;
    state.score.score = 0;
    state.score.multiplier = 1;
}

/// Accuracy as a whole percentage, rounded half up. Zero attempts is 0.
pub fn accuracy_percent(beats_hit: u32, beats_missed: u32) -> u32 {
    let hit = u64::from(beats_hit);
    let total = hit + u64::from(beats_missed);
    if total == 0 {
        return 0;
    }
    ((hit * 200 + total) / (2 * total)) as u32
}

/// Rank thresholds as (numerator, denominator, rank), checked in order.
const RANK_THRESHOLDS: [(u64, u64, Rank); 4] = [
    (9, 10, Rank::A),
    (8, 10, Rank::B),
    (7, 10, Rank::C),
    (6, 10, Rank::D),
];

/// Letter grade. Perfect accuracy is S; zero attempts is F.
pub fn rank_for(beats_hit: u32, beats_missed: u32) -> Rank {
    let hit = u64::from(beats_hit);
    let total = hit + u64::from(beats_missed);
    if total == 0 {
        return Rank::F;
    }
    if hit == total {
        return Rank::S;
    }
    RANK_THRESHOLDS
        .iter()
        .find(|(num, den, _)| hit * den >= total * num)
        .map(|(_, _, rank)| *rank)
        .unwrap_or(Rank::F)
}
