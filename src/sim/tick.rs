//! Per-frame simulation step
//!
//! Advances bullets, resolves collisions, moves enemies, counts breaches and
//! spawns new enemies. One call per animation frame; there is no delta time,
//! every speed is in pixels per frame.

use super::geometry::overlaps;
use super::spawn::{maybe_spawn_tier1, maybe_spawn_tier2};
use super::state::GameState;

/// What happened during one step (informational only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Enemies destroyed by bullets (either tier)
    pub kills: u32,
    /// Non-lethal hits on tier-2 enemies
    pub hits: u32,
    /// Enemies that left through the bottom edge
    pub breaches: u32,
    /// Enemies created this frame
    pub spawned: u32,
    /// The run ended during this step
    pub ended: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if state.game_over {
        return outcome;
    }

    // Bullets fly up; anything past the top edge is gone before collision
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);

    resolve_collisions(state, &mut outcome);
    advance_enemies(state, &mut outcome);

    // Spawns read the timer before it advances
    let timer = state.spawn_timer;
    let width = state.playfield.width;
    if let Some(enemy) = maybe_spawn_tier1(timer, state.score, width, &state.tuning, &mut state.rng) {
        state.enemies.push(enemy);
        outcome.spawned += 1;
    }
    if let Some(heavy) = maybe_spawn_tier2(timer, state.score, width, &state.tuning, &mut state.rng) {
        state.heavies.push(heavy);
        outcome.spawned += 1;
    }
    state.spawn_timer += 1;

    if state.lives <= 0 {
        state.game_over = true;
    }
    outcome.ended = state.game_over;
    outcome
}

/// Bullets against tier-1, then surviving bullets against tier-2.
///
/// A bullet is spent on the first enemy it overlaps (in spawn order) and is
/// never tested again this frame. Removal is mark-and-compact so indices stay
/// stable during the scan.
fn resolve_collisions(state: &mut GameState, outcome: &mut StepOutcome) {
    let mut bullet_alive = vec![true; state.bullets.len()];
    let mut enemy_alive = vec![true; state.enemies.len()];
    let mut heavy_alive = vec![true; state.heavies.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let rect = bullet.rect();
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| enemy_alive[*ei] && overlaps(rect, enemy.rect()))
            .map(|(ei, _)| ei);
        if let Some(ei) = hit {
            bullet_alive[bi] = false;
            enemy_alive[ei] = false;
            state.score += 1;
            outcome.kills += 1;
        }
    }

    for (bi, bullet) in state.bullets.iter().enumerate() {
        if !bullet_alive[bi] {
            continue;
        }
        let rect = bullet.rect();
        let hit = state
            .heavies
            .iter()
            .enumerate()
            .find(|(hi, heavy)| heavy_alive[*hi] && overlaps(rect, heavy.rect()))
            .map(|(hi, _)| hi);
        if let Some(hi) = hit {
            bullet_alive[bi] = false;
            let heavy = &mut state.heavies[hi];
            heavy.health -= 1;
            if heavy.health <= 0 {
                heavy_alive[hi] = false;
                state.score += 1;
                outcome.kills += 1;
            } else {
                outcome.hits += 1;
            }
        }
    }

    compact(&mut state.bullets, &bullet_alive);
    compact(&mut state.enemies, &enemy_alive);
    compact(&mut state.heavies, &heavy_alive);
}

/// Move every enemy down; each one past the bottom edge costs a life
fn advance_enemies(state: &mut GameState, outcome: &mut StepOutcome) {
    let floor = state.playfield.height;
    let mut breaches = 0;

    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
    }
    state.enemies.retain(|e| {
        let escaped = e.pos.y > floor;
        breaches += escaped as u32;
        !escaped
    });

    for heavy in &mut state.heavies {
        heavy.pos.y += heavy.speed;
    }
    state.heavies.retain(|h| {
        let escaped = h.pos.y > floor;
        breaches += escaped as u32;
        !escaped
    });

    if breaches > 0 {
        state.lives -= breaches as i32;
        outcome.breaches = breaches;
        if state.lives <= 0 {
            state.game_over = true;
        }
    }
}

fn compact<T>(items: &mut Vec<T>, alive: &[bool]) {
    let mut flags = alive.iter();
    items.retain(|_| flags.next().copied().unwrap_or(true));
}
