//! Turn resolution pipeline.
//!
//! ## Order
//!
//! 1. Double Time plays. A first play resolves alone and leaves the round
//!    open. A last play resolves alone, counts as the player's revealed Area
//!    card and removes the player from the rest of the round.
//! 2. Skipping players contribute nothing.
//! 3. Area and Boost cards. Every delta is computed against the same board,
//!    summed per cell, then applied with one add-and-clip per cell.
//! 4. Specials, A then B, after Jammer overrides.
//! 5. Due delayed effects fire.
//! 6. The turn advances.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::events::{Resolution, TurnEvent, TurnReport};
use super::selection::{PendingSelection, Selection};
use super::state::{DelayedEffect, GamePhase, MultiAction};
use super::turn::TurnEngine;
use crate::cards::special::{self, BOMB_FUSE, LAST_STAND_EARLY_CELLS, LOCK_REWARD, SPARK_POWER};
use crate::cards::{Card, PlayedCard, SpecialKind};
use crate::core::{PlayerId, PlayerMap, Position};

impl TurnEngine {
    /// Run the resolution pipeline if both players are ready.
    pub fn resolve_turn(&mut self) -> Resolution {
        if self.phase != GamePhase::Selecting || !self.are_both_players_ready() {
            trace!(phase = ?self.phase, "resolve_turn: not ready");
            return Resolution::NotReady;
        }
        self.phase = GamePhase::Resolving;
        let turn = self.current_turn;

        let advanced = self.resolve_first_plays();
        if !advanced.is_empty() {
            self.phase = GamePhase::Selecting;
            debug!(turn, ?advanced, "first multi-action play resolved");
            return Resolution::Partial { advanced };
        }

        let mut report = TurnReport {
            turn,
            ..TurnReport::default()
        };
        let mut revealed: PlayerMap<Option<PlayedCard>> = PlayerMap::default();
        let mut excluded: PlayerMap<bool> = PlayerMap::default();

        // Last Double Time plays.
        for player in PlayerId::BOTH {
            if !self.multi[player].awaiting_last() {
                continue;
            }
            let Some(pending) = self.pending[player].take() else {
                continue;
            };
            revealed[player] = self.play_isolated(player, pending);
            self.multi[player] = MultiAction::default();
            self.skip_next[player] = true;
            excluded[player] = true;
            report.played[player] = Some(pending.selection.card_id);
            self.history.push_back(TurnEvent::MultiActionStep {
                turn,
                player,
                card_id: pending.selection.card_id,
                remaining_plays: 0,
            });
            debug!(turn, %player, "multi-action finished, skipping next turn");
        }

        // Simultaneous Area/Boost phase.
        let mut deltas: FxHashMap<Position, i32> = FxHashMap::default();
        let mut specials: PlayerMap<Option<(SpecialKind, Selection)>> = PlayerMap::default();
        for player in PlayerId::BOTH {
            if excluded[player] || self.skipping[player] {
                continue;
            }
            let Some(pending) = self.pending[player].take() else {
                continue;
            };
            let selection = pending.selection;
            let Some(card) = self.consume(player, pending) else {
                continue;
            };
            report.played[player] = Some(card.id);
            if pending.misfire {
                continue;
            }

            if let Some(kind) = card.special_kind() {
                specials[player] = Some((kind, selection));
                continue;
            }

            let ctx = self.effect_context(player, &selection);
            let delta = card.signed_delta(player);
            for pos in card.affected_cells(&self.board, selection.target, player, &ctx) {
                *deltas.entry(pos).or_insert(0) += delta;
            }
            if card.is_area() {
                let played = PlayedCard {
                    card,
                    target: selection.target,
                    rotation: selection.rotation(),
                    direction: selection.direction(),
                };
                self.last_area[player] = Some(played.clone());
                revealed[player] = Some(played);
            }
        }
        trace!(turn, cells = deltas.len(), "applying summed deltas");
        for (pos, delta) in deltas {
            self.board.add_clipped(pos, delta);
        }

        self.resolve_specials(&specials, &revealed, &mut report);
        report.triggered = self.trigger_delayed(turn);

        self.end_turn();
        report.finished = self.is_finished();
        Resolution::Complete(report)
    }

    /// Advance to the next turn.
    ///
    /// Clears pending selections and moves next-round skip flags into
    /// place. Does nothing once the game is finished.
    pub fn end_turn(&mut self) {
        if self.phase == GamePhase::Finished {
            return;
        }
        let ended = self.current_turn;
        self.current_turn += 1;
        for player in PlayerId::BOTH {
            self.pending[player] = None;
            self.skipping[player] = self.skip_next[player];
            self.skip_next[player] = false;
        }
        self.history.push_back(TurnEvent::TurnEnded { turn: ended });

        if self.current_turn > self.config.total_turns {
            self.phase = GamePhase::Finished;
            let scores = self.final_scores();
            info!(
                turns = ended,
                score_a = scores[PlayerId::A].total,
                score_b = scores[PlayerId::B].total,
                "game finished"
            );
        } else {
            self.phase = GamePhase::Selecting;
            debug!(turn = self.current_turn, "turn started");
        }
    }

    fn resolve_first_plays(&mut self) -> SmallVec<[PlayerId; 2]> {
        let mut advanced = SmallVec::new();
        for player in PlayerId::BOTH {
            if !self.multi[player].awaiting_first() {
                continue;
            }
            let Some(pending) = self.pending[player].take() else {
                continue;
            };
            self.play_isolated(player, pending);

            let multi = &mut self.multi[player];
            multi.first_selection = Some(pending.selection);
            multi.remaining_plays -= 1;
            let remaining_plays = multi.remaining_plays;
            self.history.push_back(TurnEvent::MultiActionStep {
                turn: self.current_turn,
                player,
                card_id: pending.selection.card_id,
                remaining_plays,
            });
            advanced.push(player);
        }
        advanced
    }

    /// Mark the selected card used and record it. Returns the card.
    fn consume(&mut self, player: PlayerId, pending: PendingSelection) -> Option<Card> {
        let selection = pending.selection;
        let card = self.hands[player].get(selection.card_id).cloned()?;
        self.hands[player].mark_used(card.id);
        self.history.push_back(TurnEvent::Played {
            turn: self.current_turn,
            player,
            card_id: card.id,
            target: selection.target,
            misfire: pending.misfire,
        });
        if pending.misfire {
            debug!(%player, card = %card.id, "misfire consumed");
        }
        Some(card)
    }

    /// Consume and apply a card on its own, outside the summed phase.
    ///
    /// Returns the play when it was an Area card that took effect.
    fn play_isolated(&mut self, player: PlayerId, pending: PendingSelection) -> Option<PlayedCard> {
        let selection = pending.selection;
        let card = self.consume(player, pending)?;
        if pending.misfire {
            return None;
        }

        let ctx = self
            .base_context()
            .with_rotation(selection.rotation())
            .with_direction(selection.direction());
        card.apply_effect(&mut self.board, selection.target, player, &ctx);

        if !card.is_area() {
            return None;
        }
        let played = PlayedCard {
            card,
            target: selection.target,
            rotation: selection.rotation(),
            direction: selection.direction(),
        };
        self.last_area[player] = Some(played.clone());
        Some(played)
    }

    fn resolve_specials(
        &mut self,
        specials: &PlayerMap<Option<(SpecialKind, Selection)>>,
        revealed: &PlayerMap<Option<PlayedCard>>,
        report: &mut TurnReport,
    ) {
        let jammer = specials.map(|_, s| matches!(s, Some((SpecialKind::Jammer, _))));

        if jammer[PlayerId::A] && jammer[PlayerId::B] {
            debug!(turn = self.current_turn, "both players jammed");
            for player in PlayerId::BOTH {
                self.miss_penalty(player);
            }
            return;
        }

        for player in PlayerId::BOTH {
            let Some((kind, selection)) = specials[player] else {
                continue;
            };
            let opponent = player.opponent();

            if jammer[opponent] {
                report.suppressed[player] = true;
                self.history.push_back(TurnEvent::SpecialSuppressed {
                    turn: self.current_turn,
                    player,
                    card_id: selection.card_id,
                });
                debug!(%player, card = %selection.card_id, "special jammed");
                continue;
            }

            if kind == SpecialKind::Jammer {
                // Nothing to cancel: the jam backfires.
                if specials[opponent].is_none() {
                    self.miss_penalty(player);
                }
                continue;
            }

            self.resolve_special(player, kind, selection, revealed[opponent].as_ref());
        }
    }

    fn resolve_special(
        &mut self,
        player: PlayerId,
        kind: SpecialKind,
        selection: Selection,
        opponent_area: Option<&PlayedCard>,
    ) {
        let target = selection.target;
        trace!(%player, ?kind, %target, "resolving special");

        match kind {
            SpecialKind::Jammer => {}
            SpecialKind::Gamble => self.gamble(player, opponent_area),
            SpecialKind::DoubleTime => {
                let ctx = self.effect_context(player, &selection);
                if SpecialKind::double_time_degrades(&ctx) {
                    special::spark(&mut self.board, target, player);
                } else {
                    self.multi[player] = MultiAction::granted();
                    debug!(%player, "multi-action granted");
                }
            }
            SpecialKind::Echo => {
                let last = self.last_area[player].take();
                let ctx = self.base_context().with_last_area(last.as_ref());
                kind.apply_board_effect(&mut self.board, target, player, &ctx);
            }
            SpecialKind::TimeBomb => {
                let effect = DelayedEffect {
                    card_id: selection.card_id,
                    position: target,
                    owner: player,
                    installed_turn: self.current_turn,
                    trigger_turn: self.current_turn + BOMB_FUSE,
                };
                self.delayed.push(effect);
                self.history.push_back(TurnEvent::DelayedInstalled {
                    turn: self.current_turn,
                    effect,
                });
            }
            SpecialKind::InversionField => {
                let ctx = self.base_context();
                if ctx.reversal_window_open() {
                    self.snapshots
                        .insert((player, selection.card_id), self.board.clone());
                    self.history.push_back(TurnEvent::BoardInverted {
                        turn: self.current_turn,
                        player,
                        card_id: selection.card_id,
                    });
                    debug!(%player, "board inverted");
                }
                kind.apply_board_effect(&mut self.board, target, player, &ctx);
            }
            SpecialKind::LastStand => {
                let ctx = self.base_context();
                if ctx.is_endgame() {
                    kind.apply_board_effect(&mut self.board, target, player, &ctx);
                } else {
                    let owned = self.board.owned_cells(player);
                    if owned.is_empty() {
                        special::spark(&mut self.board, target, player);
                    }
                    for pos in self.rng.sample(&owned, LAST_STAND_EARLY_CELLS) {
                        self.board.add_clipped(pos, SPARK_POWER * player.sign());
                    }
                }
            }
            SpecialKind::TargetLock => self.target_lock(player, target, opponent_area),
        }
    }

    /// Copy the opponent's Area card with our sign, then neutralise one of
    /// the opponent's cells inside that pattern.
    fn gamble(&mut self, player: PlayerId, opponent_area: Option<&PlayedCard>) {
        let Some(copied) = opponent_area else {
            self.miss_penalty(player);
            return;
        };

        let ctx = self.base_context().replaying(copied);
        let cells = copied
            .card
            .affected_cells(&self.board, copied.target, player, &ctx);
        let delta = copied.card.signed_delta(player);
        for &pos in &cells {
            self.board.add_clipped(pos, delta);
        }

        let opponent = player.opponent();
        let stealable: Vec<Position> = cells
            .iter()
            .copied()
            .filter(|&p| self.board.is_owned_by(p, opponent))
            .collect();
        if let Some(&pos) = self.rng.choose(&stealable) {
            self.board.set_clipped(pos, 0);
            debug!(%player, %pos, "gamble neutralised a cell");
        }
    }

    fn target_lock(&mut self, player: PlayerId, target: Position, opponent_area: Option<&PlayedCard>) {
        if opponent_area.is_some_and(|played| played.target == target) {
            self.board.add_clipped(target, LOCK_REWARD * player.sign());
            debug!(%player, %target, "target lock hit");
            return;
        }

        let opponent = player.opponent();
        match self.board.owner_at(target) {
            Some(owner) if owner == player => {
                self.board.weaken(target);
            }
            Some(_) => {
                self.board.add_clipped(target, opponent.sign());
            }
            None => self.miss_penalty(player),
        }
    }

    /// Weaken up to `miss_penalty_cells` random cells `player` owns.
    fn miss_penalty(&mut self, player: PlayerId) {
        let owned = self.board.owned_cells(player);
        let picks = self.rng.sample(&owned, self.config.miss_penalty_cells);
        for &pos in &picks {
            self.board.weaken(pos);
        }
        debug!(%player, cells = picks.len(), "miss penalty");
        self.history.push_back(TurnEvent::MissPenalty {
            turn: self.current_turn,
            player,
            cells: picks.into_iter().collect(),
        });
    }

    fn trigger_delayed(&mut self, turn: u32) -> Vec<DelayedEffect> {
        let (due, waiting): (Vec<_>, Vec<_>) = self.delayed.drain(..).partition(|e| e.is_due(turn));
        self.delayed = waiting;

        for effect in &due {
            special::detonate(&mut self.board, effect.position, effect.owner);
            self.history.push_back(TurnEvent::DelayedTriggered { turn, effect: *effect });
            debug!(turn, owner = %effect.owner, position = %effect.position, "delayed effect fired");
        }
        due
    }
}
