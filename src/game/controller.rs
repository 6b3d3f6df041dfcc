//! The game controller.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::session::GameSession;
use super::template::{build_template, GameElements};
use crate::animation::{Sequencer, StepContext, Transfer, TransferKind, TransferPhase};
use crate::assets::ArtSet;
use crate::core::{CardValue, ElementId, GameConfig, GameError, GameRng, Result, SlotError, SlotIndex};
use crate::deck::{build_deck, Deck};
use crate::interaction::{resolve, NoopReason, PointerEvent, Resolution, ResolveContext};
use crate::layout::{layout_row, LayoutMode, LayoutPass};
use crate::slots::{SlotRow, SlotTracker};
use crate::surface::{Cursor, StyleProp, Surface};

/// Where a game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Cards are sliding into the row; input is latched.
    Dealing,
    /// Waiting for picks.
    Picking,
    /// Every slot is committed.
    Complete,
    /// Cards are returning to the deck or being re-dealt.
    Resetting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DealPurpose {
    Initial,
    Redeal,
}

/// One card-spread game mounted on a surface.
///
/// All state changes happen synchronously inside the public methods. The
/// page shell forwards pointer events to `handle_interaction` and calls
/// `pump` on every animation frame so suspended transfers and bulk layout
/// passes can resume.
pub struct CardGame<S: Surface> {
    surface: S,
    config: GameConfig,
    art: ArtSet,
    elements: GameElements,
    deck: Deck,
    slots: SlotRow,
    tracker: SlotTracker,
    session: GameSession,
    sequencer: Sequencer,
    deck_rng: GameRng,
    pick_rng: GameRng,
    deal: Option<(LayoutPass, DealPurpose)>,
    resetting: bool,
    pending_refresh: bool,
    pending_new_game: bool,
}

impl<S: Surface> CardGame<S> {
    /// Mount a game into `container` and start the initial deal.
    ///
    /// The card count is clamped to the number of loaded faces.
    pub fn new(mut surface: S, art: ArtSet, container: ElementId, mut config: GameConfig) -> Result<Self> {
        if !surface.contains(container) {
            warn!(%container, "game container not found, no game created");
            return Err(GameError::ContainerNotFound(container));
        }

        if config.number_of_cards > art.face_count() {
            warn!(
                requested = config.number_of_cards,
                available = art.face_count(),
                "not enough card faces, dealing fewer cards"
            );
            config.number_of_cards = art.face_count();
        }
        config.validate()?;

        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut deck_rng = rng.for_context("deck");
        let pick_rng = rng.for_context("pick");

        let slot_count = config.number_of_empty_slots;
        let elements = build_template(&mut surface, container, slot_count);
        let deck = build_deck(
            &mut surface,
            elements.cards_row,
            config.number_of_cards,
            art.back(),
            &mut deck_rng,
        );
        let slots = SlotRow::build(&mut surface, elements.slot_row, slot_count);

        let mut game = Self {
            surface,
            art,
            elements,
            deck,
            slots,
            tracker: SlotTracker::new(slot_count),
            session: GameSession::new(slot_count),
            sequencer: Sequencer::new(),
            deck_rng,
            pick_rng,
            deal: None,
            resetting: false,
            pending_refresh: false,
            pending_new_game: false,
            config,
        };

        game.layout_slots();
        game.start_deal(DealPurpose::Initial);

        info!(
            cards = game.config.number_of_cards,
            slots = slot_count,
            animation = %game.config.card_animation,
            seed = rng.seed(),
            "card game initialized"
        );
        Ok(game)
    }

    /// Resolve a pointer event and commit the transfer it asks for.
    pub fn handle_interaction(&mut self, event: PointerEvent) -> Resolution {
        let cx = ResolveContext {
            deck: &self.deck,
            slots: &self.slots,
            tracker: &self.tracker,
            animation_in_progress: self.session.animation_in_progress,
            remaining: self.session.remaining_slots,
        };
        let resolution = resolve(&event, &cx, &mut self.pick_rng);

        if let Resolution::Transfer { card, slot } = resolution {
            if let Err(err) = self.commit(card, slot) {
                warn!(%card, %slot, error = %err, "transfer rejected at commit");
                return Resolution::Noop(noop_reason(&err));
            }
        }
        resolution
    }

    /// Record the transfer, then start its animation.
    fn commit(&mut self, value: CardValue, slot: SlotIndex) -> Result<()> {
        let card = self.deck.card(value).cloned().ok_or(GameError::UnknownCard(value))?;
        let slot_element = self.slots.element(slot).ok_or(SlotError::OutOfRange {
            index: slot.0,
            len: self.slots.len(),
        })?;

        self.tracker.mark_occupied(slot)?;
        self.session.commit(value);
        self.deck.mark_chosen(value);
        self.slots.occupy(slot, value);
        debug!(card = %value, %slot, remaining = self.session.remaining_slots, "transfer committed");

        self.surface.set_class(card.element, "chosen-card");
        self.surface.set_style(card.element, StyleProp::Cursor(Cursor::Default));
        self.surface.set_style(slot_element, StyleProp::ZIndex(1));
        self.surface.set_style(slot_element, StyleProp::Cursor(Cursor::Default));

        let transfer = Transfer::forward(&card, slot, slot_element, self.config.card_animation);
        let mut cx = StepContext {
            surface: &mut self.surface,
            art: &self.art,
            game_root: self.elements.root,
            timings: &self.config.timings,
        };
        self.sequencer.start(transfer, &mut cx);
        Ok(())
    }

    /// Resume everything waiting on the surface.
    pub fn pump(&mut self) {
        let outcomes = {
            let mut cx = StepContext {
                surface: &mut self.surface,
                art: &self.art,
                game_root: self.elements.root,
                timings: &self.config.timings,
            };
            self.sequencer.poll(&mut cx)
        };

        for outcome in outcomes {
            match outcome.kind {
                TransferKind::Forward(_) => self.check_end_of_round(),
                TransferKind::Return => {
                    self.session.pop_chosen();
                    self.deck.mark_face_down(outcome.card);
                }
            }
        }

        let dealt = self
            .deal
            .as_ref()
            .is_some_and(|(pass, _)| pass.is_finished(&self.surface));
        if dealt {
            if let Some((_, purpose)) = self.deal.take() {
                self.finish_deal(purpose);
            }
        }

        if self.resetting && self.deal.is_none() && self.sequencer.is_idle() {
            self.redeal();
        }

        if self.pending_new_game && self.deal.is_none() && !self.sequencer.has_forward_in_flight() {
            self.pending_new_game = false;
            self.begin_reset();
        }
    }

    /// Reveal the controls once every slot is committed.
    pub fn check_end_of_round(&mut self) {
        if !self.session.round_complete() || self.session.controls_visible || self.resetting {
            return;
        }

        if let Some(submit) = self.elements.submit {
            self.surface.set_style(submit, StyleProp::Display(true));
        }
        if self.config.show_new_game_button {
            if let Some(new_game) = self.elements.new_game {
                self.surface.set_style(new_game, StyleProp::Display(true));
            }
        }
        self.session.controls_visible = true;
        info!(chosen = ?self.session.chosen_cards, "round complete");
    }

    /// Return every committed card to the deck and deal a fresh permutation.
    ///
    /// Runs once in-flight picks and the current deal have finished.
    pub fn new_game(&mut self) {
        if self.resetting || self.pending_new_game {
            debug!("new game already underway");
            return;
        }
        if self.deal.is_some() || self.sequencer.has_forward_in_flight() {
            debug!("new game deferred until animations finish");
            self.pending_new_game = true;
            return;
        }
        self.begin_reset();
    }

    fn begin_reset(&mut self) {
        self.set_controls_visible(false);
        self.resetting = true;
        self.session.animation_in_progress = true;

        let occupants: Vec<(SlotIndex, CardValue)> = self.slots.occupants().collect();
        info!(returning = occupants.len(), "new game started");

        for (slot, value) in occupants {
            let Some(card) = self.deck.card(value).cloned() else {
                continue;
            };
            let transfer = Transfer::back_to_deck(&card, slot, self.elements.cards_row);
            let mut cx = StepContext {
                surface: &mut self.surface,
                art: &self.art,
                game_root: self.elements.root,
                timings: &self.config.timings,
            };
            self.sequencer.start(transfer, &mut cx);
        }
    }

    fn redeal(&mut self) {
        self.surface.remove_children(self.elements.cards_row);
        self.deck = build_deck(
            &mut self.surface,
            self.elements.cards_row,
            self.config.number_of_cards,
            self.art.back(),
            &mut self.deck_rng,
        );
        self.start_deal(DealPurpose::Redeal);
    }

    fn start_deal(&mut self, purpose: DealPurpose) {
        self.session.animation_in_progress = true;
        let mode = LayoutMode::Animated {
            duration_ms: self.config.timings.deal_ms,
            stagger_ms: self.config.timings.deal_stagger_ms,
        };
        let cards = self.deck.face_down_elements();
        match layout_row(&mut self.surface, self.elements.cards_row, &cards, mode, self.config.timings.gap_px) {
            Some(pass) => self.deal = Some((pass, purpose)),
            None => self.finish_deal(purpose),
        }
    }

    fn finish_deal(&mut self, purpose: DealPurpose) {
        self.session.animation_in_progress = false;

        if purpose == DealPurpose::Redeal {
            let slot_count = self.slots.len();
            self.tracker.reset(slot_count);
            self.slots.clear_occupants();
            self.session.reset(slot_count);
            self.surface.set_style(self.elements.cards_row, StyleProp::ZIndex(0));
            self.resetting = false;
            info!(cards = self.deck.len(), "new game ready");
        } else {
            debug!(cards = self.deck.len(), "initial deal finished");
        }

        for &element in self.deck.face_down_elements().iter().chain(self.slots.elements()) {
            self.surface.set_style(element, StyleProp::Cursor(Cursor::Pointer));
        }

        if std::mem::take(&mut self.pending_refresh) {
            self.refresh_layout();
        }
    }

    /// Recompute slot and card positions without animating.
    ///
    /// Deferred while a deal holds the latch.
    pub fn refresh_layout(&mut self) {
        if self.deal.is_some() {
            debug!("layout refresh deferred until the deal finishes");
            self.pending_refresh = true;
            return;
        }
        self.layout_slots();
        let cards = self.deck.face_down_elements();
        layout_row(
            &mut self.surface,
            self.elements.cards_row,
            &cards,
            LayoutMode::Instant,
            self.config.timings.gap_px,
        );
    }

    fn layout_slots(&mut self) {
        layout_row(
            &mut self.surface,
            self.elements.slot_row,
            self.slots.elements(),
            LayoutMode::Instant,
            self.config.timings.gap_px,
        );
    }

    /// Revealed values in commit order, as handed to the page on submit.
    pub fn submit(&self) -> Vec<CardValue> {
        let chosen: Vec<CardValue> = self.session.chosen_cards.iter().copied().collect();
        info!(?chosen, complete = self.session.round_complete(), "spread submitted");
        chosen
    }

    fn set_controls_visible(&mut self, visible: bool) {
        for control in self.elements.submit.iter().chain(self.elements.new_game.iter()) {
            self.surface.set_style(*control, StyleProp::Display(visible));
        }
        self.session.controls_visible = visible;
    }

    #[must_use]
    pub fn chosen_cards(&self) -> &Vector<CardValue> {
        &self.session.chosen_cards
    }

    #[must_use]
    pub fn remaining_slots(&self) -> usize {
        self.session.remaining_slots
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn slots(&self) -> &SlotRow {
        &self.slots
    }

    #[must_use]
    pub fn tracker(&self) -> &SlotTracker {
        &self.tracker
    }

    #[must_use]
    pub fn elements(&self) -> &GameElements {
        &self.elements
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for the page shell (clock, viewport).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Phase of the transfer currently moving `card`.
    #[must_use]
    pub fn transfer_phase(&self, card: CardValue) -> Option<TransferPhase> {
        self.sequencer.phase(card)
    }

    /// Nothing is animating and nothing is queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.sequencer.is_idle() && self.deal.is_none() && !self.resetting && !self.pending_new_game
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.resetting || self.pending_new_game {
            RoundStatus::Resetting
        } else if self.deal.is_some() {
            RoundStatus::Dealing
        } else if self.session.round_complete() {
            RoundStatus::Complete
        } else {
            RoundStatus::Picking
        }
    }
}

/// Noop reported when a resolved transfer fails to commit.
fn noop_reason(err: &GameError) -> NoopReason {
    match err {
        GameError::Slot(SlotError::Occupied { .. }) => NoopReason::SlotTaken,
        _ => NoopReason::UnrecognizedTarget,
    }
}
