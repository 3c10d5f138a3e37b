//! Fade-and-rise entrance for content cards, fired once per card.

use serde::Serialize;
use shared::{
    domain::{CardCategory, CardId, Rect},
    markup::CardMarkup,
};
use tracing::debug;

use crate::viewport::{IntersectionOptions, Viewport};

pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease-out, transform 0.6s ease-out";
const HIDDEN_OFFSET_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_y: f64,
    pub transition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevealCard {
    pub category: CardCategory,
    pub rect: Rect,
    pub style: RevealStyle,
    pub observed: bool,
}

impl RevealCard {
    pub fn is_revealed(&self) -> bool {
        self.style.opacity >= 1.0
    }
}

#[derive(Debug)]
pub struct ScrollReveal {
    options: IntersectionOptions,
    /// Indexed like the page's card list; cards outside the reveal categories are `None`.
    cards: Vec<Option<RevealCard>>,
}

impl ScrollReveal {
    /// Hides every card of a reveal category until it scrolls into view.
    /// Without intersection observation the cards keep their natural style and
    /// are never watched.
    pub fn init(
        markup: &[CardMarkup],
        options: IntersectionOptions,
        observer_available: bool,
    ) -> Self {
        let style = if observer_available {
            RevealStyle {
                opacity: 0.0,
                translate_y: HIDDEN_OFFSET_PX,
                transition: REVEAL_TRANSITION,
            }
        } else {
            debug!("intersection observation unavailable; scroll reveal disabled");
            RevealStyle {
                opacity: 1.0,
                translate_y: 0.0,
                transition: "",
            }
        };
        let cards = markup
            .iter()
            .map(|card| {
                CardCategory::from_class(&card.class).map(|category| RevealCard {
                    category,
                    rect: card.rect,
                    style,
                    observed: observer_available,
                })
            })
            .collect();
        Self { options, cards }
    }

    pub fn card(&self, id: CardId) -> Option<&RevealCard> {
        self.cards.get(id.index())?.as_ref()
    }

    pub fn cards(&self) -> impl Iterator<Item = (CardId, &RevealCard)> {
        self.cards
            .iter()
            .enumerate()
            .filter_map(|(index, card)| card.as_ref().map(|card| (CardId(index), card)))
    }

    /// Reveals every still-observed card now intersecting; returns the newly revealed ids.
    pub fn on_viewport_change(&mut self, viewport: &Viewport) -> Vec<CardId> {
        let mut revealed = Vec::new();
        for (index, slot) in self.cards.iter_mut().enumerate() {
            let Some(card) = slot.as_mut() else {
                continue;
            };
            if !card.observed || !self.options.is_intersecting(&card.rect, viewport) {
                continue;
            }
            card.style.opacity = 1.0;
            card.style.translate_y = 0.0;
            card.observed = false;
            revealed.push(CardId(index));
        }
        if !revealed.is_empty() {
            debug!(count = revealed.len(), "cards revealed");
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> IntersectionOptions {
        IntersectionOptions {
            threshold: 0.1,
            bottom_margin: 50.0,
        }
    }

    fn card(class: &str, top: f64) -> CardMarkup {
        CardMarkup {
            class: class.to_string(),
            rect: Rect::new(top, 300.0),
        }
    }

    #[test]
    fn only_known_categories_are_prepared() {
        let reveal = ScrollReveal::init(
            &[card("program-card", 1200.0), card("hero-banner", 1200.0)],
            options(),
            true,
        );
        let prepared = reveal.card(CardId(0)).expect("program card");
        assert_eq!(prepared.style.opacity, 0.0);
        assert_eq!(prepared.style.translate_y, 20.0);
        assert_eq!(prepared.style.transition, REVEAL_TRANSITION);
        assert!(reveal.card(CardId(1)).is_none());
    }

    #[test]
    fn reveals_once_and_never_resets() {
        let mut reveal = ScrollReveal::init(&[card("news-card", 1200.0)], options(), true);
        let mut viewport = Viewport::new(1280.0, 800.0);

        assert!(reveal.on_viewport_change(&viewport).is_empty());

        viewport.scroll_y = 600.0;
        assert_eq!(reveal.on_viewport_change(&viewport), vec![CardId(0)]);

        viewport.scroll_y = 0.0;
        assert!(reveal.on_viewport_change(&viewport).is_empty());
        viewport.scroll_y = 600.0;
        assert!(reveal.on_viewport_change(&viewport).is_empty());

        let card = reveal.card(CardId(0)).expect("card");
        assert!(card.is_revealed());
        assert!(!card.observed);
        assert_eq!(card.style.translate_y, 0.0);
    }

    #[test]
    fn without_observation_cards_stay_visible_and_unwatched() {
        let mut reveal = ScrollReveal::init(&[card("stat-card", 100.0)], options(), false);
        let stat = reveal.card(CardId(0)).expect("stat card");
        assert!(stat.is_revealed());
        assert_eq!(stat.style.translate_y, 0.0);
        assert!(!stat.observed);

        let viewport = Viewport::new(1280.0, 800.0);
        assert!(reveal.on_viewport_change(&viewport).is_empty());
    }
}
